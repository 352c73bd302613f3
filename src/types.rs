//! Core Types
//!
//! Data model shared by the profile store, the REST client, and the CLI.
//! Serde renames keep the on-disk profile schema and the server's wire
//! schema exact (camelCase, as the server emits and expects).

use serde::{Deserialize, Serialize};

/// A saved connection profile for one orchestration server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub url: String,
    pub port: u16,
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
}

/// A curated sample project definition, read-only from the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "gitUrl")]
    pub git_url: String,
}

/// Git repository descriptor inside a project source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub url: String,
    pub branch: String,
    pub id: String,
    pub name: String,
    pub owner: String,
    pub sha: String,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    pub repository: Repository,
}

/// One project within a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub source: Source,
    #[serde(rename = "envVars", default)]
    pub env_vars: serde_json::Map<String, serde_json::Value>,
}

/// A remote development environment instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub info: String,
}

/// Provider metadata attached to a deployment target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A deployment target offered by the server. Fetched transiently for
/// interactive selection, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    #[serde(rename = "isDefault", default)]
    pub is_default: bool,
    /// Opaque provider options; may be JSON or an error message.
    #[serde(default)]
    pub options: String,
    #[serde(rename = "providerInfo")]
    pub provider_info: ProviderInfo,
}

/// Caller-facing workspace creation parameters.
#[derive(Debug, Clone)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    pub git_url: String,
    /// Deployment target name; the client substitutes `"default"` when absent.
    pub target: Option<String>,
}

/// The document actually POSTed to `/workspace`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWorkspaceDto {
    pub id: String,
    pub name: String,
    pub projects: Vec<Project>,
    pub target: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serializes_with_camel_case_keys() {
        let profile = Profile {
            name: "dev".to_string(),
            url: "localhost".to_string(),
            port: 3986,
            api_key: "secret".to_string(),
            is_default: true,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["apiKey"], "secret");
        assert_eq!(json["isDefault"], true);
        assert!(json.get("api_key").is_none());
    }

    #[test]
    fn workspace_tolerates_missing_optional_fields() {
        let ws: Workspace = serde_json::from_str(r#"{"id":"abc","name":"repo"}"#).unwrap();
        assert!(ws.projects.is_empty());
        assert_eq!(ws.target, "");
        assert_eq!(ws.info, "");
    }

    #[test]
    fn target_parses_provider_info() {
        let target: Target = serde_json::from_str(
            r#"{"name":"local","isDefault":true,"options":"{}","providerInfo":{"name":"docker-provider","version":"0.2"}}"#,
        )
        .unwrap();
        assert!(target.is_default);
        assert_eq!(target.provider_info.name, "docker-provider");
        assert_eq!(target.provider_info.label, None);
    }
}
