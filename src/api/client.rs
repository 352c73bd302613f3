//! Typed HTTP façade over one profile's server endpoint.
//!
//! Every call runs through the same classification: an HTTP error response
//! is mapped by status, a request that never got a response is a
//! connectivity failure, and a request that could not be built is a
//! configuration failure. The classified error is shown to the user through
//! the [`Notifier`] and then propagated; both always happen.

use crate::error::ApiError;
use crate::types::{
    CreateWorkspaceDto, CreateWorkspaceRequest, Profile, Project, Repository, Sample, Source,
    Target, Workspace, WorkspaceResponse,
};
use crate::views::Notifier;
use rand::Rng;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const WORKSPACE_ID_LEN: usize = 12;
const WORKSPACE_ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Bind a client to a resolved profile.
    pub fn new(profile: &Profile, notifier: Arc<dyn Notifier>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                let err = ApiError::RequestConfiguration(e.to_string());
                notifier.error(&err.to_string());
                err
            })?;
        Ok(Self {
            http,
            base_url: format!("http://{}:{}", profile.url, profile.port),
            api_key: profile.api_key.clone(),
            notifier,
        })
    }

    /// `GET /sample`
    pub async fn list_samples(&self) -> Result<Vec<Sample>, ApiError> {
        self.get_list("/sample").await
    }

    /// `GET /workspace`
    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        self.get_list("/workspace").await
    }

    /// `GET /target`
    pub async fn list_targets(&self) -> Result<Vec<Target>, ApiError> {
        self.get_list("/target").await
    }

    /// `POST /workspace`. Input is validated locally before any network
    /// round-trip; the single-project document is synthesized here (the
    /// server derives real repository metadata from the git URL).
    pub async fn create_workspace(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<WorkspaceResponse, ApiError> {
        let git_url = validate_create_request(request).map_err(|e| self.notify(e))?;
        let target = request.target.clone().unwrap_or_else(|| "default".to_string());
        let dto = build_create_dto(&request.name, &git_url, &target);
        tracing::debug!(name = %dto.name, target = %dto.target, "creating workspace");

        let response = self
            .http
            .post(self.endpoint("/workspace"))
            .bearer_auth(&self.api_key)
            .json(&dto)
            .send()
            .await
            .map_err(|e| self.notify(classify_transport(e)))?;
        let response = self.check(response).await?;
        self.decode(response).await
    }

    /// `DELETE /workspace/:id[?force=true]`
    pub async fn delete_workspace(&self, id: &str, force: bool) -> Result<(), ApiError> {
        tracing::debug!(workspace = %id, force, "deleting workspace");
        let mut request = self
            .http
            .delete(self.endpoint(&format!("/workspace/{}", id)))
            .bearer_auth(&self.api_key);
        if force {
            request = request.query(&[("force", "true")]);
        }
        let response = request
            .send()
            .await
            .map_err(|e| self.notify(classify_transport(e)))?;
        self.check(response).await?;
        Ok(())
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let response = self
            .http
            .get(self.endpoint(path))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| self.notify(classify_transport(e)))?;
        let response = self.check(response).await?;
        self.decode(response).await
    }

    /// Map a non-success response to the error taxonomy, preferring the
    /// server's own message.
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);
        let message = extract_message(&body);
        tracing::warn!(status = status.as_u16(), %message, "API error response");
        Err(self.notify(classify_status(status.as_u16(), message)))
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| self.notify(ApiError::Connectivity(format!("malformed server response: {}", e))))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn notify(&self, err: ApiError) -> ApiError {
        self.notifier.error(&err.to_string());
        err
    }
}

/// Local pre-flight validation; failures never touch the network.
fn validate_create_request(request: &CreateWorkspaceRequest) -> Result<String, ApiError> {
    if request.name.trim().is_empty() {
        return Err(ApiError::Validation("workspace name is required".to_string()));
    }
    let git_url = request.git_url.trim();
    if git_url.is_empty() {
        return Err(ApiError::Validation(
            "git repository URL is required".to_string(),
        ));
    }
    if !git_url.contains('/') {
        return Err(ApiError::Validation(
            "invalid git repository URL format".to_string(),
        ));
    }
    Ok(git_url.to_string())
}

/// Synthesize the single-project creation document. The repository fields
/// other than the URL are fixed placeholders the server overwrites with
/// metadata it derives itself.
fn build_create_dto(name: &str, git_url: &str, target: &str) -> CreateWorkspaceDto {
    let id = generate_workspace_id();
    CreateWorkspaceDto {
        id: id.clone(),
        name: name.to_string(),
        projects: vec![Project {
            name: "project1".to_string(),
            source: Source {
                repository: Repository {
                    url: git_url.to_string(),
                    branch: "main".to_string(),
                    id,
                    name: "my-repo".to_string(),
                    owner: "my-org".to_string(),
                    sha: "123".to_string(),
                    source: "github".to_string(),
                },
            },
            env_vars: serde_json::Map::new(),
        }],
        target: target.to_string(),
    }
}

/// Random 12-character lowercase base-36 token. Not a secret.
fn generate_workspace_id() -> String {
    let mut rng = rand::thread_rng();
    (0..WORKSPACE_ID_LEN)
        .map(|_| WORKSPACE_ID_CHARSET[rng.gen_range(0..WORKSPACE_ID_CHARSET.len())] as char)
        .collect()
}

fn classify_status(status: u16, message: String) -> ApiError {
    match status {
        400 => ApiError::Validation(message),
        401 => ApiError::Authentication("please check your API key".to_string()),
        409 => ApiError::Conflict("a workspace with this name already exists".to_string()),
        _ => ApiError::Http { status, message },
    }
}

fn classify_transport(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::RequestConfiguration(err.to_string())
    } else {
        ApiError::Connectivity(err.to_string())
    }
}

/// Server error payloads carry either `message` or `error`.
fn extract_message(body: &serde_json::Value) -> String {
    body.get("message")
        .or_else(|| body.get("error"))
        .and_then(|v| v.as_str())
        .unwrap_or("unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct RecordingNotifier {
        errors: Mutex<Vec<String>>,
    }

    impl RecordingNotifier {
        fn new() -> Self {
            Self {
                errors: Mutex::new(Vec::new()),
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn info(&self, _message: &str) {}
        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }

    fn request(name: &str, git_url: &str) -> CreateWorkspaceRequest {
        CreateWorkspaceRequest {
            name: name.to_string(),
            git_url: git_url.to_string(),
            target: None,
        }
    }

    #[test]
    fn classification_by_status() {
        assert!(matches!(
            classify_status(400, "bad input".to_string()),
            ApiError::Validation(m) if m == "bad input"
        ));
        assert!(matches!(
            classify_status(401, "x".to_string()),
            ApiError::Authentication(_)
        ));
        let conflict = classify_status(409, "x".to_string());
        assert!(conflict.to_string().contains("already exists"));
        assert!(matches!(
            classify_status(503, "down".to_string()),
            ApiError::Http { status: 503, message } if message == "down"
        ));
    }

    #[test]
    fn message_extraction_prefers_message_then_error() {
        assert_eq!(
            extract_message(&json!({"message": "a", "error": "b"})),
            "a"
        );
        assert_eq!(extract_message(&json!({"error": "b"})), "b");
        assert_eq!(extract_message(&json!({})), "unknown error");
        assert_eq!(extract_message(&serde_json::Value::Null), "unknown error");
    }

    #[test]
    fn workspace_id_is_twelve_lowercase_base36_chars() {
        let id = generate_workspace_id();
        assert_eq!(id.len(), 12);
        assert!(id
            .bytes()
            .all(|b| WORKSPACE_ID_CHARSET.contains(&b)));
    }

    #[test]
    fn create_dto_carries_fixed_placeholders() {
        let dto = build_create_dto("repo", "https://github.com/user/repo.git", "default");
        assert_eq!(dto.projects.len(), 1);
        let project = &dto.projects[0];
        assert_eq!(project.name, "project1");
        assert!(project.env_vars.is_empty());
        let repo = &project.source.repository;
        assert_eq!(repo.branch, "main");
        assert_eq!(repo.name, "my-repo");
        assert_eq!(repo.owner, "my-org");
        assert_eq!(repo.sha, "123");
        assert_eq!(repo.source, "github");
        assert_eq!(repo.id, dto.id);

        let wire = serde_json::to_value(&dto).unwrap();
        assert!(wire["projects"][0]["envVars"].is_object());
        assert_eq!(wire["target"], "default");
    }

    #[test]
    fn create_request_validation() {
        assert!(matches!(
            validate_create_request(&request("", "https://github.com/u/r")),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_create_request(&request("ws", "   ")),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            validate_create_request(&request("ws", "no-slash-here")),
            Err(ApiError::Validation(_))
        ));
        assert_eq!(
            validate_create_request(&request("ws", "  https://github.com/u/r  ")).unwrap(),
            "https://github.com/u/r"
        );
    }

    #[tokio::test]
    async fn empty_git_url_fails_before_any_network_call() {
        let notifier = Arc::new(RecordingNotifier::new());
        // Unroutable profile: a network attempt would classify differently.
        let profile = Profile {
            name: "test".to_string(),
            url: "203.0.113.1".to_string(),
            port: 9,
            api_key: "key".to_string(),
            is_default: true,
        };
        let client = ApiClient::new(&profile, notifier.clone()).unwrap();
        let err = client.create_workspace(&request("ws", "")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        // The notification side effect fired alongside the propagated error.
        assert_eq!(notifier.errors.lock().unwrap().len(), 1);
    }
}
