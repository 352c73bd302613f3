//! Text and JSON renderings of the server collections.
//!
//! Text mode is for humans at a terminal; JSON mode is a stable envelope
//! (`{"total": N, "<kind>": [...]}`) for scripts.

use crate::error::ApiError;
use crate::types::{Profile, Sample, Target, Workspace};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Profile listing entry; the API key never appears in list output.
#[derive(Serialize)]
struct ProfileEntry {
    name: String,
    url: String,
    port: u16,
    #[serde(rename = "isDefault")]
    is_default: bool,
}

#[derive(Serialize)]
struct ProfileListOutput {
    total: usize,
    profiles: Vec<ProfileEntry>,
}

#[derive(Serialize)]
struct WorkspaceListOutput<'a> {
    total: usize,
    workspaces: &'a [Workspace],
}

#[derive(Serialize)]
struct SampleListOutput<'a> {
    total: usize,
    samples: &'a [Sample],
}

#[derive(Serialize)]
struct TargetListOutput<'a> {
    total: usize,
    targets: &'a [Target],
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::Config(format!("failed to encode output: {}", e)))
}

pub fn format_profile_list(profiles: &[Profile], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(&ProfileListOutput {
            total: profiles.len(),
            profiles: profiles
                .iter()
                .map(|p| ProfileEntry {
                    name: p.name.clone(),
                    url: p.url.clone(),
                    port: p.port,
                    is_default: p.is_default,
                })
                .collect(),
        });
    }
    if profiles.is_empty() {
        return Ok(
            "No profiles found. To get started, run `orbit profile add <name>`.".to_string(),
        );
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["NAME", "URL", "PORT", "DEFAULT"]);
    for p in profiles {
        let name = if p.is_default {
            p.name.bold().to_string()
        } else {
            p.name.clone()
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(&p.url),
            Cell::new(p.port),
            Cell::new(if p.is_default { "*" } else { "" }),
        ]);
    }
    Ok(table.to_string())
}

/// Single-profile detail. The API key stays masked unless the caller asked
/// to reveal it.
pub fn format_profile_detail(
    profile: &Profile,
    reveal: bool,
    format: &str,
) -> Result<String, ApiError> {
    let key = if reveal {
        profile.api_key.clone()
    } else {
        "********".to_string()
    };
    if format == "json" {
        return to_json(&serde_json::json!({
            "name": profile.name,
            "url": profile.url,
            "port": profile.port,
            "apiKey": key,
            "isDefault": profile.is_default,
        }));
    }
    Ok(format!(
        "Name:    {}\nURL:     {}\nPort:    {}\nAPI key: {}\nDefault: {}",
        profile.name, profile.url, profile.port, key, profile.is_default
    ))
}

pub fn format_workspace_list(workspaces: &[Workspace], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(&WorkspaceListOutput {
            total: workspaces.len(),
            workspaces,
        });
    }
    if workspaces.is_empty() {
        return Ok("No workspaces found.".to_string());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["NAME", "ID", "TARGET", "PROJECTS"]);
    for w in workspaces {
        let projects = if w.projects.is_empty() {
            "-".to_string()
        } else {
            w.projects
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![&w.name, &w.id, &w.target, &projects]);
    }
    Ok(table.to_string())
}

pub fn format_sample_list(samples: &[Sample], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(&SampleListOutput {
            total: samples.len(),
            samples,
        });
    }
    if samples.is_empty() {
        return Ok("No samples found.".to_string());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["NAME", "DESCRIPTION", "GIT URL"]);
    for s in samples {
        table.add_row(vec![&s.name, &s.description, &s.git_url]);
    }
    Ok(table.to_string())
}

pub fn format_target_list(targets: &[Target], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(&TargetListOutput {
            total: targets.len(),
            targets,
        });
    }
    if targets.is_empty() {
        return Ok("No targets found.".to_string());
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["NAME", "DEFAULT", "PROVIDER"]);
    for t in targets {
        table.add_row(vec![
            Cell::new(&t.name),
            Cell::new(if t.is_default { "*" } else { "" }),
            Cell::new(format!(
                "{} ({})",
                t.provider_info.name, t.provider_info.version
            )),
        ]);
    }
    Ok(table.to_string())
}

/// Static documentation and support links.
pub fn format_docs_links() -> String {
    [
        ("Documentation", "https://orbit-ws.github.io/docs"),
        ("Getting Started", "https://orbit-ws.github.io/docs/getting-started"),
        ("GitHub Repository", "https://github.com/orbit-ws/orbit"),
        ("Report Issue", "https://github.com/orbit-ws/orbit/issues/new"),
    ]
    .iter()
    .map(|(label, url)| format!("{:<18} {}", label, url))
    .collect::<Vec<_>>()
    .join("\n")
}
