//! Orbit CLI - profiles, workspaces, samples, and targets.
//!
//! Thin dispatch over the profile store and the workspace manager.
//! Interactive prompts (input boxes, confirmations, the target picker) live
//! here; the library layers below stay prompt-free.

use crate::error::ApiError;
use crate::logging::LoggingOptions;
use crate::profile::ProfileStore;
use crate::tooling::render;
use crate::types::{CreateWorkspaceRequest, Profile, Target};
use crate::views::{ConsoleNotifier, LoggingObserver, Notifier};
use crate::workspace::{TargetPicker, WorkspaceManager};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password, Select};
use std::path::PathBuf;
use std::sync::Arc;

/// Orbit CLI - manage remote development workspaces
#[derive(Parser)]
#[command(name = "orbit")]
#[command(about = "Manage remote development workspaces on a self-hosted orchestration server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Profile configuration file (overrides the per-user default)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn logging_options(&self) -> LoggingOptions {
        LoggingOptions {
            level: self
                .log_level
                .clone()
                .or_else(|| self.verbose.then(|| "debug".to_string())),
            format: self.log_format.clone(),
            output: self.log_output.clone(),
            file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage server connection profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Browse, create, and delete workspaces
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },
    /// Browse curated samples and create workspaces from them
    Sample {
        #[command(subcommand)]
        command: SampleCommands,
    },
    /// Browse deployment targets
    Target {
        #[command(subcommand)]
        command: TargetCommands,
    },
    /// Show documentation and support links
    Docs,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Add a new profile
    Add {
        /// Profile name
        name: String,
        /// Server URL or hostname
        #[arg(long)]
        url: Option<String>,
        /// Server port
        #[arg(long)]
        port: Option<u16>,
        /// API key
        #[arg(long)]
        api_key: Option<String>,
        /// Make this profile the default
        #[arg(long)]
        default: bool,
        /// Fail instead of prompting for missing values
        #[arg(long)]
        non_interactive: bool,
    },
    /// List all profiles
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show profile details
    Show {
        /// Profile name
        name: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Print the API key instead of masking it
        #[arg(long)]
        reveal: bool,
    },
    /// Make a profile the default
    SetDefault {
        /// Profile name
        name: String,
    },
    /// Remove a profile
    Remove {
        /// Profile name
        name: String,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Print the profile configuration file path
    Path,
}

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// List workspaces on the default profile's server
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create a workspace from a git repository
    Create {
        /// Git repository URL
        git_url: String,
        /// Workspace name (default: derived from the repository URL)
        #[arg(long)]
        name: Option<String>,
        /// Deployment target (default: interactive selection)
        #[arg(long)]
        target: Option<String>,
    },
    /// Delete a workspace by name
    Delete {
        /// Workspace name
        name: String,
        /// Force server-side deletion
        #[arg(long)]
        force: bool,
        /// Skip confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SampleCommands {
    /// List curated samples
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Create a workspace from a sample
    Create {
        /// Sample name
        name: String,
        /// Deployment target (default: interactive selection)
        #[arg(long)]
        target: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum TargetCommands {
    /// List deployment targets
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Interactive target picker backed by dialoguer.
pub struct DialoguerTargetPicker;

impl TargetPicker for DialoguerTargetPicker {
    fn pick(&self, targets: &[Target]) -> Result<Option<usize>, ApiError> {
        let items: Vec<String> = targets
            .iter()
            .map(|t| {
                let marker = if t.is_default { " (default)" } else { "" };
                format!(
                    "{}{}  [provider: {} ({})]",
                    t.name, marker, t.provider_info.name, t.provider_info.version
                )
            })
            .collect();
        Select::new()
            .with_prompt("Select a target for the workspace")
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| ApiError::Config(format!("failed to get user input: {}", e)))
    }
}

/// CLI context: resolved profile file path plus the seams every command
/// shares.
pub struct CliContext {
    config_path: PathBuf,
    notifier: Arc<dyn Notifier>,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config_path = match config_path {
            Some(p) => p,
            None => ProfileStore::default_path()?,
        };
        Ok(Self {
            config_path,
            notifier: Arc::new(ConsoleNotifier),
        })
    }

    fn store(&self) -> ProfileStore {
        ProfileStore::new(self.config_path.clone()).with_observer(Arc::new(LoggingObserver))
    }

    fn manager(&self) -> WorkspaceManager {
        WorkspaceManager::new(
            self.store(),
            Arc::new(DialoguerTargetPicker),
            self.notifier.clone(),
        )
        .with_observer(Arc::new(LoggingObserver))
    }

    /// Execute a CLI command, returning the text to print on success.
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Profile { command } => self.handle_profile_command(command).await,
            Commands::Workspace { command } => self.handle_workspace_command(command).await,
            Commands::Sample { command } => self.handle_sample_command(command).await,
            Commands::Target { command } => self.handle_target_command(command).await,
            Commands::Docs => Ok(render::format_docs_links()),
        }
    }

    async fn handle_profile_command(&self, command: &ProfileCommands) -> Result<String, ApiError> {
        let store = self.store();
        match command {
            ProfileCommands::Add {
                name,
                url,
                port,
                api_key,
                default,
                non_interactive,
            } => {
                let (url, port, api_key) = if *non_interactive {
                    (
                        url.clone().ok_or_else(|| {
                            ApiError::Config(
                                "server URL is required in non-interactive mode; use --url"
                                    .to_string(),
                            )
                        })?,
                        port.ok_or_else(|| {
                            ApiError::Config(
                                "port is required in non-interactive mode; use --port".to_string(),
                            )
                        })?,
                        api_key.clone().ok_or_else(|| {
                            ApiError::Config(
                                "API key is required in non-interactive mode; use --api-key"
                                    .to_string(),
                            )
                        })?,
                    )
                } else {
                    prompt_profile_fields(url.clone(), *port, api_key.clone())?
                };

                store.add(Profile {
                    name: name.clone(),
                    url,
                    port,
                    api_key,
                    is_default: false,
                })?;
                if *default {
                    store.set_default(name)?;
                }
                Ok(format!("Profile \"{}\" added", name))
            }
            ProfileCommands::List { format } => {
                render::format_profile_list(&store.list()?, format)
            }
            ProfileCommands::Show {
                name,
                format,
                reveal,
            } => {
                let profile = store
                    .get_by_name(name)?
                    .ok_or_else(|| ApiError::ProfileNotFound(name.clone()))?;
                render::format_profile_detail(&profile, *reveal, format)
            }
            ProfileCommands::SetDefault { name } => {
                let profile = store.set_default(name)?;
                Ok(format!("Set \"{}\" as default profile", profile.name))
            }
            ProfileCommands::Remove { name, force } => {
                if !force && !confirm_deletion("profile", name)? {
                    return Ok("Removal cancelled".to_string());
                }
                store.delete_by_name(name)?;
                Ok(format!("Profile \"{}\" deleted successfully", name))
            }
            ProfileCommands::Path => Ok(store.config_path().display().to_string()),
        }
    }

    async fn handle_workspace_command(
        &self,
        command: &WorkspaceCommands,
    ) -> Result<String, ApiError> {
        let manager = self.manager();
        match command {
            WorkspaceCommands::List { format } => {
                render::format_workspace_list(&manager.list_workspaces().await?, format)
            }
            WorkspaceCommands::Create {
                git_url,
                name,
                target,
            } => {
                let response = match name {
                    // An explicit name skips uniqueness probing; the server
                    // rejects clashes with 409.
                    Some(name) => {
                        manager
                            .create_workspace(CreateWorkspaceRequest {
                                name: name.clone(),
                                git_url: git_url.clone(),
                                target: target.clone(),
                            })
                            .await?
                    }
                    None => manager.create_from_git(git_url, None, target.clone()).await?,
                };
                Ok(format!(
                    "Workspace \"{}\" created successfully",
                    response.name
                ))
            }
            WorkspaceCommands::Delete { name, force, yes } => {
                let workspace = manager.find_workspace(name).await?;
                if !yes && !confirm_deletion("workspace", &workspace.name)? {
                    return Ok("Removal cancelled".to_string());
                }
                manager.delete_workspace(&workspace.id, *force).await?;
                Ok(format!(
                    "Workspace \"{}\" deleted successfully",
                    workspace.name
                ))
            }
        }
    }

    async fn handle_sample_command(&self, command: &SampleCommands) -> Result<String, ApiError> {
        let manager = self.manager();
        match command {
            SampleCommands::List { format } => {
                render::format_sample_list(&manager.list_samples().await?, format)
            }
            SampleCommands::Create { name, target } => {
                let samples = manager.list_samples().await?;
                let sample = samples
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(name))
                    .ok_or_else(|| {
                        ApiError::Validation(format!("no sample named \"{}\" on the server", name))
                    })?;
                let response = manager.create_from_sample(sample, target.clone()).await?;
                Ok(format!(
                    "Sample workspace \"{}\" created successfully",
                    response.name
                ))
            }
        }
    }

    async fn handle_target_command(&self, command: &TargetCommands) -> Result<String, ApiError> {
        match command {
            TargetCommands::List { format } => {
                render::format_target_list(&self.manager().list_targets().await?, format)
            }
        }
    }
}

/// Prompt for any profile fields the flags did not cover. Defaults mirror a
/// stock server install.
fn prompt_profile_fields(
    url: Option<String>,
    port: Option<u16>,
    api_key: Option<String>,
) -> Result<(String, u16, String), ApiError> {
    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Server URL")
            .default("localhost".to_string())
            .interact_text()
            .map_err(|e| ApiError::Config(format!("failed to get user input: {}", e)))?,
    };
    let port = match port {
        Some(p) => p,
        None => Input::<u16>::new()
            .with_prompt("Port")
            .default(3986)
            .interact_text()
            .map_err(|e| ApiError::Config(format!("failed to get user input: {}", e)))?,
    };
    let api_key = match api_key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .map_err(|e| ApiError::Config(format!("failed to get user input: {}", e)))?,
    };
    Ok((url, port, api_key))
}

fn confirm_deletion(kind: &str, name: &str) -> Result<bool, ApiError> {
    Confirm::new()
        .with_prompt(format!(
            "Are you sure you want to delete the {} \"{}\"?",
            kind, name
        ))
        .default(false)
        .interact()
        .map_err(|e| ApiError::Config(format!("failed to get user input: {}", e)))
}
