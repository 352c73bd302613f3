//! Workspace orchestration: name derivation, target selection, and the
//! creation/deletion flows composed over the REST client.

pub mod manager;
pub mod naming;

pub use manager::{TargetPicker, WorkspaceManager};
pub use naming::{extract_repo_name, generate_unique_name};
