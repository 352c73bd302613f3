//! CLI Tooling
//!
//! Command-line surface over the profile store and the workspace manager.

pub mod cli;
pub mod render;
