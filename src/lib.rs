//! Orbit: manage remote development workspaces on a self-hosted
//! orchestration server.
//!
//! The crate is organized around three layers:
//! - [`profile`]: persistent store of named server connection profiles.
//! - [`api`]: authenticated REST client for one profile's server.
//! - [`workspace`]: creation and deletion flows bound to the default
//!   profile, including repository-name derivation and target selection.
//!
//! [`tooling`] fronts these with a clap-based CLI.

pub mod api;
pub mod error;
pub mod logging;
pub mod profile;
pub mod tooling;
pub mod types;
pub mod views;
pub mod workspace;
