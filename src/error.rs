//! Error Taxonomy
//!
//! One crate-wide error enum spanning the profile store, the REST client,
//! and the workspace orchestration layer. Every layer classifies and
//! rethrows; nothing is swallowed.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A profile with the same name (case-insensitive) already exists.
    #[error("a profile named \"{0}\" already exists")]
    DuplicateProfile(String),

    /// No profile matches the requested name (case-insensitive).
    #[error("profile \"{0}\" not found")]
    ProfileNotFound(String),

    /// No workspace on the server carries the requested name.
    #[error("workspace \"{0}\" not found")]
    WorkspaceNotFound(String),

    /// Local or server-side (HTTP 400) input validation failure.
    #[error("{0}")]
    Validation(String),

    /// HTTP 401 from the server.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// HTTP 409 from the server.
    #[error("{0}")]
    Conflict(String),

    /// The request went out but no response came back.
    #[error("unable to connect to server: {0}")]
    Connectivity(String),

    /// The request could not even be constructed.
    #[error("request failed: {0}")]
    RequestConfiguration(String),

    /// Any other HTTP response status, surfaced raw.
    #[error("server error ({status}): {message}")]
    Http { status: u16, message: String },

    /// An operation needed the default profile and none is configured.
    #[error("no default profile selected; set one with `orbit profile set-default <name>`")]
    NoDefaultProfile,

    /// The server reports no deployment targets.
    #[error("no targets available on the server")]
    NoTargets,

    /// The user dismissed the target picker.
    #[error("target selection cancelled")]
    SelectionCancelled,

    /// Profile file I/O or JSON encoding/decoding failure.
    #[error("profile storage error: {0}")]
    Storage(String),

    /// Logging or CLI configuration failure.
    #[error("configuration error: {0}")]
    Config(String),
}
