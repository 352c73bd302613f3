//! Workspace-creation flow against an unreachable profile: everything that
//! must fail before a request is sent has to fail fast, with the user
//! notified exactly once.

use orbit::error::ApiError;
use orbit::profile::ProfileStore;
use orbit::types::{CreateWorkspaceRequest, Profile, Target};
use orbit::views::Notifier;
use orbit::workspace::{TargetPicker, WorkspaceManager};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

struct RecordingNotifier {
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn new() -> Self {
        Self {
            errors: Mutex::new(Vec::new()),
        }
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, _message: &str) {}

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

struct NeverPicker;

impl TargetPicker for NeverPicker {
    fn pick(&self, _targets: &[Target]) -> Result<Option<usize>, ApiError> {
        panic!("picker must not run in these flows");
    }
}

// TEST-NET-3 address; nothing here should actually connect.
fn unreachable_profile() -> Profile {
    Profile {
        name: "offline".to_string(),
        url: "203.0.113.1".to_string(),
        port: 9,
        api_key: "test-key".to_string(),
        is_default: false,
    }
}

fn manager_in(dir: &TempDir, notifier: Arc<RecordingNotifier>) -> WorkspaceManager {
    WorkspaceManager::new(
        ProfileStore::new(dir.path().join("config.json")),
        Arc::new(NeverPicker),
        notifier,
    )
}

#[tokio::test]
async fn server_commands_require_a_default_profile() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir, Arc::new(RecordingNotifier::new()));

    let err = manager.list_workspaces().await.unwrap_err();
    assert!(matches!(err, ApiError::NoDefaultProfile));
    // The error message points at the fix.
    assert!(err.to_string().contains("set-default"));
}

#[tokio::test]
async fn profiles_without_a_default_flag_do_not_count() {
    let dir = TempDir::new().unwrap();
    let manager = manager_in(&dir, Arc::new(RecordingNotifier::new()));
    manager.store().add(unreachable_profile()).unwrap();
    manager
        .store()
        .add(Profile {
            name: "second".to_string(),
            ..unreachable_profile()
        })
        .unwrap();
    // Deleting the default leaves "second" present but not default.
    manager.store().delete_by_name("offline").unwrap();

    let err = manager.list_workspaces().await.unwrap_err();
    assert!(matches!(err, ApiError::NoDefaultProfile));
}

#[tokio::test]
async fn empty_name_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let manager = manager_in(&dir, notifier.clone());
    manager.store().add(unreachable_profile()).unwrap();

    let err = manager
        .create_workspace(CreateWorkspaceRequest {
            name: "   ".to_string(),
            git_url: "https://github.com/acme/widget.git".to_string(),
            target: Some("default".to_string()),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn git_url_without_a_path_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let manager = manager_in(&dir, notifier.clone());
    manager.store().add(unreachable_profile()).unwrap();

    let err = manager
        .create_from_git("not-a-repo-url", Some("widget".to_string()), Some("default".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn blank_git_url_fails_before_any_request() {
    let dir = TempDir::new().unwrap();
    let notifier = Arc::new(RecordingNotifier::new());
    let manager = manager_in(&dir, notifier.clone());
    manager.store().add(unreachable_profile()).unwrap();

    let err = manager
        .create_from_git("   ", Some("widget".to_string()), Some("default".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}
