//! Creation and deletion flows bound to the default profile.
//!
//! The manager resolves the active profile, builds a client for it, and
//! composes naming and target selection into one workspace-creation flow.
//! Target selection goes through the [`TargetPicker`] seam so the flow
//! never depends on a terminal being attached.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::profile::ProfileStore;
use crate::types::{CreateWorkspaceRequest, Sample, Target, Workspace, WorkspaceResponse};
use crate::views::{Notifier, ViewEvent, ViewObserver};
use crate::workspace::naming::{extract_repo_name, generate_unique_name};
use std::sync::Arc;

/// Single-choice selection over the fetched targets. `Ok(None)` means the
/// user dismissed the picker.
pub trait TargetPicker: Send + Sync {
    fn pick(&self, targets: &[Target]) -> Result<Option<usize>, ApiError>;
}

pub struct WorkspaceManager {
    store: ProfileStore,
    picker: Arc<dyn TargetPicker>,
    notifier: Arc<dyn Notifier>,
    observer: Option<Arc<dyn ViewObserver>>,
}

impl WorkspaceManager {
    pub fn new(
        store: ProfileStore,
        picker: Arc<dyn TargetPicker>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            picker,
            notifier,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ViewObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Client bound to the default profile, or `NoDefaultProfile`.
    pub fn client(&self) -> Result<ApiClient, ApiError> {
        let profile = self
            .store
            .get_default()?
            .ok_or(ApiError::NoDefaultProfile)?;
        ApiClient::new(&profile, self.notifier.clone())
    }

    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        self.client()?.list_workspaces().await
    }

    pub async fn list_samples(&self) -> Result<Vec<Sample>, ApiError> {
        self.client()?.list_samples().await
    }

    pub async fn list_targets(&self) -> Result<Vec<Target>, ApiError> {
        self.client()?.list_targets().await
    }

    /// Fetch targets and resolve one interactively.
    pub async fn select_target(&self, client: &ApiClient) -> Result<String, ApiError> {
        let targets = client.list_targets().await?;
        choose_target(self.picker.as_ref(), &targets)
    }

    /// Create a workspace for the default profile. A missing target is
    /// resolved through interactive selection before the request goes out.
    pub async fn create_workspace(
        &self,
        request: CreateWorkspaceRequest,
    ) -> Result<WorkspaceResponse, ApiError> {
        let client = self.client()?;
        self.create_with_client(&client, request).await
    }

    /// Create from a bare git URL: derive the repository name, probe the
    /// existing workspaces for a free variant, then create.
    pub async fn create_from_git(
        &self,
        git_url: &str,
        name: Option<String>,
        target: Option<String>,
    ) -> Result<WorkspaceResponse, ApiError> {
        let client = self.client()?;
        let name = match name {
            Some(n) => n,
            None => {
                let existing = client.list_workspaces().await?;
                generate_unique_name(&extract_repo_name(git_url), &existing)
            }
        };
        self.create_with_client(
            &client,
            CreateWorkspaceRequest {
                name,
                git_url: git_url.to_string(),
                target,
            },
        )
        .await
    }

    /// Create a workspace from a curated sample definition.
    pub async fn create_from_sample(
        &self,
        sample: &Sample,
        target: Option<String>,
    ) -> Result<WorkspaceResponse, ApiError> {
        self.create_from_git(&sample.git_url, None, target).await
    }

    /// Exact-name lookup over a fresh listing.
    pub async fn find_workspace(&self, name: &str) -> Result<Workspace, ApiError> {
        self.list_workspaces()
            .await?
            .into_iter()
            .find(|w| w.name == name)
            .ok_or_else(|| ApiError::WorkspaceNotFound(name.to_string()))
    }

    pub async fn delete_workspace(&self, id: &str, force: bool) -> Result<(), ApiError> {
        self.client()?.delete_workspace(id, force).await?;
        self.changed();
        Ok(())
    }

    async fn create_with_client(
        &self,
        client: &ApiClient,
        mut request: CreateWorkspaceRequest,
    ) -> Result<WorkspaceResponse, ApiError> {
        if request.target.is_none() {
            request.target = Some(self.select_target(client).await?);
        }
        let response = client.create_workspace(&request).await?;
        self.changed();
        Ok(response)
    }

    fn changed(&self) {
        if let Some(observer) = &self.observer {
            observer.collection_changed(ViewEvent::WorkspacesChanged);
        }
    }
}

/// Resolve a target name from the fetched list via the picker.
pub(crate) fn choose_target(
    picker: &dyn TargetPicker,
    targets: &[Target],
) -> Result<String, ApiError> {
    if targets.is_empty() {
        return Err(ApiError::NoTargets);
    }
    match picker.pick(targets)? {
        Some(index) => targets
            .get(index)
            .map(|t| t.name.clone())
            .ok_or(ApiError::SelectionCancelled),
        None => Err(ApiError::SelectionCancelled),
    }
}
