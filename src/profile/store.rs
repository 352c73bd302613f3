//! JSON-file-backed profile store.
//!
//! The whole collection lives in a single human-editable file and is
//! rewritten wholesale on every mutation. No locking; the profile file is a
//! single-user resource and a torn write costs only re-adding a profile.

use crate::error::ApiError;
use crate::types::Profile;
use crate::views::{ViewEvent, ViewObserver};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct ProfileStore {
    config_path: PathBuf,
    observer: Option<Arc<dyn ViewObserver>>,
}

impl ProfileStore {
    /// Create a store over an explicit backing file. The file and its parent
    /// directory need not exist yet.
    pub fn new(config_path: PathBuf) -> Self {
        Self {
            config_path,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ViewObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Platform config dir, e.g. `~/.config/orbit/profiles/config.json`.
    pub fn default_path() -> Result<PathBuf, ApiError> {
        let dirs = directories::ProjectDirs::from("", "orbit", "orbit").ok_or_else(|| {
            ApiError::Config("could not determine platform config directory".to_string())
        })?;
        Ok(dirs.config_dir().join("profiles").join("config.json"))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    fn ensure_config_dir(&self) -> Result<(), ApiError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ApiError::Storage(format!(
                    "failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Read and parse the backing file. A missing file is an empty store,
    /// not an error; the config directory is created so later writes land.
    pub fn list(&self) -> Result<Vec<Profile>, ApiError> {
        self.ensure_config_dir()?;
        let content = match std::fs::read_to_string(&self.config_path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ApiError::Storage(format!(
                    "failed to read {}: {}",
                    self.config_path.display(),
                    e
                )))
            }
        };
        serde_json::from_str(&content).map_err(|e| {
            ApiError::Storage(format!(
                "failed to parse {}: {}",
                self.config_path.display(),
                e
            ))
        })
    }

    pub fn name_exists(&self, name: &str) -> Result<bool, ApiError> {
        Ok(self
            .list()?
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name)))
    }

    /// Add a profile. The first profile ever added becomes the default;
    /// later adds keep whatever flag the caller supplied.
    pub fn add(&self, mut profile: Profile) -> Result<(), ApiError> {
        let mut profiles = self.list()?;
        if profiles
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(&profile.name))
        {
            return Err(ApiError::DuplicateProfile(profile.name));
        }
        if profiles.is_empty() {
            profile.is_default = true;
        }
        profiles.push(profile);
        self.persist(&profiles)
    }

    /// Make `name` the sole default. Returns the updated profile.
    pub fn set_default(&self, name: &str) -> Result<Profile, ApiError> {
        let mut profiles = self.list()?;
        let index = profiles
            .iter()
            .position(|p| p.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ApiError::ProfileNotFound(name.to_string()))?;
        for p in profiles.iter_mut() {
            p.is_default = false;
        }
        profiles[index].is_default = true;
        let updated = profiles[index].clone();
        self.persist(&profiles)?;
        tracing::debug!(profile = %updated.name, "default profile set");
        Ok(updated)
    }

    /// Remove every case-insensitive match for `name`. Deleting the current
    /// default leaves the store with no default; nothing is auto-promoted.
    pub fn delete_by_name(&self, name: &str) -> Result<(), ApiError> {
        let mut profiles = self.list()?;
        let before = profiles.len();
        profiles.retain(|p| !p.name.eq_ignore_ascii_case(name));
        if profiles.len() == before {
            return Err(ApiError::ProfileNotFound(name.to_string()));
        }
        self.persist(&profiles)
    }

    pub fn get_default(&self) -> Result<Option<Profile>, ApiError> {
        Ok(self.list()?.into_iter().find(|p| p.is_default))
    }

    pub fn get_by_name(&self, name: &str) -> Result<Option<Profile>, ApiError> {
        Ok(self
            .list()?
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name)))
    }

    fn persist(&self, profiles: &[Profile]) -> Result<(), ApiError> {
        self.ensure_config_dir()?;
        let content = serde_json::to_string_pretty(profiles)
            .map_err(|e| ApiError::Storage(format!("failed to encode profiles: {}", e)))?;
        std::fs::write(&self.config_path, content).map_err(|e| {
            ApiError::Storage(format!(
                "failed to write {}: {}",
                self.config_path.display(),
                e
            ))
        })?;
        if let Some(observer) = &self.observer {
            observer.collection_changed(ViewEvent::ProfilesChanged);
        }
        Ok(())
    }
}
