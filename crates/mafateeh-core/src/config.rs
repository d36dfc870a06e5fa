use crate::error::{MafateehError, Result};
use std::env;
use std::path::PathBuf;

pub const APP_GROUP_ID: &str = "group.com.mafateeh.shared";
pub const STORE_FILENAME: &str = "SharedPhrases.json";
pub const SHARED_DIR_ENV: &str = "MAFATEEH_SHARED_DIR";
pub const LOG_ENV: &str = "MAFATEEH_LOG";

/// Get the directory that holds every application group container.
pub fn get_shared_container_dir() -> PathBuf {
    if let Ok(dir) = env::var(SHARED_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".mafateeh"))
        .unwrap_or_else(|_| PathBuf::from(".mafateeh"))
}

/// Location of the shared phrase store.
///
/// The host app and the keyboard extension each build one of these from the
/// same fixed strings, so both resolve to the same physical file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    container_dir: PathBuf,
    group_id: String,
}

impl StoreConfig {
    pub fn new(container_dir: impl Into<PathBuf>, group_id: impl Into<String>) -> Result<Self> {
        let group_id = group_id.into();
        if group_id.trim().is_empty() {
            return Err(MafateehError::InvalidConfig(
                "application group id must not be empty".to_string(),
            ));
        }
        if group_id.contains(['/', '\\']) {
            return Err(MafateehError::InvalidConfig(format!(
                "application group id {:?} must not contain path separators",
                group_id
            )));
        }

        Ok(Self {
            container_dir: container_dir.into(),
            group_id,
        })
    }

    /// Default application group inside the shared container directory.
    pub fn from_env() -> Self {
        Self {
            container_dir: get_shared_container_dir(),
            group_id: APP_GROUP_ID.to_string(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn group_dir(&self) -> PathBuf {
        self.container_dir.join(&self.group_id)
    }

    pub fn store_path(&self) -> PathBuf {
        self.group_dir().join(STORE_FILENAME)
    }
}
