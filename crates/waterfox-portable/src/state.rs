//! Launcher state persisted between runs.
//!
//! The only thing remembered is where the portable root was last time, so a
//! moved installation can be detected and its profile paths migrated.

use crate::error::LauncherError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Contents of `<root>/data/portapp.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherState {
    /// Portable root of the previous run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_path: Option<PathBuf>,
}

impl LauncherState {
    /// Load state, treating a missing file as a first run.
    pub fn load(path: &Path) -> Result<Self, LauncherError> {
        if !path.exists() {
            debug!("No launcher state at {}, first run", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read(path).map_err(|source| LauncherError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&raw).map_err(|source| LauncherError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write state as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), LauncherError> {
        let json = serde_json::to_vec_pretty(self).map_err(|source| LauncherError::InvalidJson {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| LauncherError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Previous root, if it differs from `current`.
    pub fn moved_from(&self, current: &Path) -> Option<&Path> {
        self.root_path
            .as_deref()
            .filter(|previous| !previous.as_os_str().is_empty() && *previous != current)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_state_is_first_run() {
        let dir = tempfile::tempdir().unwrap();
        let state = LauncherState::load(&dir.path().join("portapp.json")).unwrap();
        assert_eq!(state, LauncherState::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portapp.json");
        let state = LauncherState {
            root_path: Some(PathBuf::from("/media/usb/Waterfox Portable")),
        };

        state.save(&path).unwrap();
        assert_eq!(LauncherState::load(&path).unwrap(), state);
    }

    #[test]
    fn test_invalid_state_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portapp.json");
        fs::write(&path, "{").unwrap();

        let err = LauncherState::load(&path).unwrap_err();
        assert!(matches!(err, LauncherError::InvalidJson { .. }));
        assert!(err.to_string().contains("portapp.json"));
    }

    #[test]
    fn test_moved_from() {
        let state = LauncherState {
            root_path: Some(PathBuf::from("/old")),
        };
        assert_eq!(state.moved_from(Path::new("/new")), Some(Path::new("/old")));
        assert_eq!(state.moved_from(Path::new("/old")), None);
        assert_eq!(LauncherState::default().moved_from(Path::new("/new")), None);
    }
}
