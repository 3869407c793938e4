//! Launcher pipeline: prepare the portable folders, then start the browser.

use crate::addons::{AddonPatchRequest, PatchOutcome, update_addon_startup};
use crate::autoconfig::write_autoconfig;
use crate::config::LauncherConfig;
use crate::environment::browser_environment;
use crate::error::LauncherError;
use crate::paths::AppPaths;
use crate::policies::write_policies;
use crate::state::LauncherState;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::{debug, error, info, warn};

/// Portable launcher bound to one configuration.
#[derive(Debug)]
pub struct Launcher {
    config: LauncherConfig,
    paths: AppPaths,
}

impl Launcher {
    /// Create a launcher, resolving the portable root.
    pub fn new(config: LauncherConfig) -> Result<Self, LauncherError> {
        let paths = config.paths()?;
        Ok(Self { config, paths })
    }

    /// Folder layout in use.
    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Profile folder in use.
    pub fn profile_dir(&self) -> PathBuf {
        self.paths.profile_dir(&self.config.profile)
    }

    /// Prepare folders, policies, autoconfig and add-on paths.
    ///
    /// A failed add-on path patch is logged and does not stop preparation;
    /// the previous root stays recorded so the migration is retried.
    pub fn prepare(&self) -> Result<Option<PatchOutcome>, LauncherError> {
        let profile_dir = self.profile_dir();
        for dir in [
            self.paths.data.clone(),
            profile_dir.clone(),
            self.paths.crashreporter_dir(),
            self.paths.plugins_dir(),
        ] {
            create_folder(&dir)?;
        }

        let policies = write_policies(&self.paths)?;
        debug!("Policies written to {}", policies.display());
        write_autoconfig(&self.paths)?;

        let state_file = self.paths.state_file();
        let state = match LauncherState::load(&state_file) {
            Ok(state) => state,
            Err(e) => {
                warn!("Ignoring launcher state: {e}");
                LauncherState::default()
            }
        };
        let previous_root = state.moved_from(&self.paths.root);
        if let Some(previous) = previous_root {
            info!(
                "Portable root moved from {} to {}",
                previous.display(),
                self.paths.root.display()
            );
        }

        let request = AddonPatchRequest::new(
            self.config.addon_paths,
            &self.paths,
            &profile_dir,
            previous_root,
        );
        let outcome = match update_addon_startup(&profile_dir, &request) {
            Ok(outcome) => {
                debug!("Add-on path patch: {outcome:?}");
                Some(outcome)
            }
            Err(e) => {
                error!("Cannot fix extensions path: {e}");
                None
            }
        };

        // A failed migration keeps the old root so the next run can retry it
        let root_path = match (outcome, previous_root) {
            (None, Some(previous)) => {
                warn!("Keeping {} as the previous root", previous.display());
                previous.to_path_buf()
            }
            _ => self.paths.root.clone(),
        };
        LauncherState {
            root_path: Some(root_path),
        }
        .save(&state_file)?;

        Ok(outcome)
    }

    /// Arguments passed to the browser.
    pub fn browser_args(&self) -> Vec<String> {
        let mut args = vec![
            "--profile".to_string(),
            self.profile_dir().to_string_lossy().into_owned(),
        ];
        if self.config.multiple_instances {
            args.push("--no-remote".to_string());
        }
        args.extend(self.config.browser_args.iter().cloned());
        args
    }

    /// Browser command with arguments and environment applied.
    pub fn command(&self) -> Command {
        let mut command = Command::new(self.paths.process(&self.config.process));
        command
            .args(self.browser_args())
            .envs(browser_environment(&self.paths))
            .current_dir(&self.paths.app);
        command
    }

    /// Start the browser and wait for it to exit.
    pub fn launch(&self) -> Result<ExitStatus, LauncherError> {
        let process = self.paths.process(&self.config.process);
        info!("Launching {}", process.display());

        self.command()
            .status()
            .map_err(|source| LauncherError::Spawn {
                path: process,
                source,
            })
    }

    /// Prepare, then launch unless `--no-launch` was given.
    pub fn run(&self) -> Result<Option<ExitStatus>, LauncherError> {
        self.prepare()?;
        if self.config.no_launch {
            info!("Profile prepared, not launching");
            return Ok(None);
        }
        self.launch().map(Some)
    }
}

fn create_folder(path: &Path) -> Result<(), LauncherError> {
    fs::create_dir_all(path).map_err(|source| LauncherError::CreateFolder {
        path: path.to_path_buf(),
        source,
    })
}
