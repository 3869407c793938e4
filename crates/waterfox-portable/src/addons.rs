//! Add-on install path migration.
//!
//! The browser caches absolute add-on locations in
//! `<profile>/addonStartup.json.lz4`. After the portable folder moves, those
//! paths point at the old location and add-ons fail to load until the cache
//! is patched. [`update_addon_startup`] decodes the container, migrates the
//! paths with the configured [`AddonPathStrategy`] and writes it back only
//! when something changed.

use crate::config::AddonPathStrategy;
use crate::error::AddonPatchError;
use crate::paths::{ADDON_STARTUP_FILE, AppPaths};
use std::path::Path;
use tracing::{debug, info};
use waterfox_formats::addon_startup::{
    AddonStartup, InstallPaths, ManifestResult, substitute_root_path,
};
use waterfox_formats::mozlz4;

/// Everything the patch needs to know about the installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonPatchRequest {
    /// Migration strategy
    pub strategy: AddonPathStrategy,
    /// Current base path of each section, for [`AddonPathStrategy::Rewrite`]
    pub install_paths: InstallPaths,
    /// Current portable root
    pub current_root: String,
    /// Portable root of the previous run, for [`AddonPathStrategy::Substitute`]
    pub previous_root: Option<String>,
}

impl AddonPatchRequest {
    /// Request for the profile at `profile_dir` inside `paths`.
    pub fn new(
        strategy: AddonPathStrategy,
        paths: &AppPaths,
        profile_dir: &Path,
        previous_root: Option<&Path>,
    ) -> Self {
        let install_paths = InstallPaths::new(
            path_string(&AppPaths::profile_extensions_dir(profile_dir)),
            path_string(&paths.features_dir()),
        );
        Self {
            strategy,
            install_paths,
            current_root: path_string(&paths.root),
            previous_root: previous_root.map(path_string),
        }
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Result of a successful [`update_addon_startup`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The profile has no `addonStartup.json.lz4` yet
    Missing,
    /// Nothing to migrate from (substitution without a previous root)
    Skipped,
    /// The manifest already points at the current location
    Unchanged,
    /// The container was rewritten
    Patched,
}

/// Migrate add-on install paths in `<profile_dir>/addonStartup.json.lz4`.
///
/// The container is only replaced after the new payload has been fully
/// encoded; any failure leaves it untouched.
pub fn update_addon_startup(
    profile_dir: &Path,
    request: &AddonPatchRequest,
) -> Result<PatchOutcome, AddonPatchError> {
    let path = profile_dir.join(ADDON_STARTUP_FILE);
    if !path.is_file() {
        debug!("No {} in {}", ADDON_STARTUP_FILE, profile_dir.display());
        return Ok(PatchOutcome::Missing);
    }

    let previous_root = match (request.strategy, request.previous_root.as_deref()) {
        (AddonPathStrategy::Substitute, None) => {
            debug!("No previous root recorded, nothing to substitute");
            return Ok(PatchOutcome::Skipped);
        }
        (_, previous) => previous,
    };

    let payload = mozlz4::read_file(&path).map_err(|source| AddonPatchError::Decode {
        path: path.clone(),
        source,
    })?;

    let patched = match request.strategy {
        AddonPathStrategy::Rewrite => rewrite(&payload, &request.install_paths),
        AddonPathStrategy::Substitute => substitute(
            &payload,
            previous_root.unwrap_or_default(),
            &request.current_root,
        ),
    }
    .map_err(|source| AddonPatchError::Rewrite {
        path: path.clone(),
        source,
    })?;

    let Some(patched) = patched else {
        debug!("{} already up to date", path.display());
        return Ok(PatchOutcome::Unchanged);
    };

    mozlz4::write_file(&path, &patched).map_err(|source| AddonPatchError::Encode {
        path: path.clone(),
        source,
    })?;
    info!("Updated add-on install paths in {}", path.display());
    Ok(PatchOutcome::Patched)
}

/// Schema-directed rewrite; `None` when the document is unchanged.
fn rewrite(
    payload: &[u8],
    install_paths: &InstallPaths,
) -> ManifestResult<Option<Vec<u8>>> {
    let mut manifest = AddonStartup::parse(payload)?;
    let original = manifest.clone();

    let summary = manifest.rewrite_install_paths(install_paths)?;
    debug!(
        "Rewrote {} sections ({} add-ons), skipped {}",
        summary.patched.len(),
        summary.addons_rewritten,
        summary.skipped.len()
    );

    if manifest == original {
        return Ok(None);
    }
    manifest.to_vec().map(Some)
}

/// Whole-payload substitution; `None` when nothing matched.
fn substitute(
    payload: &[u8],
    previous_root: &str,
    current_root: &str,
) -> ManifestResult<Option<Vec<u8>>> {
    let text = std::str::from_utf8(payload)?;
    let (patched, counts) = substitute_root_path(text, previous_root, current_root);
    debug!(
        "Substituted {previous_root} -> {current_root}: {} URI and {} path occurrences",
        counts.posix, counts.windows
    );

    if counts.total() == 0 {
        return Ok(None);
    }
    Ok(Some(patched.into_bytes()))
}
