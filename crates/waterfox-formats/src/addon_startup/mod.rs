//! addonStartup.json manifest implementation
//!
//! The decoded payload of `addonStartup.json.lz4` is a JSON object keyed by
//! add-on scope. Three scopes follow the portable installation around:
//!
//! | Section               | Base path                              |
//! |-----------------------|----------------------------------------|
//! | `app-global`          | `<profile>/extensions`                 |
//! | `app-profile`         | `<profile>/extensions`                 |
//! | `app-system-defaults` | `<app>/browser/features`               |
//!
//! Each scope holds a `path` and an `addons` object whose records carry a
//! `rootURI` of the form `jar:file:///<base>/<id>.xpi!/`.
//!
//! Two rewrite strategies exist and are never combined:
//!
//! - [`AddonStartup::rewrite_install_paths`] sets `path` and every `rootURI`
//!   of the known sections from the current base paths (preferred)
//! - [`substitute_root_path`] replaces the previous root with the current one
//!   across the whole payload text (legacy)

mod error;
mod section;
mod substitute;
mod uri;

pub use error::{ManifestError, ManifestResult};
pub use section::{AddonRecord, Section, SectionKind};
pub use substitute::{Substitution, posix_form, substitute_root_path, windows_form};
pub use uri::{file_url, jar_root_uri};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::debug;

/// Base path for each known section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPaths {
    /// Base path for `app-global`
    pub app_global: String,
    /// Base path for `app-profile`
    pub app_profile: String,
    /// Base path for `app-system-defaults`
    pub app_system_defaults: String,
}

impl InstallPaths {
    /// Profile scopes share `profile_extensions`; system defaults use `features`
    pub fn new(profile_extensions: impl Into<String>, features: impl Into<String>) -> Self {
        let profile_extensions = profile_extensions.into();
        Self {
            app_global: profile_extensions.clone(),
            app_profile: profile_extensions,
            app_system_defaults: features.into(),
        }
    }

    /// Base path for `kind`
    pub fn base_for(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::AppGlobal => &self.app_global,
            SectionKind::AppProfile => &self.app_profile,
            SectionKind::AppSystemDefaults => &self.app_system_defaults,
        }
    }
}

/// What [`AddonStartup::rewrite_install_paths`] touched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Sections whose `path` was set
    pub patched: Vec<SectionKind>,
    /// Sections absent or without a string `path`
    pub skipped: Vec<SectionKind>,
    /// Number of `rootURI` values written
    pub addons_rewritten: usize,
}

/// Decoded addonStartup manifest
///
/// Holds the whole document so scopes other than the three known ones, and
/// their key order, survive a rewrite.
#[derive(Debug, Clone, PartialEq)]
pub struct AddonStartup {
    root: Map<String, Value>,
}

impl AddonStartup {
    /// Parse a decoded payload
    pub fn parse(payload: &[u8]) -> ManifestResult<Self> {
        match serde_json::from_slice(payload)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(ManifestError::NotAnObject),
        }
    }

    /// Serialize back to compact JSON, the way the browser writes it
    pub fn to_vec(&self) -> ManifestResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.root)?)
    }

    /// Whether the top-level key for `kind` is present
    pub fn contains(&self, kind: SectionKind) -> bool {
        self.root.contains_key(kind.key())
    }

    /// Typed view of `kind`
    ///
    /// Returns `None` when the section is absent or has no string `path`.
    pub fn section(&self, kind: SectionKind) -> ManifestResult<Option<Section>> {
        match self.root.get(kind.key()) {
            Some(value) if Section::is_patchable(value) => {
                Section::from_value(kind, value.clone()).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Point every known section at its current base path
    ///
    /// Sets `path` to the base path and rebuilds every `rootURI` from it.
    /// Values are replaced where they stand, so every other field keeps its
    /// position and spelling. Missing sections are skipped and never created.
    /// Calling this again with the same paths leaves the document unchanged.
    pub fn rewrite_install_paths(&mut self, paths: &InstallPaths) -> ManifestResult<RewriteSummary> {
        let mut summary = RewriteSummary::default();

        // Every section is validated and every URI built before anything is
        // touched, so a failure leaves the document as it was
        let mut plan = Vec::new();
        for kind in SectionKind::ALL {
            let Some(section) = self.section(kind)? else {
                debug!("Section {kind} has no install path, skipping");
                summary.skipped.push(kind);
                continue;
            };

            let base = paths.base_for(kind);
            let invalid_base = || ManifestError::InvalidBasePath {
                section: kind.key().to_string(),
                path: base.to_string(),
            };
            file_url(base).ok_or_else(invalid_base)?;

            let uris = section
                .addons
                .iter()
                .flat_map(IndexMap::keys)
                .map(|id| {
                    jar_root_uri(base, id)
                        .map(|uri| (id.clone(), uri))
                        .ok_or_else(invalid_base)
                })
                .collect::<ManifestResult<Vec<_>>>()?;
            plan.push((kind, base, uris));
        }

        for (kind, base, uris) in plan {
            let Some(fields) = self.root.get_mut(kind.key()).and_then(Value::as_object_mut) else {
                continue;
            };
            fields.insert("path".to_string(), Value::String(base.to_string()));

            if let Some(addons) = fields.get_mut("addons").and_then(Value::as_object_mut) {
                for (id, uri) in &uris {
                    if let Some(record) = addons.get_mut(id).and_then(Value::as_object_mut) {
                        record.insert("rootURI".to_string(), Value::String(uri.clone()));
                    }
                }
            }

            debug!("Section {kind}: path set to {base}, {} add-ons rewritten", uris.len());
            summary.addons_rewritten += uris.len();
            summary.patched.push(kind);
        }

        Ok(summary)
    }
}
