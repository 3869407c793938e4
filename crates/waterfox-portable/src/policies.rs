//! Enterprise policies written into the installation.
//!
//! `DisableAppUpdate` and `DontCheckDefaultBrowser` are always enabled. Users
//! may add their own policies in `<root>/data/policies.json`; the two forced
//! policies are applied on top of whatever that file contains.

use crate::error::LauncherError;
use crate::paths::AppPaths;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Policies forced regardless of user overrides.
pub const FORCED_POLICIES: [&str; 2] = ["DisableAppUpdate", "DontCheckDefaultBrowser"];

/// Default policy document.
pub fn default_policies() -> Value {
    let forced: Map<String, Value> = FORCED_POLICIES
        .iter()
        .map(|name| ((*name).to_string(), Value::Bool(true)))
        .collect();
    json!({ "policies": forced })
}

/// Force [`FORCED_POLICIES`] onto a user policy document.
///
/// A non-object root or `policies` entry is replaced by an object.
pub fn apply_forced_policies(mut document: Value) -> Value {
    if !document.is_object() {
        document = Value::Object(Map::new());
    }
    if let Some(root) = document.as_object_mut() {
        let policies = root
            .entry("policies")
            .or_insert_with(|| Value::Object(Map::new()));
        if !policies.is_object() {
            *policies = Value::Object(Map::new());
        }
        if let Some(policies) = policies.as_object_mut() {
            for name in FORCED_POLICIES {
                policies.insert(name.to_string(), Value::Bool(true));
            }
        }
    }

    document
}

/// Build the effective policies from the optional user file.
pub fn load_policies(custom_file: &Path) -> Result<Value, LauncherError> {
    if !custom_file.exists() {
        return Ok(default_policies());
    }

    let raw = fs::read(custom_file).map_err(|source| LauncherError::Read {
        path: custom_file.to_path_buf(),
        source,
    })?;
    let custom: Value = serde_json::from_slice(&raw).map_err(|source| LauncherError::InvalidJson {
        path: custom_file.to_path_buf(),
        source,
    })?;
    debug!("Custom policies: {custom}");

    Ok(apply_forced_policies(custom))
}

/// Write `<app>/distribution/policies.json`, returning its path.
pub fn write_policies(paths: &AppPaths) -> Result<PathBuf, LauncherError> {
    let policies = load_policies(&paths.custom_policies_file())?;
    debug!("Applied policies: {policies}");

    let dir = paths.distribution_dir();
    fs::create_dir_all(&dir).map_err(|source| LauncherError::CreateFolder {
        path: dir.clone(),
        source,
    })?;

    let file = dir.join("policies.json");
    let json = serde_json::to_string_pretty(&policies).map_err(|source| {
        LauncherError::InvalidJson {
            path: file.clone(),
            source,
        }
    })?;
    fs::write(&file, json).map_err(|source| LauncherError::Write {
        path: file.clone(),
        source,
    })?;

    Ok(file)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_without_custom_file() {
        let dir = tempfile::tempdir().unwrap();
        let policies = load_policies(&dir.path().join("policies.json")).unwrap();
        assert_eq!(
            policies,
            json!({"policies": {"DisableAppUpdate": true, "DontCheckDefaultBrowser": true}})
        );
    }

    #[test]
    fn test_forced_policies_override_custom() {
        let custom = json!({
            "policies": {
                "DisableAppUpdate": false,
                "DisableTelemetry": true
            }
        });
        assert_eq!(
            apply_forced_policies(custom),
            json!({
                "policies": {
                    "DisableAppUpdate": true,
                    "DisableTelemetry": true,
                    "DontCheckDefaultBrowser": true
                }
            })
        );
    }

    #[test]
    fn test_malformed_shapes_are_replaced() {
        let expected = default_policies();
        assert_eq!(apply_forced_policies(json!([1, 2])), expected);
        assert_eq!(apply_forced_policies(json!({"policies": "nope"})), expected);
    }

    #[test]
    fn test_write_policies_pretty() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::new(dir.path());
        fs::create_dir_all(&paths.data).unwrap();
        fs::write(
            paths.custom_policies_file(),
            r#"{"policies":{"BlockAboutConfig":true}}"#,
        )
        .unwrap();

        let file = write_policies(&paths).unwrap();
        assert_eq!(file, paths.distribution_dir().join("policies.json"));

        let written = fs::read_to_string(&file).unwrap();
        assert!(written.contains("\n  \"policies\": {\n    \"BlockAboutConfig\": true"));
        let value: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["policies"]["DontCheckDefaultBrowser"], true);
    }

    #[test]
    fn test_invalid_custom_policies() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("policies.json");
        fs::write(&file, "not json").unwrap();
        assert!(matches!(
            load_policies(&file),
            Err(LauncherError::InvalidJson { .. })
        ));
    }
}
