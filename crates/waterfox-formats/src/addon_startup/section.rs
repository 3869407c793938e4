//! Typed view of the add-on scope sections

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use super::error::{ManifestError, ManifestResult};

/// Add-on scopes whose install paths follow the portable installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// `app-global`: add-ons installed next to the application
    AppGlobal,
    /// `app-profile`: add-ons installed into the profile
    AppProfile,
    /// `app-system-defaults`: built-in system features
    AppSystemDefaults,
}

impl SectionKind {
    /// All known sections, in manifest order
    pub const ALL: [Self; 3] = [Self::AppGlobal, Self::AppProfile, Self::AppSystemDefaults];

    /// Top-level manifest key
    pub const fn key(self) -> &'static str {
        match self {
            Self::AppGlobal => "app-global",
            Self::AppProfile => "app-profile",
            Self::AppSystemDefaults => "app-system-defaults",
        }
    }

    /// Parse from a top-level manifest key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One add-on scope
///
/// Fields this crate does not touch are kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Directory the scope's add-ons were installed from
    pub path: String,

    /// Add-on records keyed by add-on identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<IndexMap<String, AddonRecord>>,

    /// Untouched fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One add-on registration record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddonRecord {
    /// `jar:file://` URI of the add-on package root
    #[serde(rename = "rootURI", default, skip_serializing_if = "Option::is_none")]
    pub root_uri: Option<String>,

    /// Untouched fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Section {
    /// Whether `value` carries a string `path`, i.e. is worth patching
    pub fn is_patchable(value: &Value) -> bool {
        value.get("path").is_some_and(Value::is_string)
    }

    /// Build the typed view of a section, naming the offending node on failure
    pub fn from_value(kind: SectionKind, value: Value) -> ManifestResult<Self> {
        check_shape(kind, &value)?;
        serde_json::from_value(value)
            .map_err(|e| ManifestError::schema(kind.key(), kind.key(), e.to_string()))
    }

    /// Convert back into generic JSON
    pub fn to_value(&self) -> ManifestResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Number of add-on records in the section
    pub fn addon_count(&self) -> usize {
        self.addons.as_ref().map_or(0, IndexMap::len)
    }
}

fn check_shape(kind: SectionKind, value: &Value) -> ManifestResult<()> {
    let section = kind.key();
    let Some(fields) = value.as_object() else {
        return Err(ManifestError::schema(section, section, describe(value)));
    };
    if !fields.get("path").is_some_and(Value::is_string) {
        return Err(ManifestError::schema(section, "path", "expected a string"));
    }

    let Some(addons) = fields.get("addons") else {
        return Ok(());
    };
    let Some(addons) = addons.as_object() else {
        return Err(ManifestError::schema(section, "addons", describe(addons)));
    };

    for (id, record) in addons {
        let Some(record) = record.as_object() else {
            return Err(ManifestError::schema(section, id, describe(record)));
        };
        if let Some(root_uri) = record.get("rootURI")
            && !root_uri.is_string()
        {
            return Err(ManifestError::schema(
                section,
                id,
                format!("rootURI is {}", json_type(root_uri)),
            ));
        }
    }

    Ok(())
}

fn describe(value: &Value) -> String {
    format!("expected an object, found {}", json_type(value))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
