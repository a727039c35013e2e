//! `package.json` model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Project-relative location of the manifest
pub const MANIFEST_PATH: &str = "package.json";

/// Key holding the scaffolder's own bookkeeping
pub const METADATA_KEY: &str = "cfaithaMetadata";

/// Dependency declaration document of the generated project.
///
/// Both dependency maps are `BTreeMap`s, so they always serialize in
/// lexicographic key order. Everything else is kept verbatim, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: String,

    /// Free-form fields (version, scripts, engines, ...)
    #[serde(flatten)]
    pub metadata: Map<String, Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dependencies: BTreeMap<String, String>,

    #[serde(
        default,
        rename = "devDependencies",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    /// Two-space indented JSON with a trailing newline
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Add or replace an npm script, keeping the position of an existing one
    pub fn set_script(&mut self, name: &str, command: &str) {
        let scripts = self
            .metadata
            .entry("scripts")
            .or_insert_with(|| Value::Object(Map::new()));
        if !scripts.is_object() {
            *scripts = Value::Object(Map::new());
        }
        if let Value::Object(scripts) = scripts {
            scripts.insert(name.to_string(), Value::String(command.to_string()));
        }
    }

    pub fn script(&self, name: &str) -> Option<&str> {
        self.metadata.get("scripts")?.get(name)?.as_str()
    }

    /// Record the final package name, scaffolder version and package manager
    pub fn stamp(&mut self, package_name: &str, init_version: &str, package_manager: Option<&str>) {
        self.name = package_name.to_string();

        let mut meta = Map::new();
        meta.insert(
            "initVersion".to_string(),
            Value::String(init_version.to_string()),
        );
        self.metadata
            .insert(METADATA_KEY.to_string(), Value::Object(meta));

        if let Some(pm) = package_manager {
            self.metadata
                .insert("packageManager".to_string(), Value::String(pm.to_string()));
        }
    }
}
