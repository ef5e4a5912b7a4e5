//! Package manifest (`package.json`) and project metadata (`manifest.json`)

use crate::{Error, Result};
use proj_fs::{ConfigStore, NormalizedPath};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// File name of the package manifest.
pub const PACKAGE_MANIFEST: &str = "package.json";

/// File name of the optional project metadata document.
pub const PROJECT_METADATA: &str = "manifest.json";

/// The fields of `package.json` this layer consumes.
///
/// Only the manifest's presence is required; a missing `name` or `version`
/// reads as empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,

    /// Entry point, used by module resolution
    #[serde(default)]
    pub main: Option<String>,

    /// Portlet descriptor section; only its presence matters here
    #[serde(default)]
    pub portlet: Option<Value>,
}

impl PackageManifest {
    /// Load the manifest from `dir/package.json`.
    ///
    /// A missing file is [`Error::ManifestNotFound`]; malformed content or
    /// missing `name`/`version` is [`Error::Parse`].
    pub fn load(dir: &NormalizedPath) -> Result<Self> {
        let path = dir.join(PACKAGE_MANIFEST);
        if !path.is_file() {
            return Err(Error::ManifestNotFound {
                path: path.to_native(),
            });
        }

        ConfigStore::new()
            .load(&path)
            .map_err(|e| Error::parse(path.to_native(), e.to_string()))
    }

    /// Whether the manifest declares a portlet section.
    pub fn has_portlet(&self) -> bool {
        self.portlet.is_some()
    }
}

/// Project metadata declared next to the package manifest.
///
/// Currently only the custom archive manifest headers are read from it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default, rename = "customHeaders")]
    pub custom_headers: BTreeMap<String, String>,
}

impl ProjectMetadata {
    /// Load `dir/manifest.json`, or empty metadata when it does not exist.
    pub fn load(dir: &NormalizedPath) -> Result<Self> {
        let path = dir.join(PROJECT_METADATA);
        if !path.is_file() {
            tracing::debug!(%path, "No project metadata found — skipping");
            return Ok(Self::default());
        }

        ConfigStore::new()
            .load(&path)
            .map_err(|e| Error::parse(path.to_native(), e.to_string()))
    }
}
