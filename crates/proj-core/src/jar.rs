//! Packaging (jar) settings
//!
//! Derived from the `create-jar` block, which is either a boolean or an
//! object of sub-settings:
//!
//! ```json
//! {
//!   "create-jar": {
//!     "output-dir": "dist",
//!     "output-filename": "output.jar",
//!     "custom-manifest-headers": { "Responsible": "john.doe@somewhere.net" },
//!     "web-context-path": "/standard",
//!     "features": { "js-extender": true, "web-context": "/standard" }
//!   }
//! }
//! ```

use crate::paths::root_relative;
use crate::{Error, Result};
use proj_config::LoadedConfig;
use proj_fs::NormalizedPath;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Extension of generated archives.
pub const JAR_EXTENSION: &str = "jar";

const FIELD: &str = "create-jar";

/// Resolved packaging settings.
///
/// When packaging is disabled every field except `supported` is `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JarSettings {
    pub supported: bool,
    pub output_dir: Option<NormalizedPath>,
    pub output_filename: Option<String>,
    pub custom_manifest_headers: Option<BTreeMap<String, String>>,
    pub web_context_path: Option<String>,
    pub require_js_extender: Option<bool>,
}

impl JarSettings {
    fn unsupported() -> Self {
        Self {
            supported: false,
            output_dir: None,
            output_filename: None,
            custom_manifest_headers: None,
            web_context_path: None,
            require_js_extender: None,
        }
    }

    /// Derive packaging settings from loaded configuration.
    ///
    /// `build_dir` is only consulted when packaging is enabled and no
    /// `output-dir` is set.
    pub fn resolve<'b>(
        loaded: &LoadedConfig,
        root: &NormalizedPath,
        build_dir: impl FnOnce() -> Result<&'b NormalizedPath>,
    ) -> Result<Self> {
        let empty = Map::new();
        let options = match loaded.tree.get(FIELD) {
            None | Some(Value::Bool(true)) => &empty,
            Some(Value::Bool(false)) => {
                tracing::debug!("Packaging disabled by configuration");
                return Ok(Self::unsupported());
            }
            Some(Value::Object(options)) => options,
            Some(_) => {
                return Err(Error::invalid_field(FIELD, "expected a boolean or an object"));
            }
        };
        let features = match options.get("features") {
            None => &empty,
            Some(Value::Object(features)) => features,
            Some(_) => {
                return Err(Error::invalid_field("create-jar.features", "expected an object"));
            }
        };

        let output_dir = match string_field(options, "output-dir")? {
            Some(dir) => root_relative(root, dir),
            None => build_dir()?.clone(),
        };

        let output_filename = match string_field(options, "output-filename")? {
            Some(filename) => filename.to_string(),
            None => format!(
                "{}-{}.{}",
                loaded.manifest.name, loaded.manifest.version, JAR_EXTENSION
            ),
        };

        let mut headers = loaded.metadata.custom_headers.clone();
        headers.extend(custom_headers(options)?);

        let web_context_path = match string_field(features, "web-context")? {
            Some(path) => path.to_string(),
            None => match string_field(options, "web-context-path")? {
                Some(path) => path.to_string(),
                None => format!("/{}", strip_extension(&output_filename)),
            },
        };

        let require_js_extender = match features.get("js-extender") {
            Some(Value::Bool(false)) => false,
            _ => loaded.manifest.has_portlet(),
        };

        Ok(Self {
            supported: true,
            output_dir: Some(output_dir),
            output_filename: Some(output_filename),
            custom_manifest_headers: Some(headers),
            web_context_path: Some(web_context_path),
            require_js_extender: Some(require_js_extender),
        })
    }
}

fn string_field<'a>(options: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(_) => Err(Error::invalid_field(
            format!("{FIELD}.{key}"),
            "expected a string",
        )),
    }
}

fn custom_headers(options: &Map<String, Value>) -> Result<BTreeMap<String, String>> {
    let field = "create-jar.custom-manifest-headers";
    match options.get("custom-manifest-headers") {
        None => Ok(BTreeMap::new()),
        Some(Value::Object(headers)) => headers
            .iter()
            .map(|(key, value)| match value {
                Value::String(value) => Ok((key.clone(), value.clone())),
                _ => Err(Error::invalid_field(
                    field,
                    format!("header '{key}' must be a string"),
                )),
            })
            .collect(),
        Some(_) => Err(Error::invalid_field(field, "expected an object")),
    }
}

fn strip_extension(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(idx) if idx > 0 => &filename[..idx],
        _ => filename,
    }
}
