//! Localization discovery
//!
//! A language-resource family is a base file plus locale variants living in
//! the same directory:
//!
//! ```text
//! features/localization/
//!   Language.properties         <- "default"
//!   Language_es_ES.properties   <- "es_ES"
//! ```

use crate::{Error, Result};
use proj_config::ConfigTree;
use proj_fs::{NormalizedPath, io, read_properties};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Base path used when configuration does not name one.
pub const DEFAULT_LOCALIZATION_BASE: &str = "features/localization/Language";

/// Extension of language-resource files.
pub const LANGUAGE_FILE_EXTENSION: &str = "properties";

/// Key of the unsuffixed base file in [`Localization::localization_file_map`].
pub const DEFAULT_LOCALE: &str = "default";

/// Label set of one locale.
pub type Labels = BTreeMap<String, String>;

/// Discovered localization files.
///
/// When no language file exists the project is unsupported and every
/// accessor except [`Localization::supported`] yields `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Localization {
    supported: bool,
    language_file_base_name: Option<NormalizedPath>,
    available_locales: Option<Vec<String>>,
    localization_file_map: Option<BTreeMap<String, NormalizedPath>>,
}

impl Localization {
    /// Scan the file system for the configured language-resource family.
    pub fn resolve(tree: &ConfigTree, root: &NormalizedPath) -> Result<Self> {
        let configured = configured_base(tree)?.unwrap_or(DEFAULT_LOCALIZATION_BASE);
        let base = NormalizedPath::new(configured).resolve_against(root);

        let (Some(dir), Some(base_name)) = (base.parent(), base.file_name()) else {
            return Err(Error::invalid_field("localization", "expected a file path"));
        };

        let default_file = dir.join(&format!("{base_name}.{LANGUAGE_FILE_EXTENSION}"));
        let prefix = format!("{base_name}_");
        let suffix = format!(".{LANGUAGE_FILE_EXTENSION}");

        let mut file_map = BTreeMap::new();
        let mut locales = Vec::new();
        for name in io::list_file_names(&dir)? {
            let locale = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(&suffix))
                .filter(|locale| !locale.is_empty());
            if let Some(locale) = locale {
                locales.push(locale.to_string());
                file_map.insert(locale.to_string(), dir.join(&name));
            }
        }

        let has_default = default_file.is_file();
        if !has_default && locales.is_empty() {
            tracing::debug!(%base, "No language files found — localization unsupported");
            return Ok(Self {
                supported: false,
                language_file_base_name: None,
                available_locales: None,
                localization_file_map: None,
            });
        }

        if has_default {
            file_map.insert(DEFAULT_LOCALE.to_string(), default_file);
        }
        tracing::debug!(%base, locales = ?locales, "Discovered language files");

        Ok(Self {
            supported: true,
            language_file_base_name: Some(base),
            available_locales: Some(locales),
            localization_file_map: Some(file_map),
        })
    }

    pub fn supported(&self) -> bool {
        self.supported
    }

    /// Base path of the family, without extension.
    pub fn language_file_base_name(&self) -> Option<&NormalizedPath> {
        self.language_file_base_name.as_ref()
    }

    /// Locales that have a suffixed file, sorted.
    pub fn available_locales(&self) -> Option<&[String]> {
        self.available_locales.as_deref()
    }

    /// Locale (or [`DEFAULT_LOCALE`]) to file.
    pub fn localization_file_map(&self) -> Option<&BTreeMap<String, NormalizedPath>> {
        self.localization_file_map.as_ref()
    }

    /// Labels of `locale`, or of the default file when `locale` is `None`.
    ///
    /// Returns `None` when localization is unsupported, and an empty map for
    /// a locale without a file.
    pub fn labels(&self, locale: Option<&str>) -> Result<Option<Labels>> {
        let Some(file_map) = &self.localization_file_map else {
            return Ok(None);
        };

        let key = locale.unwrap_or(DEFAULT_LOCALE);
        match file_map.get(key) {
            Some(path) => Ok(Some(read_properties(path)?)),
            None => Ok(Some(Labels::new())),
        }
    }
}

fn configured_base(tree: &ConfigTree) -> Result<Option<&str>> {
    match tree.get("localization") {
        Some(Value::String(base)) => return Ok(Some(base.as_str())),
        Some(Value::Object(options)) => match options.get("base") {
            Some(Value::String(base)) => return Ok(Some(base.as_str())),
            None => {}
            Some(_) => return Err(Error::invalid_field("localization.base", "expected a string")),
        },
        None => {}
        Some(_) => {
            return Err(Error::invalid_field(
                "localization",
                "expected a string or an object",
            ));
        }
    }

    let from_jar = tree
        .get("create-jar")
        .and_then(|jar| jar.get("features"))
        .and_then(|features| features.get("localization"));
    match from_jar {
        Some(Value::String(base)) => Ok(Some(base.as_str())),
        None => Ok(None),
        Some(_) => Err(Error::invalid_field(
            "create-jar.features.localization",
            "expected a string",
        )),
    }
}
