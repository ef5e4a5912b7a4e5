//! Configuration loading with preset chains
//!
//! The [`ConfigLoader`] locates a project's configuration sources and merges
//! them, lowest precedence first:
//! 1. Built-in defaults
//! 2. Preset chain, root-most preset first
//! 3. The project's explicit configuration file
//!
//! The package manifest and the optional project metadata are loaded
//! alongside. Loading is a pure read of the file system.

use crate::module::{ModuleResolver, ResolvedModule};
use crate::package::{PackageManifest, ProjectMetadata};
use crate::tree::ConfigTree;
use crate::{Error, Result};
use proj_fs::{ConfigStore, NormalizedPath};
use serde_json::Value;

/// Candidate explicit configuration files, checked in order.
pub const CONFIG_FILE_CANDIDATES: &[&str] = &[
    ".npmbundlerrc",
    ".npmbundlerrc.json",
    ".npmbundlerrc.toml",
    ".npmbundlerrc.yaml",
    ".npmbundlerrc.yml",
];

/// Maximum number of presets in one chain.
pub const MAX_PRESET_DEPTH: usize = 8;

/// Everything read from disk for one project.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Defaults, presets and explicit configuration merged together
    pub tree: ConfigTree,
    /// The project's `package.json`
    pub manifest: PackageManifest,
    /// The project's `manifest.json`, or empty metadata
    pub metadata: ProjectMetadata,
    /// The explicit configuration file, if one exists
    pub config_file: Option<NormalizedPath>,
    /// Presets that contributed to the tree, root-most first
    pub presets: Vec<ResolvedModule>,
}

/// Loads and merges the configuration of a project directory.
pub struct ConfigLoader<'a> {
    /// Project root directory
    root: NormalizedPath,
    resolver: &'a dyn ModuleResolver,
    store: ConfigStore,
}

impl<'a> ConfigLoader<'a> {
    /// Create a loader for `root`, resolving presets through `resolver`.
    pub fn new(root: NormalizedPath, resolver: &'a dyn ModuleResolver) -> Self {
        Self {
            root,
            resolver,
            store: ConfigStore::new(),
        }
    }

    /// Get the project root path
    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// The explicit configuration file, if any candidate exists.
    pub fn config_file(&self) -> Option<NormalizedPath> {
        CONFIG_FILE_CANDIDATES
            .iter()
            .map(|name| self.root.join(name))
            .find(NormalizedPath::is_file)
    }

    /// Load every source and merge them.
    ///
    /// # Errors
    ///
    /// - [`Error::ManifestNotFound`] / [`Error::Parse`] for a missing or
    ///   malformed `package.json`
    /// - [`Error::Parse`] for a malformed configuration or preset file
    /// - [`Error::PresetNotFound`] when a preset reference does not resolve
    /// - [`Error::PresetDepthExceeded`] for chains longer than
    ///   [`MAX_PRESET_DEPTH`]
    pub fn load(&self) -> Result<LoadedConfig> {
        let manifest = PackageManifest::load(&self.root)?;
        let metadata = ProjectMetadata::load(&self.root)?;

        let config_file = self.config_file();
        let mut project_layer = match &config_file {
            Some(path) => {
                tracing::debug!(%path, "Loading project config");
                self.load_layer(path)?
            }
            None => {
                tracing::debug!(root = %self.root, "No project config found — using defaults");
                ConfigTree::empty()
            }
        };

        let presets = match project_layer.take_preset() {
            Some(reference) => {
                let reference = preset_reference(reference, config_file.as_ref(), &self.root)?;
                self.load_preset_chain(&reference, &self.root)?
            }
            None => Vec::new(),
        };

        let mut tree = ConfigTree::defaults();
        for (module, layer) in &presets {
            tracing::debug!(preset = %module.reference, path = %module.path, "Merging preset");
            tree.merge(layer);
        }
        tree.merge(&project_layer);

        Ok(LoadedConfig {
            tree,
            manifest,
            metadata,
            config_file,
            presets: presets.into_iter().map(|(module, _)| module).collect(),
        })
    }

    /// Resolve a preset and all of its ancestors, root-most first.
    fn load_preset_chain(
        &self,
        reference: &str,
        from_dir: &NormalizedPath,
    ) -> Result<Vec<(ResolvedModule, ConfigTree)>> {
        let mut chain: Vec<(ResolvedModule, ConfigTree)> = Vec::new();
        let mut next = Some((reference.to_string(), from_dir.clone()));

        while let Some((reference, from_dir)) = next.take() {
            if chain.len() == MAX_PRESET_DEPTH {
                return Err(Error::PresetDepthExceeded {
                    reference,
                    max: MAX_PRESET_DEPTH,
                });
            }

            let module = self
                .resolver
                .resolve(&reference, &from_dir)
                .map_err(|source| Error::PresetNotFound {
                    reference: reference.clone(),
                    source: Box::new(source),
                })?;

            if chain.iter().any(|(seen, _)| seen.path == module.path) {
                tracing::debug!(preset = %reference, "Preset refers back to itself — chain ends");
                break;
            }

            let mut layer = self.load_layer(&module.path)?;
            let parent = match layer.take_preset() {
                Some(parent) => Some(preset_reference(parent, Some(&module.path), &from_dir)?),
                None => None,
            };
            let preset_dir = module.path.parent().unwrap_or_else(|| from_dir.clone());

            tracing::debug!(preset = %reference, path = %module.path, "Resolved preset");
            chain.push((module, layer));
            next = parent.map(|parent| (parent, preset_dir));
        }

        chain.reverse();
        Ok(chain)
    }

    /// Parse one configuration layer; it must be an object.
    fn load_layer(&self, path: &NormalizedPath) -> Result<ConfigTree> {
        let value: Value = self
            .store
            .load(path)
            .map_err(|e| Error::parse(path.to_native(), e.to_string()))?;

        match value {
            Value::Object(map) => Ok(ConfigTree::from(map)),
            other => Err(Error::parse(
                path.to_native(),
                format!("expected an object at the top level, found {}", type_name(&other)),
            )),
        }
    }
}

fn preset_reference(
    value: Value,
    declared_in: Option<&NormalizedPath>,
    fallback: &NormalizedPath,
) -> Result<String> {
    match value {
        Value::String(reference) => Ok(reference),
        other => {
            let path = declared_in.unwrap_or(fallback);
            Err(Error::parse(
                path.to_native(),
                format!("'preset' must be a string, found {}", type_name(&other)),
            ))
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
