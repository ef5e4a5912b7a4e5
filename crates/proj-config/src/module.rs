//! Module resolution
//!
//! Presets and rule loaders are referenced either by path (`./my-preset.json`)
//! or by package (`my-preset`, `@scope/pkg/sub/loader`). Turning a reference
//! into a file, and a file into something that can be invoked, is delegated
//! to a [`ModuleResolver`]. The rest of the crate never walks `node_modules`
//! itself, so tests can substitute a stub resolver.

use crate::package::PACKAGE_MANIFEST;
use crate::{Error, Result};
use proj_fs::{ConfigStore, NormalizedPath};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Extensions tried, in order, when a reference names a file without one.
const EXTENSIONS: &[&str] = &["js", "json"];

/// Entry points tried, in order, when a package declares no `main`.
const DEFAULT_ENTRY_POINTS: &[&str] = &["index.js", "index.json", "config.json"];

/// The package a resolved module lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: String,
    pub dir: NormalizedPath,
}

/// A reference resolved to a concrete file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// The reference as written in configuration
    pub reference: String,
    /// Absolute path of the resolved file
    pub path: NormalizedPath,
    /// Owning package, when the reference was resolved through `node_modules`
    pub package: Option<PackageInfo>,
}

impl ResolvedModule {
    /// Whether the reference names a whole package rather than a file in it.
    pub fn is_package_root(&self) -> bool {
        self.package
            .as_ref()
            .is_some_and(|package| package.name == self.reference)
    }
}

/// Something that transforms file content, such as a rule loader.
pub trait Loader {
    /// Process `source` with the rule's `options`.
    fn exec(&self, source: &str, options: &Value) -> Result<String>;
}

impl<F> Loader for F
where
    F: Fn(&str, &Value) -> Result<String>,
{
    fn exec(&self, source: &str, options: &Value) -> Result<String> {
        self(source, options)
    }
}

/// Capability to resolve references and load invocable modules.
pub trait ModuleResolver {
    /// Resolve `reference` as seen from the directory `from_dir`.
    fn resolve(&self, reference: &str, from_dir: &NormalizedPath) -> Result<ResolvedModule>;

    /// Obtain an invocable loader for a resolved module.
    fn load(&self, module: &ResolvedModule) -> Result<Rc<dyn Loader>>;
}

/// Whether a reference is a path rather than a package name.
pub fn is_path_reference(reference: &str) -> bool {
    reference.starts_with("./")
        || reference.starts_with("../")
        || reference == "."
        || reference == ".."
        || NormalizedPath::new(reference).is_absolute()
}

/// Split `@scope/name/sub/path` into `("@scope/name", Some("sub/path"))`.
pub fn split_package_reference(reference: &str) -> (&str, Option<&str>) {
    let name_segments = if reference.starts_with('@') { 2 } else { 1 };
    let mut boundary = None;
    for (count, (idx, _)) in reference.match_indices('/').enumerate() {
        if count + 1 == name_segments {
            boundary = Some(idx);
            break;
        }
    }
    match boundary {
        Some(idx) => (&reference[..idx], Some(&reference[idx + 1..])),
        None => (reference, None),
    }
}

#[derive(Debug, Deserialize)]
struct PackageEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    main: Option<String>,
}

/// Node-style resolver over `node_modules` directories.
///
/// Package references are looked up in `node_modules` of the requesting
/// directory and each of its ancestors. Loaders cannot be evaluated from
/// JavaScript, so invocable implementations are registered per reference
/// with [`NodeModuleResolver::with_loader`].
#[derive(Default)]
pub struct NodeModuleResolver {
    loaders: HashMap<String, Rc<dyn Loader>>,
}

impl fmt::Debug for NodeModuleResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<&String> = self.loaders.keys().collect();
        registered.sort();
        f.debug_struct("NodeModuleResolver")
            .field("loaders", &registered)
            .finish()
    }
}

impl NodeModuleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the implementation invoked for loader `reference`.
    pub fn with_loader(mut self, reference: impl Into<String>, loader: impl Loader + 'static) -> Self {
        self.loaders.insert(reference.into(), Rc::new(loader));
        self
    }

    fn resolve_package(
        &self,
        reference: &str,
        from_dir: &NormalizedPath,
    ) -> Option<(NormalizedPath, PackageInfo)> {
        let (name, sub_path) = split_package_reference(reference);

        let mut dir = Some(from_dir.clone());
        while let Some(current) = dir {
            let package_dir = current.join("node_modules").join(name);
            if package_dir.is_dir() {
                tracing::trace!(reference, %package_dir, "Found package directory");
                let entry = read_package_entry(&package_dir);
                let info = PackageInfo {
                    name: entry
                        .as_ref()
                        .and_then(|e| e.name.clone())
                        .unwrap_or_else(|| name.to_string()),
                    version: entry
                        .as_ref()
                        .and_then(|e| e.version.clone())
                        .unwrap_or_else(|| "0.0.0".to_string()),
                    dir: package_dir.clone(),
                };
                let file = match sub_path {
                    Some(sub) => resolve_file_or_dir(&package_dir.join(sub)),
                    None => resolve_entry_point(&package_dir),
                };
                return file.map(|file| (file, info));
            }
            dir = current.parent();
        }
        None
    }
}

impl ModuleResolver for NodeModuleResolver {
    fn resolve(&self, reference: &str, from_dir: &NormalizedPath) -> Result<ResolvedModule> {
        let not_found = || Error::ModuleNotFound {
            reference: reference.to_string(),
            from: from_dir.to_native(),
        };

        if is_path_reference(reference) {
            let path = resolve_file_or_dir(&from_dir.join(reference)).ok_or_else(not_found)?;
            return Ok(ResolvedModule {
                reference: reference.to_string(),
                path,
                package: None,
            });
        }

        let (path, package) = self
            .resolve_package(reference, from_dir)
            .ok_or_else(not_found)?;
        tracing::debug!(reference, %path, "Resolved module");
        Ok(ResolvedModule {
            reference: reference.to_string(),
            path,
            package: Some(package),
        })
    }

    fn load(&self, module: &ResolvedModule) -> Result<Rc<dyn Loader>> {
        self.loaders
            .get(&module.reference)
            .or_else(|| self.loaders.get(module.path.as_str()))
            .cloned()
            .ok_or_else(|| Error::LoaderUnavailable {
                reference: module.reference.clone(),
                path: module.path.to_native(),
            })
    }
}

fn read_package_entry(dir: &NormalizedPath) -> Option<PackageEntry> {
    let path = dir.join(PACKAGE_MANIFEST);
    if !path.is_file() {
        return None;
    }
    match ConfigStore::new().load(&path) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!(%path, error = %e, "Ignoring unreadable package manifest");
            None
        }
    }
}

fn resolve_file(path: &NormalizedPath) -> Option<NormalizedPath> {
    if path.is_file() {
        return Some(path.clone());
    }
    let file_name = path.file_name()?;
    let parent = path.parent()?;
    EXTENSIONS
        .iter()
        .map(|ext| parent.join(&format!("{file_name}.{ext}")))
        .find(NormalizedPath::is_file)
}

fn resolve_file_or_dir(path: &NormalizedPath) -> Option<NormalizedPath> {
    resolve_file(path).or_else(|| {
        if path.is_dir() {
            resolve_entry_point(path)
        } else {
            None
        }
    })
}

fn resolve_entry_point(dir: &NormalizedPath) -> Option<NormalizedPath> {
    if let Some(main) = read_package_entry(dir).and_then(|entry| entry.main) {
        let main_path = dir.join(&main);
        if let Some(file) = resolve_file(&main_path) {
            return Some(file);
        }
        let index = main_path.join("index");
        if let Some(file) = resolve_file(&index) {
            return Some(file);
        }
    }
    DEFAULT_ENTRY_POINTS
        .iter()
        .map(|entry| dir.join(entry))
        .find(NormalizedPath::is_file)
}
