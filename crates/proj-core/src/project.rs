//! The project aggregate
//!
//! A [`Project`] owns a root directory and derives every view of its
//! configuration on first access. Each view lives in its own cell: the first
//! call computes and stores it, later calls return the stored value. Nothing
//! is read from disk at construction, so errors surface from the accessor
//! that needed the failing input.

use crate::jar::JarSettings;
use crate::l10n::Localization;
use crate::misc::MiscSettings;
use crate::paths::root_relative;
use crate::pkg_manager::{self, ExecutableProbe, PackageManager, SystemProbe};
use crate::rules::Rules;
use crate::versions::{self, VersionInfo};
use crate::{Error, Result};
use proj_config::{ConfigLoader, ConfigTree, LoadedConfig, ModuleResolver, NodeModuleResolver, PackageManifest};
use proj_fs::NormalizedPath;
use serde_json::Value;
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

/// Semver ranges per module, keyed by module name or `/` for the whole package.
pub type ImportRanges = BTreeMap<String, String>;

/// Cross-package import declarations, keyed by providing package.
pub type Imports = BTreeMap<String, ImportRanges>;

/// Return the cached value, computing it first if needed.
fn cached<T>(cell: &OnceCell<T>, init: impl FnOnce() -> Result<T>) -> Result<&T> {
    if let Some(value) = cell.get() {
        return Ok(value);
    }
    let value = init()?;
    Ok(cell.get_or_init(|| value))
}

/// A front-end project and its resolved build configuration.
///
/// # Example
///
/// ```ignore
/// use proj_core::Project;
///
/// let project = Project::new("/path/to/project");
/// println!("build dir: {}", project.build_dir()?.as_posix());
/// if project.jar()?.supported {
///     println!("jar: {:?}", project.jar()?.output_filename);
/// }
/// ```
pub struct Project {
    dir: NormalizedPath,
    resolver: Rc<dyn ModuleResolver>,
    probe: Box<dyn ExecutableProbe>,

    loaded: OnceCell<LoadedConfig>,
    build_dir: OnceCell<NormalizedPath>,
    imports: OnceCell<Imports>,
    jar: OnceCell<JarSettings>,
    l10n: OnceCell<Localization>,
    rules: OnceCell<Rules>,
    misc: OnceCell<MiscSettings>,
    pkg_manager: OnceCell<Option<PackageManager>>,
    versions: OnceCell<BTreeMap<String, VersionInfo>>,
}

impl Project {
    /// Create a project rooted at `dir`.
    ///
    /// Uses [`NodeModuleResolver`] for presets and loaders and
    /// [`SystemProbe`] for package manager probing.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: proj_fs::absolute(dir),
            resolver: Rc::new(NodeModuleResolver::new()),
            probe: Box::new(SystemProbe),
            loaded: OnceCell::new(),
            build_dir: OnceCell::new(),
            imports: OnceCell::new(),
            jar: OnceCell::new(),
            l10n: OnceCell::new(),
            rules: OnceCell::new(),
            misc: OnceCell::new(),
            pkg_manager: OnceCell::new(),
            versions: OnceCell::new(),
        }
    }

    /// Replace the module resolver.
    pub fn with_resolver(mut self, resolver: impl ModuleResolver + 'static) -> Self {
        self.resolver = Rc::new(resolver);
        self
    }

    /// Replace the executable probe.
    pub fn with_probe(mut self, probe: impl ExecutableProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Absolute project root.
    pub fn dir(&self) -> &NormalizedPath {
        &self.dir
    }

    fn loaded(&self) -> Result<&LoadedConfig> {
        cached(&self.loaded, || {
            tracing::debug!(root = %self.dir, "Loading project configuration");
            Ok(ConfigLoader::new(self.dir.clone(), self.resolver.as_ref()).load()?)
        })
    }

    /// The merged configuration tree.
    pub fn config(&self) -> Result<&ConfigTree> {
        Ok(&self.loaded()?.tree)
    }

    /// The package manifest.
    pub fn manifest(&self) -> Result<&PackageManifest> {
        Ok(&self.loaded()?.manifest)
    }

    /// The explicit configuration file, if the project has one.
    pub fn config_file(&self) -> Result<Option<&NormalizedPath>> {
        Ok(self.loaded()?.config_file.as_ref())
    }

    /// Build output directory relative to the root (`./build` by default).
    pub fn build_dir(&self) -> Result<&NormalizedPath> {
        cached(&self.build_dir, || {
            let tree = &self.loaded()?.tree;
            match tree.get("output") {
                Some(Value::String(output)) => Ok(root_relative(&self.dir, output)),
                Some(_) => Err(Error::invalid_field("output", "expected a string")),
                None => Ok(NormalizedPath::dot_relative("build")),
            }
        })
    }

    /// Resolve a root-relative path to an absolute one.
    pub fn absolute(&self, relative: &NormalizedPath) -> NormalizedPath {
        relative.resolve_against(&self.dir)
    }

    /// Cross-package import declarations, passed through unvalidated.
    pub fn imports(&self) -> Result<&Imports> {
        cached(&self.imports, || {
            let tree = &self.loaded()?.tree;
            match tree.get("imports") {
                None => Ok(Imports::new()),
                Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                    Error::invalid_field("imports", e.to_string())
                }),
            }
        })
    }

    /// Packaging settings.
    pub fn jar(&self) -> Result<&JarSettings> {
        cached(&self.jar, || {
            let loaded = self.loaded()?;
            JarSettings::resolve(loaded, &self.dir, || self.build_dir())
        })
    }

    /// Localization files and labels.
    pub fn l10n(&self) -> Result<&Localization> {
        cached(&self.l10n, || Localization::resolve(&self.loaded()?.tree, &self.dir))
    }

    /// Module loader rules.
    pub fn rules(&self) -> Result<&Rules> {
        cached(&self.rules, || {
            Rules::resolve(&self.loaded()?.tree, &self.dir, &self.resolver)
        })
    }

    /// Miscellaneous settings.
    pub fn misc(&self) -> Result<&MiscSettings> {
        cached(&self.misc, || {
            MiscSettings::resolve(&self.loaded()?.tree, self.jar()?.supported)
        })
    }

    /// The package manager governing the project, if it can be determined.
    ///
    /// Needs no configuration, so it never fails.
    pub fn pkg_manager(&self) -> Option<PackageManager> {
        *self
            .pkg_manager
            .get_or_init(|| pkg_manager::detect(&self.dir, self.probe.as_ref()))
    }

    /// Versions of this resolver and of every preset and loader resolved from
    /// an installed package.
    ///
    /// Only resolves references; no loader is loaded.
    pub fn versions_info(&self) -> Result<&BTreeMap<String, VersionInfo>> {
        cached(&self.versions, || {
            let presets = &self.loaded()?.presets;
            let loaders = self.rules()?.all_loaders().map(|loader| &loader.resolved_module);
            Ok(versions::collect(&self.dir, presets.iter().chain(loaders)))
        })
    }
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("dir", &self.dir)
            .field("loaded", &self.loaded.get().is_some())
            .finish_non_exhaustive()
    }
}
