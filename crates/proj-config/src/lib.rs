//! Layered configuration loading for front-end projects
//!
//! This crate reads a project's build configuration from its layered
//! sources and produces one merged [`ConfigTree`]:
//!
//! - **Defaults**: built-in values (`output`, `create-jar`)
//! - **Presets**: reusable configuration referenced by package name or path,
//!   chained through their own `preset` key
//! - **Project configuration**: `.npmbundlerrc` (JSON, TOML or YAML)
//! - **Package manifest**: `package.json`, plus optional `manifest.json`
//!   metadata
//!
//! Module references are resolved through the [`ModuleResolver`]
//! capability; [`NodeModuleResolver`] implements Node's `node_modules`
//! lookup.
//!
//! # Example
//!
//! ```ignore
//! use proj_config::{ConfigLoader, NodeModuleResolver};
//! use proj_fs::NormalizedPath;
//!
//! let resolver = NodeModuleResolver::new();
//! let loaded = ConfigLoader::new(NormalizedPath::new("/path/to/project"), &resolver).load()?;
//! println!("output: {:?}", loaded.tree.get_str("output"));
//! ```

pub mod error;
pub mod loader;
pub mod module;
pub mod package;
pub mod tree;

pub use error::{Error, ErrorKind, Result};
pub use loader::{CONFIG_FILE_CANDIDATES, ConfigLoader, LoadedConfig, MAX_PRESET_DEPTH};
pub use module::{Loader, ModuleResolver, NodeModuleResolver, PackageInfo, ResolvedModule};
pub use package::{PackageManifest, ProjectMetadata};
pub use tree::ConfigTree;
