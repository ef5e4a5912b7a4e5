//! Resolved project model for front-end build tooling
//!
//! This crate turns a project directory into a typed, read-only view of its
//! build configuration:
//!
//! - **Project**: root and build directories, merged configuration, imports
//! - **Packaging**: archive name, destination, manifest headers, web context
//! - **Localization**: language files per locale and their labels
//! - **Rules**: loaders applying to a source file
//! - **Package manager**: npm or yarn, from lockfiles or installed executables
//! - **Versions**: installed versions of configured presets and loaders
//!
//! # Architecture
//!
//! `proj-core` sits above the configuration and filesystem layers:
//!
//! ```text
//!        proj-cli
//!           |
//!       proj-core
//!           |
//!      proj-config
//!           |
//!        proj-fs
//! ```

pub mod error;
pub mod jar;
pub mod l10n;
pub mod misc;
mod paths;
pub mod pkg_manager;
pub mod project;
pub mod rules;
pub mod versions;

pub use error::{Error, Result};
pub use jar::JarSettings;
pub use l10n::{DEFAULT_LOCALE, Labels, Localization};
pub use misc::MiscSettings;
pub use pkg_manager::{ExecutableProbe, PackageManager, SystemProbe};
pub use proj_config::{ErrorKind, Loader, ModuleResolver, NodeModuleResolver, ResolvedModule};
pub use project::{Imports, Project};
pub use rules::{LoaderUse, Rules};
pub use versions::VersionInfo;
