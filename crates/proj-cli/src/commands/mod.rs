//! Command implementations for proj-cli

pub mod labels;
pub mod loaders;
pub mod pkg_manager;
pub mod show;
pub mod versions;

pub use labels::run_labels;
pub use loaders::run_loaders;
pub use pkg_manager::run_pkg_manager;
pub use show::run_show;
pub use versions::run_versions;

use proj_core::Project;
use std::path::Path;

/// Open the project at `path` for inspection.
///
/// Commands only resolve loaders, so the default resolver suffices.
pub(crate) fn open(path: &Path) -> Project {
    Project::new(path)
}

/// Print a value as pretty JSON.
pub(crate) fn print_json(value: &impl serde::Serialize) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
