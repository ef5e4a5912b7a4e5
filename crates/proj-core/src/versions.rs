//! Version inventory of configured build plugins
//!
//! Lists this resolver and every preset and loader whose reference resolved
//! into an installed package, so build reports can record exactly what
//! produced the output.

use proj_config::ResolvedModule;
use proj_fs::NormalizedPath;
use serde::Serialize;
use std::collections::BTreeMap;

/// Inventory key of the resolver's own entry.
pub const RESOLVER_NAME: &str = env!("CARGO_PKG_NAME");

/// Version of the resolver itself.
pub const RESOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    /// Version of the owning package
    pub version: String,
    /// Package directory for whole-package references, else the module
    /// file; relative to the project root. Absent for the resolver's entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<NormalizedPath>,
}

/// Build the inventory keyed by reference.
///
/// Always holds the resolver's own entry. Modules outside any package (path
/// references) are skipped.
pub fn collect<'a>(
    root: &NormalizedPath,
    modules: impl IntoIterator<Item = &'a ResolvedModule>,
) -> BTreeMap<String, VersionInfo> {
    let mut inventory = BTreeMap::new();
    inventory.insert(
        RESOLVER_NAME.to_string(),
        VersionInfo {
            version: RESOLVER_VERSION.to_string(),
            path: None,
        },
    );

    for module in modules {
        let Some(package) = &module.package else {
            continue;
        };
        let location = if module.is_package_root() {
            &package.dir
        } else {
            &module.path
        };
        inventory.insert(
            module.reference.clone(),
            VersionInfo {
                version: package.version.clone(),
                path: Some(location.relative_to(root)),
            },
        );
    }

    inventory
}
