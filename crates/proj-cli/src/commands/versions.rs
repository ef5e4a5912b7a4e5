//! Versions command implementation

use std::path::Path;

use colored::Colorize;

use super::{open, print_json};
use crate::error::Result;

/// Run the versions command
pub fn run_versions(path: &Path, as_json: bool) -> Result<()> {
    let project = open(path);
    let versions = project.versions_info()?;

    if as_json {
        return print_json(versions);
    }

    let width = versions.keys().map(String::len).max().unwrap_or(0);
    for (name, info) in versions {
        println!(
            "{}  {}  {}",
            format!("{name:width$}").cyan(),
            info.version,
            info.path.as_ref().map_or("", |path| path.as_posix()).dimmed(),
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proj_test_utils::TestProject;
    use serde_json::json;

    #[test]
    fn test_versions_of_preset() {
        let project = TestProject::with_package("app", "1.0.0");
        project.add_preset_package("a-preset", "1.0.0", json!({}));
        project.write_config(json!({ "preset": "a-preset" }));
        assert!(run_versions(project.root(), false).is_ok());
        assert!(run_versions(project.root(), true).is_ok());
    }

    #[test]
    fn test_versions_without_plugins() {
        let project = TestProject::with_package("app", "1.0.0");
        assert!(run_versions(project.root(), false).is_ok());
    }
}
