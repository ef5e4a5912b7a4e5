//! Loaders command implementation

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use super::{open, print_json};
use crate::error::{CliError, Result};

/// Run the loaders command
pub fn run_loaders(path: &Path, file: &str, as_json: bool) -> Result<()> {
    if Path::new(file).is_absolute() {
        return Err(CliError::user(format!(
            "'{file}' must be relative to the project root"
        )));
    }

    let project = open(path);
    let rules = project.rules()?;
    let loaders = rules.loaders_for_file(file);

    if as_json {
        let listed: Vec<_> = loaders
            .iter()
            .map(|used| {
                json!({
                    "loader": used.loader,
                    "options": used.options,
                    "path": used.resolved_module.path.relative_to(project.dir()),
                })
            })
            .collect();
        return print_json(&listed);
    }

    if loaders.is_empty() {
        println!("{} {}", "No loaders apply to".dimmed(), file);
        return Ok(());
    }

    println!("{} {}:", "Loaders for".bold(), file.cyan());
    for used in loaders {
        let location = used.resolved_module.path.relative_to(project.dir());
        println!("  {} {} ({})", "+".green(), used.loader.cyan(), location.as_posix().dimmed());
        if used.options.as_object().is_some_and(|options| !options.is_empty()) {
            println!("    {}: {}", "options".dimmed(), used.options);
        }
    }

    Ok(())
}
