//! Labels command implementation

use std::path::Path;

use colored::Colorize;

use super::{open, print_json};
use crate::error::Result;

/// Run the labels command
pub fn run_labels(path: &Path, locale: Option<&str>, as_json: bool) -> Result<()> {
    let project = open(path);
    let labels = project.l10n()?.labels(locale)?;

    if as_json {
        return print_json(&labels);
    }

    match labels {
        None => {
            println!("{}", "Localization not supported".yellow());
            println!();
            println!(
                "Add {} to provide labels.",
                "features/localization/Language.properties".cyan()
            );
        }
        Some(labels) if labels.is_empty() => {
            println!(
                "{} {}",
                "No labels for".dimmed(),
                locale.unwrap_or(proj_core::DEFAULT_LOCALE)
            );
        }
        Some(labels) => {
            for (key, value) in &labels {
                println!("{}={}", key.cyan(), value);
            }
        }
    }

    Ok(())
}
