//! Package manager command implementation

use std::path::Path;

use colored::Colorize;

use super::{open, print_json};
use crate::error::Result;

/// Run the pkg-manager command
pub fn run_pkg_manager(path: &Path, as_json: bool) -> Result<()> {
    let manager = open(path).pkg_manager();

    if as_json {
        return print_json(&manager);
    }

    match manager {
        Some(manager) => println!("{manager}"),
        None => {
            println!("{}", "unknown".yellow());
            tracing::info!("Add a package-lock.json or yarn.lock to make the choice explicit");
        }
    }
    Ok(())
}
