//! Project configuration inspector
//!
//! Prints the build configuration a front-end project resolves to.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    tracing::debug!(dir = %cli.dir.display(), "Inspecting project");

    match cli.command {
        Some(cmd) => execute_command(cmd, &cli.dir, cli.json),
        None => {
            println!("{} Project configuration inspector", "proj".green().bold());
            println!();
            println!("Run {} for available commands.", "proj --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, dir: &std::path::Path, json: bool) -> Result<()> {
    match cmd {
        Commands::Show => commands::run_show(dir, json),
        Commands::Labels { locale } => commands::run_labels(dir, locale.as_deref(), json),
        Commands::Loaders { file } => commands::run_loaders(dir, &file, json),
        Commands::PkgManager => commands::run_pkg_manager(dir, json),
        Commands::Versions => commands::run_versions(dir, json),
    }
}
