//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect the resolved build configuration of a front-end project
#[derive(Parser, Debug)]
#[command(name = "proj")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Project directory
    #[arg(short = 'C', long = "dir", global = true, default_value = ".", env = "PROJ_DIR")]
    pub dir: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the resolved project model
    ///
    /// Prints directories, packaging, localization and miscellaneous
    /// settings.
    Show,

    /// Print localization labels
    ///
    /// Examples:
    ///   proj labels           # Labels of the default language file
    ///   proj labels es_ES     # Labels of one locale
    Labels {
        /// Locale to print; the default file when omitted
        locale: Option<String>,
    },

    /// List the loaders that apply to a source file
    Loaders {
        /// Project-relative path of the source file
        file: String,
    },

    /// Print the package manager governing the project
    PkgManager,

    /// List installed versions of configured presets and loaders
    Versions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_no_args() {
        let cli = Cli::parse_from(["proj"]);
        assert!(!cli.verbose);
        assert!(!cli.json);
        assert_eq!(cli.dir, PathBuf::from("."));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_command() {
        let cli = Cli::parse_from(["proj", "show", "--json", "-v", "--dir", "app"]);
        assert!(cli.verbose);
        assert!(cli.json);
        assert_eq!(cli.dir, PathBuf::from("app"));
        assert_eq!(cli.command, Some(Commands::Show));
    }

    #[test]
    fn test_parse_labels_with_locale() {
        let cli = Cli::parse_from(["proj", "labels", "es_ES"]);
        assert_eq!(
            cli.command,
            Some(Commands::Labels {
                locale: Some("es_ES".to_string())
            })
        );
    }

    #[test]
    fn test_parse_labels_default() {
        let cli = Cli::parse_from(["proj", "labels"]);
        assert_eq!(cli.command, Some(Commands::Labels { locale: None }));
    }

    #[test]
    fn test_parse_loaders() {
        let cli = Cli::parse_from(["proj", "loaders", "src/index.js"]);
        assert_eq!(
            cli.command,
            Some(Commands::Loaders {
                file: "src/index.js".to_string()
            })
        );
    }

    #[test]
    fn test_parse_pkg_manager() {
        let cli = Cli::parse_from(["proj", "-C", "/tmp/app", "pkg-manager"]);
        assert_eq!(cli.dir, PathBuf::from("/tmp/app"));
        assert_eq!(cli.command, Some(Commands::PkgManager));
    }
}
