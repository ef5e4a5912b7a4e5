//! Show command implementation

use std::path::Path;

use colored::Colorize;
use proj_core::Project;
use serde_json::json;

use super::{open, print_json};
use crate::error::Result;

/// Run the show command
pub fn run_show(path: &Path, as_json: bool) -> Result<()> {
    let project = open(path);

    if as_json {
        return print_json(&json!({
            "dir": project.dir(),
            "configFile": project.config_file()?,
            "buildDir": project.build_dir()?,
            "imports": project.imports()?,
            "jar": project.jar()?,
            "l10n": project.l10n()?,
            "misc": project.misc()?,
            "pkgManager": project.pkg_manager(),
        }));
    }

    print_human(&project)
}

fn print_human(project: &Project) -> Result<()> {
    let manifest = project.manifest()?;
    println!(
        "{} {}",
        manifest.name.bold(),
        manifest.version.dimmed()
    );
    println!();

    println!("{}:      {}", "Path".dimmed(), project.dir());
    match project.config_file()? {
        Some(file) => println!("{}:    {}", "Config".dimmed(), file),
        None => println!("{}:    {}", "Config".dimmed(), "defaults only".dimmed()),
    }
    println!("{}: {}", "Build dir".dimmed(), project.build_dir()?.as_posix().cyan());
    println!();

    let jar = project.jar()?;
    println!("{}:", "Packaging".bold());
    if jar.supported {
        if let (Some(dir), Some(file)) = (&jar.output_dir, &jar.output_filename) {
            println!("  {} {}/{}", "+".green(), dir.as_posix(), file.cyan());
        }
        if let Some(context) = &jar.web_context_path {
            println!("  {}: {}", "Web context".dimmed(), context);
        }
        if jar.require_js_extender == Some(true) {
            println!("  {}: {}", "JS extender".dimmed(), "required".yellow());
        }
        if let Some(headers) = jar.custom_manifest_headers.as_ref().filter(|h| !h.is_empty()) {
            println!("  {}:", "Manifest headers".dimmed());
            for (name, value) in headers {
                println!("    {name}: {value}");
            }
        }
    } else {
        println!("  {}", "Disabled".dimmed());
    }
    println!();

    let l10n = project.l10n()?;
    println!("{}:", "Localization".bold());
    match l10n.available_locales() {
        Some(locales) if l10n.supported() => {
            let listed = if locales.is_empty() {
                "default only".to_string()
            } else {
                locales.join(", ")
            };
            println!("  {} {}", "+".green(), listed);
        }
        _ => println!("  {}", "None".dimmed()),
    }
    println!();

    let imports = project.imports()?;
    println!("{}:", "Imports".bold());
    if imports.is_empty() {
        println!("  {}", "None".dimmed());
    } else {
        for (package, ranges) in imports {
            println!("  {} {} ({} modules)", "+".green(), package.cyan(), ranges.len());
        }
    }
    println!();

    println!(
        "{}: {}",
        "Max parallel files".dimmed(),
        project.misc()?.max_parallel_files
    );
    match project.pkg_manager() {
        Some(manager) => println!("{}: {}", "Package manager".dimmed(), manager.to_string().cyan()),
        None => println!("{}: {}", "Package manager".dimmed(), "unknown".yellow()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proj_test_utils::TestProject;
    use serde_json::json;

    #[test]
    fn test_show_empty_project() {
        let project = TestProject::with_package("empty", "1.0.0");
        project.add_lockfile("package-lock.json");
        assert!(run_show(project.root(), false).is_ok());
        assert!(run_show(project.root(), true).is_ok());
    }

    #[test]
    fn test_show_missing_manifest_fails() {
        let project = TestProject::new();
        assert!(run_show(project.root(), false).is_err());
    }

    #[test]
    fn test_show_with_packaging_disabled() {
        let project = TestProject::with_package("app", "1.0.0");
        project.add_lockfile("yarn.lock");
        project.write_config(json!({ "create-jar": false }));
        assert!(run_show(project.root(), false).is_ok());
    }
}
