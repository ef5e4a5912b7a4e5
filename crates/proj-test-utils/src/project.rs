//! [`TestProject`] builder for project configuration test scenarios.

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project directory with helper methods for test setup.
///
/// # Example
///
/// ```rust,no_run
/// use proj_test_utils::TestProject;
/// use serde_json::json;
///
/// let project = TestProject::with_package("demo", "1.0.0");
/// project.write_config(json!({ "output": "dist" }));
/// project.write_file("features/localization/Language.properties", "k=v\n");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory (no package manifest).
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Create a project with a minimal `package.json`.
    pub fn with_package(name: &str, version: &str) -> Self {
        let project = Self::new();
        project.write_package_json(json!({ "name": name, "version": version }));
        project
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative` inside the project.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Could not write {}: {}", full_path.display(), e));
    }

    /// Write a pretty-printed JSON document to `relative`.
    pub fn write_json(&self, relative: &str, value: Value) {
        self.write_file(relative, &serde_json::to_string_pretty(&value).unwrap());
    }

    /// Write the project's `package.json`.
    pub fn write_package_json(&self, value: Value) {
        self.write_json("package.json", value);
    }

    /// Write the explicit `.npmbundlerrc` configuration.
    pub fn write_config(&self, value: Value) {
        self.write_json(".npmbundlerrc", value);
    }

    /// Write the `manifest.json` metadata file with the given custom headers.
    pub fn write_manifest_headers(&self, headers: Value) {
        self.write_json("manifest.json", json!({ "customHeaders": headers }));
    }

    /// Install a package under `node_modules/<name>` with the given files.
    ///
    /// `files` are `(relative path inside the package, content)` pairs. A
    /// `package.json` with `name` and `version` is always written.
    pub fn add_node_package(&self, name: &str, version: &str, files: &[(&str, &str)]) {
        let package_dir = format!("node_modules/{name}");
        self.write_json(
            &format!("{package_dir}/package.json"),
            json!({ "name": name, "version": version }),
        );
        for (file, content) in files {
            self.write_file(&format!("{package_dir}/{file}"), content);
        }
    }

    /// Install a preset package whose `index.json` holds `config`.
    pub fn add_preset_package(&self, name: &str, version: &str, config: Value) {
        let content = serde_json::to_string_pretty(&config).unwrap();
        self.add_node_package(name, version, &[("index.json", &content)]);
    }

    /// Create an empty lockfile such as `yarn.lock`.
    pub fn add_lockfile(&self, file_name: &str) {
        self.write_file(file_name, "");
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }
}
