//! Fixture-based integration tests
//!
//! Each directory under `test-fixtures/projects/` is a small front-end
//! project. These tests open them through [`Project`] and check the
//! resolved model end to end, across proj-fs, proj-config and proj-core.

use pretty_assertions::assert_eq;
use proj_core::versions::{RESOLVER_NAME, RESOLVER_VERSION};
use proj_core::{ExecutableProbe, NodeModuleResolver, PackageManager, Project};
use rstest::rstest;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn fixture_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/projects")
        .join(name)
}

/// Probe that finds nothing, so only lockfiles decide.
struct NothingInstalled;

impl ExecutableProbe for NothingInstalled {
    fn is_available(&self, _program: &str) -> bool {
        false
    }
}

fn open(name: &str) -> Project {
    Project::new(fixture_dir(name)).with_probe(NothingInstalled)
}

fn posix(path: Option<&proj_fs::NormalizedPath>) -> Option<&str> {
    path.map(|p| p.as_posix())
}

fn echo_loader(
    message: &'static str,
) -> impl Fn(&str, &Value) -> proj_config::Result<String> + 'static {
    move |_source: &str, _options: &Value| Ok(message.to_string())
}

// =============================================================================
// Standard project
// =============================================================================

#[test]
fn standard_project_directories() {
    let project = open("standard");

    assert_eq!(project.build_dir().unwrap().as_posix(), "./build");
    assert!(
        project
            .config_file()
            .unwrap()
            .unwrap()
            .as_posix()
            .ends_with("standard/.npmbundlerrc")
    );
    assert_eq!(
        project.absolute(project.build_dir().unwrap()),
        project.dir().join("build")
    );
}

#[test]
fn standard_project_jar() {
    let project = open("standard");
    let jar = project.jar().unwrap();

    let expected_headers: BTreeMap<String, String> = [
        ("Project-Name", "Test Project"),
        ("Project-UUID", "ED7BA470-8E54-465E-825C-99712043E01C"),
        ("Project-Web", "https://somewhere.net/test-project"),
        ("Responsible", "john.doe@somewhere.net"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    assert!(jar.supported);
    assert_eq!(posix(jar.output_dir.as_ref()), Some("./dist"));
    assert_eq!(jar.output_filename.as_deref(), Some("output.jar"));
    assert_eq!(jar.custom_manifest_headers, Some(expected_headers));
    assert_eq!(jar.web_context_path.as_deref(), Some("/standard"));
    assert_eq!(jar.require_js_extender, Some(false));
}

#[test]
fn standard_project_imports() {
    let project = open("standard");
    let imports = project.imports().unwrap();

    let providers: Vec<&str> = imports.keys().map(String::as_str).collect();
    assert_eq!(
        providers,
        vec!["an-osgi-module", "frontend-js-node-shims", "frontend-js-web"]
    );
    assert_eq!(imports["an-osgi-module"]["d3"], ">=3.0.0");
    assert_eq!(imports["frontend-js-web"]["/"], ">=8.0.0");
    assert_eq!(imports["frontend-js-node-shims"].len(), 3);
}

#[test]
fn standard_project_l10n() {
    let project = open("standard");
    let l10n = project.l10n().unwrap();

    assert!(l10n.supported());
    assert_eq!(l10n.available_locales(), Some(&["es_ES".to_string()][..]));
    assert!(
        posix(l10n.language_file_base_name())
            .unwrap()
            .ends_with("standard/features/localization/Language")
    );
    let file_map = l10n.localization_file_map().unwrap();
    assert!(file_map["default"].as_posix().ends_with("Language.properties"));
    assert!(file_map["es_ES"].as_posix().ends_with("Language_es_ES.properties"));

    let labels = l10n.labels(Some("es_ES")).unwrap().unwrap();
    assert_eq!(labels["test-project"], "Proyecto de prueba");
    assert_eq!(l10n.labels(Some("fr_FR")).unwrap(), Some(BTreeMap::new()));
}

#[test]
fn standard_project_misc() {
    let project = open("standard");
    assert_eq!(project.misc().unwrap().max_parallel_files, 32);
}

// =============================================================================
// Packaging variants
// =============================================================================

#[rstest]
#[case::empty("empty", true, Some(false))]
#[case::bool_create_jar("bool-create-jar", true, Some(false))]
#[case::false_create_jar("false-create-jar", false, None)]
#[case::empty_with_portlet("empty-with-portlet", true, Some(true))]
#[case::create_jar_off_with_portlet("create-jar-off-with-portlet", false, None)]
fn packaging_variants(
    #[case] name: &str,
    #[case] supported: bool,
    #[case] require_js_extender: Option<bool>,
) {
    let project = open(name);
    let jar = project.jar().unwrap();

    assert_eq!(jar.supported, supported);
    assert_eq!(jar.require_js_extender, require_js_extender);
    if supported {
        let filename = format!("{name}-1.0.0.jar");
        assert_eq!(jar.output_filename.as_deref(), Some(filename.as_str()));
        assert_eq!(posix(jar.output_dir.as_ref()), Some("./build"));
        let context = format!("/{name}-1.0.0");
        assert_eq!(jar.web_context_path.as_deref(), Some(context.as_str()));
        assert_eq!(project.misc().unwrap().max_parallel_files, 32);
    } else {
        assert_eq!(jar.output_filename, None);
        assert_eq!(jar.output_dir, None);
        assert_eq!(jar.custom_manifest_headers, None);
        assert_eq!(jar.web_context_path, None);
        assert_eq!(project.misc().unwrap().max_parallel_files, 128);
    }
}

#[test]
fn empty_project_has_no_localization() {
    let project = open("empty");
    let l10n = project.l10n().unwrap();

    assert!(!l10n.supported());
    assert_eq!(l10n.labels(None).unwrap(), None);
    assert!(project.imports().unwrap().is_empty());
    assert_eq!(
        project.versions_info().unwrap().keys().map(String::as_str).collect::<Vec<_>>(),
        vec![RESOLVER_NAME]
    );
}

#[test]
fn default_language_file_only() {
    let project = open("default-features");
    let l10n = project.l10n().unwrap();

    assert!(l10n.supported());
    assert_eq!(l10n.available_locales(), Some(&[][..]));
    let labels = l10n.labels(None).unwrap().unwrap();
    assert_eq!(labels["default-features"], "Default Features");
    assert_eq!(labels.len(), 1);
}

// =============================================================================
// Presets
// =============================================================================

#[test]
fn package_preset_applies() {
    let project = open("with-preset");
    let jar = project.jar().unwrap();

    assert_eq!(project.build_dir().unwrap().as_posix(), "./preset-build");
    assert_eq!(posix(jar.output_dir.as_ref()), Some("./preset-dist"));
    assert_eq!(jar.output_filename.as_deref(), Some("with-preset-1.0.0.jar"));

    let versions = project.versions_info().unwrap();
    assert_eq!(versions["a-preset"].version, "1.0.0");
    assert_eq!(posix(versions["a-preset"].path.as_ref()), Some("./node_modules/a-preset"));
}

#[test]
fn chained_presets_layer_in_order() {
    let project = open("chained-preset");
    let jar = project.jar().unwrap();

    assert_eq!(project.build_dir().unwrap().as_posix(), "./own-build");
    assert_eq!(posix(jar.output_dir.as_ref()), Some("./base-dist"));
    assert_eq!(jar.output_filename.as_deref(), Some("child.jar"));
    assert_eq!(jar.web_context_path.as_deref(), Some("/child"));
    assert_eq!(project.misc().unwrap().max_parallel_files, 4);
    // Path presets live outside any package
    assert_eq!(project.versions_info().unwrap().len(), 1);
}

// =============================================================================
// Rules
// =============================================================================

#[test]
fn module_config_preset_and_loader() {
    let resolver =
        NodeModuleResolver::new().with_loader("a-config/my-js-loader", echo_loader("Hi from loader!"));
    let project = open("with-module-cfg").with_resolver(resolver);

    assert_eq!(project.build_dir().unwrap().as_posix(), "./preset-output");

    let loaders = project.rules().unwrap().loaders_for_file("src/index.js");
    assert_eq!(loaders.len(), 1);
    assert_eq!(loaders[0].exec("").unwrap(), "Hi from loader!");
    assert!(project.rules().unwrap().loaders_for_file("README.md").is_empty());
}

#[test]
fn versions_info_of_installed_loaders() {
    // Default resolver: nothing can be executed, everything still resolves
    let project = Project::new(fixture_dir("versions-info"));

    let versions = project.versions_info().unwrap();
    let summary: Vec<(&str, &str, Option<&str>)> = versions
        .iter()
        .map(|(name, info)| (name.as_str(), info.version.as_str(), posix(info.path.as_ref())))
        .collect();

    assert_eq!(
        summary,
        vec![
            (
                "bundler-plugins/dir/loader-0",
                "1.0.0",
                Some("./node_modules/bundler-plugins/dir/loader-0.js")
            ),
            (
                "bundler-plugins/dir/loader-1",
                "1.0.0",
                Some("./node_modules/bundler-plugins/dir/loader-1.js")
            ),
            ("loader-0", "1.0.0", Some("./node_modules/loader-0")),
            (RESOLVER_NAME, RESOLVER_VERSION, None),
        ]
    );

    let js = project.rules().unwrap().loaders_for_file("src/index.js");
    assert_eq!(js.len(), 2);
    assert_eq!(js[0].loader, "loader-0");
    assert!(js[0].exec("").is_err());
}

#[test]
fn registered_loader_receives_options() {
    let resolver = NodeModuleResolver::new()
        .with_loader("loader-0", echo_loader("loader-0"))
        .with_loader("bundler-plugins/dir/loader-1", echo_loader("dir/loader-1"));
    let project = open("versions-info").with_resolver(resolver);

    let css = project.rules().unwrap().loaders_for_file("theme/main.css");
    assert_eq!(css.len(), 1);
    assert_eq!(css[0].options["minify"], Value::Bool(true));
    assert_eq!(css[0].exec("body {}").unwrap(), "dir/loader-1");
    assert_eq!(project.versions_info().unwrap().len(), 4);
}

// =============================================================================
// Package manager
// =============================================================================

#[rstest]
#[case::npm("pkg-manager/npm", Some(PackageManager::Npm))]
#[case::yarn("pkg-manager/yarn", Some(PackageManager::Yarn))]
#[case::both("pkg-manager/both", None)]
#[case::none("pkg-manager/none", None)]
fn package_manager_from_lockfiles(#[case] name: &str, #[case] expected: Option<PackageManager>) {
    assert_eq!(open(name).pkg_manager(), expected);
}

// =============================================================================
// Determinism
// =============================================================================

#[rstest]
#[case("standard")]
#[case("empty")]
#[case("with-preset")]
#[case("chained-preset")]
#[case("default-features")]
fn independent_instances_agree(#[case] name: &str) {
    let first = open(name);
    let second = open(name);

    assert_eq!(first.config().unwrap(), second.config().unwrap());
    assert_eq!(first.build_dir().unwrap(), second.build_dir().unwrap());
    assert_eq!(first.jar().unwrap(), second.jar().unwrap());
    assert_eq!(first.l10n().unwrap(), second.l10n().unwrap());
    assert_eq!(first.misc().unwrap(), second.misc().unwrap());
    assert_eq!(first.pkg_manager(), second.pkg_manager());
}
