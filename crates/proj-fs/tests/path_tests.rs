use proj_fs::{NormalizedPath, absolute};
use tempfile::TempDir;

#[test]
fn test_normalize_forward_slashes() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_posix(), "foo/bar/baz");
}

#[test]
fn test_native_form_uses_platform_separator() {
    let path = NormalizedPath::new("foo/bar");
    let expected = ["foo", "bar"].join(std::path::MAIN_SEPARATOR_STR);
    assert_eq!(path.as_native(), expected);
}

#[test]
fn test_dot_relative_prefixes_plain_relative_paths() {
    assert_eq!(NormalizedPath::dot_relative("build").as_posix(), "./build");
    assert_eq!(NormalizedPath::dot_relative("./dist").as_posix(), "./dist");
    assert_eq!(NormalizedPath::dot_relative("../out").as_posix(), "../out");
    assert_eq!(NormalizedPath::dot_relative("/abs/out").as_posix(), "/abs/out");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    assert_eq!(base.join("baz").as_str(), "foo/bar/baz");
    assert_eq!(base.join("../qux").as_str(), "foo/qux");
}

#[test]
fn test_join_absolute_segment_replaces() {
    let base = NormalizedPath::new("/foo/bar");
    assert_eq!(base.join("/elsewhere").as_str(), "/elsewhere");
}

#[test]
fn test_join_keeps_dot_prefix() {
    let base = NormalizedPath::dot_relative("build");
    assert_eq!(base.join("jar").as_posix(), "./build/jar");
}

#[test]
fn test_relative_to() {
    let root = NormalizedPath::new("/work/project");
    let out = NormalizedPath::new("/work/project/build/out");
    assert_eq!(out.relative_to(&root).as_posix(), "./build/out");

    let sibling = NormalizedPath::new("/work/other");
    assert_eq!(sibling.relative_to(&root).as_posix(), "../other");

    assert_eq!(root.relative_to(&root).as_posix(), ".");
}

#[test]
fn test_resolve_against() {
    let root = NormalizedPath::new("/work/project");
    assert_eq!(
        NormalizedPath::new("./build").resolve_against(&root).as_str(),
        "/work/project/build"
    );
    assert_eq!(
        NormalizedPath::new("/tmp/out").resolve_against(&root).as_str(),
        "/tmp/out"
    );
}

#[test]
fn test_parent() {
    let path = NormalizedPath::new("foo/bar/baz");
    let parent = path.parent().unwrap();
    assert_eq!(parent.as_str(), "foo/bar");
}

#[test]
fn test_file_name_stem_and_extension() {
    let path = NormalizedPath::new("foo/bar/empty-1.0.0.jar");
    assert_eq!(path.file_name(), Some("empty-1.0.0.jar"));
    assert_eq!(path.file_stem(), Some("empty-1.0.0"));
    assert_eq!(path.extension(), Some("jar"));
}

#[test]
fn test_hidden_file_has_no_extension() {
    let path = NormalizedPath::new("root/.npmbundlerrc");
    assert_eq!(path.extension(), None);
    assert_eq!(path.file_stem(), Some(".npmbundlerrc"));
}

#[test]
fn test_exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist");
    assert!(!path.exists());
}

#[test]
fn test_absolute_canonicalizes_existing_dirs() {
    let temp = TempDir::new().unwrap();
    let path = absolute(temp.path().join("sub").join(".."));
    assert!(path.is_absolute());
    assert!(path.is_dir());
    assert!(!path.as_str().ends_with(".."));
}
