//! Root-relative path helpers

use proj_fs::NormalizedPath;

/// Express a configured directory relative to the project root in `./x` form.
///
/// Relative values are taken as relative to the root already; absolute
/// values are relativized against it.
pub fn root_relative(root: &NormalizedPath, configured: &str) -> NormalizedPath {
    let path = NormalizedPath::new(configured);
    if path.is_absolute() {
        path.relative_to(root)
    } else {
        NormalizedPath::dot_relative(path.as_str())
    }
}
