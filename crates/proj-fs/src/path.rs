//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Both representations are computed once at construction: the posix form
/// (forward slashes) used for comparison and display, and the platform-native
/// form used at I/O boundaries. Callers can ask for either without paying for
/// a second normalization.
///
/// Normalization is purely lexical: repeated separators and `.` segments are
/// dropped and `..` segments are folded into their parent where possible. A
/// relative path that was written with a leading `./` keeps it, so
/// `./build` stays `./build`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
    native: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self::from_posix(normalize(&path_str))
    }

    /// Create a relative path in `./segment` form.
    ///
    /// Paths that climb out of the base (`../x`) and absolute paths are
    /// left as they are.
    pub fn dot_relative(path: impl AsRef<Path>) -> Self {
        let normalized = normalize(&path.as_ref().to_string_lossy());
        if is_absolute_str(&normalized)
            || normalized.starts_with("./")
            || normalized == "."
            || normalized == ".."
            || normalized.starts_with("../")
        {
            Self::from_posix(normalized)
        } else {
            Self::from_posix(format!("./{normalized}"))
        }
    }

    fn from_posix(inner: String) -> Self {
        let native = if cfg!(windows) {
            inner.replace('/', "\\")
        } else {
            inner.clone()
        };
        Self { inner, native }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Forward-slash representation.
    pub fn as_posix(&self) -> &str {
        &self.inner
    }

    /// Platform-native representation.
    pub fn as_native(&self) -> &str {
        &self.native
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.native)
    }

    /// Join this path with a segment.
    ///
    /// An absolute segment replaces the path, as [`Path::join`] does.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        if is_absolute_str(&segment_normalized) {
            return Self::new(segment_normalized);
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self::from_posix(normalize(&joined))
    }

    /// Resolve this path against `base` unless it is already absolute.
    pub fn resolve_against(&self, base: &NormalizedPath) -> Self {
        if self.is_absolute() {
            self.clone()
        } else {
            base.join(&self.inner)
        }
    }

    /// Express this path relative to `base`, in `./x` form.
    ///
    /// Falls back to the path itself when no relative form exists (for
    /// example across Windows drive letters).
    pub fn relative_to(&self, base: &NormalizedPath) -> Self {
        match pathdiff::diff_paths(self.to_native(), base.to_native()) {
            Some(diff) if diff.as_os_str().is_empty() => Self::from_posix(".".to_string()),
            Some(diff) => Self::dot_relative(diff),
            None => self.clone(),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(idx) if idx > 0 => Some(Self::from_posix(trimmed[..idx].to_string())),
            Some(0) => Some(Self::from_posix("/".to_string())),
            _ => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// File name without its last extension.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Whether the path is rooted (`/x`, `C:/x` or `//server/share`).
    pub fn is_absolute(&self) -> bool {
        is_absolute_str(&self.inner)
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

/// Make `path` absolute, canonicalizing it when it exists.
///
/// `dunce` keeps Windows paths free of the `\\?\` verbatim prefix.
pub fn absolute(path: impl AsRef<Path>) -> NormalizedPath {
    let path = path.as_ref();
    if let Ok(canonical) = dunce::canonicalize(path) {
        return NormalizedPath::new(canonical);
    }
    match std::path::absolute(path) {
        Ok(abs) => NormalizedPath::new(abs),
        Err(_) => NormalizedPath::new(path),
    }
}

fn is_absolute_str(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/')
        || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
}

/// Split a posix string into its root prefix and the remainder.
fn split_root(path: &str) -> (&str, &str) {
    if path.starts_with("//") {
        return ("//", &path[2..]);
    }
    if path.starts_with('/') {
        return ("/", &path[1..]);
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        let rest = path[2..].trim_start_matches('/');
        return (&path[..2], rest);
    }
    ("", path)
}

fn normalize(raw: &str) -> String {
    let posix = raw.replace('\\', "/");
    let keep_dot = posix.starts_with("./");
    let (root, rest) = split_root(&posix);

    let mut parts: Vec<&str> = Vec::new();
    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                // `..` at the root of an absolute path stays at the root
                _ if !root.is_empty() => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match root {
        "" if body.is_empty() => ".".to_string(),
        "" if keep_dot && !body.starts_with("..") => format!("./{body}"),
        "" => body,
        "/" | "//" => format!("{root}{body}"),
        drive => format!("{drive}/{body}"),
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.native)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl serde::Serialize for NormalizedPath {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
