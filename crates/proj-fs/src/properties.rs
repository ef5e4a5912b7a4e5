//! Line-oriented `key=value` label files

use crate::{NormalizedPath, Result, io};
use std::collections::BTreeMap;

/// Parse `key=value` pairs, one per line.
///
/// Blank lines and lines starting with `#` or `!` are comments. Keys and
/// values are trimmed; the first `=` separates them, so values may contain
/// further `=` characters. Later duplicates win.
pub fn parse_properties(content: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        match line.split_once('=') {
            Some((key, value)) => {
                labels.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                tracing::warn!(line = index + 1, "Ignoring label line without '='");
            }
        }
    }

    labels
}

/// Read and parse a label file.
pub fn read_properties(path: &NormalizedPath) -> Result<BTreeMap<String, String>> {
    let content = io::read_text(path)?;
    Ok(parse_properties(&content))
}
