//! The merged configuration tree
//!
//! A [`ConfigTree`] holds one configuration layer (defaults, a preset, or the
//! project's own file) or the result of merging several of them. Merging is
//! shallow per top-level key, except for the settings blocks listed in
//! [`NESTED_BLOCKS`], whose objects are merged field by field.

use serde::Serialize;
use serde_json::{Map, Value, json};

/// Top-level keys whose object values merge field by field.
pub const NESTED_BLOCKS: &[&str] = &["create-jar", "localization"];

/// Key holding a layer's parent preset reference.
pub const PRESET_KEY: &str = "preset";

/// Configuration as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigTree {
    values: Map<String, Value>,
}

impl ConfigTree {
    /// An empty layer.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in defaults, the lowest-precedence layer.
    pub fn defaults() -> Self {
        let mut values = Map::new();
        values.insert("output".to_string(), json!("build"));
        values.insert("create-jar".to_string(), json!(true));
        Self { values }
    }

    /// Merge `other` into this tree; `other` takes precedence.
    ///
    /// - Plain keys: the value from `other` replaces ours.
    /// - [`NESTED_BLOCKS`]: when both sides are objects they are deep merged,
    ///   so overlay fields win one by one and base-only fields survive. A
    ///   scalar on either side (`"create-jar": false`) replaces the block.
    pub fn merge(&mut self, other: &ConfigTree) {
        for (key, other_value) in &other.values {
            match self.values.get_mut(key) {
                Some(base_value) if NESTED_BLOCKS.contains(&key.as_str()) => {
                    deep_merge_value(base_value, other_value);
                }
                _ => {
                    self.values.insert(key.clone(), other_value.clone());
                }
            }
        }
    }

    /// Remove and return the parent preset reference of this layer.
    pub fn take_preset(&mut self) -> Option<Value> {
        self.values.remove(PRESET_KEY)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// The tree as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}

impl From<Map<String, Value>> for ConfigTree {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

/// Deep merge two JSON values
///
/// If both values are objects, merge them recursively with `other` taking precedence.
/// Otherwise, `other` replaces `base`.
fn deep_merge_value(base: &mut Value, other: &Value) {
    match (base, other) {
        (Value::Object(base_map), Value::Object(other_map)) => {
            for (key, other_val) in other_map {
                if let Some(base_val) = base_map.get_mut(key) {
                    deep_merge_value(base_val, other_val);
                } else {
                    base_map.insert(key.clone(), other_val.clone());
                }
            }
        }
        (base, other) => {
            *base = other.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(value: Value) -> ConfigTree {
        match value {
            Value::Object(map) => ConfigTree::from(map),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_defaults() {
        let defaults = ConfigTree::defaults();
        assert_eq!(defaults.get_str("output"), Some("build"));
        assert_eq!(defaults.get("create-jar"), Some(&json!(true)));
    }

    #[test]
    fn test_plain_keys_merge_shallow() {
        let mut base = tree(json!({
            "output": "preset-build",
            "imports": { "a": { "x": "1" }, "b": { "y": "2" } }
        }));
        base.merge(&tree(json!({ "imports": { "a": { "z": "3" } } })));

        assert_eq!(base.get_str("output"), Some("preset-build"));
        // `imports` is not a settings block, so the overlay replaces it whole
        assert_eq!(base.get("imports"), Some(&json!({ "a": { "z": "3" } })));
    }

    #[test]
    fn test_nested_blocks_merge_per_field() {
        let mut base = tree(json!({
            "create-jar": {
                "output-dir": "preset-dist",
                "custom-manifest-headers": { "A": "preset", "B": "preset" }
            }
        }));
        base.merge(&tree(json!({
            "create-jar": {
                "output-filename": "out.jar",
                "custom-manifest-headers": { "B": "project" }
            }
        })));

        let jar = base.get("create-jar").unwrap();
        assert_eq!(jar["output-dir"], "preset-dist");
        assert_eq!(jar["output-filename"], "out.jar");
        assert_eq!(jar["custom-manifest-headers"]["A"], "preset");
        assert_eq!(jar["custom-manifest-headers"]["B"], "project");
    }

    #[test]
    fn test_scalar_replaces_nested_block() {
        let mut base = tree(json!({ "create-jar": { "output-dir": "dist" } }));
        base.merge(&tree(json!({ "create-jar": false })));
        assert_eq!(base.get("create-jar"), Some(&json!(false)));

        let mut defaults = ConfigTree::defaults();
        defaults.merge(&tree(json!({ "create-jar": { "output-dir": "dist" } })));
        assert_eq!(defaults.get("create-jar"), Some(&json!({ "output-dir": "dist" })));
    }

    #[test]
    fn test_take_preset_removes_key() {
        let mut layer = tree(json!({ "preset": "my-preset", "output": "x" }));
        assert_eq!(layer.take_preset(), Some(json!("my-preset")));
        assert!(!layer.contains_key("preset"));
        assert!(layer.take_preset().is_none());
    }
}
