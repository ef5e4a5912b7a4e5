//! Miscellaneous build settings

use crate::{Error, Result};
use proj_config::ConfigTree;
use serde::Serialize;
use serde_json::Value;

/// Parallel file limit when nothing is configured.
pub const DEFAULT_MAX_PARALLEL_FILES: usize = 128;

/// Parallel file limit when packaging is enabled.
pub const JAR_MAX_PARALLEL_FILES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiscSettings {
    pub max_parallel_files: usize,
}

impl MiscSettings {
    pub fn resolve(tree: &ConfigTree, jar_supported: bool) -> Result<Self> {
        let max_parallel_files = match tree.get("max-parallel-files") {
            None => {
                if jar_supported {
                    JAR_MAX_PARALLEL_FILES
                } else {
                    DEFAULT_MAX_PARALLEL_FILES
                }
            }
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| {
                    Error::invalid_field("max-parallel-files", "expected a non-negative integer")
                })?,
            Some(_) => {
                return Err(Error::invalid_field(
                    "max-parallel-files",
                    "expected a non-negative integer",
                ));
            }
        };

        Ok(Self { max_parallel_files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn tree(value: Value) -> ConfigTree {
        match value {
            Value::Object(map) => ConfigTree::from(map),
            _ => unreachable!(),
        }
    }

    #[rstest]
    #[case(json!({}), false, 128)]
    #[case(json!({}), true, 32)]
    #[case(json!({ "max-parallel-files": 7 }), true, 7)]
    #[case(json!({ "max-parallel-files": 200 }), false, 200)]
    fn test_max_parallel_files(
        #[case] config: Value,
        #[case] jar_supported: bool,
        #[case] expected: usize,
    ) {
        let misc = MiscSettings::resolve(&tree(config), jar_supported).unwrap();
        assert_eq!(misc.max_parallel_files, expected);
    }

    #[test]
    fn test_rejects_non_integer() {
        let err = MiscSettings::resolve(&tree(json!({ "max-parallel-files": "many" })), false)
            .unwrap_err();
        assert!(err.to_string().contains("max-parallel-files"));

        assert!(MiscSettings::resolve(&tree(json!({ "max-parallel-files": -1 })), false).is_err());
    }
}
