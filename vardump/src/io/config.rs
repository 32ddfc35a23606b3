//! Dump configuration, optionally loaded from a TOML file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::DumpError;

/// Rendering knobs shared by every dump of a [`Dumper`](crate::Dumper).
///
/// Missing fields default to a two-space indent and a depth of 5.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DumpConfig {
    /// Literal unit repeated once per depth level.
    pub indent: String,

    /// Containers deeper than this collapse to `[...]` / `{...}`.
    pub max_depth: usize,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            max_depth: 5,
        }
    }
}

impl DumpConfig {
    pub fn validate(&self) -> Result<(), DumpError> {
        if self.indent.contains(['\n', '\r']) {
            return Err(DumpError::InvalidConfig(
                "indent must not contain line breaks".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DumpConfig::default()`.
pub fn load_config(path: &Path) -> Result<DumpConfig> {
    if !path.exists() {
        return Ok(DumpConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DumpConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, DumpConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("vardump.toml");
        fs::write(&path, "max_depth = 2\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.max_depth, 2);
        assert_eq!(cfg.indent, "  ");
    }

    #[test]
    fn rejects_multiline_indent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("vardump.toml");
        fs::write(&path, "indent = \"\\n\"\n").expect("write");
        let err = load_config(&path).expect_err("invalid indent");
        assert!(format!("{err:#}").contains("line breaks"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("vardump.toml");
        fs::write(&path, "max_depth = \"deep\"\n").expect("write");
        let err = load_config(&path).expect_err("wrong type");
        assert!(format!("{err:#}").contains("parse"));
    }
}
