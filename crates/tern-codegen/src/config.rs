// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Lowering configuration.
//!
//! Naming conventions the emitted thunks depend on. Defaults match the
//! standard Tern distribution; a unit can override them from JSON.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "TERN_LOWERING_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoweringConfig {
    /// Organization owning the privileged modules.
    pub builtin_org: String,
    /// Modules under `builtin_org` whose functions take no supplied flags.
    pub builtin_modules: Vec<String>,
    /// Extension of Tern source files, including the dot.
    pub source_extension: String,
    /// Owner name used when a function's source file is unknown.
    pub module_init_name: String,
    /// Organization of single-file programs; omitted from package paths.
    pub anonymous_org: String,
    /// Module name of a package's root module; omitted from package paths.
    pub root_module: String,
}

impl Default for LoweringConfig {
    fn default() -> Self {
        Self {
            builtin_org: "tern".to_string(),
            builtin_modules: vec!["builtin".to_string()],
            source_extension: ".tern".to_string(),
            module_init_name: "$_init".to_string(),
            anonymous_org: "$anon".to_string(),
            root_module: ".".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read lowering config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lowering config: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LoweringConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Load from the file named by `TERN_LOWERING_CONFIG`, or defaults when
    /// the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    /// Privileged modules take plain positional arguments with no supplied
    /// flags.
    pub fn is_builtin_module(&self, org: &str, module: &str) -> bool {
        org == self.builtin_org && self.builtin_modules.iter().any(|m| m == module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_recognize_builtin() {
        let config = LoweringConfig::default();
        assert!(config.is_builtin_module("tern", "builtin"));
        assert!(!config.is_builtin_module("tern", "io"));
        assert!(!config.is_builtin_module("acme", "builtin"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = LoweringConfig::from_json(r#"{ "builtin_modules": ["builtin", "lang.value"] }"#).unwrap();
        assert!(config.is_builtin_module("tern", "lang.value"));
        assert_eq!(config.module_init_name, "$_init");
    }

    #[test]
    fn unknown_field_rejected() {
        let err = LoweringConfig::from_json(r#"{ "builtin_module": [] }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
