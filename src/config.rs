use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{LineageError, Result};

/// Query defaults, overridable from a TOML file and then from CLI flags.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: Limits,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub ancestor_depth: usize,
    pub descendant_depth: usize,
    pub max_nodes: usize,
    pub max_devices: usize,
    pub company_ancestor_depth: usize,
    pub search_limit: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            ancestor_depth: 2,
            descendant_depth: 2,
            max_nodes: 300,
            max_devices: 50,
            company_ancestor_depth: 1,
            search_limit: 20,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| LineageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(raw).map_err(|error| LineageError::Config(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.limits.validate()
    }
}

impl Limits {
    pub fn validate(&self) -> Result<()> {
        if self.max_nodes == 0 {
            return Err(LineageError::Config(
                "limits.max_nodes must be greater than 0".into(),
            ));
        }
        if self.max_devices == 0 {
            return Err(LineageError::Config(
                "limits.max_devices must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
