//! Generator configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Settings for one generator run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory holding the list files
    pub data_path: PathBuf,
    /// File name of the generated container
    pub output_name: String,
    /// Directory for the container and plaintext exports
    pub output_dir: PathBuf,
    /// Lists to flatten into plaintext files
    pub export_lists: Vec<String>,
    /// Also write `<output_name>.sha256sum`
    pub write_checksum: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("./data"),
            output_name: "dlc.dat".to_string(),
            output_dir: PathBuf::from("./"),
            export_lists: Vec::new(),
            write_checksum: false,
        }
    }
}

impl GeneratorConfig {
    /// Load a configuration file.
    ///
    /// `.json` files are read as JSON, everything else as YAML. Missing keys
    /// take their default values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let config: Self = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that cannot be defaulted.
    pub fn validate(&self) -> Result<()> {
        let name = self.output_name.trim();
        if name.is_empty() {
            return Err(Error::Config("output name must not be empty".to_string()));
        }
        if name.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "output name must be a file name, got '{}'",
                self.output_name
            )));
        }
        Ok(())
    }

    /// Full path of the generated container.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }

    /// Full path of the checksum file.
    pub fn checksum_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.sha256sum", self.output_name))
    }
}

/// Split a comma-separated export option into list names.
pub fn parse_export_lists(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
