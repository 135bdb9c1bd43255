//! Batch configuration loading and parsing

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main batch configuration (loaded from a TOML file)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Optional timestamp cutoff applied to every input
    #[serde(default)]
    pub cutoff: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// iperf3 JSON report files to convert
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Base directory for the timestamped result folder
    pub dir: Option<PathBuf>,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            cutoff = "2023-11-15 07:13:30"

            [input]
            files = ["run1.json", "run2.json"]

            [output]
            dir = "results"
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.files.len(), 2);
        assert_eq!(config.output.dir, Some(PathBuf::from("results")));
        assert_eq!(config.cutoff.as_deref(), Some("2023-11-15 07:13:30"));
    }

    #[test]
    fn test_minimal_config() {
        let toml_content = r#"
            [input]
            files = ["run1.json"]
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.input.files.len(), 1);
        assert_eq!(config.output.dir, None);
        assert_eq!(config.cutoff, None);
    }
}
