use std::path::Path;

use super::Project;
use crate::error::{Result, ValidagenError};

/// Serialization format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension; anything unknown is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Read and decode a configuration file.
///
/// Decoding only builds the model; it does not validate it.
///
/// # Errors
///
/// Returns [`ValidagenError::Decode`] if the file cannot be read or parsed.
pub fn load_project(path: &Path) -> Result<Project> {
    let contents = std::fs::read_to_string(path).map_err(|e| ValidagenError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_project(&contents, ConfigFormat::from_path(path)).map_err(|message| {
        ValidagenError::Decode {
            path: path.to_path_buf(),
            message,
        }
    })
}

/// Decode configuration text in the given format.
pub fn parse_project(contents: &str, format: ConfigFormat) -> std::result::Result<Project, String> {
    match format {
        ConfigFormat::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
        ConfigFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        ConfigFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
    }
}
