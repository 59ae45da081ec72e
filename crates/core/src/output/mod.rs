//! Output formatting module
//!
//! Formatters for text, JSON, and YAML renditions of outline data. All
//! formatters return strings; callers decide where the bytes go.

mod json;
pub mod text;
mod yaml;

pub use json::format_json;
pub use yaml::format_yaml;

use crate::models::DirectoryOutline;
use thiserror::Error;

/// Output format errors
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Available output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// ASCII tree / table output
    #[default]
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Format a directory scan result in the specified format
pub fn format_directory(
    data: &DirectoryOutline,
    format: OutputFormat,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Text => Ok(text::format_directory_tree(data)),
        OutputFormat::Json => format_json(data),
        OutputFormat::Yaml => format_yaml(data),
    }
}
