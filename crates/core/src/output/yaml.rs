//! YAML output formatter

use crate::models::DirectoryOutline;
use crate::output::FormatError;

/// Format a directory scan result as YAML
pub fn format_yaml(data: &DirectoryOutline) -> Result<String, FormatError> {
    serde_yaml::to_string(data).map_err(FormatError::from)
}
