//! JSON output formatter

use crate::models::DirectoryOutline;
use crate::output::FormatError;

/// Format a directory scan result as pretty-printed JSON
pub fn format_json(data: &DirectoryOutline) -> Result<String, FormatError> {
    serde_json::to_string_pretty(data).map_err(FormatError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileOutline, Format, ScanMetadata, ScanStats, Section};
    use std::path::PathBuf;

    fn create_test_data() -> DirectoryOutline {
        DirectoryOutline {
            root: PathBuf::from("/test"),
            files: vec![FileOutline {
                path: PathBuf::from("api.ts"),
                absolute_path: PathBuf::from("/test/api.ts"),
                format: Format::TypeScript,
                total_lines: 3,
                sections: vec![Section {
                    level: 1,
                    title: "getUser".to_string(),
                    kind: "func export".to_string(),
                    full_heading: "export function getUser() {".to_string(),
                    start_line: 1,
                    end_line: 3,
                }],
            }],
            stats: ScanStats {
                total_files: 1,
                total_lines: 3,
                total_sections: 1,
                markdown_files: 0,
                typescript_files: 1,
                jsx_files: 0,
                astro_files: 0,
            },
            metadata: ScanMetadata {
                scan_duration_ms: 5,
                files_per_second: 200.0,
                timestamp: "2024-01-01T00:00:00Z".to_string(),
                tool_version: "0.1.0".to_string(),
            },
        }
    }

    #[test]
    fn format_json_contains_sections() {
        let json = format_json(&create_test_data()).unwrap();
        assert!(json.contains("\"root\""));
        assert!(json.contains("\"files\""));
        assert!(json.contains("\"getUser\""));
        assert!(json.contains("\"func export\""));
    }

    #[test]
    fn format_json_round_trips() {
        let data = create_test_data();
        let json = format_json(&data).unwrap();
        let back: DirectoryOutline = serde_json::from_str(&json).unwrap();
        assert_eq!(back.files[0].sections, data.files[0].sections);
    }
}
