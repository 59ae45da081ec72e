//! Data models for structural outlines
//!
//! This module defines the core data structures shared by every parser:
//! sections, per-file outline results, and the aggregate types produced by
//! directory scans.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Markdown,
    TypeScript,
    Jsx,
    Astro,
}

impl Format {
    /// Determine format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Format::Markdown),
            "ts" | "tsx" | "mts" | "cts" => Some(Format::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Format::Jsx),
            "astro" => Some(Format::Astro),
            _ => None,
        }
    }

    /// Select the format for a path, falling back to Markdown for anything
    /// unrecognized (plain text yields zero sections rather than failing).
    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(Format::Markdown)
    }

    /// Get display name for the format
    pub fn display_name(&self) -> &'static str {
        match self {
            Format::Markdown => "Markdown",
            Format::TypeScript => "TypeScript",
            Format::Jsx => "JavaScript/JSX",
            Format::Astro => "Astro",
        }
    }

    /// Check if format is handled by the script parser
    pub fn is_script(&self) -> bool {
        matches!(self, Format::TypeScript | Format::Jsx)
    }
}

/// One recognized structural unit: a heading, a symbol, or a template tag.
///
/// A section is created once during a `parse()` call and never mutated
/// afterward. `level` is only comparable to other sections from the same
/// parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Nesting depth assigned by the producing parser (1 for top-level)
    pub level: usize,

    /// Display name: symbol identifier, heading text, or tag name
    pub title: String,

    /// Classification tag, e.g. "func export", "class", "###".
    /// Display and filtering only; never drives hierarchy building.
    pub kind: String,

    /// The source line the section begins on (or a synthesized fallback)
    pub full_heading: String,

    /// First line of the section, 1-based inclusive
    pub start_line: usize,

    /// Last line of the section, 1-based inclusive
    pub end_line: usize,
}

impl Section {
    /// First word of `kind`, for fixed-width display columns
    pub fn kind_label(&self) -> &str {
        self.kind.split_whitespace().next().unwrap_or("item")
    }

    /// Number of lines covered by the section
    pub fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }
}

/// Result of parsing one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineResult {
    /// Raw source lines, newline-stripped
    pub lines: Vec<String>,

    /// Sections in document order (the order their start positions occur
    /// in the source; hierarchy building depends on it)
    pub sections: Vec<Section>,
}

/// Find the first section whose heading or title contains `pattern`,
/// case-insensitively. Returns the earliest match in document order;
/// absence is a normal `None`, not an error.
pub fn find_section<'a>(sections: &'a [Section], pattern: &str) -> Option<&'a Section> {
    let pattern = pattern.to_lowercase();
    sections.iter().find(|s| {
        s.full_heading.to_lowercase().contains(&pattern)
            || s.title.to_lowercase().contains(&pattern)
    })
}

/// Outline for a single source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutline {
    /// Path relative to the scan root
    pub path: PathBuf,

    /// Absolute path to the source file
    pub absolute_path: PathBuf,

    /// Format the file was parsed as
    pub format: Format,

    /// Total number of lines in the file
    pub total_lines: usize,

    /// Sections in document order
    pub sections: Vec<Section>,
}

impl FileOutline {
    /// Check if the file produced any sections
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }
}

/// Aggregate outline for a directory scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryOutline {
    /// Scan root directory
    pub root: PathBuf,

    /// Outlines of every supported file under the root
    pub files: Vec<FileOutline>,

    /// Summary statistics
    pub stats: ScanStats,

    /// Scan metadata
    pub metadata: ScanMetadata,
}

/// Summary statistics for a directory scan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanStats {
    /// Total files parsed
    pub total_files: usize,

    /// Total lines across all files
    pub total_lines: usize,

    /// Total sections found
    pub total_sections: usize,

    /// Markdown files count
    pub markdown_files: usize,

    /// TypeScript-family files count
    pub typescript_files: usize,

    /// JavaScript/JSX files count
    pub jsx_files: usize,

    /// Astro files count
    pub astro_files: usize,
}

/// Metadata about the scan operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    /// Duration of scan in milliseconds
    pub scan_duration_ms: u64,

    /// Files processed per second
    pub files_per_second: f64,

    /// ISO timestamp of scan
    pub timestamp: String,

    /// Tool version
    pub tool_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(level: usize, title: &str, heading: &str, start: usize, end: usize) -> Section {
        Section {
            level,
            title: title.to_string(),
            kind: "#".repeat(level),
            full_heading: heading.to_string(),
            start_line: start,
            end_line: end,
        }
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_extension("md"), Some(Format::Markdown));
        assert_eq!(Format::from_extension("ts"), Some(Format::TypeScript));
        assert_eq!(Format::from_extension("TSX"), Some(Format::TypeScript));
        assert_eq!(Format::from_extension("jsx"), Some(Format::Jsx));
        assert_eq!(Format::from_extension("astro"), Some(Format::Astro));
        assert_eq!(Format::from_extension("py"), None);
    }

    #[test]
    fn format_for_path_falls_back_to_markdown() {
        assert_eq!(Format::for_path(Path::new("notes.md")), Format::Markdown);
        assert_eq!(Format::for_path(Path::new("app.tsx")), Format::TypeScript);
        assert_eq!(Format::for_path(Path::new("data.unknown")), Format::Markdown);
        assert_eq!(Format::for_path(Path::new("no_extension")), Format::Markdown);
    }

    #[test]
    fn find_section_by_title() {
        let sections = vec![
            section(1, "Intro", "# Intro", 1, 5),
            section(2, "Details", "## Details", 6, 10),
        ];
        assert_eq!(find_section(&sections, "Intro"), Some(&sections[0]));
    }

    #[test]
    fn find_section_by_full_heading() {
        let sections = vec![
            section(1, "Intro", "# Intro", 1, 5),
            section(2, "Details", "## Details", 6, 10),
        ];
        assert_eq!(find_section(&sections, "## Details"), Some(&sections[1]));
    }

    #[test]
    fn find_section_is_case_insensitive() {
        let sections = vec![
            section(1, "Intro", "# Intro", 1, 5),
            section(2, "Details", "## Details", 6, 10),
        ];
        assert_eq!(find_section(&sections, "dEtAiLs"), Some(&sections[1]));
    }

    #[test]
    fn find_section_returns_earliest_match() {
        let sections = vec![
            section(1, "Setup", "# Setup", 1, 4),
            section(2, "Setup notes", "## Setup notes", 5, 9),
        ];
        assert_eq!(find_section(&sections, "setup"), Some(&sections[0]));
    }

    #[test]
    fn find_section_missing_is_none() {
        let sections = vec![section(1, "Intro", "# Intro", 1, 5)];
        assert_eq!(find_section(&sections, "None"), None);
    }

    #[test]
    fn kind_label_takes_first_word() {
        let mut s = section(1, "foo", "export function foo() {}", 1, 1);
        s.kind = "func export".to_string();
        assert_eq!(s.kind_label(), "func");
        s.kind = String::new();
        assert_eq!(s.kind_label(), "item");
    }
}
