//! symtree_core - Core library for structural outline navigation
//!
//! This crate extracts normalized structural outlines — ordered,
//! hierarchical lists of named, typed, line-ranged sections — from Markdown,
//! TypeScript/TSX, JavaScript/JSX, and Astro sources.
//!
//! # Features
//!
//! - **Resilient Parsing**: Tree-sitter based extraction for the script
//!   formats works even with incomplete or malformed code; every parser is
//!   total over arbitrary text.
//! - **Multi-format Support**: Markdown headings, TypeScript/JavaScript
//!   symbols, and Astro frontmatter + template components.
//! - **Hierarchy Building**: One format-agnostic pass turns any flat,
//!   level-tagged section list into a forest.
//! - **Section Lookup**: Case-insensitive substring search over headings
//!   and titles for jump-to and extraction workflows.
//! - **Multiple Output Formats**: text trees, JSON, and YAML.
//!
//! # Example
//!
//! ```rust,no_run
//! use symtree_core::{format_directory, DirectoryScanner, OutputFormat, ScanConfig};
//! use std::path::PathBuf;
//!
//! // Scan a project directory
//! let config = ScanConfig::new(PathBuf::from("."));
//! let scanner = DirectoryScanner::new(config).unwrap();
//! let result = scanner.scan().unwrap();
//!
//! // Format output
//! let json = format_directory(&result, OutputFormat::Json).unwrap();
//! println!("{}", json);
//! ```

pub mod config;
pub mod engine;
pub mod fs_tree;
pub mod models;
pub mod output;
pub mod parsers;
pub mod tree;

// Re-exports for convenience
pub use config::{ConfigError, IgnoreFilter, ScanConfig};
pub use engine::{outline_file, read_source, scan_file, DirectoryScanner, ScanError};
pub use fs_tree::{TreeError, TreeOptions};
pub use models::{
    find_section, DirectoryOutline, FileOutline, Format, OutlineResult, ScanMetadata, ScanStats,
    Section,
};
pub use output::{format_directory, format_json, format_yaml, FormatError, OutputFormat};
pub use parsers::{
    create_parser, outline_source, AstroParser, MarkdownParser, OutlineParser, ParserError,
    ScriptParser,
};
pub use tree::{build_tree_from_sections, TreeNode};
