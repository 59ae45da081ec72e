//! Outline engine
//!
//! File reading, per-file outlining, and the directory scanner that walks a
//! tree and outlines every supported file.

use crate::config::{ConfigError, IgnoreFilter, ScanConfig};
use crate::models::{
    DirectoryOutline, FileOutline, Format, OutlineResult, ScanMetadata, ScanStats,
};
use crate::parsers::{outline_source, ParserError};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

/// Engine errors
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Parser error: {0}")]
    Parser(#[from] ParserError),

    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

/// Read a file as text, normalizing CRLF line endings. A missing file is
/// the distinguished `NotFound` condition; any other read failure
/// propagates unchanged.
pub fn read_source(path: &Path) -> Result<String, ScanError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content.replace("\r\n", "\n")),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(ScanError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(ScanError::Io(e)),
    }
}

/// Parse a single file into lines and sections, selecting the parser from
/// the file extension (unrecognized extensions fall back to Markdown).
pub fn outline_file(path: &Path) -> Result<OutlineResult, ScanError> {
    let content = read_source(path)?;
    Ok(outline_source(&content, Format::for_path(path))?)
}

/// Outline a single file into its serializable form
pub fn scan_file(path: &Path) -> Result<FileOutline, ScanError> {
    let format = Format::for_path(path);
    let content = read_source(path)?;
    let result = outline_source(&content, format)?;

    let absolute_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

    Ok(FileOutline {
        path: path.to_path_buf(),
        absolute_path,
        format,
        total_lines: result.lines.len(),
        sections: result.sections,
    })
}

/// Directory scanner producing an aggregate outline
pub struct DirectoryScanner {
    config: ScanConfig,
    ignore_filter: IgnoreFilter,
}

impl DirectoryScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            ignore_filter,
        })
    }

    /// Scan the configured directory and outline every supported file
    pub fn scan(&self) -> Result<DirectoryOutline, ScanError> {
        let start = Instant::now();

        let source_files = self.find_source_files()?;

        let files: Vec<FileOutline> = if self.config.threads == 1 {
            source_files
                .into_iter()
                .filter_map(|(path, format)| self.parse_file(&path, format))
                .collect()
        } else {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.threads)
                .build()
                .map_err(|e| ScanError::ThreadPool(e.to_string()))?;

            pool.install(|| {
                source_files
                    .par_iter()
                    .filter_map(|(path, format)| self.parse_file(path, *format))
                    .collect()
            })
        };

        let stats = calculate_stats(&files);

        let duration = start.elapsed();
        let file_count = files.len();
        let metadata = ScanMetadata {
            scan_duration_ms: duration.as_millis() as u64,
            files_per_second: if duration.as_secs_f64() > 0.0 {
                file_count as f64 / duration.as_secs_f64()
            } else {
                file_count as f64
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(DirectoryOutline {
            root: self.config.root.clone(),
            files,
            stats,
            metadata,
        })
    }

    /// Find all source files matching the configuration, sorted for
    /// deterministic output
    fn find_source_files(&self) -> Result<Vec<(PathBuf, Format)>, ScanError> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.config.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // The root itself is never filtered, only its contents.
                if e.depth() == 0 {
                    return true;
                }
                if e.file_type().is_dir() {
                    return !self.ignore_filter.should_ignore(e.path(), true);
                }
                true
            });

        for entry in walker.filter_map(|e| e.ok()) {
            if entry.file_type().is_dir() {
                continue;
            }

            let path = entry.path();

            if self.ignore_filter.should_ignore(path, false) {
                continue;
            }

            if !self
                .ignore_filter
                .matches_format_filter(path, &self.config.format_filter)
            {
                continue;
            }

            if let Ok(metadata) = entry.metadata() {
                if metadata.len() as usize > self.config.max_file_size {
                    continue;
                }
            }

            if let Some(ext) = path.extension() {
                if let Some(format) = Format::from_extension(&ext.to_string_lossy()) {
                    files.push((path.to_path_buf(), format));
                }
            }
        }

        Ok(files)
    }

    /// Parse a single file; unreadable files are skipped rather than
    /// aborting the scan
    fn parse_file(&self, path: &Path, format: Format) -> Option<FileOutline> {
        let content = read_source(path).ok()?;
        let result = outline_source(&content, format).ok()?;

        let absolute_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let relative_path = path
            .strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_path_buf();

        Some(FileOutline {
            path: relative_path,
            absolute_path,
            format,
            total_lines: result.lines.len(),
            sections: result.sections,
        })
    }
}

/// Calculate scan statistics
fn calculate_stats(files: &[FileOutline]) -> ScanStats {
    let count = |f: Format| files.iter().filter(|o| o.format == f).count();

    ScanStats {
        total_files: files.len(),
        total_lines: files.iter().map(|f| f.total_lines).sum(),
        total_sections: files.iter().map(|f| f.sections.len()).sum(),
        markdown_files: count(Format::Markdown),
        typescript_files: count(Format::TypeScript),
        jsx_files: count(Format::Jsx),
        astro_files: count(Format::Astro),
    }
}
