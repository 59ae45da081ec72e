//! Plain filesystem tree
//!
//! Recursive directory listing with ASCII rendering, independent of the
//! outline parsers. Used for the bare `tree` mode that shows structure
//! without looking inside files.

use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filesystem tree errors
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Invalid ignore pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Options for the plain filesystem tree
#[derive(Debug, Clone, Default)]
pub struct TreeOptions {
    /// Directory to list
    pub directory: PathBuf,

    /// Raw ignore expression from the command line
    pub ignore: Option<String>,

    /// Only include directories
    pub only_folders: bool,
}

/// One entry in the listed tree
#[derive(Debug)]
pub struct DirNode {
    pub name: String,
    pub is_dir: bool,
    pub children: Vec<DirNode>,
}

/// Parse the ignore argument into a regex. Accepts `/pattern/` literals or
/// plain strings (pipes act as alternation, e.g. `node_modules|dist`).
pub fn parse_ignore_option(ignore: Option<&str>) -> Result<Option<Regex>, TreeError> {
    let Some(raw) = ignore else {
        return Ok(None);
    };
    let mut cleaned = raw.trim();
    if cleaned.is_empty() {
        return Ok(None);
    }

    if cleaned.len() > 1 && cleaned.starts_with('/') && cleaned.ends_with('/') {
        cleaned = &cleaned[1..cleaned.len() - 1];
    }

    Regex::new(cleaned)
        .map(Some)
        .map_err(|e| TreeError::InvalidPattern(e.to_string()))
}

/// Recursively list a directory. Entries are sorted by name with files
/// before directories; unreadable children are skipped.
pub fn build_dir_tree(path: &Path, ignore: Option<&Regex>, only_folders: bool) -> Result<DirNode, TreeError> {
    let metadata = fs::symlink_metadata(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if !metadata.is_dir() {
        return Ok(DirNode {
            name,
            is_dir: false,
            children: Vec::new(),
        });
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(path)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let entry_name = p
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ignore.map_or(true, |re| !re.is_match(&entry_name))
        })
        .collect();
    entries.sort();

    let mut files = Vec::new();
    let mut dirs = Vec::new();
    for entry in entries {
        let Ok(meta) = fs::symlink_metadata(&entry) else {
            continue;
        };
        if meta.is_dir() {
            if let Ok(node) = build_dir_tree(&entry, ignore, only_folders) {
                dirs.push(node);
            }
        } else if !only_folders {
            if let Ok(node) = build_dir_tree(&entry, ignore, only_folders) {
                files.push(node);
            }
        }
    }

    // Files come before folders, as in classic tree listings.
    files.extend(dirs);

    Ok(DirNode {
        name,
        is_dir: true,
        children: files,
    })
}

/// Render a listed tree as an ASCII string
pub fn generate_tree_string(root: &DirNode) -> String {
    let mut out = String::new();
    out.push_str(&root.name);
    draw_children(&root.children, "", &mut out);
    out
}

fn draw_children(children: &[DirNode], prefix: &str, out: &mut String) {
    for (idx, child) in children.iter().enumerate() {
        let is_last = idx == children.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };

        out.push('\n');
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&child.name);

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        draw_children(&child.children, &child_prefix, out);
    }
}

/// Generate the ASCII tree for the given directory in one step
pub fn tree(options: &TreeOptions) -> Result<String, TreeError> {
    let ignore = parse_ignore_option(options.ignore.as_deref())?;
    let root = build_dir_tree(&options.directory, ignore.as_ref(), options.only_folders)?;
    Ok(generate_tree_string(&root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("a.txt"), "hello").unwrap();
        fs::write(root.join("d.txt"), "world").unwrap();
        fs::create_dir(root.join("b")).unwrap();
        fs::write(root.join("b").join("c.txt"), "nested").unwrap();
        dir
    }

    #[test]
    fn parse_ignore_option_empty_is_none() {
        assert!(parse_ignore_option(None).unwrap().is_none());
        assert!(parse_ignore_option(Some("")).unwrap().is_none());
        assert!(parse_ignore_option(Some("   ")).unwrap().is_none());
    }

    #[test]
    fn parse_ignore_option_simple_string() {
        let re = parse_ignore_option(Some("node_modules")).unwrap().unwrap();
        assert!(re.is_match("node_modules"));
        assert!(!re.is_match("src"));
    }

    #[test]
    fn parse_ignore_option_alternation() {
        let re = parse_ignore_option(Some("dist|coverage")).unwrap().unwrap();
        assert!(re.is_match("dist"));
        assert!(re.is_match("coverage"));
        assert!(!re.is_match("src"));
    }

    #[test]
    fn parse_ignore_option_slash_delimited() {
        let re = parse_ignore_option(Some(r"/\.git/")).unwrap().unwrap();
        assert!(re.is_match(".git"));
    }

    #[test]
    fn parse_ignore_option_rejects_bad_pattern() {
        assert!(parse_ignore_option(Some("([")).is_err());
    }

    #[test]
    fn files_come_before_directories() {
        let dir = create_test_dir();
        let root = build_dir_tree(dir.path(), None, false).unwrap();

        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "d.txt", "b"]);
    }

    #[test]
    fn renders_connectors_and_nesting() {
        let dir = create_test_dir();
        let rendered = tree(&TreeOptions {
            directory: dir.path().to_path_buf(),
            ignore: None,
            only_folders: false,
        })
        .unwrap();

        assert!(rendered.contains("├── a.txt"));
        assert!(rendered.contains("├── d.txt"));
        assert!(rendered.contains("└── b"));
        assert!(rendered.contains("    └── c.txt"));
    }

    #[test]
    fn ignore_option_filters_entries() {
        let dir = create_test_dir();
        let rendered = tree(&TreeOptions {
            directory: dir.path().to_path_buf(),
            ignore: Some("b".to_string()),
            only_folders: false,
        })
        .unwrap();

        assert!(!rendered.contains("c.txt"));
        assert!(rendered.contains("a.txt"));
    }

    #[test]
    fn only_folders_lists_directories() {
        let dir = create_test_dir();
        let root = build_dir_tree(dir.path(), None, true).unwrap();

        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b"]);
        assert!(root.children[0].children.is_empty());
    }
}
