//! symtree CLI
//!
//! Structural navigator for Markdown, TypeScript/JSX, and Astro sources.
//! Points at a file, it shows or extracts sections; pointed at a directory,
//! it draws a semantic tree of every supported file's symbols.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use symtree_core::{
    find_section, fs_tree, outline_file, output, scan_file, DirectoryScanner, Format,
    OutputFormat, ScanConfig,
};

/// Structural navigator for Markdown, code, and directories
#[derive(Parser)]
#[command(name = "symtree")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Structural navigation - outlines, section extraction, and semantic trees")]
#[command(long_about = r#"
symtree: Structural Outline Navigation

Extracts hierarchical outlines (headings, functions, classes, types,
template components) from files in any state of validity, so you can jump
to or extract a symbol without reading the whole file.

Supports:
  - Markdown (.md, .markdown)
  - TypeScript (.ts, .tsx, .mts, .cts)
  - JavaScript/JSX (.js, .jsx, .mjs, .cjs)
  - Astro (.astro)

Output formats:
  - Text (default) - ASCII trees and tables
  - JSON - Structured JSON for programmatic use
  - YAML - Human-readable YAML format

Examples:
  symtree README.md                  # Outline of a single file
  symtree README.md "usage"          # Extract the first matching section
  symtree src/                       # Semantic tree of a directory
  symtree src/ --format json         # Same, as JSON
  symtree tree . -i "node_modules"   # Plain filesystem tree
"#)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// File or directory path (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Partial text to extract a specific section (single file only)
    pub pattern: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Text)]
    pub format: OutputFormatArg,

    /// Limit directory scans to one format family
    #[arg(long, value_enum)]
    pub only: Option<FormatFilter>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ignore patterns for directory scans (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Number of threads for parallel parsing (default: auto)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the outline of a single file
    Outline {
        /// Path to file
        path: PathBuf,
    },

    /// Scan a directory into a semantic tree
    Scan {
        /// Path to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print a plain filesystem tree without parsing files
    Tree {
        /// Directory to list
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Ignore expression, e.g. "node_modules|dist" or "/\.git/"
        #[arg(short, long)]
        ignore: Option<String>,

        /// Output folders only
        #[arg(short = 'f', long)]
        only_folders: bool,

        /// Export the tree into a file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OutputFormatArg {
    Text,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Format filter argument
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum FormatFilter {
    Markdown,
    Typescript,
    Jsx,
    Astro,
}

impl From<FormatFilter> for Format {
    fn from(arg: FormatFilter) -> Self {
        match arg {
            FormatFilter::Markdown => Format::Markdown,
            FormatFilter::Typescript => Format::TypeScript,
            FormatFilter::Jsx => Format::Jsx,
            FormatFilter::Astro => Format::Astro,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match &args.command {
        Some(Commands::Outline { path }) => run_file(path, &args),
        Some(Commands::Scan { path }) => run_scan(path, &args),
        Some(Commands::Tree {
            path,
            ignore,
            only_folders,
            export,
        }) => run_tree(path, ignore.as_deref(), *only_folders, export.as_deref()),
        None => {
            if args.path.is_file() {
                run_file(&args.path, &args)
            } else if args.path.is_dir() {
                if args.pattern.is_some() {
                    bail!("Pattern extraction is not supported for directories");
                }
                run_scan(&args.path, &args)
            } else {
                bail!("Path does not exist: {}", args.path.display());
            }
        }
    }
}

/// Build scan configuration from args
fn build_config(path: &Path, args: &Args) -> ScanConfig {
    let mut config = ScanConfig::new(path.to_path_buf())
        .with_ignore_patterns(args.ignore.clone());

    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }

    if let Some(only) = args.only {
        config = config.with_format_filter(vec![only.into()]);
    }

    config
}

fn run_file(path: &Path, args: &Args) -> Result<()> {
    // Extraction mode: find the first section matching the pattern
    if let Some(pattern) = &args.pattern {
        let result = outline_file(path).context("Failed to parse file")?;
        let Some(section) = find_section(&result.sections, pattern) else {
            bail!("No section found matching: \"{pattern}\"");
        };

        let rendered = match args.format.into() {
            OutputFormat::Text => output::text::format_extraction(&result.lines, section),
            OutputFormat::Json => serde_json::to_string_pretty(section)?,
            OutputFormat::Yaml => serde_yaml::to_string(section)?,
        };
        return write_output(&rendered, args.output.as_deref());
    }

    // Outline mode
    let rendered = match args.format.into() {
        OutputFormat::Text => {
            let result = outline_file(path).context("Failed to parse file")?;
            output::text::format_outline(&result.sections)
        }
        OutputFormat::Json => {
            let outline = scan_file(path).context("Failed to parse file")?;
            serde_json::to_string_pretty(&outline)?
        }
        OutputFormat::Yaml => {
            let outline = scan_file(path).context("Failed to parse file")?;
            serde_yaml::to_string(&outline)?
        }
    };
    write_output(&rendered, args.output.as_deref())
}

fn run_scan(path: &Path, args: &Args) -> Result<()> {
    let config = build_config(path, args);

    // Show progress spinner
    let spinner = if args.verbose && atty::is(atty::Stream::Stderr) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Scanning project...");
        Some(pb)
    } else {
        None
    };

    let scanner = DirectoryScanner::new(config).context("Failed to create scanner")?;
    let result = scanner.scan().context("Failed to scan directory")?;

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} files in {}ms",
            result.stats.total_files, result.metadata.scan_duration_ms
        ));
    }

    let rendered = output::format_directory(&result, args.format.into())?;
    write_output(&rendered, args.output.as_deref())
}

fn run_tree(
    path: &Path,
    ignore: Option<&str>,
    only_folders: bool,
    export: Option<&Path>,
) -> Result<()> {
    let options = fs_tree::TreeOptions {
        directory: path.to_path_buf(),
        ignore: ignore.map(str::to_string),
        only_folders,
    };

    let rendered = fs_tree::tree(&options)
        .with_context(|| format!("Could not read directory \"{}\"", path.display()))?;

    println!("{rendered}");

    if let Some(export_path) = export {
        fs::write(export_path, &rendered).context("Failed to write output file")?;
        println!("\nThe result has been saved into {}", export_path.display());
    }

    Ok(())
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    if let Some(path) = path {
        fs::write(path, output).context("Failed to write output file")?;
    } else {
        println!("{output}");
    }
    Ok(())
}
