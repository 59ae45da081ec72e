//! Parsers module for structural outline extraction
//!
//! Each parser turns raw text into a flat, level-tagged section list. Parsers
//! are total over arbitrary input: malformed text degrades to fewer, zero, or
//! mis-nested sections, never an error. Only construction can fail, when a
//! grammar or pattern cannot be initialized.

mod astro;
mod markdown;
mod script;

pub use astro::AstroParser;
pub use markdown::MarkdownParser;
pub use script::ScriptParser;

use crate::models::{Format, OutlineResult};
use thiserror::Error;

/// Parser errors
#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to initialize parser: {0}")]
    Init(String),
}

/// Trait for format-specific outline parsers
pub trait OutlineParser: Send {
    /// Get the format this parser handles
    fn format(&self) -> Format;

    /// Parse source text into lines and sections. Infallible: syntactically
    /// broken input yields a partial or empty section list.
    fn parse(&mut self, content: &str) -> OutlineResult;
}

/// Create a parser for the specified format
pub fn create_parser(format: Format) -> Result<Box<dyn OutlineParser>, ParserError> {
    match format {
        Format::Markdown => Ok(Box::new(MarkdownParser::new()?)),
        Format::TypeScript => Ok(Box::new(ScriptParser::new(true)?)),
        Format::Jsx => Ok(Box::new(ScriptParser::new(false)?)),
        Format::Astro => Ok(Box::new(AstroParser::new()?)),
    }
}

/// Parse source text in one step
pub fn outline_source(content: &str, format: Format) -> Result<OutlineResult, ParserError> {
    let mut parser = create_parser(format)?;
    Ok(parser.parse(content))
}

/// Split text on `'\n'`, keeping a trailing empty element for text ending
/// in a newline. Line counts derived from this match section `end_line`
/// placeholders across all parsers.
pub(crate) fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}
