//! Astro-style hybrid outline parser
//!
//! Splits the input into an optional `---`-delimited frontmatter block and a
//! markup template. The frontmatter is handed to the script parser; the
//! template is scanned with a tolerant tag-matching pass over an explicit
//! stack of open tags, so unbalanced markup degrades instead of failing.

use crate::models::{Format, OutlineResult, Section};
use crate::parsers::{split_lines, OutlineParser, ParserError, ScriptParser};
use regex::Regex;

/// Tags that never take children and are treated as self-closing even
/// without an explicit slash
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Astro parser implementation
pub struct AstroParser {
    script: ScriptParser,
    frontmatter_re: Regex,
    tag_re: Regex,
    id_re: Regex,
}

impl AstroParser {
    /// Create a new Astro parser
    pub fn new() -> Result<Self, ParserError> {
        let init = |e: regex::Error| ParserError::Init(e.to_string());
        Ok(Self {
            script: ScriptParser::new(true)?,
            frontmatter_re: Regex::new(r"\A---\r?\n((?s:.*?))\n---").map_err(init)?,
            // Opening `<tag ...>`, closing `</tag>`, or self-closing `<tag/>`
            tag_re: Regex::new(r"<(/?[a-zA-Z0-9.-]+)([^>]*?)(/?)>").map_err(init)?,
            id_re: Regex::new(r#"id=["']([^"']+)["']"#).map_err(init)?,
        })
    }
}

impl OutlineParser for AstroParser {
    fn format(&self) -> Format {
        Format::Astro
    }

    fn parse(&mut self, content: &str) -> OutlineResult {
        let lines = split_lines(content);
        let mut sections: Vec<Section> = Vec::new();
        let mut template_start = 0;

        // 1. Frontmatter script block
        if let Some(caps) = self.frontmatter_re.captures(content) {
            let script = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let result = self.script.parse(script);
            // The sliced script omits the opening delimiter line; shift by
            // one to land back on file coordinates.
            sections.extend(result.sections.into_iter().map(|s| Section {
                start_line: s.start_line + 1,
                end_line: s.end_line + 1,
                ..s
            }));
            template_start = caps.get(0).map(|m| m.end()).unwrap_or(0);
        }

        // 2. Template: components, custom elements, and id-carrying tags
        let template = &content[template_start..];
        let mut stack: Vec<String> = Vec::new();

        for caps in self.tag_re.captures_iter(template) {
            let raw_name = caps.get(1).map(|m| m.as_str()).unwrap_or("");
            let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            let explicit_slash = caps.get(3).map(|m| m.as_str() == "/").unwrap_or(false);

            if let Some(name) = raw_name.strip_prefix('/') {
                // A closer only pops an exact match with the current top;
                // anything else is ignored.
                if stack.last().map(String::as_str) == Some(name) {
                    stack.pop();
                }
                continue;
            }

            let name = raw_name;
            let self_closing =
                explicit_slash || VOID_ELEMENTS.contains(&name.to_lowercase().as_str());

            let is_component = name
                .chars()
                .next()
                .map(|c| c.is_ascii_uppercase())
                .unwrap_or(false);
            let is_custom_element = name.contains('-');
            let id = self
                .id_re
                .captures(attrs)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str());

            if is_component || is_custom_element || id.is_some() {
                let title = match id {
                    Some(id) => format!("{name}#{id}"),
                    None => name.to_string(),
                };
                let total_index = template_start + caps.get(0).map(|m| m.start()).unwrap_or(0);
                let start_line = content[..total_index].matches('\n').count() + 1;
                let full_heading = lines
                    .get(start_line - 1)
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .unwrap_or_else(|| title.clone());

                sections.push(Section {
                    level: 1 + stack.len(),
                    title,
                    kind: if is_component { "comp" } else { "elem" }.to_string(),
                    full_heading,
                    start_line,
                    end_line: start_line,
                });
            }

            // Plain lowercase tags are never emitted, but still open a
            // stack frame so descendant depth stays correct.
            if !self_closing {
                stack.push(name.to_string());
            }
        }

        OutlineResult { lines, sections }
    }
}
