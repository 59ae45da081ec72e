//! Markdown outline parser
//!
//! Line-oriented, two-pass scan for ATX headings (`#` syntax). Pass one
//! collects headings; pass two closes each heading's line range at the next
//! heading of equal or shallower level.

use crate::models::{Format, OutlineResult, Section};
use crate::parsers::{split_lines, OutlineParser, ParserError};
use regex::Regex;

/// Markdown parser implementation
pub struct MarkdownParser {
    heading_re: Regex,
}

impl MarkdownParser {
    /// Create a new Markdown parser
    pub fn new() -> Result<Self, ParserError> {
        let heading_re = Regex::new(r"^(#{1,6})\s+(.+)$")
            .map_err(|e| ParserError::Init(e.to_string()))?;
        Ok(Self { heading_re })
    }
}

impl OutlineParser for MarkdownParser {
    fn format(&self) -> Format {
        Format::Markdown
    }

    fn parse(&mut self, content: &str) -> OutlineResult {
        let lines = split_lines(content);
        let mut sections: Vec<Section> = Vec::new();

        // Pass 1: find all headings. Fence state is deliberately ignored, so
        // a `# line` inside a code block still counts as a heading.
        for (i, line) in lines.iter().enumerate() {
            if let Some(caps) = self.heading_re.captures(line) {
                let marker = &caps[1];
                sections.push(Section {
                    level: marker.len(),
                    title: caps[2].trim().to_string(),
                    kind: marker.to_string(),
                    full_heading: line.clone(),
                    start_line: i + 1,
                    end_line: lines.len(), // placeholder
                });
            }
        }

        // Pass 2: a heading's range ends where the next heading of equal or
        // shallower level begins.
        for i in 0..sections.len() {
            let mut end_line = lines.len();
            for j in i + 1..sections.len() {
                if sections[j].level <= sections[i].level {
                    end_line = sections[j].start_line - 1;
                    break;
                }
            }
            sections[i].end_line = end_line;
        }

        OutlineResult { lines, sections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> OutlineResult {
        MarkdownParser::new().unwrap().parse(content)
    }

    #[test]
    fn heading_ranges_close_at_next_equal_or_shallower_heading() {
        let result = parse("# A\ntext\n## B\nmore\n# C\nend");

        assert_eq!(result.lines.len(), 6);
        assert_eq!(result.sections.len(), 3);

        let a = &result.sections[0];
        assert_eq!((a.level, a.start_line, a.end_line), (1, 1, 4));
        assert_eq!(a.title, "A");
        assert_eq!(a.kind, "#");
        assert_eq!(a.full_heading, "# A");

        let b = &result.sections[1];
        assert_eq!((b.level, b.start_line, b.end_line), (2, 3, 4));

        let c = &result.sections[2];
        assert_eq!((c.level, c.start_line, c.end_line), (1, 5, 6));
    }

    #[test]
    fn last_heading_runs_to_end_of_file() {
        let result = parse("intro\n# Only\nbody\nbody\n");
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].start_line, 2);
        // Trailing newline yields a final empty line, which is counted.
        assert_eq!(result.sections[0].end_line, 5);
    }

    #[test]
    fn marker_must_be_followed_by_whitespace_and_text() {
        let result = parse("#NoSpace\n####### seven\n#\n# ok");
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].title, "ok");
    }

    #[test]
    fn level_matches_marker_length() {
        let result = parse("### Deep\n###### Deepest");
        assert_eq!(result.sections[0].level, 3);
        assert_eq!(result.sections[0].kind, "###");
        assert_eq!(result.sections[1].level, 6);
        assert_eq!(result.sections[1].kind, "######");
    }

    #[test]
    fn title_is_trimmed() {
        let result = parse("##   spaced out   ");
        assert_eq!(result.sections[0].title, "spaced out");
        assert_eq!(result.sections[0].full_heading, "##   spaced out   ");
    }

    #[test]
    fn heading_inside_code_fence_is_not_suppressed() {
        // Known naive behavior: fenced code blocks are not tracked, so the
        // `# not a real heading` line still produces a section.
        let result = parse("# Real\n```\n# not a real heading\n```\ndone");
        assert_eq!(result.sections.len(), 2);
        assert_eq!(result.sections[1].title, "not a real heading");
        assert_eq!(result.sections[0].end_line, 2);
    }

    #[test]
    fn plain_text_has_no_sections() {
        let result = parse("just text\nno headings here\n");
        assert!(result.sections.is_empty());
        assert_eq!(result.lines.len(), 3);
    }
}
