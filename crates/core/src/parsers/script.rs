//! ECMAScript/TypeScript-family outline parser
//!
//! Builds a concrete syntax tree with Tree-sitter and extracts sections in a
//! single pre-order traversal. One traversal serves both dialect families:
//! the TSX grammar covers `.ts`/`.tsx`, the JavaScript grammar (a JSX
//! superset) covers `.js`/`.jsx`/`.mjs`/`.cjs`.

use crate::models::{Format, OutlineResult, Section};
use crate::parsers::{split_lines, OutlineParser, ParserError};
use tree_sitter::{Node, Parser};

/// TypeScript/JavaScript parser implementation
pub struct ScriptParser {
    parser: Parser,
    is_typescript: bool,
}

impl ScriptParser {
    /// Create a new script parser for the TypeScript or JavaScript grammar
    pub fn new(typescript: bool) -> Result<Self, ParserError> {
        let mut parser = Parser::new();

        let language = if typescript {
            tree_sitter_typescript::LANGUAGE_TSX.into()
        } else {
            tree_sitter_javascript::LANGUAGE.into()
        };

        parser
            .set_language(&language)
            .map_err(|e| ParserError::Init(e.to_string()))?;

        Ok(Self {
            parser,
            is_typescript: typescript,
        })
    }
}

impl OutlineParser for ScriptParser {
    fn format(&self) -> Format {
        if self.is_typescript {
            Format::TypeScript
        } else {
            Format::Jsx
        }
    }

    fn parse(&mut self, content: &str) -> OutlineResult {
        let lines = split_lines(content);
        let mut sections = Vec::new();

        // Tree-sitter only declines to produce a tree on cancellation, but
        // degrade to an empty outline rather than fail if it ever does.
        if let Some(tree) = self.parser.parse(content, None) {
            let root = tree.root_node();
            let mut cursor = root.walk();
            for child in root.named_children(&mut cursor) {
                visit(child, 1, false, content.as_bytes(), &lines, &mut sections);
            }
        }

        OutlineResult { lines, sections }
    }
}

/// Visit one node, emitting a section when it is a recognized construct and
/// recursing per-construct. A node's section is always pushed before its
/// descendants are visited, preserving document order.
fn visit(
    node: Node,
    level: usize,
    exported: bool,
    src: &[u8],
    lines: &[String],
    sections: &mut Vec<Section>,
) {
    match node.kind() {
        // The export wrapper itself is silent; the wrapped declaration
        // carries the exported marker in its kind.
        "export_statement" => {
            visit_children(node, level, true, src, lines, sections);
        }

        "import_statement" => {
            let title = node
                .child_by_field_name("source")
                .and_then(|source| string_literal_text(source, src))
                .filter(|t| !t.is_empty());
            if let Some(title) = title {
                push_section(node, level, title, "import", lines, sections);
            }
            // Leaf: import clauses are never descended into.
        }

        "function_declaration" | "generator_function_declaration" => {
            if let Some(title) = field_text(node, "name", src) {
                let kind = if exported { "func export" } else { "func" };
                push_section(node, level, title, kind, lines, sections);
            }
            visit_children(node, level + 1, false, src, lines, sections);
        }

        // Anonymous on their own; an enclosing binding or property supplies
        // the title. Their bodies still nest one level deeper.
        "arrow_function" | "function_expression" | "function" => {
            visit_children(node, level + 1, false, src, lines, sections);
        }

        "class_declaration" => {
            let title =
                field_text(node, "name", src).unwrap_or_else(|| "anonymous".to_string());
            let kind = if exported { "class export" } else { "class" };
            push_section(node, level, title, kind, lines, sections);
            visit_children(node, level + 1, false, src, lines, sections);
        }

        "interface_declaration" => {
            if let Some(title) = field_text(node, "name", src) {
                let kind = if exported { "intf export" } else { "intf" };
                push_section(node, level, title, kind, lines, sections);
            }
            visit_children(node, level + 1, false, src, lines, sections);
        }

        "type_alias_declaration" => {
            if let Some(title) = field_text(node, "name", src) {
                let kind = if exported { "type export" } else { "type" };
                push_section(node, level, title, kind, lines, sections);
            }
            visit_children(node, level + 1, false, src, lines, sections);
        }

        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = node.walk();
            for declarator in node.named_children(&mut cursor) {
                if declarator.kind() == "variable_declarator" {
                    visit_declarator(declarator, level, exported, src, lines, sections);
                }
            }
        }

        "method_definition" | "method_signature" => {
            let name = node
                .child_by_field_name("name")
                .filter(|n| n.kind() == "property_identifier")
                .and_then(|n| node_text(n, src));
            match name {
                Some(title) => {
                    push_section(node, level, title, "meth", lines, sections);
                    visit_children(node, level + 1, false, src, lines, sections);
                }
                // Computed or string-named methods stay untitled.
                None => visit_children(node, level, false, src, lines, sections),
            }
        }

        "public_field_definition" | "field_definition" | "property_signature" => {
            let name = node
                .child_by_field_name("name")
                .filter(|n| n.kind() == "property_identifier")
                .and_then(|n| node_text(n, src));
            match name {
                Some(title) => {
                    let kind = if field_is_function(node, "value") {
                        "meth"
                    } else {
                        "prop"
                    };
                    push_section(node, level, title, kind, lines, sections);
                    visit_children(node, level + 1, false, src, lines, sections);
                }
                None => visit_children(node, level, false, src, lines, sections),
            }
        }

        // Object literal property: `key: value`
        "pair" => {
            let name = node.child_by_field_name("key").and_then(|key| match key.kind() {
                "property_identifier" => node_text(key, src),
                "string" => string_literal_text(key, src),
                _ => None,
            });
            match name {
                Some(title) => {
                    let kind = if field_is_function(node, "value") {
                        "meth"
                    } else {
                        "prop"
                    };
                    push_section(node, level, title, kind, lines, sections);
                    visit_children(node, level + 1, false, src, lines, sections);
                }
                None => visit_children(node, level, false, src, lines, sections),
            }
        }

        "call_expression" => {
            let name = if has_callback_argument(node) {
                callee_simple_name(node, src)
            } else {
                None
            };
            match name {
                Some(name) => {
                    push_section(
                        node,
                        level,
                        format!("{name}() callback"),
                        "call",
                        lines,
                        sections,
                    );
                    visit_children(node, level + 1, false, src, lines, sections);
                }
                // No derivable name (or no callback): no section, flat recursion.
                None => visit_children(node, level, false, src, lines, sections),
            }
        }

        _ => visit_children(node, level, false, src, lines, sections),
    }
}

/// Visit all named children at the given level
fn visit_children(
    node: Node,
    level: usize,
    exported: bool,
    src: &[u8],
    lines: &[String],
    sections: &mut Vec<Section>,
) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit(child, level, exported, src, lines, sections);
    }
}

/// Handle one `variable_declarator`, emitting a section per bound name
fn visit_declarator(
    declarator: Node,
    level: usize,
    exported: bool,
    src: &[u8],
    lines: &[String],
    sections: &mut Vec<Section>,
) {
    let value = declarator.child_by_field_name("value");

    if let Some(name) = declarator.child_by_field_name("name") {
        match name.kind() {
            "identifier" => {
                if let Some(title) = node_text(name, src) {
                    let value_is_fn =
                        value.map(|v| is_function_value(v.kind())).unwrap_or(false);
                    let kind = match (value_is_fn, exported) {
                        (true, true) => "func export",
                        (true, false) => "func",
                        (false, true) => "var export",
                        (false, false) => "var",
                    };
                    push_section(declarator, level, title, kind, lines, sections);
                }
            }
            // Destructuring: one section per simple bound identifier.
            // Nested patterns are left alone.
            "object_pattern" | "array_pattern" => {
                let kind = if exported { "var export" } else { "var" };
                let mut cursor = name.walk();
                for element in name.named_children(&mut cursor) {
                    if let Some((title, target)) = pattern_binding(element, src) {
                        push_section(target, level, title, kind, lines, sections);
                    }
                }
            }
            _ => {}
        }
    }

    // The initializer is visited once per declarator, not once per bound name.
    if let Some(value) = value {
        visit(value, level + 1, false, src, lines, sections);
    }
}

/// Extract the bound identifier of a single destructuring element
fn pattern_binding<'a>(element: Node<'a>, src: &[u8]) -> Option<(String, Node<'a>)> {
    match element.kind() {
        "shorthand_property_identifier_pattern" | "identifier" => {
            node_text(element, src).map(|t| (t, element))
        }
        // `{ key: renamed }` binds the value side
        "pair_pattern" => {
            let value = element.child_by_field_name("value")?;
            if value.kind() == "identifier" {
                node_text(value, src).map(|t| (t, element))
            } else {
                None
            }
        }
        // `{ a = 1 }` / `[x = 1]` bind the left side
        "object_assignment_pattern" | "assignment_pattern" => {
            let left = element.child_by_field_name("left")?;
            if matches!(
                left.kind(),
                "identifier" | "shorthand_property_identifier_pattern"
            ) {
                node_text(left, src).map(|t| (t, element))
            } else {
                None
            }
        }
        "rest_pattern" => {
            let mut cursor = element.walk();
            let inner = element
                .named_children(&mut cursor)
                .find(|c| c.kind() == "identifier")?;
            node_text(inner, src).map(|t| (t, element))
        }
        _ => None,
    }
}

/// Check whether at least one call argument is a function value
fn has_callback_argument(call: Node) -> bool {
    call.child_by_field_name("arguments")
        .map(|args| {
            let mut cursor = args.walk();
            let has_fn = args
                .named_children(&mut cursor)
                .any(|arg| is_function_value(arg.kind()));
            has_fn
        })
        .unwrap_or(false)
}

/// Derive a simple callee name: a bare identifier or the member name of a
/// property access. Anything else yields no name.
fn callee_simple_name(call: Node, src: &[u8]) -> Option<String> {
    let callee = call.child_by_field_name("function")?;
    match callee.kind() {
        "identifier" => node_text(callee, src),
        "member_expression" => callee
            .child_by_field_name("property")
            .and_then(|p| node_text(p, src)),
        _ => None,
    }
}

fn is_function_value(kind: &str) -> bool {
    matches!(kind, "arrow_function" | "function_expression" | "function")
}

fn field_is_function(node: Node, field: &str) -> bool {
    node.child_by_field_name(field)
        .map(|v| is_function_value(v.kind()))
        .unwrap_or(false)
}

fn node_text(node: Node, src: &[u8]) -> Option<String> {
    node.utf8_text(src).ok().map(str::to_string)
}

fn field_text(node: Node, field: &str, src: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|n| node_text(n, src))
}

/// Inner text of a string literal, without the quotes
fn string_literal_text(node: Node, src: &[u8]) -> Option<String> {
    let mut cursor = node.walk();
    if let Some(fragment) = node
        .named_children(&mut cursor)
        .find(|c| c.kind() == "string_fragment")
    {
        return node_text(fragment, src);
    }
    node.utf8_text(src)
        .ok()
        .map(|t| t.trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string())
}

/// Emit a section for `node`, converting Tree-sitter's 0-based rows to
/// 1-based lines
fn push_section(
    node: Node,
    level: usize,
    title: String,
    kind: &str,
    lines: &[String],
    sections: &mut Vec<Section>,
) {
    let start_row = node.start_position().row;
    let end_row = node.end_position().row;
    let full_heading = lines
        .get(start_row)
        .cloned()
        .unwrap_or_else(|| title.clone());

    sections.push(Section {
        level,
        title,
        kind: kind.to_string(),
        full_heading,
        start_line: start_row + 1,
        end_line: end_row + 1,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ts(content: &str) -> Vec<Section> {
        ScriptParser::new(true).unwrap().parse(content).sections
    }

    fn parse_js(content: &str) -> Vec<Section> {
        ScriptParser::new(false).unwrap().parse(content).sections
    }

    fn titles(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn exported_function_declaration() {
        let sections = parse_ts("export function foo() {}");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "foo");
        assert_eq!(sections[0].kind, "func export");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[0].full_heading, "export function foo() {}");
    }

    #[test]
    fn arrow_bound_to_const_is_a_function() {
        let sections = parse_ts("const bar = () => {}");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "bar");
        assert_eq!(sections[0].kind, "func");
    }

    #[test]
    fn plain_variable_binding() {
        let sections = parse_ts("export const VERSION = '1.0';\nlet counter = 0;");
        assert_eq!(titles(&sections), vec!["VERSION", "counter"]);
        assert_eq!(sections[0].kind, "var export");
        assert_eq!(sections[1].kind, "var");
    }

    #[test]
    fn destructuring_emits_one_section_per_bound_name() {
        let sections = parse_ts("const {a, b} = x");
        assert_eq!(titles(&sections), vec!["a", "b"]);
        assert!(sections.iter().all(|s| s.kind == "var"));

        let sections = parse_ts("const [first, second] = pair;");
        assert_eq!(titles(&sections), vec!["first", "second"]);
    }

    #[test]
    fn import_is_a_leaf_titled_by_specifier() {
        let sections = parse_ts("import React from 'react';");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "react");
        assert_eq!(sections[0].kind, "import");
    }

    #[test]
    fn class_members_nest_under_the_class() {
        let source = r#"
export class UserService {
  cache = new Map();

  getUser(id: string) {
    return this.cache.get(id);
  }
}
"#;
        let sections = parse_ts(source);
        assert_eq!(titles(&sections), vec!["UserService", "cache", "getUser"]);
        assert_eq!(sections[0].kind, "class export");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[1].kind, "prop");
        assert_eq!(sections[1].level, 2);
        assert_eq!(sections[2].kind, "meth");
        assert_eq!(sections[2].level, 2);
        assert_eq!(sections[0].start_line, 2);
        assert_eq!(sections[0].end_line, 8);
    }

    #[test]
    fn interface_and_type_alias() {
        let source = "interface User {\n  id: string;\n  greet(): void;\n}\ntype ID = string | number;";
        let sections = parse_ts(source);
        assert_eq!(titles(&sections), vec!["User", "id", "greet", "ID"]);
        assert_eq!(sections[0].kind, "intf");
        assert_eq!(sections[1].kind, "prop");
        assert_eq!(sections[2].kind, "meth");
        assert_eq!(sections[3].kind, "type");
        assert_eq!(sections[1].level, 2);
    }

    #[test]
    fn object_literal_properties_reclassify_function_values() {
        let source = "const api = {\n  fetch: () => {},\n  retries: 3,\n  nested: { deep: 1 },\n};";
        let sections = parse_ts(source);
        assert_eq!(
            titles(&sections),
            vec!["api", "fetch", "retries", "nested", "deep"]
        );
        assert_eq!(sections[0].kind, "var");
        assert_eq!(sections[1].kind, "meth");
        assert_eq!(sections[2].kind, "prop");
        assert_eq!(sections[3].kind, "prop");
        // Nested object values recurse without reclassification.
        assert_eq!(sections[4].kind, "prop");
        assert!(sections[4].level > sections[3].level);
    }

    #[test]
    fn callback_bearing_call_expression() {
        let sections = parse_ts("describe('math', () => {\n  const x = 1;\n});");
        assert_eq!(titles(&sections), vec!["describe() callback", "x"]);
        assert_eq!(sections[0].kind, "call");
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[1].level, 3);
    }

    #[test]
    fn member_call_uses_property_name() {
        let sections = parse_ts("program.action(() => {});");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "action() callback");
    }

    #[test]
    fn nameless_callee_produces_no_section() {
        let sections = parse_ts("(make())(() => {});");
        assert!(sections.is_empty());
    }

    #[test]
    fn call_without_function_argument_produces_no_section() {
        let sections = parse_ts("configure('fast', 3);");
        assert!(sections.is_empty());
    }

    #[test]
    fn destructuring_initializer_is_visited_once() {
        let sections = parse_ts("const { run } = makeRunner(() => {});");
        assert_eq!(titles(&sections), vec!["run", "makeRunner() callback"]);
        assert_eq!(sections[0].level, 1);
        assert_eq!(sections[1].level, 2);
    }

    #[test]
    fn jsx_component_file() {
        let source = r#"
import React from 'react';

export const Button = ({ label }) => {
  return <button>{label}</button>;
};

export class Card extends React.Component {
  render() {
    return <div>{this.props.children}</div>;
  }
}

function helper() {
  return 'helper';
}
"#;
        let sections = parse_js(source);
        assert_eq!(
            titles(&sections),
            vec!["react", "Button", "Card", "render", "helper"]
        );
        assert_eq!(sections[1].kind, "func export");
        assert_eq!(sections[2].kind, "class export");
        assert_eq!(sections[3].kind, "meth");
        assert_eq!(sections[4].kind, "func");
    }

    #[test]
    fn tsx_default_export_function() {
        let source = "export default function App() {\n  const [count, setCount] = React.useState(0);\n  return <App />;\n}";
        let sections = parse_ts(source);
        assert_eq!(titles(&sections), vec!["App", "count", "setCount"]);
        assert_eq!(sections[0].kind, "func export");
        assert_eq!(sections[1].level, 2);
    }

    #[test]
    fn broken_source_degrades_instead_of_failing() {
        let source = "function broken(\n  console.log('test');\n}\n\nclass Valid {\n  ok() {}\n}";
        let sections = parse_ts(source);
        assert!(sections.iter().any(|s| s.title == "Valid"));
        assert!(sections.iter().any(|s| s.title == "ok"));
    }

    #[test]
    fn sections_appear_in_document_order() {
        let source = "function a() {}\nfunction b() { const inner = 1; }\nfunction c() {}";
        let sections = parse_ts(source);
        assert_eq!(titles(&sections), vec!["a", "b", "inner", "c"]);
        let starts: Vec<usize> = sections.iter().map(|s| s.start_line).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }
}
