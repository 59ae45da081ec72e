//! Plain-text renderers
//!
//! Pure string-returning renderers for the single-file outline table, the
//! section extraction view, and the directory semantic tree.

use crate::models::{DirectoryOutline, Section};
use crate::tree::{build_tree_from_sections, TreeNode};

const COL_LINES_WIDTH: usize = 12;
const COL_TYPE_WIDTH: usize = 10;

/// Render a single file's outline as a `Lines │ Type │ Symbol` table with a
/// box-drawing tree in the symbol column
pub fn format_outline(sections: &[Section]) -> String {
    if sections.is_empty() {
        return "  (No structural elements found)\n".to_string();
    }

    let tree = build_tree_from_sections(sections);
    let mut out = String::new();
    push_header(&mut out);
    draw_outline_nodes(&tree, "", &mut out);
    out.push('\n');
    out
}

fn push_header(out: &mut String) {
    let lines_header = format!("{:>width$}", "Lines", width = COL_LINES_WIDTH);
    let type_header = format!("{:<width$}", "Type", width = COL_TYPE_WIDTH);
    out.push('\n');
    out.push_str(&format!("{lines_header} │ {type_header} │ Symbol\n"));
    out.push_str(&format!(
        "{}┼{}┼{}\n",
        "─".repeat(COL_LINES_WIDTH + 1),
        "─".repeat(COL_TYPE_WIDTH + 2),
        "─".repeat(40),
    ));
}

fn format_cols(section: &Section) -> String {
    let range = format!("{}-{}", section.start_line, section.end_line);
    let mut label = section.kind_label().to_string();
    if label.len() > COL_TYPE_WIDTH - 2 {
        label.truncate(COL_TYPE_WIDTH - 2);
    }
    format!(
        "{range:>lines_w$} │ {label:<type_w$} │",
        lines_w = COL_LINES_WIDTH,
        type_w = COL_TYPE_WIDTH,
    )
}

fn draw_outline_nodes(nodes: &[TreeNode<'_>], prefix: &str, out: &mut String) {
    for (idx, node) in nodes.iter().enumerate() {
        let is_last = idx == nodes.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };

        out.push_str(&format!(
            "{} {}{}{}\n",
            format_cols(node.section),
            prefix,
            connector,
            node.section.title,
        ));

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        draw_outline_nodes(&node.children, &child_prefix, out);
    }
}

/// Render the extracted body of one section with line numbers
pub fn format_extraction(lines: &[String], section: &Section) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n📍 Extracting: {}\n", section.full_heading));
    out.push_str(&format!(
        "📏 Lines {}-{} ({} lines)\n\n",
        section.start_line,
        section.end_line,
        section.line_count(),
    ));
    out.push_str(&format!("{}\n", "─".repeat(70)));
    for line_no in section.start_line..=section.end_line {
        let text = lines.get(line_no - 1).map(String::as_str).unwrap_or("");
        out.push_str(&format!("{line_no:>5} │ {text}\n"));
    }
    out.push_str(&format!("{}\n", "─".repeat(70)));

    out
}

/// A display node of the directory semantic tree: directories, files, and
/// each file's section hierarchy labeled by kind
struct VisualNode {
    label: String,
    meta: Option<String>,
    children: Vec<VisualNode>,
}

/// Render a directory scan as a semantic tree: filesystem structure with
/// each file's sections nested beneath it
pub fn format_directory_tree(outline: &DirectoryOutline) -> String {
    let mut roots: Vec<VisualNode> = Vec::new();

    for file in &outline.files {
        let components: Vec<String> = file
            .path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let section_children = section_nodes(&file.sections);
        insert_file(&mut roots, &components, section_children);
    }

    if roots.is_empty() {
        return "  (Empty directory or no supported files)\n".to_string();
    }

    let mut out = String::new();
    draw_visual_nodes(&roots, "", &mut out);
    out
}

fn section_nodes(sections: &[Section]) -> Vec<VisualNode> {
    build_tree_from_sections(sections)
        .iter()
        .map(visual_from_tree)
        .collect()
}

fn visual_from_tree(node: &TreeNode<'_>) -> VisualNode {
    VisualNode {
        label: node.section.title.clone(),
        meta: Some(format!("[{}]", node.section.kind_label())),
        children: node.children.iter().map(visual_from_tree).collect(),
    }
}

/// Insert a file path into the visual tree, creating directory nodes on
/// demand (labeled with a trailing slash)
fn insert_file(nodes: &mut Vec<VisualNode>, components: &[String], sections: Vec<VisualNode>) {
    let Some((first, rest)) = components.split_first() else {
        return;
    };

    if rest.is_empty() {
        nodes.push(VisualNode {
            label: first.clone(),
            meta: None,
            children: sections,
        });
        return;
    }

    let dir_label = format!("{first}/");
    let pos = match nodes.iter().position(|n| n.label == dir_label) {
        Some(pos) => pos,
        None => {
            nodes.push(VisualNode {
                label: dir_label,
                meta: None,
                children: Vec::new(),
            });
            nodes.len() - 1
        }
    };
    insert_file(&mut nodes[pos].children, rest, sections);
}

fn draw_visual_nodes(nodes: &[VisualNode], prefix: &str, out: &mut String) {
    for (idx, node) in nodes.iter().enumerate() {
        let is_last = idx == nodes.len() - 1;
        let connector = if is_last { "└── " } else { "├── " };

        match &node.meta {
            Some(meta) => out.push_str(&format!(
                "{prefix}{connector}{meta:<7} {}\n",
                node.label
            )),
            None => out.push_str(&format!("{prefix}{connector}{}\n", node.label)),
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        draw_visual_nodes(&node.children, &child_prefix, out);
    }
}
