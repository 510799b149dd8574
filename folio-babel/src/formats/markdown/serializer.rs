//! Markdown serialization (markup → Markdown export)
//!
//! Converts an html5ever DOM to CommonMark Markdown.
//! Pipeline: RcDom → Comrak AST → Markdown string
//!
//! Placeholders must already be restored to `pre > code.language-<type>` before this runs; the
//! code block path carries the fenced body through unchanged.
//!
//! The DOM walk recurses once per nesting level, so markup nested deeper than
//! [`MAX_NESTING_DEPTH`] is rejected up front with a [`FormatError::ParseError`].

use super::default_comrak_options;
use crate::blocks::BlockType;
use crate::error::FormatError;
use crate::formats::html::dom::{get_attr, nesting_depth, tag_name, text_content};
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeLink,
    NodeList, NodeTable, NodeValue, TableAlignment,
};
use comrak::{format_commonmark, Arena};
use markup5ever_rcdom::{Handle, NodeData};
use std::cell::RefCell;

/// Deepest element nesting below `<body>` the serializer accepts.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Serialize the children of `root` (usually `<body>`) to Markdown.
pub fn serialize_dom_to_markdown(root: &Handle) -> Result<String, FormatError> {
    let depth = nesting_depth(root);
    if depth > MAX_NESTING_DEPTH {
        return Err(FormatError::ParseError(format!(
            "markup nested too deeply ({depth} levels, limit {MAX_NESTING_DEPTH})"
        )));
    }

    let arena = Arena::new();
    let document = new_node(&arena, NodeValue::Document);
    add_block_children(&arena, document, root);

    let mut options = default_comrak_options();
    options.render.prefer_fenced = true;

    let mut output = Vec::new();
    format_commonmark(document, &options, &mut output).map_err(|e| {
        FormatError::SerializationError(format!("Comrak serialization failed: {e}"))
    })?;

    let markdown = String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))?;

    // Remove Comrak's "end list" HTML comments which appear between consecutive lists
    Ok(tidy_commonmark(&markdown.replace("<!-- end list -->\n\n", "")))
}

/// Clean up two quirks of comrak's CommonMark writer, leaving code block bodies alone:
/// the space it puts between a fence and its info string, and the empty quote lines it
/// writes when a blockquote opens with a code block or thematic break.
fn tidy_commonmark(markdown: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut open_fence: Option<String> = None;

    for line in markdown.split('\n') {
        let content_start = line
            .find(|c: char| !is_container_marker(c))
            .unwrap_or(line.len());
        let (prefix, content) = line.split_at(content_start);

        if let Some(fence) = &open_fence {
            if content.trim_end() == fence {
                open_fence = None;
            }
            lines.push(line.to_string());
            continue;
        }

        if let Some(fence) = fence_opening(content) {
            let info = &content[fence.len()..];
            let info = info.strip_prefix(' ').unwrap_or(info);
            lines.push(format!("{prefix}{fence}{info}"));
            open_fence = Some(fence.to_string());
            continue;
        }

        let previous_depth = lines.last().map_or(0, |previous| quote_depth(previous));
        if is_empty_quote_line(line) && quote_depth(line) > previous_depth {
            continue;
        }
        lines.push(line.to_string());
    }

    lines.join("\n")
}

/// Characters comrak writes ahead of block content: quote markers, list markers, indentation.
fn is_container_marker(c: char) -> bool {
    matches!(c, ' ' | '>' | '-' | '.' | ')') || c.is_ascii_digit()
}

/// The fence run if `content` opens a fenced code block.
fn fence_opening(content: &str) -> Option<&str> {
    let fence_char = content.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let run = content.len() - content.trim_start_matches(fence_char).len();
    if run < 3 {
        return None;
    }
    let (fence, info) = content.split_at(run);
    // Backtick fences cannot carry backticks in their info string; such a line is a code span.
    if fence_char == '`' && info.contains('`') {
        return None;
    }
    Some(fence)
}

fn quote_depth(line: &str) -> usize {
    line.chars()
        .take_while(|c| *c == '>' || *c == ' ')
        .filter(|c| *c == '>')
        .count()
}

fn is_empty_quote_line(line: &str) -> bool {
    line.contains('>') && line.chars().all(|c| c == '>' || c == ' ')
}

fn new_node<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

fn append_node<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    value: NodeValue,
) -> &'a AstNode<'a> {
    let node = new_node(arena, value);
    parent.append(node);
    node
}

fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "ul"
            | "ol"
            | "pre"
            | "blockquote"
            | "hr"
            | "table"
            | "div"
            | "section"
            | "article"
            | "main"
            | "header"
            | "footer"
            | "aside"
            | "nav"
            | "figure"
            | "details"
            | "html"
            | "body"
    )
}

fn is_skipped_tag(tag: &str) -> bool {
    matches!(
        tag,
        "head" | "script" | "style" | "template" | "title" | "meta" | "link" | "noscript"
    )
}

/// Walk the children of a block container. Loose inline content between blocks is gathered
/// into implicit paragraphs.
fn add_block_children<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Handle) {
    let mut paragraph: Option<&'a AstNode<'a>> = None;

    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                if paragraph.is_none() && contents.borrow().trim().is_empty() {
                    continue;
                }
                let para =
                    *paragraph.get_or_insert_with(|| append_node(arena, parent, NodeValue::Paragraph));
                add_inline(arena, para, child);
            }
            NodeData::Element { name, .. } => {
                let tag = name.local.as_ref();
                if is_skipped_tag(tag) {
                    continue;
                }
                if is_block_tag(tag) {
                    paragraph = None;
                    add_block(arena, parent, child, tag);
                } else {
                    let para = *paragraph
                        .get_or_insert_with(|| append_node(arena, parent, NodeValue::Paragraph));
                    add_inline(arena, para, child);
                }
            }
            _ => {}
        }
    }
}

fn add_block<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Handle, tag: &str) {
    match tag {
        "p" => {
            let para = append_node(arena, parent, NodeValue::Paragraph);
            add_inline_children(arena, para, node);
        }
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse::<u8>().unwrap_or(1);
            let heading = append_node(
                arena,
                parent,
                NodeValue::Heading(NodeHeading {
                    level,
                    setext: false,
                }),
            );
            add_inline_children(arena, heading, node);
        }
        "ul" | "ol" => add_list(arena, parent, node, tag == "ol"),
        "pre" => add_code_block(arena, parent, node),
        "blockquote" => {
            let quote = append_node(arena, parent, NodeValue::BlockQuote);
            add_block_children(arena, quote, node);
        }
        "hr" => {
            append_node(arena, parent, NodeValue::ThematicBreak);
        }
        "table" => add_table(arena, parent, node),
        // Structural wrappers carry no markdown of their own.
        _ => add_block_children(arena, parent, node),
    }
}

fn list_value(ordered: bool, start: usize, item: bool) -> NodeValue {
    let list = NodeList {
        list_type: if ordered {
            ListType::Ordered
        } else {
            ListType::Bullet
        },
        marker_offset: 0,
        padding: 0,
        start,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight: true,
    };
    if item {
        NodeValue::Item(list)
    } else {
        NodeValue::List(list)
    }
}

fn add_list<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Handle, ordered: bool) {
    let start = get_attr(node, "start")
        .and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(1);
    let list = append_node(arena, parent, list_value(ordered, start, false));

    for child in node.children.borrow().iter() {
        if tag_name(child).as_deref() != Some("li") {
            continue;
        }
        let item = append_node(arena, list, list_value(ordered, start, true));
        add_block_children(arena, item, child);
    }
}

fn add_code_block<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, pre: &Handle) {
    let code = pre
        .children
        .borrow()
        .iter()
        .find(|child| tag_name(child).as_deref() == Some("code"))
        .cloned();

    let info = code
        .as_ref()
        .and_then(|code| get_attr(code, "class"))
        .and_then(|class| code_language(&class))
        .unwrap_or_default();

    let mut literal = text_content(pre);
    if !literal.ends_with('\n') {
        literal.push('\n');
    }

    append_node(
        arena,
        parent,
        NodeValue::CodeBlock(NodeCodeBlock {
            fenced: true,
            fence_char: b'`',
            fence_length: 3,
            fence_offset: 0,
            info,
            literal,
        }),
    );
}

/// Language from a `language-<tag>` class. Widget tags are checked first so the
/// fence tag matches the registry spelling.
fn code_language(class: &str) -> Option<String> {
    if let Some(block_type) = BlockType::from_class_list(class) {
        return Some(block_type.as_str().to_string());
    }
    class
        .split_whitespace()
        .find_map(|c| c.strip_prefix("language-"))
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
}

fn table_rows(table: &Handle) -> Vec<Handle> {
    let mut rows = Vec::new();
    for child in table.children.borrow().iter() {
        match tag_name(child).as_deref() {
            Some("tr") => rows.push(child.clone()),
            Some("thead") | Some("tbody") | Some("tfoot") => {
                for row in child.children.borrow().iter() {
                    if tag_name(row).as_deref() == Some("tr") {
                        rows.push(row.clone());
                    }
                }
            }
            _ => {}
        }
    }
    rows
}

fn row_cells(row: &Handle) -> Vec<Handle> {
    row.children
        .borrow()
        .iter()
        .filter(|cell| matches!(tag_name(cell).as_deref(), Some("td") | Some("th")))
        .cloned()
        .collect()
}

fn cell_alignment(cell: &Handle) -> TableAlignment {
    let align = get_attr(cell, "align").or_else(|| {
        get_attr(cell, "style").and_then(|style| {
            style
                .split(';')
                .find_map(|decl| decl.trim().strip_prefix("text-align:").map(|v| v.trim().to_string()))
        })
    });
    match align.as_deref() {
        Some("left") => TableAlignment::Left,
        Some("right") => TableAlignment::Right,
        Some("center") => TableAlignment::Center,
        _ => TableAlignment::None,
    }
}

fn add_table<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, table: &Handle) {
    let rows = table_rows(table);
    let num_columns = rows.iter().map(|row| row_cells(row).len()).max().unwrap_or(0);
    if num_columns == 0 {
        return;
    }

    let header_cells = row_cells(&rows[0]);
    let alignments = (0..num_columns)
        .map(|i| {
            header_cells
                .get(i)
                .map(cell_alignment)
                .unwrap_or(TableAlignment::None)
        })
        .collect();

    let table_node = append_node(
        arena,
        parent,
        NodeValue::Table(NodeTable {
            alignments,
            num_columns,
            num_rows: rows.len(),
            num_nonempty_cells: 0,
        }),
    );

    for (index, row) in rows.iter().enumerate() {
        let row_node = append_node(arena, table_node, NodeValue::TableRow(index == 0));
        let cells = row_cells(row);
        for column in 0..num_columns {
            let cell_node = append_node(arena, row_node, NodeValue::TableCell);
            if let Some(cell) = cells.get(column) {
                add_inline_children(arena, cell_node, cell);
            }
        }
    }
}

fn add_inline_children<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Handle) {
    for child in node.children.borrow().iter() {
        add_inline(arena, parent, child);
    }
}

fn add_inline<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Handle) {
    match &node.data {
        NodeData::Text { contents } => {
            let text = collapse_whitespace(&contents.borrow());
            if !text.is_empty() {
                append_node(arena, parent, NodeValue::Text(text));
            }
        }
        NodeData::Element { name, .. } => match name.local.as_ref() {
            "strong" | "b" => {
                let strong = append_node(arena, parent, NodeValue::Strong);
                add_inline_children(arena, strong, node);
            }
            "em" | "i" => {
                let emph = append_node(arena, parent, NodeValue::Emph);
                add_inline_children(arena, emph, node);
            }
            "del" | "s" | "strike" => {
                let strike = append_node(arena, parent, NodeValue::Strikethrough);
                add_inline_children(arena, strike, node);
            }
            "code" => {
                append_node(
                    arena,
                    parent,
                    NodeValue::Code(NodeCode {
                        num_backticks: 1,
                        literal: text_content(node),
                    }),
                );
            }
            "a" => {
                let link = append_node(
                    arena,
                    parent,
                    NodeValue::Link(NodeLink {
                        url: get_attr(node, "href").unwrap_or_default(),
                        title: get_attr(node, "title").unwrap_or_default(),
                    }),
                );
                add_inline_children(arena, link, node);
            }
            "img" => {
                let image = append_node(
                    arena,
                    parent,
                    NodeValue::Image(NodeLink {
                        url: get_attr(node, "src").unwrap_or_default(),
                        title: get_attr(node, "title").unwrap_or_default(),
                    }),
                );
                if let Some(alt) = get_attr(node, "alt").filter(|alt| !alt.is_empty()) {
                    append_node(arena, image, NodeValue::Text(alt));
                }
            }
            "br" => {
                append_node(arena, parent, NodeValue::LineBreak);
            }
            tag if is_skipped_tag(tag) => {}
            _ => add_inline_children(arena, parent, node),
        },
        _ => {}
    }
}

/// HTML whitespace rules: any run of whitespace is a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}
