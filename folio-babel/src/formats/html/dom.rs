//! DOM helpers over `markup5ever_rcdom`
//!
//! Parsing, node construction, lookup and serialization shared by the placeholder transform,
//! the reverse transform, the markdown serializer and the widget renderer.
//!
//! Tree rewrites go through [`rewrite_matching`]: a walker parameterized by a predicate over
//! nodes and a transform that may return a replacement. Dispatch is by matching on
//! [`NodeData`], never by probing fields.

use crate::error::FormatError;
use html5ever::tendril::TendrilSink;
use html5ever::{
    ns, parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute,
    LocalName, ParseOpts, QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Parse an HTML string (document or fragment) into an `RcDom`.
///
/// html5ever recovers from malformed markup the way browsers do, so this only fails on I/O
/// errors from the in-memory reader.
pub fn parse_html(source: &str) -> Result<RcDom, FormatError> {
    parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut source.as_bytes())
        .map_err(|e| FormatError::ParseError(format!("HTML parsing failed: {e}")))
}

/// Locate the `<body>` element html5ever always synthesizes.
pub fn find_body(dom: &RcDom) -> Option<Handle> {
    find_element(&dom.document, "body")
}

/// Depth-first search for the first element with the given tag.
pub fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    let mut pending = vec![node.clone()];
    while let Some(node) = pending.pop() {
        if is_element(&node, tag) {
            return Some(node);
        }
        pending.extend(node.children.borrow().iter().rev().cloned());
    }
    None
}

/// Create an HTML element with attributes
pub fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

/// Create a text node
pub fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Append `child` to `parent`, wiring the parent pointer.
pub fn append(parent: &Handle, child: Handle) {
    child.parent.set(Some(Rc::downgrade(parent)));
    parent.children.borrow_mut().push(child);
}

/// Create an element holding a single text child.
pub fn element_with_text(tag: &str, attrs: Vec<(&str, &str)>, text: &str) -> Handle {
    let element = create_element(tag, attrs);
    append(&element, create_text(text));
    element
}

/// Local tag name of an element node.
pub fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

pub fn is_element(node: &Handle, tag: &str) -> bool {
    match &node.data {
        NodeData::Element { name, .. } => &*name.local == tag,
        _ => false,
    }
}

/// Value of an attribute on an element node.
pub fn get_attr(node: &Handle, attr: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == attr)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// Whether the element's `class` list contains `class`.
pub fn has_class(node: &Handle, class: &str) -> bool {
    get_attr(node, "class").is_some_and(|list| list.split_whitespace().any(|c| c == class))
}

/// Concatenated text of a node and all its descendants.
pub fn text_content(node: &Handle) -> String {
    let mut output = String::new();
    collect_text(node, &mut output);
    output
}

fn collect_text(node: &Handle, output: &mut String) {
    let mut pending = vec![node.clone()];
    while let Some(node) = pending.pop() {
        match &node.data {
            NodeData::Text { contents } => output.push_str(&contents.borrow()),
            NodeData::Element { .. } | NodeData::Document => {
                pending.extend(node.children.borrow().iter().rev().cloned());
            }
            _ => {}
        }
    }
}

/// Deepest nesting of nodes below `root`. The root itself is depth 0.
pub fn nesting_depth(root: &Handle) -> usize {
    let mut deepest = 0;
    let mut pending = vec![(root.clone(), 0)];
    while let Some((node, depth)) = pending.pop() {
        deepest = deepest.max(depth);
        pending.extend(node.children.borrow().iter().map(|child| (child.clone(), depth + 1)));
    }
    deepest
}

/// Element children of a node, skipping text, comments and the rest.
pub fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .collect()
}

/// Walk the tree below `root` and replace every node the predicate accepts.
///
/// The transform returns the replacement node, or `None` to leave the node as it is. Replaced
/// nodes are not descended into; kept nodes are. Nodes are visited in document order. Returns
/// how many nodes were replaced.
pub fn rewrite_matching<P, T>(root: &Handle, matches: &P, transform: &mut T) -> usize
where
    P: Fn(&Handle) -> bool,
    T: FnMut(&Handle) -> Option<Handle>,
{
    let mut replaced = 0;
    // (parent, index of the next child to visit)
    let mut frames = vec![(root.clone(), 0)];
    while let Some((parent, index)) = frames.pop() {
        let next = parent.children.borrow().get(index).cloned();
        let Some(child) = next else {
            continue;
        };
        frames.push((parent.clone(), index + 1));

        if matches(&child) {
            if let Some(replacement) = transform(&child) {
                replacement.parent.set(Some(Rc::downgrade(&parent)));
                child.parent.set(None);
                parent.children.borrow_mut()[index] = replacement;
                replaced += 1;
                continue;
            }
        }
        frames.push((child, 0));
    }
    replaced
}

/// Serialize the children of a node to an HTML string.
pub fn serialize_children(node: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();

    // Use TraversalScope::IncludeNode to serialize the element AND its children
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for child in node.children.borrow().iter() {
        let serializable = SerializableHandle::from(child.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fragments_into_body() {
        let dom = parse_html("<p>Hello <em>world</em></p>").unwrap();
        let body = find_body(&dom).expect("body is synthesized");
        let children = element_children(&body);
        assert_eq!(children.len(), 1);
        assert!(is_element(&children[0], "p"));
        assert_eq!(text_content(&children[0]), "Hello world");
    }

    #[test]
    fn reads_attributes_and_classes() {
        let dom = parse_html(r#"<div class="a b" data-x="1"></div>"#).unwrap();
        let div = find_element(&dom.document, "div").unwrap();
        assert_eq!(get_attr(&div, "data-x").as_deref(), Some("1"));
        assert!(has_class(&div, "b"));
        assert!(!has_class(&div, "c"));
    }

    #[test]
    fn rewrites_matching_nodes_in_place() {
        let dom = parse_html("<p>one</p><pre>two</pre><p>three</p>").unwrap();
        let body = find_body(&dom).unwrap();
        let replaced = rewrite_matching(&body, &|node: &Handle| is_element(node, "pre"), &mut |_| {
            Some(create_element("hr", vec![]))
        });
        assert_eq!(replaced, 1);
        assert_eq!(
            serialize_children(&body).unwrap(),
            "<p>one</p><hr><p>three</p>"
        );
    }

    #[test]
    fn rewrites_in_document_order() {
        let dom = parse_html(
            "<blockquote><pre>a</pre><div><pre>b</pre></div></blockquote><pre>c</pre>",
        )
        .unwrap();
        let body = find_body(&dom).unwrap();
        let mut seen = Vec::new();
        rewrite_matching(&body, &|node: &Handle| is_element(node, "pre"), &mut |pre| {
            seen.push(text_content(pre));
            None
        });
        assert_eq!(seen, ["a", "b", "c"]);
    }

    #[test]
    fn walkers_handle_deep_nesting() {
        let depth = 20_000;
        let html = format!("{}<pre>deep</pre>", "<div>".repeat(depth));
        let dom = parse_html(&html).unwrap();
        let body = find_body(&dom).unwrap();

        assert!(nesting_depth(&body) > depth);
        assert!(find_element(&body, "pre").is_some());
        assert_eq!(text_content(&body), "deep");
        let replaced = rewrite_matching(&body, &|node: &Handle| is_element(node, "pre"), &mut |_| {
            Some(create_element("hr", vec![]))
        });
        assert_eq!(replaced, 1);
    }

    #[test]
    fn nesting_depth_counts_levels_below_root() {
        let dom = parse_html("<p>a</p><ul><li><em>b</em></li></ul>").unwrap();
        let body = find_body(&dom).unwrap();
        // ul > li > em > text
        assert_eq!(nesting_depth(&body), 4);
    }

    #[test]
    fn serializer_escapes_attribute_quotes() {
        let div = create_element("div", vec![("data-json", "{\"a\":1}")]);
        let wrapper = create_element("section", vec![]);
        append(&wrapper, div);
        assert_eq!(
            serialize_children(&wrapper).unwrap(),
            r#"<div data-json="{&quot;a&quot;:1}"></div>"#
        );
    }
}
