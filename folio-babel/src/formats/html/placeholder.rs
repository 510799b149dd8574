//! Placeholder transform (markup, forward direction)
//!
//! Replaces every `pre > code.language-<type>` whose type is a recognized widget with an inert
//! placeholder the editor can show and move around without touching the payload:
//!
//! ```html
//! <div class="shadcn-block-placeholder" data-block-type="card" data-json="{&quot;title&quot;..."
//!      contenteditable="false" role="img" aria-label="Hello" tabindex="0">
//!   <span class="shadcn-block-label" aria-hidden="true">[CARD BLOCK]</span>
//!   <span class="sr-only">Embedded card block: Hello</span>
//! </div>
//! ```
//!
//! A payload that is not valid JSON still becomes a placeholder, labelled `"<type> block"`.

use super::dom::{
    append, create_element, element_children, element_with_text, get_attr, is_element,
    rewrite_matching, text_content,
};
use crate::blocks::escape::encode_data_json;
use crate::blocks::{
    accessible_summary, parse_payload, BlockType, BLOCK_TYPE_ATTR, JSON_ATTR, PLACEHOLDER_CLASS,
};
use markup5ever_rcdom::Handle;

/// Class of the visible `[TYPE BLOCK]` label inside a placeholder.
pub const LABEL_CLASS: &str = "shadcn-block-label";

/// Rewrite every widget code block below `root` into a placeholder.
///
/// Returns the number of placeholders created.
pub fn insert_placeholders(root: &Handle) -> usize {
    rewrite_matching(root, &|node: &Handle| is_element(node, "pre"), &mut |pre| {
        let (block_type, raw) = widget_code_block(pre)?;
        tracing::trace!(block_type = %block_type, "replacing code block with placeholder");
        Some(build_placeholder(block_type, &raw))
    })
}

/// Identify a `pre` element as a widget block, returning its type and raw body.
pub fn widget_code_block(pre: &Handle) -> Option<(BlockType, String)> {
    let code = element_children(pre)
        .into_iter()
        .find(|child| is_element(child, "code"))?;
    let block_type = BlockType::from_class_list(&get_attr(&code, "class")?)?;
    Some((block_type, text_content(&code)))
}

/// Build the placeholder element for one block.
pub fn build_placeholder(block_type: BlockType, raw: &str) -> Handle {
    let parsed = match parse_payload(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::debug!(block_type = %block_type, error = %err, "placeholder payload is not JSON");
            None
        }
    };
    let summary = accessible_summary(block_type, parsed.as_ref());
    let encoded = encode_data_json(raw);

    let placeholder = create_element(
        "div",
        vec![
            ("class", PLACEHOLDER_CLASS),
            (BLOCK_TYPE_ATTR, block_type.as_str()),
            (JSON_ATTR, encoded.as_str()),
            ("contenteditable", "false"),
            ("role", "img"),
            ("aria-label", summary.as_str()),
            ("tabindex", "0"),
        ],
    );

    let label = format!("[{} BLOCK]", block_type.as_str().to_uppercase());
    append(
        &placeholder,
        element_with_text(
            "span",
            vec![("class", LABEL_CLASS), ("aria-hidden", "true")],
            &label,
        ),
    );
    append(
        &placeholder,
        element_with_text(
            "span",
            vec![("class", "sr-only")],
            &format!("Embedded {} block: {summary}", block_type.as_str()),
        ),
    );
    placeholder
}
