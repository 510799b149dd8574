//! Reverse transform (placeholder markup back to fenced blocks)
//!
//! Finds placeholder elements and turns each back into the `pre > code.language-<type>` pair the
//! markdown serializer understands as a fenced code block. The payload comes from `data-json`
//! with its escapes undone, so the fence body is byte-identical to what produced it.
//!
//! An element that has the placeholder class but lacks `data-block-type` or `data-json` is not
//! one of ours and is left untouched. The block type is taken as written, so a placeholder for a
//! type this build does not know still round-trips.

use super::dom::{append, create_element, element_with_text, get_attr, has_class, rewrite_matching};
use crate::blocks::escape::decode_data_json;
use crate::blocks::{BLOCK_TYPE_ATTR, JSON_ATTR, PLACEHOLDER_CLASS};
use markup5ever_rcdom::Handle;

/// Rewrite every placeholder below `root` into a `pre > code` block.
///
/// Returns the number of placeholders restored.
pub fn restore_placeholders(root: &Handle) -> usize {
    rewrite_matching(
        root,
        &|node: &Handle| has_class(node, PLACEHOLDER_CLASS),
        &mut |placeholder| {
            let block_type = get_attr(placeholder, BLOCK_TYPE_ATTR)?;
            let json = get_attr(placeholder, JSON_ATTR)?;
            tracing::trace!(block_type = %block_type, "restoring placeholder to code block");
            Some(build_code_block(&block_type, &decode_data_json(&json)))
        },
    )
}

fn build_code_block(block_type: &str, body: &str) -> Handle {
    let class = format!("language-{block_type}");
    let pre = create_element("pre", vec![]);
    append(&pre, element_with_text("code", vec![("class", class.as_str())], body));
    pre
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::html::dom::{find_body, parse_html, serialize_children};
    use crate::formats::html::placeholder::insert_placeholders;

    fn restore(html: &str) -> (String, usize) {
        let dom = parse_html(html).unwrap();
        let body = find_body(&dom).unwrap();
        let count = restore_placeholders(&body);
        (serialize_children(&body).unwrap(), count)
    }

    #[test]
    fn restores_code_block_from_placeholder() {
        let html = r#"<div class="shadcn-block-placeholder" data-block-type="card" data-json="{&amp;quot;title&amp;quot;:&amp;quot;Hello&amp;quot;}\n"><span>[CARD BLOCK]</span></div>"#;
        let (output, count) = restore(html);
        assert_eq!(count, 1);
        assert_eq!(
            output,
            "<pre><code class=\"language-card\">{\"title\":\"Hello\"}\n</code></pre>"
        );
    }

    #[test]
    fn accepts_single_escaped_quotes() {
        let html = r#"<div class="shadcn-block-placeholder" data-block-type="alert" data-json="{&quot;description&quot;:&quot;x&quot;}"></div>"#;
        let (output, _) = restore(html);
        assert_eq!(
            output,
            "<pre><code class=\"language-alert\">{\"description\":\"x\"}</code></pre>"
        );
    }

    #[test]
    fn missing_attributes_leave_element_untouched() {
        let html = r#"<div class="shadcn-block-placeholder" data-block-type="card">keep</div>"#;
        let (output, count) = restore(html);
        assert_eq!(count, 0);
        assert_eq!(output, html);
    }

    #[test]
    fn placeholder_round_trip_is_exact() {
        let raw = "{\n  \"title\": \"Say \\\"hi\\\" & <wave>\"\n}\n";
        let escaped_text = raw
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        let html = format!("<pre><code class=\"language-card\">{escaped_text}</code></pre>");

        let dom = parse_html(&html).unwrap();
        let body = find_body(&dom).unwrap();
        assert_eq!(insert_placeholders(&body), 1);
        let markup = serialize_children(&body).unwrap();

        let dom = parse_html(&markup).unwrap();
        let body = find_body(&dom).unwrap();
        assert_eq!(restore_placeholders(&body), 1);
        assert_eq!(serialize_children(&body).unwrap(), html);
    }
}
