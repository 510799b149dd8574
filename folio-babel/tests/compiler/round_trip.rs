//! Markdown → editor markup → Markdown.

use crate::common::{count, fences, fixture};
use folio_babel::{html_to_md, md_to_html, BLOCK_TYPES};

#[test]
fn every_block_type_survives_the_round_trip() {
    for block_type in BLOCK_TYPES {
        let tag = block_type.as_str();
        let body = format!("{{\"title\": \"A {tag}\", \"data\": [1, 2]}}\n");
        let markdown = format!("```{tag}\n{body}```\n");

        let html = md_to_html(&markdown);
        assert!(
            html.contains(&format!("data-block-type=\"{tag}\"")),
            "{tag}: {html}"
        );
        assert!(!html.contains("<pre>"), "{tag} left a code block: {html}");

        let back = html_to_md(&html);
        assert_eq!(fences(&back), vec![(tag.to_string(), body)], "{tag}");
    }
}

#[test]
fn kitchensink_keeps_every_fence_and_heading() {
    let source = fixture("kitchensink.md");
    let html = md_to_html(&source);

    // Six widgets plus the malformed alert; python stays a code block.
    assert_eq!(count(&html, "class=\"shadcn-block-placeholder\""), 7);
    assert_eq!(count(&html, "<pre>"), 1);
    assert!(html.contains("<h1>Quarterly notes</h1>"));

    let back = html_to_md(&html);
    assert_eq!(fences(&back), fences(&source));
    assert!(back.starts_with("# Quarterly notes\n"));
    assert!(back.contains("## Highlights"));
    assert!(back.contains("[link](https://example.com/post)"));
    assert!(back.contains("> Quoted closing remark."));
}

#[test]
fn unrecognized_tags_pass_through_as_code() {
    let markdown = "```foobar\nnot a widget\n```\n";
    let html = md_to_html(markdown);
    assert!(html.contains("<pre><code class=\"language-foobar\">not a widget\n</code></pre>"));
    assert!(!html.contains("shadcn-block-placeholder"));

    let back = html_to_md(&html);
    assert_eq!(
        fences(&back),
        vec![("foobar".to_string(), "not a widget\n".to_string())]
    );
}

#[test]
fn malformed_payload_still_gets_a_placeholder() {
    let markdown = "```alert\n{\"description\": \n```\n";
    let html = md_to_html(markdown);
    assert!(html.contains("aria-label=\"alert block\""));
    assert!(html.contains("[ALERT BLOCK]"));
    assert!(html.contains("Embedded alert block: alert block"));

    let back = html_to_md(&html);
    assert_eq!(
        fences(&back),
        vec![("alert".to_string(), "{\"description\": \n".to_string())]
    );
}

#[test]
fn summary_prefers_title_then_label_then_name() {
    let html = md_to_html("```card\n{\"title\": \"T\", \"label\": \"L\"}\n```\n");
    assert!(html.contains("aria-label=\"T\""));

    let html = md_to_html("```badge\n{\"label\": \"L\", \"name\": \"N\"}\n```\n");
    assert!(html.contains("aria-label=\"L\""));

    let html = md_to_html("```piechart\n{\"name\": \"N\"}\n```\n");
    assert!(html.contains("aria-label=\"N\""));
}

#[test]
fn quotes_backslashes_and_ampersands_round_trip_exactly() {
    let body = "{\"title\": \"Say \\\"hi\\\" & <wave>\", \"path\": \"C:\\\\tmp\"}\n";
    let markdown = format!("```card\n{body}```\n");
    let back = html_to_md(&md_to_html(&markdown));
    assert_eq!(fences(&back), vec![("card".to_string(), body.to_string())]);
}

#[test]
fn placeholder_without_payload_is_left_alone() {
    let html = "<div class=\"shadcn-block-placeholder\" data-block-type=\"card\">[CARD BLOCK]</div>";
    let markdown = html_to_md(html);
    assert!(markdown.contains("CARD BLOCK"));
    assert!(fences(&markdown).is_empty());
}

#[test]
fn surrounding_prose_is_untouched() {
    let markdown = "Before.\n\n```badge\n{\"label\": \"x\"}\n```\n\nAfter.\n";
    let html = md_to_html(markdown);
    assert!(html.starts_with("<p>Before.</p>"));
    assert!(html.trim_end().ends_with("<p>After.</p>"));

    let back = html_to_md(&html);
    assert!(back.starts_with("Before.\n\n"));
    assert!(back.trim_end().ends_with("After."));
}

#[test]
fn quoted_widget_round_trips_without_blank_quote_lines() {
    let markdown = "> ```badge\n> {\"label\":\"x\"}\n> ```\n";
    let html = md_to_html(markdown);
    assert!(html.contains("data-block-type=\"badge\""));
    assert_eq!(html_to_md(&html), markdown);
}
