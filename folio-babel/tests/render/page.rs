//! Published rendering of whole documents.

use crate::common::{count, fixture};
use folio_babel::formats::blocks_json::inspect;
use folio_babel::{render_document, render_page, Document, FormatRegistry, RenderOptions};
use std::collections::HashMap;

#[test]
fn kitchensink_renders_valid_widgets_only() {
    let html = render_document(&fixture("kitchensink.md"), &RenderOptions::default()).unwrap();

    assert_eq!(count(&html, "<div class=\"folio-widget "), 6);
    for tag in ["card", "alert", "barchart", "piechart", "tablejson", "badge"] {
        assert!(
            html.contains(&format!("data-block-type=\"{tag}\"")),
            "{tag} missing"
        );
    }
    // The malformed alert and the python sample stay code.
    assert!(html.contains("<code class=\"language-alert\">"));
    assert!(html.contains("<code class=\"language-python\">"));
    assert!(!html.contains("shadcn-block-placeholder"));
}

#[test]
fn widgets_keep_their_document_position() {
    let html = render_document(&fixture("kitchensink.md"), &RenderOptions::default()).unwrap();
    let positions: Vec<usize> = [
        "folio-widget-card",
        "folio-widget-alert",
        "folio-widget-barchart",
        "folio-widget-badge",
    ]
    .iter()
    .map(|class| html.find(class).unwrap_or_else(|| panic!("{class} missing")))
    .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(html.find("<h1>").unwrap() < positions[0]);
}

#[test]
fn page_format_applies_options() {
    let registry = FormatRegistry::with_defaults();
    let doc = Document::from_markdown(fixture("kitchensink.md"));
    let options: HashMap<String, String> = [("title", "Q3"), ("chart-height", "420")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let page = registry.serialize_with_options(&doc, "page", &options).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains("<title>Q3</title>"));
    assert_eq!(count(&page, "viewBox=\"0 0 600 420\""), 2);
}

#[test]
fn page_and_body_agree() {
    let source = fixture("kitchensink.md");
    let options = RenderOptions::default();
    let body = render_document(&source, &options).unwrap();
    let page = render_page(&source, &options).unwrap();
    assert!(page.contains(&body));
}

#[test]
fn inspection_lists_every_recognized_block() {
    let reports = inspect(&Document::from_markdown(fixture("kitchensink.md")));
    let tags: Vec<&str> = reports
        .iter()
        .map(|report| report.annotation.block_type.as_str())
        .collect();
    assert_eq!(
        tags,
        vec!["card", "alert", "barchart", "piechart", "tablejson", "badge", "alert"]
    );
    assert!(reports[..6].iter().all(|report| report.validation.valid));
    assert!(!reports[6].validation.valid);
}

#[test]
fn widgets_render_inside_deep_quotes() {
    let quote = "> ".repeat(2_000);
    let markdown = format!("{quote}```badge\n{quote}{{\"label\":\"deep\"}}\n{quote}```\n");
    let html = render_document(&markdown, &RenderOptions::default()).unwrap();
    assert_eq!(count(&html, "<blockquote>"), 2_000);
    assert!(html.contains("data-block-type=\"badge\""));
    assert!(html.contains(">deep</span>"));
}
