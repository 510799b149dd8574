//! Total entry points and their edge cases.

use folio_babel::{
    html_to_md, md_to_html, try_html_to_md, try_md_to_html, Direction, Document, FormatRegistry,
    HTML_TO_MD_FALLBACK, MD_TO_HTML_FALLBACK,
};

#[test]
fn empty_input_compiles_to_empty_output() {
    assert_eq!(md_to_html(""), "");
    assert_eq!(html_to_md(""), "");
    assert_eq!(html_to_md("   \n"), "");
    assert_eq!(try_md_to_html("").unwrap(), "");
}

#[test]
fn fallback_strings_are_fixed() {
    assert_eq!(MD_TO_HTML_FALLBACK, "Error converting Markdown to HTML");
    assert_eq!(HTML_TO_MD_FALLBACK, "Error converting HTML to Markdown");
    assert_eq!(Direction::MdToHtml.fallback(), MD_TO_HTML_FALLBACK);
    assert_eq!(Direction::HtmlToMd.fallback(), HTML_TO_MD_FALLBACK);
}

#[test]
fn broken_markup_still_produces_output() {
    for input in ["<<<>>>", "<div><p>unclosed", "</pre></code>", "<pre><code class=\"language-card\">"] {
        let output = html_to_md(input);
        assert_ne!(output, HTML_TO_MD_FALLBACK, "{input}");
        assert!(try_html_to_md(input).is_ok(), "{input}");
    }
}

#[test]
fn direction_compile_matches_free_functions() {
    let markdown = "# Title\n\n```badge\n{\"label\": \"x\"}\n```\n";
    assert_eq!(Direction::MdToHtml.compile(markdown), md_to_html(markdown));
    let html = md_to_html(markdown);
    assert_eq!(Direction::HtmlToMd.compile(&html), html_to_md(&html));
}

#[test]
fn registry_html_format_uses_the_compilers() {
    let registry = FormatRegistry::with_defaults();
    let doc = Document::from_markdown("```card\n{\"title\": \"Hi\"}\n```\n");

    let html = registry.serialize(&doc, "html").unwrap();
    assert_eq!(html, md_to_html(doc.markdown()));

    let parsed = registry.parse(&html, "html").unwrap();
    assert_eq!(parsed.markdown(), html_to_md(&html));
}

#[test]
fn deeply_nested_markup_falls_back_instead_of_aborting() {
    let inputs = [
        "<div>".repeat(20_000),
        "<blockquote>".repeat(5_000),
        "<ul><li>".repeat(5_000),
        "<span>".repeat(5_000) + "deep",
    ];
    for html in &inputs {
        assert_eq!(html_to_md(html), HTML_TO_MD_FALLBACK, "{}", &html[..20]);
        assert!(try_html_to_md(html).is_err());
    }
}

#[test]
fn moderately_nested_markup_still_converts() {
    let html = "<blockquote>".repeat(100) + "<p>deep</p>";
    let markdown = html_to_md(&html);
    assert_ne!(markdown, HTML_TO_MD_FALLBACK);
    assert!(markdown.starts_with(&"> ".repeat(100)));
    assert!(markdown.contains("deep"));
}

#[test]
fn deeply_quoted_markdown_compiles() {
    let markdown = ">".repeat(5_000) + " deep\n";
    let html = md_to_html(&markdown);
    assert_ne!(html, MD_TO_HTML_FALLBACK);
    assert!(html.contains("deep"));

    let back = html_to_md(&html);
    assert!(back == HTML_TO_MD_FALLBACK || back.contains("deep"));
}

#[test]
fn deeply_nested_list_markdown_round_trips() {
    let markdown: String = (0..300)
        .map(|level| format!("{}- item {level}\n", "  ".repeat(level)))
        .collect();
    let html = md_to_html(&markdown);
    assert_ne!(html, MD_TO_HTML_FALLBACK);
    assert!(html.contains("item 299"));

    let back = html_to_md(&html);
    assert_ne!(back, HTML_TO_MD_FALLBACK);
    assert!(back.contains("item 299"));
}
