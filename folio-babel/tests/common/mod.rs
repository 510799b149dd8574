//! Shared helpers for the integration tests.

use comrak::nodes::NodeValue;
use comrak::{parse_document, Arena, Options};
use std::fs;
use std::path::PathBuf;

/// Read a file from `tests/fixtures`.
pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()))
}

/// Fenced code blocks of a markdown document as `(info, literal)` pairs, in order.
///
/// Comparing reparsed fences keeps the tests independent of how the serializer picks fence
/// characters and spacing.
pub fn fences(markdown: &str) -> Vec<(String, String)> {
    let arena = Arena::new();
    let mut options = Options::default();
    options.extension.table = true;
    let root = parse_document(&arena, markdown, &options);

    root.descendants()
        .filter_map(|node| match &node.data.borrow().value {
            NodeValue::CodeBlock(block) if block.fenced => {
                Some((block.info.clone(), block.literal.clone()))
            }
            _ => None,
        })
        .collect()
}

/// Count non-overlapping occurrences of `needle`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
