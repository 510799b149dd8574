//! Widget block annotation over a comrak tree.
//!
//! The annotator reads fenced code nodes and records, for each recognized block type, the parsed
//! payload in a side table. The tree itself is left alone so the author's fenced text survives
//! untouched; consumers pair annotations with rendered `pre` elements by document order.

use crate::blocks::{BlockType, Payload};
use comrak::nodes::{AstNode, NodeValue};
use serde::Serialize;

/// How a consumer should display an annotated block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderHint {
    /// Payload parsed; render the interactive component.
    Widget,
    /// Payload is not JSON; show the fenced text as a code block.
    CodeBlock,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockAnnotation {
    pub block_type: BlockType,
    pub payload: Payload,
    pub hint: RenderHint,
    /// 1-based line of the opening fence.
    pub line: usize,
}

impl BlockAnnotation {
    pub fn is_widget(&self) -> bool {
        self.hint == RenderHint::Widget
    }
}

/// Collect annotations for every recognized fenced block under `root`, in document order.
pub fn annotate_blocks<'a>(root: &'a AstNode<'a>) -> Vec<BlockAnnotation> {
    let mut annotations = Vec::new();

    for node in root.descendants() {
        let data = node.data.borrow();
        let NodeValue::CodeBlock(code_block) = &data.value else {
            continue;
        };
        if !code_block.fenced {
            continue;
        }
        let Some(block_type) = BlockType::from_info_string(&code_block.info) else {
            continue;
        };

        let payload = Payload::from_source(&code_block.literal);
        let hint = match payload {
            Payload::Json(_) => RenderHint::Widget,
            Payload::Raw(_) => RenderHint::CodeBlock,
        };
        tracing::trace!(block = %block_type, line = data.sourcepos.start.line, ?hint, "annotated block");

        annotations.push(BlockAnnotation {
            block_type,
            payload,
            hint,
            line: data.sourcepos.start.line,
        });
    }

    annotations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::markdown::parse_markdown;
    use comrak::Arena;
    use serde_json::json;

    fn annotate(source: &str) -> Vec<BlockAnnotation> {
        let arena = Arena::new();
        let root = parse_markdown(&arena, source);
        annotate_blocks(root)
    }

    #[test]
    fn annotates_recognized_blocks_in_order() {
        let source = "# Post\n\n```card\n{\"title\":\"A\"}\n```\n\nText\n\n```badge\n{\"label\":\"new\"}\n```\n";
        let annotations = annotate(source);
        assert_eq!(annotations.len(), 2);
        assert_eq!(annotations[0].block_type, BlockType::Card);
        assert_eq!(annotations[0].payload, Payload::Json(json!({"title": "A"})));
        assert_eq!(annotations[0].line, 3);
        assert_eq!(annotations[1].block_type, BlockType::Badge);
        assert!(annotations.iter().all(BlockAnnotation::is_widget));
    }

    #[test]
    fn skips_unrecognized_and_indented_code() {
        let source = "```foobar\n{}\n```\n\n    {\"title\": \"indented\"}\n\n```rust\nfn main() {}\n```\n";
        assert!(annotate(source).is_empty());
    }

    #[test]
    fn malformed_json_degrades_to_raw() {
        let annotations = annotate("```alert\n{not json\n```\n");
        assert_eq!(annotations.len(), 1);
        assert_eq!(annotations[0].hint, RenderHint::CodeBlock);
        assert_eq!(annotations[0].payload, Payload::Raw("{not json\n".to_string()));
    }

    #[test]
    fn info_string_extra_words_are_ignored() {
        let annotations = annotate("```piechart sales\n{\"data\":[]}\n```\n");
        assert_eq!(annotations[0].block_type, BlockType::PieChart);
    }
}
