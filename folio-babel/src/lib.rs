//! Markdown block pipeline for a portfolio blog
//!
//!     Posts are authored in Markdown with fenced "widget" blocks: a fence whose language tag is a
//!     known block type (card, alert, badge, charts, tables) and whose body is a JSON payload.
//!     This crate moves such documents between three views:
//!
//!         - Markdown: the single source of truth, as stored.
//!         - Editor markup: HTML for a rich-text editor, each widget an opaque placeholder that
//!           carries its payload verbatim in `data-json`.
//!         - Rendered page: final HTML with every widget drawn as its component.
//!
//!     Markdown → markup → Markdown is lossless for widget payloads. Everything else follows
//!     CommonMark normalization.
//!
//! Architecture
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── blocks                  # Block types, payloads, schemas, data-json escaping
//!     ├── document.rs             # Document (markdown source)
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── compiler.rs             # md ⇄ html entry points and fallbacks
//!     ├── worker.rs               # Background compile thread with latency metrics
//!     ├── render                  # Widget renderers and page rendering
//!     ├── formats
//!     │   ├── markdown            # comrak parse, block annotation, DOM → markdown
//!     │   ├── html                # html5ever DOM helpers, placeholder and reverse transforms
//!     │   ├── page                # rendered page export
//!     │   └── blocks_json         # block inspection export
//!     └── lib.rs
//!
//!     This is a pure lib: it powers folio-cli but is shell agnostic. No code here prints, reads
//!     env vars, or assumes a terminal. Logging goes through `tracing`; installing a subscriber is
//!     the caller's business.
//!
//! Pipelines
//!
//!     md → html:  comrak parse → annotate → comrak HTML → html5ever parse → placeholders → serialize
//!     html → md:  html5ever parse → restore placeholders → comrak AST → CommonMark
//!     md → page:  comrak parse → annotate → comrak HTML → html5ever parse → components → wrap
//!
//!     The block type list lives in one place ([`blocks::BLOCK_TYPES`]) and every stage reads it.
//!
//! Errors
//!
//!     Every stage returns `Result`. The total entry points [`md_to_html`] and [`html_to_md`]
//!     are the only place errors (and panics) are swallowed; they log and return a fixed
//!     fallback string.
//!
//! Testing
//!     tests
//!     ├── <area>
//!     │   └── <testname>.rs
//!     ├── properties.rs       # proptest invariants
//!     └── fixtures
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Library Choices
//!
//!     We never write a Markdown or HTML parser or serializer: comrak owns Markdown, html5ever and
//!     rcdom own markup. The work here is adapting one tree to the other.
pub mod blocks;
pub mod compiler;
pub mod document;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod render;
pub mod worker;

pub use blocks::schema::{validate_block_data, ValidationResult};
pub use blocks::{accessible_summary, parse_payload, BlockType, Payload, BLOCK_TYPES};
pub use compiler::{
    html_to_md, md_to_html, try_html_to_md, try_md_to_html, Direction, HTML_TO_MD_FALLBACK,
    MD_TO_HTML_FALLBACK,
};
pub use document::Document;
pub use error::{FormatError, PayloadError};
pub use format::Format;
pub use registry::FormatRegistry;
pub use render::{render_document, render_page, render_widget, RenderOptions, WidgetRegistry};
pub use worker::{CompileWorker, LatencySnapshot, WorkerError};
