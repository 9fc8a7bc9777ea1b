//! Markdown parsing: inline markup and full-document import.

pub mod inline;
mod importer;
mod options;

pub use importer::{import_markdown, import_markdown_with_options, MarkdownImporter};
pub use inline::{parse_inline, InlineSpan, SpanKind};
pub use options::ImportOptions;
