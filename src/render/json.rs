//! JSON project files.
//!
//! Unlike the Markdown export, the JSON form keeps everything: spacing
//! directives, entry ids, margin and filename.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Load a document from its JSON project form.
///
/// The document is validated, and its entry ids are registered so that
/// entries added afterwards never reuse one of them.
pub fn from_json(text: &str) -> Result<Document> {
    let doc: Document = serde_json::from_str(text)?;
    doc.validate()?;
    doc.observe_ids();
    Ok(doc)
}
