//! Rendering module for converting résumés to the output formats.
//!
//! Every renderer is a pure function of the document and the options, so
//! several formats can be produced from one document at once with
//! [`export_all`].

mod docx;
mod html;
mod json;
mod markdown;
mod options;
pub mod pageflow;
mod text;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::Document;

pub use docx::{to_docx, write_docx};
pub use html::{block_classes, line_classes, to_html, HtmlRenderer};
pub use json::{from_json, to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownExporter};
pub use options::{PageSize, RenderOptions, TWIPS_PER_INCH};
pub use pageflow::{to_page_flow, FlowDocument, PageFlowRenderer};
pub use text::to_text;

/// Output format for local export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Standalone HTML page
    #[default]
    Html,

    /// Markdown, readable by the importer
    Markdown,

    /// Word-processor document
    Docx,

    /// JSON project file
    Json,

    /// Plain text
    Text,
}

impl OutputFormat {
    /// Every local output format.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Html,
        OutputFormat::Markdown,
        OutputFormat::Docx,
        OutputFormat::Json,
        OutputFormat::Text,
    ];

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Markdown => "md",
            OutputFormat::Docx => "docx",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Html => "text/html",
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Json => "application/json",
            OutputFormat::Text => "text/plain",
        }
    }

    /// Output file name for a document: its stored filename plus the extension.
    pub fn file_name(self, doc: &Document) -> String {
        format!("{}.{}", doc.filename, self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(OutputFormat::Html),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "docx" | "word" => Ok(OutputFormat::Docx),
            "json" => Ok(OutputFormat::Json),
            "txt" | "text" => Ok(OutputFormat::Text),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// One rendered output.
#[derive(Debug, Clone)]
pub struct Export {
    pub format: OutputFormat,

    /// Suggested file name
    pub file_name: String,

    pub bytes: Vec<u8>,
}

/// Render a document to one format.
pub fn export(doc: &Document, format: OutputFormat, options: &RenderOptions) -> Result<Export> {
    let bytes = match format {
        OutputFormat::Html => to_html(doc, options)?.into_bytes(),
        OutputFormat::Markdown => to_markdown(doc)?.into_bytes(),
        OutputFormat::Docx => to_docx(doc, options)?,
        OutputFormat::Json => to_json(doc, options.json_format)?.into_bytes(),
        OutputFormat::Text => to_text(doc)?.into_bytes(),
    };
    log::debug!("Rendered {} ({} bytes)", format, bytes.len());

    Ok(Export {
        format,
        file_name: format.file_name(doc),
        bytes,
    })
}

/// Render a document to several formats in parallel.
///
/// Results keep the order of `formats`; the first failure is returned.
pub fn export_all(
    doc: &Document,
    formats: &[OutputFormat],
    options: &RenderOptions,
) -> Result<Vec<Export>> {
    formats
        .par_iter()
        .map(|&format| export(doc, format, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("docx".parse::<OutputFormat>().unwrap(), OutputFormat::Docx);
        assert!(matches!(
            "pptx".parse::<OutputFormat>(),
            Err(Error::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_file_name_uses_document_filename() {
        let mut doc = Document::new();
        doc.filename = "jane-cv".to_string();
        assert_eq!(OutputFormat::Markdown.file_name(&doc), "jane-cv.md");
        assert_eq!(OutputFormat::Docx.file_name(&doc), "jane-cv.docx");
    }

    #[test]
    fn test_export_all_keeps_order() {
        let doc = Document::template();
        let exports = export_all(&doc, &OutputFormat::ALL, &RenderOptions::default()).unwrap();
        let formats: Vec<_> = exports.iter().map(|e| e.format).collect();
        assert_eq!(formats, OutputFormat::ALL.to_vec());
        assert!(exports.iter().all(|e| !e.bytes.is_empty()));
    }
}
