//! Error types for resumark library.

use crate::model::EntryId;
use std::io;
use thiserror::Error;

/// Result type alias for resumark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while importing, editing or rendering a résumé.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The Markdown input has no `## ` section headings.
    #[error("Import failed: no sections found (expected lines starting with \"## \")")]
    NoSections,

    /// The input file type cannot be imported.
    #[error("Unknown input format: {0}")]
    UnknownFormat(String),

    /// Project JSON could not be read or written.
    #[error("JSON error: {0}")]
    Json(String),

    /// Error during local rendering (HTML, DOCX, Markdown).
    #[error("Rendering error: {0}")]
    Render(String),

    /// The external PDF rendering service failed.
    #[error("{0}")]
    RenderFault(#[from] RenderFault),

    /// A structural edit would break a document invariant.
    #[error("Invalid edit: {0}")]
    InvalidEdit(#[from] EditError),
}

/// Failures of the external HTML to PDF rendering service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderFault {
    /// The service could not be reached.
    #[error("PDF service unavailable: {0}")]
    Unavailable(String),

    /// The service did not answer within the time limit.
    #[error("PDF service timed out after {secs}s")]
    Timeout { secs: u64 },

    /// The service answered with a structured error body.
    #[error("PDF service error: {message}")]
    Service {
        message: String,
        details: Option<String>,
    },

    /// The service answered with something that is neither a PDF nor a structured error.
    #[error("PDF service returned an unexpected response (HTTP {status})")]
    Opaque { status: u16, snippet: String },
}

impl RenderFault {
    /// Message suitable for showing to the person editing the résumé.
    pub fn user_message(&self) -> String {
        match self {
            RenderFault::Unavailable(_) => {
                "The PDF service is not reachable. Check that it is running and try again."
                    .to_string()
            }
            RenderFault::Timeout { secs } => format!(
                "The PDF service did not finish within {} seconds. Try again later.",
                secs
            ),
            RenderFault::Service { message, details } => match details {
                Some(details) => format!("PDF generation failed: {} ({})", message, details),
                None => format!("PDF generation failed: {}", message),
            },
            RenderFault::Opaque { status, .. } => format!(
                "PDF generation failed: the service returned an unexpected response (HTTP {}).",
                status
            ),
        }
    }
}

/// Rejected structural edits.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditError {
    /// Removing the entry would leave its section empty.
    #[error("a section must keep at least one entry")]
    LastEntry,

    /// No section at the given index.
    #[error("section {0} does not exist")]
    SectionOutOfRange(usize),

    /// No entry with the given id in the section.
    #[error("entry {0} not found")]
    EntryNotFound(EntryId),

    /// The operation needs an entry list but the section is a text block.
    #[error("text sections have no entries")]
    NotAnEntrySection,

    /// The operation expected a different section shape.
    #[error("operation does not match the section shape")]
    ShapeMismatch,

    /// Two entries of the document share an id.
    #[error("entry id {0} is used more than once")]
    DuplicateEntryId(EntryId),

    /// An id outside the range the allocator can hand out.
    #[error("entry id {0} is out of range")]
    EntryIdOutOfRange(EntryId),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoSections;
        assert!(err.to_string().contains("no sections found"));

        let err = Error::InvalidEdit(EditError::LastEntry);
        assert_eq!(
            err.to_string(),
            "Invalid edit: a section must keep at least one entry"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_render_fault_messages_are_distinct() {
        let structured = RenderFault::Service {
            message: "Chromium crashed".to_string(),
            details: None,
        };
        let opaque = RenderFault::Opaque {
            status: 502,
            snippet: "<html>Bad Gateway</html>".to_string(),
        };
        assert!(structured.user_message().contains("Chromium crashed"));
        assert!(opaque.user_message().contains("HTTP 502"));
        assert_ne!(structured.user_message(), opaque.user_message());
    }
}
