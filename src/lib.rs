//! # resumark
//!
//! Structured résumé documents with a Markdown round trip and several
//! renderers.
//!
//! A [`Document`] holds header fields and an ordered list of sections, each
//! of a fixed shape (experience, education, two-headline, one-headline,
//! bullets-only or free text). Documents come from the default template,
//! from a Markdown résumé or from a JSON project file, and render to HTML
//! (preview and PDF service input), `.docx`, Markdown, JSON and plain text.
//!
//! ## Quick Start
//!
//! ```no_run
//! use resumark::{import_file, render};
//!
//! fn main() -> resumark::Result<()> {
//!     let doc = import_file("resume.md")?;
//!
//!     let options = render::RenderOptions::default();
//!     let html = render::to_html(&doc, &options)?;
//!     println!("{}", html);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Inline markup**: `**bold**`, `*italic*` and `[links](url)` in every
//!   free-text field
//! - **Heuristic Markdown import** with a fixed-template exporter
//! - **Per-zone spacing**: before/after/ultra-tight directives honored by
//!   every renderer
//! - **Copy-on-write editing** through [`edit::Editor`]
//! - **Parallel export** of several formats with Rayon
//! - **PDF** through an external HTML rendering service (feature `remote`)

pub mod detect;
pub mod edit;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

#[cfg(feature = "remote")]
pub mod remote;

// Re-export commonly used types
pub use detect::{detect_format_from_path, detect_format_from_str, is_pdf_bytes, InputFormat};
pub use edit::{Editor, EntryMut};
pub use error::{EditError, Error, RenderFault, Result};
pub use model::{
    BlockSpacing, BulletEntry, Document, EducationEntry, EntryId, ExperienceEntry, FullEntry,
    Header, LineSpacing, OneHeadlineEntry, Section, SectionContent, SectionKind, TextBlock,
};
pub use parser::{import_markdown, import_markdown_with_options, ImportOptions};
pub use render::{export, export_all, JsonFormat, OutputFormat, PageSize, RenderOptions};

use std::path::Path;

/// Import a document from text, detecting Markdown or JSON project content.
///
/// # Example
///
/// ```
/// use resumark::import_str;
///
/// let doc = import_str("# Jane Doe\n## Skills\nRust, Go").unwrap();
/// assert_eq!(doc.sections[0].title, "SKILLS");
/// ```
pub fn import_str(text: &str) -> Result<Document> {
    match detect_format_from_str(text) {
        InputFormat::Markdown => import_markdown(text),
        InputFormat::Project => render::from_json(text),
    }
}

/// Import a document from a `.md`/`.markdown` résumé or a `.json` project.
///
/// Markdown imports take the file stem as the document filename.
///
/// # Example
///
/// ```no_run
/// use resumark::import_file;
///
/// let doc = import_file("resume.md").unwrap();
/// println!("Sections: {}", doc.section_count());
/// ```
pub fn import_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let format = detect_format_from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    log::debug!("Importing {} as {}", path.display(), format);

    match format {
        InputFormat::Markdown => {
            let mut options = ImportOptions::default();
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                options = options.with_filename(stem);
            }
            import_markdown_with_options(&text, options)
        }
        InputFormat::Project => render::from_json(&text),
    }
}

/// Load a JSON project file.
pub fn load_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let text = std::fs::read_to_string(path)?;
    render::from_json(&text)
}

/// Convert a Markdown or project file to HTML.
pub fn to_html<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = import_file(path)?;
    render::to_html(&doc, options)
}

/// Convert a Markdown or project file to Markdown.
///
/// For a Markdown input this normalizes it to the exporter's templates.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = import_file(path)?;
    render::to_markdown(&doc)
}

/// Convert a Markdown or project file to `.docx` bytes.
///
/// # Example
///
/// ```no_run
/// use resumark::{to_docx, RenderOptions};
///
/// let options = RenderOptions::new().with_margin(0.75);
/// let bytes = to_docx("resume.md", &options).unwrap();
/// std::fs::write("resume.docx", bytes).unwrap();
/// ```
pub fn to_docx<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<Vec<u8>> {
    let doc = import_file(path)?;
    render::to_docx(&doc, options)
}

/// Convert a Markdown or project file to a JSON project.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = import_file(path)?;
    render::to_json(&doc, format)
}

/// Convert a Markdown or project file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = import_file(path)?;
    render::to_text(&doc)
}
