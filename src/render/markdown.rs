//! Markdown export.
//!
//! Every section shape has one fixed template, close to what the importer
//! reads back:
//!
//! ```text
//! # Name
//! ### Title
//! email | phone | links | location
//!
//! ## EXPERIENCE
//! **Title** | Company | Location | Dates
//! - description line
//! ```
//!
//! Spacing directives and entry ids are not written.

use crate::error::Result;
use crate::model::{Document, Header, Section, SectionContent};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document) -> Result<String> {
    MarkdownExporter::new().render(doc)
}

/// Markdown exporter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownExporter;

impl MarkdownExporter {
    /// Create a new Markdown exporter.
    pub fn new() -> Self {
        Self
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut blocks = vec![render_header(&doc.header)];
        blocks.extend(doc.sections.iter().map(|s| render_section(s)));

        let mut output = blocks.join("\n\n");
        output.push('\n');
        Ok(output)
    }
}

fn render_header(header: &Header) -> String {
    let mut lines = vec![
        format!("# {}", header.name.trim()),
        format!("### {}", header.title.trim()),
    ];
    let contact = header.contact_items();
    if !contact.is_empty() {
        lines.push(contact.join(" | "));
    }
    lines.join("\n")
}

fn render_section(section: &Section) -> String {
    let entries: Vec<String> = match &section.content {
        SectionContent::Experience(entries) => entries
            .iter()
            .map(|e| {
                entry(
                    format!("**{}** | {} | {} | {}", e.title, e.company, e.location, e.dates),
                    &e.description,
                )
            })
            .collect(),
        SectionContent::Education(entries) => entries
            .iter()
            .map(|e| {
                entry(
                    format!(
                        "**{}** | {} | {} | {}",
                        e.degree, e.university, e.location, e.dates
                    ),
                    &e.description,
                )
            })
            .collect(),
        SectionContent::StandardFull(entries) => entries
            .iter()
            .map(|e| {
                entry(
                    format!(
                        "**{}** | {}\n*{}* | {}",
                        e.headline1_left, e.headline1_right, e.headline2_left, e.headline2_right
                    ),
                    &e.description,
                )
            })
            .collect(),
        SectionContent::StandardOneHeadline(entries) => entries
            .iter()
            .map(|e| {
                entry(
                    format!("**{}** | {}", e.headline_left, e.headline_right),
                    &e.description,
                )
            })
            .collect(),
        SectionContent::StandardBulletsOnly(entries) => entries
            .iter()
            .map(|e| body_lines(&e.description).join("\n"))
            .filter(|body| !body.is_empty())
            .collect(),
        SectionContent::Text(block) => vec![body_lines(&block.text).join("\n")]
            .into_iter()
            .filter(|body| !body.is_empty())
            .collect(),
    };

    let mut out = format!("## {}", section.display_title());
    for body in entries {
        out.push_str("\n\n");
        out.push_str(&body);
    }
    out
}

/// A headline followed by its description lines.
fn entry(headline: String, description: &str) -> String {
    let mut lines = vec![headline];
    lines.extend(body_lines(description));
    lines.join("\n")
}

/// Non-empty, trimmed lines of a free-text field.
fn body_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
