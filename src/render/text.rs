//! Plain text rendering.
//!
//! Inline markup is dropped (links keep their label only). Two-column lines
//! are joined with ` | `, bulleted lines keep a `- ` prefix.

use crate::error::Result;
use crate::model::{description_lines, Document, Section, SectionContent};
use crate::parser::inline::plain_text;

/// Convert a document to plain text.
pub fn to_text(doc: &Document) -> Result<String> {
    let mut blocks = Vec::new();

    let mut header = vec![plain_text(&doc.header.name), plain_text(&doc.header.title)];
    let contact = doc.header.contact_items();
    if !contact.is_empty() {
        header.push(
            contact
                .iter()
                .map(|item| plain_text(item))
                .collect::<Vec<_>>()
                .join(" | "),
        );
    }
    blocks.push(join_lines(header));

    for section in &doc.sections {
        blocks.push(section_text(section));
    }

    Ok(blocks.join("\n\n").trim().to_string())
}

fn section_text(section: &Section) -> String {
    let mut lines = vec![plain_text(&section.display_title())];
    match &section.content {
        SectionContent::Experience(entries) => {
            for e in entries {
                lines.push(columns(&e.title, &e.dates));
                lines.push(columns(&e.company, &e.location));
                lines.extend(description(&e.description));
            }
        }
        SectionContent::Education(entries) => {
            for e in entries {
                lines.push(columns(&e.university, &e.location));
                lines.push(columns(&e.degree, &e.dates));
                lines.extend(description(&e.description));
            }
        }
        SectionContent::StandardFull(entries) => {
            for e in entries {
                lines.push(columns(&e.headline1_left, &e.headline1_right));
                lines.push(columns(&e.headline2_left, &e.headline2_right));
                lines.extend(description(&e.description));
            }
        }
        SectionContent::StandardOneHeadline(entries) => {
            for e in entries {
                lines.push(columns(&e.headline_left, &e.headline_right));
                lines.extend(description(&e.description));
            }
        }
        SectionContent::StandardBulletsOnly(entries) => {
            for e in entries {
                lines.extend(description(&e.description));
            }
        }
        SectionContent::Text(block) => lines.extend(description(&block.text)),
    }
    join_lines(lines)
}

fn columns(left: &str, right: &str) -> String {
    let left = plain_text(left);
    let right = plain_text(right);
    match (left.trim().is_empty(), right.trim().is_empty()) {
        (_, true) => left,
        (true, false) => right,
        (false, false) => format!("{} | {}", left, right),
    }
}

fn description(text: &str) -> Vec<String> {
    description_lines(text)
        .into_iter()
        .map(|line| {
            if line.bullet {
                format!("- {}", plain_text(line.text))
            } else {
                plain_text(line.text)
            }
        })
        .collect()
}

fn join_lines(lines: Vec<String>) -> String {
    lines
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OneHeadlineEntry;

    #[test]
    fn test_to_text() {
        let mut doc = Document::new();
        doc.header.name = "Jane Doe".to_string();
        doc.header.links = "[github.com/jane](https://github.com/jane)".to_string();
        doc.add_section(Section::new(
            "Projects",
            SectionContent::StandardOneHeadline(vec![OneHeadlineEntry::new(
                "**Compiler**",
                "2019",
                "- Wrote *it*",
            )]),
        ));

        let text = to_text(&doc).unwrap();
        assert_eq!(
            text,
            "Jane Doe\ngithub.com/jane\n\nPROJECTS\nCompiler | 2019\n- Wrote it"
        );
    }

    #[test]
    fn test_template_has_no_markup() {
        let text = to_text(&Document::template()).unwrap();
        assert!(!text.contains("**"));
        assert!(!text.contains("]("));
    }
}
