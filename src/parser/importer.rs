//! Markdown importer.
//!
//! Turns a Markdown résumé back into a [`Document`]. Markdown carries far
//! less structure than the model, so the importer is heuristic:
//!
//! - `## ` lines delimit sections; the text before the first one is the
//!   header (`# name`, `### title`, contact line).
//! - Email and phone are pattern-matched out of the contact line. The other
//!   `|`-separated tokens are kept only when they look like a GitHub link
//!   or a relocation note.
//! - Inside a section, a line starting with `**` opens a new entry. The
//!   first entry's `|`-separated headline decides the shape of the whole
//!   section.
//!
//! Imported entries always get default spacing.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ImportOptions;
use crate::error::{Error, Result};
use crate::model::{
    BulletEntry, Document, EducationEntry, ExperienceEntry, Header, OneHeadlineEntry, Section,
    SectionContent, SectionKind, DEFAULT_FILENAME,
};

static SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## ").expect("section pattern is valid"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?\(?\d{3}\)?[\s.-]?\d{3}[\s.-]?\d{4}")
        .expect("phone pattern is valid")
});

/// Prefix that opens a new entry inside a section.
const ENTRY_MARKER: &str = "**";

/// Import a Markdown résumé with default options.
pub fn import_markdown(text: &str) -> Result<Document> {
    MarkdownImporter::new(ImportOptions::default()).import(text)
}

/// Import a Markdown résumé with custom options.
pub fn import_markdown_with_options(text: &str, options: ImportOptions) -> Result<Document> {
    MarkdownImporter::new(options).import(text)
}

/// Heuristic Markdown to [`Document`] importer.
pub struct MarkdownImporter {
    options: ImportOptions,
}

impl MarkdownImporter {
    /// Create a new importer.
    pub fn new(options: ImportOptions) -> Self {
        Self { options }
    }

    /// Import a full Markdown document.
    ///
    /// Fails with [`Error::NoSections`] when the text has no `## ` heading.
    pub fn import(&self, text: &str) -> Result<Document> {
        let blocks: Vec<&str> = SECTION_RE.split(text).collect();
        if blocks.len() < 2 {
            return Err(Error::NoSections);
        }

        let mut doc = Document::new();
        doc.filename = self
            .options
            .filename
            .clone()
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());
        doc.header = parse_header(blocks[0]);

        for block in &blocks[1..] {
            doc.add_section(self.parse_section(block));
        }

        log::debug!(
            "Imported {} sections with {} entries",
            doc.section_count(),
            doc.entry_count()
        );
        Ok(doc)
    }

    fn parse_section(&self, block: &str) -> Section {
        let mut lines = block.lines();
        let raw_title = lines.next().unwrap_or_default().trim();
        let title = if self.options.uppercase_titles {
            raw_title.to_uppercase()
        } else {
            raw_title.to_string()
        };
        let rest: Vec<&str> = lines.map(str::trim).filter(|l| !l.is_empty()).collect();

        if rest.is_empty() {
            return Section::new(
                title,
                SectionContent::StandardBulletsOnly(vec![BulletEntry::new("")]),
            );
        }

        let upper_title = title.to_uppercase();
        if upper_title == self.options.skills_title.to_uppercase() && rest.len() == 1 {
            return Section::new(
                title,
                SectionContent::StandardBulletsOnly(vec![BulletEntry::new(rest[0])]),
            );
        }

        let groups = group_entries(&rest);
        let kind = classify(&upper_title, &headline_parts(groups[0][0]));
        log::debug!("Section '{}' classified as {}", title, kind);

        let content = match kind {
            SectionKind::Experience => SectionContent::Experience(
                groups
                    .iter()
                    .map(|group| {
                        let parts = checked_parts(&title, kind, group[0], 4);
                        ExperienceEntry::new(
                            part(&parts, 0),
                            part(&parts, 1),
                            part(&parts, 2),
                            part(&parts, 3),
                            group[1..].join("\n"),
                        )
                    })
                    .collect(),
            ),
            SectionKind::Education => SectionContent::Education(
                groups
                    .iter()
                    .map(|group| {
                        let parts = checked_parts(&title, kind, group[0], 4);
                        EducationEntry::new(
                            part(&parts, 0),
                            part(&parts, 1),
                            part(&parts, 2),
                            part(&parts, 3),
                            group[1..].join("\n"),
                        )
                    })
                    .collect(),
            ),
            SectionKind::StandardOneHeadline => SectionContent::StandardOneHeadline(
                groups
                    .iter()
                    .map(|group| {
                        let parts = checked_parts(&title, kind, group[0], 2);
                        OneHeadlineEntry::new(
                            part(&parts, 0),
                            part(&parts, 1),
                            group[1..].join("\n"),
                        )
                    })
                    .collect(),
            ),
            _ => SectionContent::StandardBulletsOnly(
                groups
                    .iter()
                    .map(|group| {
                        let mut lines = vec![headline_parts(group[0]).join(", ")];
                        lines.extend(group[1..].iter().map(|l| l.to_string()));
                        BulletEntry::new(lines.join("\n"))
                    })
                    .collect(),
            ),
        };

        Section::new(title, content)
    }
}

/// Parse the header block: name, title and contact line, in that order.
fn parse_header(block: &str) -> Header {
    let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());
    let mut header = Header {
        name: strip_heading(lines.next().unwrap_or_default()),
        title: strip_heading(lines.next().unwrap_or_default()),
        ..Default::default()
    };

    let contact = lines.next().unwrap_or_default();
    let email = EMAIL_RE.find(contact).map(|m| m.as_str());
    let phone = PHONE_RE.find(contact).map(|m| m.as_str());
    header.email = email.unwrap_or_default().to_string();
    header.phone = phone.unwrap_or_default().to_string();

    let mut links = Vec::new();
    let mut location = Vec::new();
    for token in contact.split('|').map(str::trim).filter(|t| !t.is_empty()) {
        if email.is_some_and(|e| token.contains(e)) || phone.is_some_and(|p| token.contains(p)) {
            continue;
        }
        let lower = token.to_lowercase();
        if lower.contains("github.com") {
            links.push(token);
        } else if lower.contains("relocate") {
            location.push(token);
        } else {
            log::warn!("Dropping unrecognized contact token: {}", token);
        }
    }
    header.links = links.join(" | ");
    header.location = location.join(" | ");
    header
}

fn strip_heading(line: &str) -> String {
    line.trim_start_matches('#').trim().to_string()
}

/// Group section lines into entries. A `**` line opens a new group; any
/// lines before the first one form a group of their own.
fn group_entries<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut groups: Vec<Vec<&'a str>> = Vec::new();
    for &line in lines {
        match groups.last_mut() {
            Some(group) if !line.starts_with(ENTRY_MARKER) => group.push(line),
            _ => groups.push(vec![line]),
        }
    }
    groups
}

/// Split a headline on `|` and strip bold markers and whitespace.
fn headline_parts(line: &str) -> Vec<String> {
    line.split('|')
        .map(|p| p.replace(ENTRY_MARKER, "").trim().to_string())
        .collect()
}

/// Decide the shape of a section from its title and first headline.
fn classify(upper_title: &str, parts: &[String]) -> SectionKind {
    if parts.len() >= 3 && upper_title.contains("EXPERIENCE") {
        SectionKind::Experience
    } else if parts.len() >= 3 && upper_title.contains("EDUCATION") {
        SectionKind::Education
    } else if parts.len() == 2 {
        SectionKind::StandardOneHeadline
    } else {
        SectionKind::StandardBulletsOnly
    }
}

fn checked_parts(title: &str, kind: SectionKind, headline: &str, expected: usize) -> Vec<String> {
    let parts = headline_parts(headline);
    if parts.len() != expected {
        log::warn!(
            "Section '{}': headline '{}' has {} parts, stored as {} anyway",
            title,
            headline,
            parts.len(),
            kind
        );
    }
    parts
}

fn part(parts: &[String], index: usize) -> String {
    parts.get(index).cloned().unwrap_or_default()
}
