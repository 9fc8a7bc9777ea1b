//! Document-level types.

use super::{
    BulletEntry, EducationEntry, EntryId, ExperienceEntry, FullEntry, HeaderSpacing,
    OneHeadlineEntry, Section, SectionContent, TextBlock,
};
use crate::error::EditError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Default page margin in inches.
pub const DEFAULT_MARGIN_INCHES: f32 = 0.5;

/// Default export filename (without extension).
pub const DEFAULT_FILENAME: &str = "resume";

/// A résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Name, title and contact fields
    pub header: Header,

    /// Uniform page margin in inches
    pub margin_inches: f32,

    /// Export filename without extension
    pub filename: String,

    /// Sections in display order. Shared between document copies until
    /// one of them edits the section.
    pub sections: Vec<Arc<Section>>,
}

impl Document {
    /// Create a new document with an empty header and no sections.
    pub fn new() -> Self {
        Self {
            header: Header::default(),
            margin_inches: DEFAULT_MARGIN_INCHES,
            filename: DEFAULT_FILENAME.to_string(),
            sections: Vec::new(),
        }
    }

    /// The starting document offered by the editor.
    pub fn template() -> Self {
        let mut doc = Self::new();
        doc.header = Header {
            name: "Jordan Avery".to_string(),
            title: "Senior Software Engineer".to_string(),
            email: "jordan.avery@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            links: "[github.com/javery](https://github.com/javery)".to_string(),
            location: "Seattle, WA (open to relocate)".to_string(),
            spacing: HeaderSpacing::default(),
        };

        doc.add_section(Section::new(
            "Summary",
            SectionContent::Text(TextBlock::new(
                "Backend engineer with eight years of experience building *reliable* \
                 distributed systems.",
            )),
        ));
        doc.add_section(Section::new(
            "Experience",
            SectionContent::Experience(vec![
                ExperienceEntry::new(
                    "Senior Software Engineer",
                    "Northwind Systems",
                    "Seattle, WA",
                    "2021 - Present",
                    "- Led the migration of the billing pipeline to an event-driven design\n\
                     - Cut p99 latency by **40%** across the order service",
                ),
                ExperienceEntry::new(
                    "Software Engineer",
                    "Contoso Labs",
                    "Portland, OR",
                    "2017 - 2021",
                    "- Built the internal metrics platform used by 30 teams",
                ),
            ]),
        ));
        doc.add_section(Section::new(
            "Education",
            SectionContent::Education(vec![EducationEntry::new(
                "B.S. Computer Science",
                "University of Washington",
                "Seattle, WA",
                "2013 - 2017",
                "",
            )]),
        ));
        doc.add_section(Section::new(
            "Leadership",
            SectionContent::StandardFull(vec![FullEntry::new(
                ("Open Source Maintainer", "2019 - Present"),
                ("[tokio-tracing-extras](https://github.com/javery/tte)", "Remote"),
                "- Reviewed and merged contributions from 50+ developers",
            )]),
        ));
        doc.add_section(Section::new(
            "Projects",
            SectionContent::StandardOneHeadline(vec![OneHeadlineEntry::new(
                "Rate limiter service",
                "2022",
                "- Token-bucket limiter serving 2M requests per minute",
            )]),
        ));
        doc.add_section(Section::new(
            "Skills",
            SectionContent::StandardBulletsOnly(vec![BulletEntry::new(
                "Rust, Go, Python, PostgreSQL, Kafka, Kubernetes",
            )]),
        ));
        doc
    }

    /// Append a section.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(Arc::new(section));
    }

    /// Get a section by index.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index).map(|s| s.as_ref())
    }

    /// Get a section for editing, unsharing it from other document copies first.
    pub fn section_mut(&mut self, index: usize) -> Option<&mut Section> {
        self.sections.get_mut(index).map(Arc::make_mut)
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total number of entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.content.entry_count()).sum()
    }

    /// Find the section holding the given entry.
    pub fn section_of(&self, id: EntryId) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.content.entry_ids().contains(&id))
    }

    /// Check the structural invariants of every section and that entry
    /// ids are unique across the document.
    pub fn validate(&self) -> Result<(), EditError> {
        self.sections.iter().try_for_each(|s| s.validate())?;

        let mut seen = HashSet::new();
        for id in self.sections.iter().flat_map(|s| s.content.entry_ids()) {
            if !id.in_range() {
                return Err(EditError::EntryIdOutOfRange(id));
            }
            if !seen.insert(id) {
                return Err(EditError::DuplicateEntryId(id));
            }
        }
        Ok(())
    }

    /// Register every entry id with the id allocator.
    pub fn observe_ids(&self) {
        for section in &self.sections {
            for id in section.content.entry_ids() {
                EntryId::observe(id);
            }
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Header fields. All are opaque markup-capable strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub links: String,
    pub location: String,

    /// Spacing of the header lines
    #[serde(default)]
    pub spacing: HeaderSpacing,
}

impl Header {
    /// Non-empty contact fields in display order (email, phone, links, location).
    pub fn contact_items(&self) -> Vec<&str> {
        [&self.email, &self.phone, &self.links, &self.location]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Header fields without spacing, for content comparisons.
    pub fn fields(&self) -> [&str; 6] {
        [
            self.name.as_str(),
            self.title.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            self.links.as_str(),
            self.location.as_str(),
        ]
    }
}
