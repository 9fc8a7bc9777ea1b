//! Sections, section shapes and entries.

use super::{
    BlockSpacing, DescriptionSpacing, HeadedSpacing, LineSpacing, OneHeadlineSpacing,
    TwoHeadlineSpacing,
};
use crate::error::EditError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identifier of an entry inside a document.
///
/// Ids exist for reordering and deletion only; no renderer emits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Allocate a fresh id, unique within this process.
    pub fn next() -> Self {
        Self(NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Record an id loaded from elsewhere so later allocations never collide with it.
    pub fn observe(id: EntryId) {
        NEXT_ENTRY_ID.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }

    /// Whether the allocator could have produced this id.
    pub fn in_range(self) -> bool {
        self.0 < u64::MAX
    }

    /// Raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The fixed field layout shared by every entry of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Jobs: title, company, location, dates
    Experience,
    /// Schooling: degree, university, location, dates
    Education,
    /// Two label/date headline rows
    StandardFull,
    /// One label/date headline row
    StandardOneHeadline,
    /// Description only
    StandardBulletsOnly,
    /// A single free-form markup block
    Text,
}

impl SectionKind {
    /// All shapes, in the order the editor offers them.
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::StandardFull,
        SectionKind::StandardOneHeadline,
        SectionKind::StandardBulletsOnly,
        SectionKind::Text,
    ];

    /// Wire name of the shape.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::StandardFull => "standard_full",
            SectionKind::StandardOneHeadline => "standard_one_headline",
            SectionKind::StandardBulletsOnly => "standard_bullets_only",
            SectionKind::Text => "text",
        }
    }

    /// Whether sections of this shape hold an entry list.
    pub fn has_entries(self) -> bool {
        !matches!(self, SectionKind::Text)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common behaviour of all entry types.
pub trait SectionEntry: Clone {
    /// The entry's id.
    fn id(&self) -> EntryId;

    /// A new empty entry with default spacing.
    fn blank() -> Self;

    /// The entry's description text.
    fn description(&self) -> &str;
}

/// A job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub title: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    pub description: String,
    #[serde(default)]
    pub spacing: HeadedSpacing,
}

/// A degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub id: EntryId,
    pub degree: String,
    pub university: String,
    pub location: String,
    pub dates: String,
    pub description: String,
    #[serde(default)]
    pub spacing: HeadedSpacing,
}

/// An entry with two label/date headline rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullEntry {
    pub id: EntryId,
    pub headline1_left: String,
    pub headline1_right: String,
    pub headline2_left: String,
    pub headline2_right: String,
    pub description: String,
    #[serde(default)]
    pub spacing: TwoHeadlineSpacing,
}

/// An entry with one label/date headline row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHeadlineEntry {
    pub id: EntryId,
    pub headline_left: String,
    pub headline_right: String,
    pub description: String,
    #[serde(default)]
    pub spacing: OneHeadlineSpacing,
}

/// A description-only entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletEntry {
    pub id: EntryId,
    pub description: String,
    #[serde(default)]
    pub spacing: DescriptionSpacing,
}

/// The content of a `text` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    #[serde(default = "BlockSpacing::loose_description")]
    pub spacing: BlockSpacing,
}

impl ExperienceEntry {
    /// Create an experience entry with default spacing.
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        dates: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::next(),
            title: title.into(),
            company: company.into(),
            location: location.into(),
            dates: dates.into(),
            description: description.into(),
            spacing: HeadedSpacing::default(),
        }
    }
}

impl EducationEntry {
    /// Create an education entry with default spacing.
    pub fn new(
        degree: impl Into<String>,
        university: impl Into<String>,
        location: impl Into<String>,
        dates: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::next(),
            degree: degree.into(),
            university: university.into(),
            location: location.into(),
            dates: dates.into(),
            description: description.into(),
            spacing: HeadedSpacing::default(),
        }
    }
}

impl FullEntry {
    /// Create a two-headline entry with default spacing.
    pub fn new(
        headline1: (impl Into<String>, impl Into<String>),
        headline2: (impl Into<String>, impl Into<String>),
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::next(),
            headline1_left: headline1.0.into(),
            headline1_right: headline1.1.into(),
            headline2_left: headline2.0.into(),
            headline2_right: headline2.1.into(),
            description: description.into(),
            spacing: TwoHeadlineSpacing::default(),
        }
    }
}

impl OneHeadlineEntry {
    /// Create a one-headline entry with default spacing.
    pub fn new(
        left: impl Into<String>,
        right: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: EntryId::next(),
            headline_left: left.into(),
            headline_right: right.into(),
            description: description.into(),
            spacing: OneHeadlineSpacing::default(),
        }
    }
}

impl BulletEntry {
    /// Create a description-only entry with default spacing.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            id: EntryId::next(),
            description: description.into(),
            spacing: DescriptionSpacing::default(),
        }
    }
}

impl TextBlock {
    /// Create a text block with default spacing.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spacing: BlockSpacing::loose_description(),
        }
    }
}

macro_rules! impl_section_entry {
    ($ty:ty, $blank:expr) => {
        impl SectionEntry for $ty {
            fn id(&self) -> EntryId {
                self.id
            }

            fn blank() -> Self {
                $blank
            }

            fn description(&self) -> &str {
                &self.description
            }
        }
    };
}

impl_section_entry!(ExperienceEntry, ExperienceEntry::new("", "", "", "", ""));
impl_section_entry!(EducationEntry, EducationEntry::new("", "", "", "", ""));
impl_section_entry!(FullEntry, FullEntry::new(("", ""), ("", ""), ""));
impl_section_entry!(OneHeadlineEntry, OneHeadlineEntry::new("", "", ""));
impl_section_entry!(BulletEntry, BulletEntry::new(""));

/// Shape-tagged section content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum SectionContent {
    Experience(Vec<ExperienceEntry>),
    Education(Vec<EducationEntry>),
    StandardFull(Vec<FullEntry>),
    StandardOneHeadline(Vec<OneHeadlineEntry>),
    StandardBulletsOnly(Vec<BulletEntry>),
    Text(TextBlock),
}

impl SectionContent {
    /// Content of the given shape holding one blank entry (or an empty text block).
    pub fn blank(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Experience => SectionContent::Experience(vec![ExperienceEntry::blank()]),
            SectionKind::Education => SectionContent::Education(vec![EducationEntry::blank()]),
            SectionKind::StandardFull => SectionContent::StandardFull(vec![FullEntry::blank()]),
            SectionKind::StandardOneHeadline => {
                SectionContent::StandardOneHeadline(vec![OneHeadlineEntry::blank()])
            }
            SectionKind::StandardBulletsOnly => {
                SectionContent::StandardBulletsOnly(vec![BulletEntry::blank()])
            }
            SectionKind::Text => SectionContent::Text(TextBlock::new("")),
        }
    }

    /// The section's shape.
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionContent::Experience(_) => SectionKind::Experience,
            SectionContent::Education(_) => SectionKind::Education,
            SectionContent::StandardFull(_) => SectionKind::StandardFull,
            SectionContent::StandardOneHeadline(_) => SectionKind::StandardOneHeadline,
            SectionContent::StandardBulletsOnly(_) => SectionKind::StandardBulletsOnly,
            SectionContent::Text(_) => SectionKind::Text,
        }
    }

    /// Number of entries (0 for text sections).
    pub fn entry_count(&self) -> usize {
        match self {
            SectionContent::Experience(e) => e.len(),
            SectionContent::Education(e) => e.len(),
            SectionContent::StandardFull(e) => e.len(),
            SectionContent::StandardOneHeadline(e) => e.len(),
            SectionContent::StandardBulletsOnly(e) => e.len(),
            SectionContent::Text(_) => 0,
        }
    }

    /// Ids of all entries in order.
    pub fn entry_ids(&self) -> Vec<EntryId> {
        fn ids<E: SectionEntry>(entries: &[E]) -> Vec<EntryId> {
            entries.iter().map(SectionEntry::id).collect()
        }
        match self {
            SectionContent::Experience(e) => ids(e),
            SectionContent::Education(e) => ids(e),
            SectionContent::StandardFull(e) => ids(e),
            SectionContent::StandardOneHeadline(e) => ids(e),
            SectionContent::StandardBulletsOnly(e) => ids(e),
            SectionContent::Text(_) => Vec::new(),
        }
    }

    /// Descriptions of all entries in order, or the text block for text sections.
    pub fn descriptions(&self) -> Vec<&str> {
        fn descs<E: SectionEntry>(entries: &[E]) -> Vec<&str> {
            entries.iter().map(SectionEntry::description).collect()
        }
        match self {
            SectionContent::Experience(e) => descs(e),
            SectionContent::Education(e) => descs(e),
            SectionContent::StandardFull(e) => descs(e),
            SectionContent::StandardOneHeadline(e) => descs(e),
            SectionContent::StandardBulletsOnly(e) => descs(e),
            SectionContent::Text(t) => vec![t.text.as_str()],
        }
    }

    /// Append a blank entry and return its id.
    pub fn add_entry(&mut self) -> Result<EntryId, EditError> {
        fn push<E: SectionEntry>(entries: &mut Vec<E>) -> EntryId {
            let entry = E::blank();
            let id = entry.id();
            entries.push(entry);
            id
        }
        match self {
            SectionContent::Experience(e) => Ok(push(e)),
            SectionContent::Education(e) => Ok(push(e)),
            SectionContent::StandardFull(e) => Ok(push(e)),
            SectionContent::StandardOneHeadline(e) => Ok(push(e)),
            SectionContent::StandardBulletsOnly(e) => Ok(push(e)),
            SectionContent::Text(_) => Err(EditError::NotAnEntrySection),
        }
    }

    /// Remove an entry. The last remaining entry can never be removed.
    pub fn remove_entry(&mut self, id: EntryId) -> Result<(), EditError> {
        fn remove<E: SectionEntry>(entries: &mut Vec<E>, id: EntryId) -> Result<(), EditError> {
            let index = position(entries, id)?;
            if entries.len() <= 1 {
                return Err(EditError::LastEntry);
            }
            entries.remove(index);
            Ok(())
        }
        match self {
            SectionContent::Experience(e) => remove(e, id),
            SectionContent::Education(e) => remove(e, id),
            SectionContent::StandardFull(e) => remove(e, id),
            SectionContent::StandardOneHeadline(e) => remove(e, id),
            SectionContent::StandardBulletsOnly(e) => remove(e, id),
            SectionContent::Text(_) => Err(EditError::NotAnEntrySection),
        }
    }

    /// Move an entry to a new index (clamped to the list end).
    pub fn move_entry(&mut self, id: EntryId, to: usize) -> Result<(), EditError> {
        fn reorder<E: SectionEntry>(
            entries: &mut Vec<E>,
            id: EntryId,
            to: usize,
        ) -> Result<(), EditError> {
            let from = position(entries, id)?;
            let entry = entries.remove(from);
            let to = to.min(entries.len());
            entries.insert(to, entry);
            Ok(())
        }
        match self {
            SectionContent::Experience(e) => reorder(e, id, to),
            SectionContent::Education(e) => reorder(e, id, to),
            SectionContent::StandardFull(e) => reorder(e, id, to),
            SectionContent::StandardOneHeadline(e) => reorder(e, id, to),
            SectionContent::StandardBulletsOnly(e) => reorder(e, id, to),
            SectionContent::Text(_) => Err(EditError::NotAnEntrySection),
        }
    }
}

fn position<E: SectionEntry>(entries: &[E], id: EntryId) -> Result<usize, EditError> {
    entries
        .iter()
        .position(|e| e.id() == id)
        .ok_or(EditError::EntryNotFound(id))
}

/// One titled section of the résumé.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section title (rendered upper-cased)
    pub title: String,

    /// Spacing around the title rule
    #[serde(default)]
    pub title_spacing: LineSpacing,

    /// Shape-tagged content
    pub content: SectionContent,
}

impl Section {
    /// Create a section with the given content.
    pub fn new(title: impl Into<String>, content: SectionContent) -> Self {
        Self {
            title: title.into(),
            title_spacing: LineSpacing::new(true, false),
            content,
        }
    }

    /// Create a section of the given shape holding one blank entry.
    pub fn blank(title: impl Into<String>, kind: SectionKind) -> Self {
        Self::new(title, SectionContent::blank(kind))
    }

    /// The section's shape.
    pub fn kind(&self) -> SectionKind {
        self.content.kind()
    }

    /// Title as rendered.
    pub fn display_title(&self) -> String {
        self.title.to_uppercase()
    }

    /// Check the structural invariants: entry sections never go empty.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.kind().has_entries() && self.content.entry_count() == 0 {
            return Err(EditError::LastEntry);
        }
        Ok(())
    }
}
