//! Invariant-preserving edits.
//!
//! [`Editor`] owns the current document behind an [`Arc`]. Readers take a
//! [`snapshot`](Editor::snapshot) and keep it as long as they like; every
//! edit works on a private copy that is validated and then swapped in, so a
//! snapshot never shows a half-applied change and a rejected edit changes
//! nothing. The copy shares its sections with the snapshot; only the
//! section an edit touches is duplicated.

use std::sync::Arc;

use crate::error::{EditError, Result};
use crate::model::{
    BulletEntry, Document, EducationEntry, EntryId, ExperienceEntry, FullEntry, Header,
    LineSpacing, OneHeadlineEntry, Section, SectionContent, SectionEntry, SectionKind,
};
use crate::parser::{ImportOptions, MarkdownImporter};
use crate::render::from_json;

/// Mutable access to one entry, tagged by shape.
pub enum EntryMut<'a> {
    Experience(&'a mut ExperienceEntry),
    Education(&'a mut EducationEntry),
    Full(&'a mut FullEntry),
    OneHeadline(&'a mut OneHeadlineEntry),
    Bullets(&'a mut BulletEntry),
}

impl EntryMut<'_> {
    /// The entry's description, whatever its shape.
    pub fn description_mut(&mut self) -> &mut String {
        match self {
            EntryMut::Experience(e) => &mut e.description,
            EntryMut::Education(e) => &mut e.description,
            EntryMut::Full(e) => &mut e.description,
            EntryMut::OneHeadline(e) => &mut e.description,
            EntryMut::Bullets(e) => &mut e.description,
        }
    }
}

/// Owner of the document being edited.
#[derive(Debug, Clone)]
pub struct Editor {
    doc: Arc<Document>,
    revision: u64,
}

impl Editor {
    /// Start editing a document.
    pub fn new(doc: Document) -> Self {
        Self {
            doc: Arc::new(doc),
            revision: 0,
        }
    }

    /// Start from the default template.
    pub fn with_template() -> Self {
        Self::new(Document::template())
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// A shared, immutable view of the current document.
    pub fn snapshot(&self) -> Arc<Document> {
        Arc::clone(&self.doc)
    }

    /// Number of committed edits.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Apply `edit` to a copy of the document and commit it if the edit and
    /// the resulting document are both valid.
    fn apply<T>(&mut self, edit: impl FnOnce(&mut Document) -> Result<T>) -> Result<T> {
        let mut next = (*self.doc).clone();
        let out = edit(&mut next)?;
        next.validate()?;
        self.doc = Arc::new(next);
        self.revision += 1;
        Ok(out)
    }

    fn replace(&mut self, doc: Document) {
        self.doc = Arc::new(doc);
        self.revision += 1;
    }

    /// Edit header fields and header spacing.
    pub fn update_header(&mut self, f: impl FnOnce(&mut Header)) -> Result<()> {
        self.apply(|doc| {
            f(&mut doc.header);
            Ok(())
        })
    }

    /// Set the page margin in inches. Negative values become zero.
    pub fn set_margin(&mut self, inches: f32) -> Result<()> {
        self.apply(|doc| {
            doc.margin_inches = if inches.is_finite() { inches.max(0.0) } else { 0.0 };
            Ok(())
        })
    }

    /// Set the export filename (without extension).
    pub fn set_filename(&mut self, filename: impl Into<String>) -> Result<()> {
        let filename = filename.into();
        self.apply(|doc| {
            doc.filename = filename;
            Ok(())
        })
    }

    /// Append a section of the given shape with one blank entry. Returns its index.
    pub fn add_section(&mut self, title: impl Into<String>, kind: SectionKind) -> Result<usize> {
        let section = Section::blank(title, kind);
        self.apply(|doc| {
            doc.add_section(section);
            Ok(doc.sections.len() - 1)
        })
    }

    /// Remove a section.
    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        self.apply(|doc| {
            check_index(doc, index)?;
            let section = doc.sections.remove(index);
            Ok(Arc::try_unwrap(section).unwrap_or_else(|shared| (*shared).clone()))
        })
    }

    /// Move a section to a new index (clamped to the end).
    pub fn move_section(&mut self, from: usize, to: usize) -> Result<()> {
        self.apply(|doc| {
            check_index(doc, from)?;
            let section = doc.sections.remove(from);
            let to = to.min(doc.sections.len());
            doc.sections.insert(to, section);
            Ok(())
        })
    }

    /// Change a section's title.
    pub fn rename_section(&mut self, index: usize, title: impl Into<String>) -> Result<()> {
        let title = title.into();
        self.apply(|doc| {
            section_mut(doc, index)?.title = title;
            Ok(())
        })
    }

    /// Change the spacing around a section title.
    pub fn set_title_spacing(&mut self, index: usize, spacing: LineSpacing) -> Result<()> {
        self.apply(|doc| {
            section_mut(doc, index)?.title_spacing = spacing;
            Ok(())
        })
    }

    /// Replace the text of a `text` section.
    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.apply(|doc| match &mut section_mut(doc, index)?.content {
            SectionContent::Text(block) => {
                block.text = text;
                Ok(())
            }
            _ => Err(EditError::ShapeMismatch.into()),
        })
    }

    /// Append a blank entry to a section. Returns the new entry's id.
    pub fn add_entry(&mut self, section: usize) -> Result<EntryId> {
        self.apply(|doc| Ok(section_mut(doc, section)?.content.add_entry()?))
    }

    /// Remove an entry. A section's last entry cannot be removed.
    pub fn remove_entry(&mut self, section: usize, id: EntryId) -> Result<()> {
        self.apply(|doc| Ok(section_mut(doc, section)?.content.remove_entry(id)?))
    }

    /// Move an entry within its section.
    pub fn move_entry(&mut self, section: usize, id: EntryId, to: usize) -> Result<()> {
        self.apply(|doc| Ok(section_mut(doc, section)?.content.move_entry(id, to)?))
    }

    /// Edit one entry's fields and spacing.
    ///
    /// ```
    /// use resumark::edit::{Editor, EntryMut};
    ///
    /// let mut editor = Editor::with_template();
    /// let id = editor.document().sections[1].content.entry_ids()[0];
    /// editor
    ///     .update_entry(1, id, |entry| {
    ///         if let EntryMut::Experience(e) = entry {
    ///             e.dates = "2024 - Present".to_string();
    ///             e.spacing.desc.set_ultra_tight(false);
    ///         }
    ///     })
    ///     .unwrap();
    /// ```
    pub fn update_entry<T>(
        &mut self,
        section: usize,
        id: EntryId,
        f: impl FnOnce(EntryMut<'_>) -> T,
    ) -> Result<T> {
        self.apply(|doc| {
            let content = &mut section_mut(doc, section)?.content;
            let entry = match content {
                SectionContent::Experience(e) => EntryMut::Experience(find(e, id)?),
                SectionContent::Education(e) => EntryMut::Education(find(e, id)?),
                SectionContent::StandardFull(e) => EntryMut::Full(find(e, id)?),
                SectionContent::StandardOneHeadline(e) => EntryMut::OneHeadline(find(e, id)?),
                SectionContent::StandardBulletsOnly(e) => EntryMut::Bullets(find(e, id)?),
                SectionContent::Text(_) => return Err(EditError::NotAnEntrySection.into()),
            };
            Ok(f(entry))
        })
    }

    /// Replace the document with an imported Markdown résumé.
    ///
    /// On failure the current document is left as it was.
    pub fn import_markdown(&mut self, text: &str) -> Result<()> {
        self.import_markdown_with_options(text, ImportOptions::default())
    }

    /// Replace the document with an imported Markdown résumé, with options.
    pub fn import_markdown_with_options(&mut self, text: &str, options: ImportOptions) -> Result<()> {
        let doc = MarkdownImporter::new(options).import(text)?;
        self.replace(doc);
        Ok(())
    }

    /// Replace the document with a JSON project.
    pub fn load_json(&mut self, text: &str) -> Result<()> {
        let doc = from_json(text)?;
        self.replace(doc);
        Ok(())
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::with_template()
    }
}

fn check_index(doc: &Document, index: usize) -> std::result::Result<(), EditError> {
    doc.section(index)
        .map(|_| ())
        .ok_or(EditError::SectionOutOfRange(index))
}

fn section_mut(doc: &mut Document, index: usize) -> std::result::Result<&mut Section, EditError> {
    doc.section_mut(index)
        .ok_or(EditError::SectionOutOfRange(index))
}

fn find<E: SectionEntry>(entries: &mut [E], id: EntryId) -> std::result::Result<&mut E, EditError> {
    entries
        .iter_mut()
        .find(|e| e.id() == id)
        .ok_or(EditError::EntryNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn skills_index(editor: &Editor) -> usize {
        editor
            .document()
            .sections
            .iter()
            .position(|s| s.kind() == SectionKind::StandardBulletsOnly)
            .unwrap()
    }

    #[test]
    fn test_snapshot_is_stable_across_edits() {
        let mut editor = Editor::with_template();
        let before = editor.snapshot();
        editor
            .update_header(|h| h.name = "Someone Else".to_string())
            .unwrap();
        assert_eq!(before.header.name, "Jordan Avery");
        assert_eq!(editor.document().header.name, "Someone Else");
        assert_eq!(editor.revision(), 1);
    }

    #[test]
    fn test_edit_copies_only_touched_section() {
        let mut editor = Editor::with_template();
        let before = editor.snapshot();
        let index = skills_index(&editor);
        editor.rename_section(index, "Tooling").unwrap();

        let after = editor.snapshot();
        for (i, (old, new)) in before.sections.iter().zip(&after.sections).enumerate() {
            assert_eq!(Arc::ptr_eq(old, new), i != index, "section {}", i);
        }
        assert_eq!(before.sections[index].title, "Skills");
        assert_eq!(after.section(index).unwrap().title, "Tooling");
    }

    #[test]
    fn test_cannot_remove_last_entry() {
        let mut editor = Editor::with_template();
        let index = skills_index(&editor);
        let ids = editor.document().sections[index].content.entry_ids();
        assert_eq!(ids.len(), 1);

        let result = editor.remove_entry(index, ids[0]);
        assert!(matches!(
            result,
            Err(Error::InvalidEdit(EditError::LastEntry))
        ));
        assert_eq!(editor.revision(), 0);
    }

    #[test]
    fn test_add_move_remove_entry() {
        let mut editor = Editor::with_template();
        let index = skills_index(&editor);
        let first = editor.document().sections[index].content.entry_ids()[0];
        let added = editor.add_entry(index).unwrap();

        editor.move_entry(index, added, 0).unwrap();
        assert_eq!(
            editor.document().sections[index].content.entry_ids(),
            vec![added, first]
        );

        editor.remove_entry(index, first).unwrap();
        assert_eq!(
            editor.document().sections[index].content.entry_ids(),
            vec![added]
        );
    }

    #[test]
    fn test_text_section_has_no_entries() {
        let mut editor = Editor::new(Document::new());
        let index = editor.add_section("Summary", SectionKind::Text).unwrap();
        assert!(matches!(
            editor.add_entry(index),
            Err(Error::InvalidEdit(EditError::NotAnEntrySection))
        ));
        editor.set_text(index, "Hello").unwrap();
        assert_eq!(editor.document().sections[index].content.descriptions(), vec!["Hello"]);
    }

    #[test]
    fn test_update_entry_spacing() {
        let mut editor = Editor::with_template();
        let index = skills_index(&editor);
        let id = editor.document().sections[index].content.entry_ids()[0];
        editor
            .update_entry(index, id, |mut entry| {
                *entry.description_mut() = "Rust".to_string();
                if let EntryMut::Bullets(e) = entry {
                    e.spacing.desc.set_ultra_tight(true);
                }
            })
            .unwrap();

        match &editor.document().sections[index].content {
            SectionContent::StandardBulletsOnly(entries) => {
                assert_eq!(entries[0].description, "Rust");
                assert!(entries[0].spacing.desc.ultra_tight);
            }
            _ => panic!("expected bullets-only"),
        }
    }

    #[test]
    fn test_unknown_entry_and_section() {
        let mut editor = Editor::with_template();
        assert!(matches!(
            editor.rename_section(99, "X"),
            Err(Error::InvalidEdit(EditError::SectionOutOfRange(99)))
        ));
        let missing = EntryId::next();
        assert!(matches!(
            editor.update_entry(1, missing, |_| ()),
            Err(Error::InvalidEdit(EditError::EntryNotFound(_)))
        ));
    }

    #[test]
    fn test_move_and_remove_section() {
        let mut editor = Editor::with_template();
        let count = editor.document().section_count();
        let first_title = editor.document().sections[0].title.clone();
        editor.move_section(0, 100).unwrap();
        assert_eq!(editor.document().sections[count - 1].title, first_title);

        let removed = editor.remove_section(count - 1).unwrap();
        assert_eq!(removed.title, first_title);
        assert_eq!(editor.document().section_count(), count - 1);
    }

    #[test]
    fn test_failed_import_leaves_document() {
        let mut editor = Editor::with_template();
        let before = editor.snapshot();
        assert!(matches!(
            editor.import_markdown("# Only a header"),
            Err(Error::NoSections)
        ));
        assert_eq!(*editor.document(), *before);

        editor.import_markdown("# A\n## Skills\nRust").unwrap();
        assert_eq!(editor.document().header.name, "A");
        assert_eq!(editor.document().section_count(), 1);
    }

    #[test]
    fn test_margin_is_never_negative() {
        let mut editor = Editor::with_template();
        editor.set_margin(-1.0).unwrap();
        assert_eq!(editor.document().margin_inches, 0.0);
        editor.set_margin(0.75).unwrap();
        assert_eq!(editor.document().margin_inches, 0.75);
    }
}
