//! Document model for résumé content.
//!
//! This module defines the canonical, serialization-agnostic representation
//! that the Markdown importer produces and every renderer consumes. A
//! document holds header fields and an ordered list of sections; each
//! section has a fixed shape that all of its entries share.

mod description;
mod document;
mod section;
mod spacing;

pub use description::{description_lines, has_bullets, DescriptionLine, BULLET_MARKER};
pub use document::{Document, Header, DEFAULT_FILENAME, DEFAULT_MARGIN_INCHES};
pub use section::{
    BulletEntry, EducationEntry, EntryId, ExperienceEntry, FullEntry, OneHeadlineEntry, Section,
    SectionContent, SectionEntry, SectionKind, TextBlock,
};
pub use spacing::{
    BlockSpacing, DescriptionSpacing, HeadedSpacing, HeaderSpacing, LineSpacing,
    OneHeadlineSpacing, TwoHeadlineSpacing,
};
