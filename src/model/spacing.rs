//! Vertical spacing directives.
//!
//! Every structural zone of a rendered résumé (a header line, a subheader
//! line, a description block) carries its own directives. They are the
//! only presentational state outside the text itself.

use serde::{Deserialize, Serialize};

/// Spacing for a single-line zone (a name line, a headline, a section title).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpacing {
    /// Extra whitespace above the line
    pub before: bool,

    /// Extra whitespace below the line
    pub after: bool,
}

impl LineSpacing {
    /// Create a line spacing record.
    pub const fn new(before: bool, after: bool) -> Self {
        Self { before, after }
    }

    /// Compact on both sides.
    pub const fn compact() -> Self {
        Self::new(false, false)
    }

    /// Set the `before` directive.
    pub fn set_before(&mut self, value: bool) {
        self.before = value;
    }

    /// Set the `after` directive.
    pub fn set_after(&mut self, value: bool) {
        self.after = value;
    }
}

/// Spacing for a description block.
///
/// `ultra_tight` overrides both `before` and `after` in every renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpacing {
    /// Extra whitespace above the block
    pub before: bool,

    /// Extra whitespace below the block
    pub after: bool,

    /// Collapse the block against the preceding header line
    pub ultra_tight: bool,
}

impl BlockSpacing {
    /// Create a block spacing record.
    pub const fn new(before: bool, after: bool, ultra_tight: bool) -> Self {
        Self {
            before,
            after,
            ultra_tight,
        }
    }

    /// Default for descriptions that follow a headline: spaced after,
    /// collapsed against the headline.
    pub const fn tight_description() -> Self {
        Self::new(false, true, true)
    }

    /// Default for free-standing description blocks (bullets-only entries).
    pub const fn loose_description() -> Self {
        Self::new(true, true, false)
    }

    /// Set the `before` directive.
    pub fn set_before(&mut self, value: bool) {
        self.before = value;
    }

    /// Set the `after` directive.
    pub fn set_after(&mut self, value: bool) {
        self.after = value;
    }

    /// Set the `ultra_tight` override.
    pub fn set_ultra_tight(&mut self, value: bool) {
        self.ultra_tight = value;
    }
}

/// Spacing directives for the document header, one per rendered header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderSpacing {
    /// Name line
    pub name: LineSpacing,

    /// Title line
    pub title: LineSpacing,

    /// Contact line (email, phone, links, location)
    pub contact: LineSpacing,
}

impl Default for HeaderSpacing {
    fn default() -> Self {
        Self {
            name: LineSpacing::compact(),
            title: LineSpacing::compact(),
            contact: LineSpacing::new(false, true),
        }
    }
}

/// Spacing for entries with a header line and a subheader line
/// (experience and education).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadedSpacing {
    /// First line (title / university)
    pub header: LineSpacing,

    /// Second line (company / degree)
    pub subheader: LineSpacing,

    /// Description block
    pub desc: BlockSpacing,
}

impl Default for HeadedSpacing {
    fn default() -> Self {
        Self {
            header: LineSpacing::compact(),
            subheader: LineSpacing::compact(),
            desc: BlockSpacing::tight_description(),
        }
    }
}

/// Spacing for entries with two headline rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoHeadlineSpacing {
    /// First headline row
    pub headline1: LineSpacing,

    /// Second headline row
    pub headline2: LineSpacing,

    /// Description block
    pub desc: BlockSpacing,
}

impl Default for TwoHeadlineSpacing {
    fn default() -> Self {
        Self {
            headline1: LineSpacing::compact(),
            headline2: LineSpacing::compact(),
            desc: BlockSpacing::tight_description(),
        }
    }
}

/// Spacing for entries with a single headline row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHeadlineSpacing {
    /// Headline row
    pub headline1: LineSpacing,

    /// Description block
    pub desc: BlockSpacing,
}

impl Default for OneHeadlineSpacing {
    fn default() -> Self {
        Self {
            headline1: LineSpacing::compact(),
            desc: BlockSpacing::tight_description(),
        }
    }
}

/// Spacing for description-only entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionSpacing {
    /// Description block
    pub desc: BlockSpacing,
}

impl Default for DescriptionSpacing {
    fn default() -> Self {
        Self {
            desc: BlockSpacing::loose_description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_spacing_setters() {
        let mut spacing = LineSpacing::compact();
        spacing.set_before(true);
        assert!(spacing.before);
        assert!(!spacing.after);
        spacing.set_after(true);
        assert_eq!(spacing, LineSpacing::new(true, true));
    }

    #[test]
    fn test_block_spacing_presets() {
        let tight = BlockSpacing::tight_description();
        assert!(tight.ultra_tight);
        assert!(!tight.before);
        assert!(tight.after);

        let loose = BlockSpacing::loose_description();
        assert!(!loose.ultra_tight);
        assert!(loose.before && loose.after);
    }

    #[test]
    fn test_block_spacing_setters() {
        let mut spacing = BlockSpacing::default();
        spacing.set_ultra_tight(true);
        spacing.set_before(true);
        assert_eq!(spacing, BlockSpacing::new(true, false, true));
    }

    #[test]
    fn test_entry_spacing_defaults() {
        let headed = HeadedSpacing::default();
        assert_eq!(headed.header, LineSpacing::compact());
        assert_eq!(headed.desc, BlockSpacing::tight_description());

        let bullets = DescriptionSpacing::default();
        assert_eq!(bullets.desc, BlockSpacing::loose_description());
    }
}
