//! Page-flow rendering.
//!
//! Builds a styled, paginated document structure from a résumé: one
//! paragraph per structural line, styling carried per run, physical
//! measurements in twips (twentieths of a point). The structure is written
//! to a word-processor file by [`super::docx`], but it is also useful on
//! its own for inspecting layout decisions.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{
    description_lines, BlockSpacing, Document, Header, LineSpacing, Section, SectionContent,
};
use crate::parser::inline::{parse_inline, SpanKind};

use super::options::TWIPS_PER_INCH;
use super::RenderOptions;

/// Space above a line whose `before` directive is set.
pub const SPACED_BEFORE: u32 = 240;

/// Space below a line whose `after` directive is set.
pub const SPACED_AFTER: u32 = 120;

/// Space on either side of a line whose directive is not set.
pub const COMPACT: u32 = 40;

/// Convert a document to its page-flow structure.
pub fn to_page_flow(doc: &Document, options: &RenderOptions) -> Result<FlowDocument> {
    let renderer = PageFlowRenderer::new(options.clone());
    renderer.render(doc)
}

/// A paginated document: page geometry, default run style and blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    /// Page width in twips
    pub page_width: u32,

    /// Page height in twips
    pub page_height: u32,

    /// Uniform margin in twips
    pub margin: u32,

    /// Default font family
    pub font_family: String,

    /// Default run size in half-points
    pub font_size: u32,

    /// Color of hyperlink runs
    pub link_color: String,

    /// Blocks in reading order
    pub blocks: Vec<FlowBlock>,
}

impl FlowDocument {
    /// Width available between the margins, in twips.
    pub fn content_width(&self) -> u32 {
        self.page_width.saturating_sub(self.margin.saturating_mul(2))
    }

    /// All paragraphs, including the ones inside heading tables.
    pub fn paragraphs(&self) -> impl Iterator<Item = &FlowParagraph> {
        self.blocks.iter().map(|block| match block {
            FlowBlock::Paragraph(p) | FlowBlock::RuledHeading(p) => p,
        })
    }
}

/// A block of the page flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "paragraph", rename_all = "snake_case")]
pub enum FlowBlock {
    /// An ordinary paragraph
    Paragraph(FlowParagraph),

    /// A paragraph inside a full-width single-cell table with a bottom rule
    RuledHeading(FlowParagraph),
}

/// Paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowAlignment {
    #[default]
    Left,
    Center,
}

/// Paragraph spacing in twips.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphSpacing {
    pub before: u32,
    pub after: u32,
}

impl ParagraphSpacing {
    /// Spacing for a single-line zone.
    pub fn for_line(spacing: LineSpacing) -> Self {
        Self {
            before: if spacing.before { SPACED_BEFORE } else { COMPACT },
            after: if spacing.after { SPACED_AFTER } else { COMPACT },
        }
    }

    /// Spacing for line `index` of a description block.
    ///
    /// `ultra_tight` collapses the first line against the line above it;
    /// every other line takes the block's directives.
    pub fn for_block_line(spacing: BlockSpacing, index: usize) -> Self {
        if spacing.ultra_tight && index == 0 {
            return Self::default();
        }
        Self::for_line(LineSpacing::new(spacing.before, spacing.after))
    }
}

/// One paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowParagraph {
    pub runs: Vec<FlowRun>,
    pub spacing: ParagraphSpacing,
    pub alignment: FlowAlignment,

    /// Rendered as a bulleted list item
    pub bullet: bool,

    /// Position of a right-aligned tab stop, in twips from the left margin
    pub right_tab: Option<u32>,
}

impl FlowParagraph {
    /// Visible text of the paragraph; tabs become `\t`.
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|run| match run {
                FlowRun::Text(t) => t.text.as_str(),
                FlowRun::Link { text, .. } => text.as_str(),
                FlowRun::Tab => "\t",
            })
            .collect()
    }
}

/// A styled run of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    pub bold: bool,
    pub italic: bool,

    /// Size in half-points, when different from the document default
    pub size: Option<u32>,
}

/// One run of a paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowRun {
    /// Styled text
    Text(StyledText),

    /// Hyperlink (underlined, link color)
    Link { text: String, url: String },

    /// Tab character, jumping to the paragraph's tab stop
    Tab,
}

/// Base styling applied under a field's inline markup.
#[derive(Debug, Clone, Copy, Default)]
struct RunBase {
    bold: bool,
    italic: bool,
    size: Option<u32>,
}

/// Page-flow renderer.
pub struct PageFlowRenderer {
    options: RenderOptions,
}

impl PageFlowRenderer {
    /// Create a new page-flow renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to its page-flow structure.
    pub fn render(&self, doc: &Document) -> Result<FlowDocument> {
        let margin_inches = self.options.margin_for(doc.margin_inches);
        let mut flow = FlowDocument {
            page_width: self.options.page.width_twips(),
            page_height: self.options.page.height_twips(),
            margin: (margin_inches * TWIPS_PER_INCH).round() as u32,
            font_family: self.options.font_family.clone(),
            font_size: self.options.font_size,
            link_color: self.options.link_color.clone(),
            blocks: Vec::new(),
        };
        let tab = flow.content_width();

        self.render_header(&mut flow.blocks, &doc.header);
        for section in &doc.sections {
            render_section(&mut flow.blocks, section, tab);
        }

        log::debug!("Page flow has {} blocks", flow.blocks.len());
        Ok(flow)
    }

    fn render_header(&self, blocks: &mut Vec<FlowBlock>, header: &Header) {
        let name = RunBase {
            bold: true,
            size: Some(self.options.name_size),
            ..Default::default()
        };
        blocks.push(FlowBlock::Paragraph(FlowParagraph {
            runs: runs(&header.name, name),
            spacing: ParagraphSpacing::for_line(header.spacing.name),
            alignment: FlowAlignment::Center,
            ..Default::default()
        }));

        if !header.title.trim().is_empty() {
            blocks.push(FlowBlock::Paragraph(FlowParagraph {
                runs: runs(&header.title, RunBase::default()),
                spacing: ParagraphSpacing::for_line(header.spacing.title),
                alignment: FlowAlignment::Center,
                ..Default::default()
            }));
        }

        let items = header.contact_items();
        if !items.is_empty() {
            let mut contact = Vec::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    contact.push(plain_run(" | ", RunBase::default()));
                }
                contact.extend(runs(item, RunBase::default()));
            }
            blocks.push(FlowBlock::Paragraph(FlowParagraph {
                runs: contact,
                spacing: ParagraphSpacing::for_line(header.spacing.contact),
                alignment: FlowAlignment::Center,
                ..Default::default()
            }));
        }
    }
}

fn render_section(blocks: &mut Vec<FlowBlock>, section: &Section, tab: u32) {
    let title = RunBase {
        bold: true,
        ..Default::default()
    };
    blocks.push(FlowBlock::RuledHeading(FlowParagraph {
        runs: runs(&section.display_title(), title),
        spacing: ParagraphSpacing::for_line(section.title_spacing),
        ..Default::default()
    }));

    let primary = RunBase {
        bold: true,
        ..Default::default()
    };
    let secondary = RunBase {
        italic: true,
        ..Default::default()
    };

    match &section.content {
        SectionContent::Experience(entries) => {
            for e in entries {
                blocks.push(two_column(&e.title, &e.dates, primary, e.spacing.header, tab));
                blocks.push(two_column(
                    &e.company,
                    &e.location,
                    secondary,
                    e.spacing.subheader,
                    tab,
                ));
                description(blocks, &e.description, e.spacing.desc);
            }
        }
        SectionContent::Education(entries) => {
            for e in entries {
                blocks.push(two_column(
                    &e.university,
                    &e.location,
                    primary,
                    e.spacing.header,
                    tab,
                ));
                blocks.push(two_column(
                    &e.degree,
                    &e.dates,
                    secondary,
                    e.spacing.subheader,
                    tab,
                ));
                description(blocks, &e.description, e.spacing.desc);
            }
        }
        SectionContent::StandardFull(entries) => {
            for e in entries {
                blocks.push(two_column(
                    &e.headline1_left,
                    &e.headline1_right,
                    primary,
                    e.spacing.headline1,
                    tab,
                ));
                blocks.push(two_column(
                    &e.headline2_left,
                    &e.headline2_right,
                    secondary,
                    e.spacing.headline2,
                    tab,
                ));
                description(blocks, &e.description, e.spacing.desc);
            }
        }
        SectionContent::StandardOneHeadline(entries) => {
            for e in entries {
                blocks.push(two_column(
                    &e.headline_left,
                    &e.headline_right,
                    primary,
                    e.spacing.headline1,
                    tab,
                ));
                description(blocks, &e.description, e.spacing.desc);
            }
        }
        SectionContent::StandardBulletsOnly(entries) => {
            for e in entries {
                description(blocks, &e.description, e.spacing.desc);
            }
        }
        SectionContent::Text(block) => description(blocks, &block.text, block.spacing),
    }
}

/// Left runs, a tab, right runs, with a right tab stop at the content edge.
fn two_column(left: &str, right: &str, base: RunBase, spacing: LineSpacing, tab: u32) -> FlowBlock {
    let mut line = runs(left, base);
    line.push(FlowRun::Tab);
    line.extend(runs(right, RunBase { bold: false, ..base }));
    FlowBlock::Paragraph(FlowParagraph {
        runs: line,
        spacing: ParagraphSpacing::for_line(spacing),
        right_tab: Some(tab),
        ..Default::default()
    })
}

/// One paragraph per description line; bulleted lines become list items.
fn description(blocks: &mut Vec<FlowBlock>, text: &str, spacing: BlockSpacing) {
    for (index, line) in description_lines(text).iter().enumerate() {
        blocks.push(FlowBlock::Paragraph(FlowParagraph {
            runs: runs(line.text, RunBase::default()),
            spacing: ParagraphSpacing::for_block_line(spacing, index),
            bullet: line.bullet,
            ..Default::default()
        }));
    }
}

/// Inline markup to independently styled runs.
fn runs(text: &str, base: RunBase) -> Vec<FlowRun> {
    parse_inline(text)
        .into_iter()
        .filter(|span| !span.text.is_empty())
        .map(|span| match span.kind {
            SpanKind::Link => FlowRun::Link {
                text: span.text,
                url: span.href.unwrap_or_default(),
            },
            SpanKind::Bold => FlowRun::Text(StyledText {
                text: span.text,
                bold: true,
                italic: base.italic,
                size: base.size,
            }),
            SpanKind::Italic => FlowRun::Text(StyledText {
                text: span.text,
                bold: base.bold,
                italic: true,
                size: base.size,
            }),
            SpanKind::Plain => plain_run(&span.text, base),
        })
        .collect()
}

fn plain_run(text: &str, base: RunBase) -> FlowRun {
    FlowRun::Text(StyledText {
        text: text.to_string(),
        bold: base.bold,
        italic: base.italic,
        size: base.size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExperienceEntry, OneHeadlineEntry};

    fn one_headline_doc(description: &str, spacing: BlockSpacing) -> Document {
        let mut entry = OneHeadlineEntry::new("Compiler", "2019", description);
        entry.spacing.desc = spacing;
        let mut doc = Document::new();
        doc.add_section(Section::new(
            "Projects",
            SectionContent::StandardOneHeadline(vec![entry]),
        ));
        doc
    }

    #[test]
    fn test_line_spacing_ratio() {
        assert_eq!(
            ParagraphSpacing::for_line(LineSpacing::new(true, true)),
            ParagraphSpacing {
                before: 240,
                after: 120
            }
        );
        assert_eq!(
            ParagraphSpacing::for_line(LineSpacing::compact()),
            ParagraphSpacing {
                before: 40,
                after: 40
            }
        );
    }

    fn bullet_spacing(spacing: BlockSpacing) -> Vec<(u32, u32)> {
        let doc = one_headline_doc("- a\n- b\n- c", spacing);
        let flow = to_page_flow(&doc, &RenderOptions::default()).unwrap();
        flow.paragraphs()
            .filter(|p| p.bullet)
            .map(|p| (p.spacing.before, p.spacing.after))
            .collect()
    }

    #[test]
    fn test_ultra_tight_collapses_first_line() {
        assert_eq!(
            bullet_spacing(BlockSpacing::new(false, true, true)),
            vec![(0, 0), (40, 120), (40, 120)]
        );
        assert_eq!(
            bullet_spacing(BlockSpacing::new(true, false, true)),
            vec![(0, 0), (240, 40), (240, 40)]
        );
    }

    #[test]
    fn test_block_lines_share_directives() {
        assert_eq!(
            bullet_spacing(BlockSpacing::new(false, false, false)),
            vec![(40, 40); 3]
        );
        assert_eq!(
            bullet_spacing(BlockSpacing::new(true, true, false)),
            vec![(240, 120); 3]
        );
    }

    #[test]
    fn test_two_column_tab_stop() {
        let doc = one_headline_doc("", BlockSpacing::tight_description());
        let flow = to_page_flow(&doc, &RenderOptions::default()).unwrap();
        // Letter width minus two half-inch margins.
        assert_eq!(flow.margin, 720);
        let headline = flow
            .paragraphs()
            .find(|p| p.right_tab.is_some())
            .expect("headline paragraph");
        assert_eq!(headline.right_tab, Some(12240 - 1440));
        assert_eq!(headline.text(), "Compiler\t2019");
    }

    #[test]
    fn test_oversized_margin_keeps_content_width() {
        let mut doc = one_headline_doc("", BlockSpacing::tight_description());
        doc.margin_inches = 1.0e7;
        let flow = to_page_flow(&doc, &RenderOptions::default()).unwrap();
        assert_eq!(flow.margin, 5400);
        assert_eq!(flow.content_width(), 1440);

        let wide = FlowDocument {
            margin: u32::MAX,
            ..flow
        };
        assert_eq!(wide.content_width(), 0);
    }

    #[test]
    fn test_section_title_is_ruled_heading() {
        let doc = one_headline_doc("", BlockSpacing::tight_description());
        let flow = to_page_flow(&doc, &RenderOptions::default()).unwrap();
        let headings: Vec<_> = flow
            .blocks
            .iter()
            .filter_map(|b| match b {
                FlowBlock::RuledHeading(p) => Some(p.text()),
                _ => None,
            })
            .collect();
        assert_eq!(headings, vec!["PROJECTS"]);
    }

    #[test]
    fn test_runs_carry_styles() {
        let mut doc = Document::new();
        doc.add_section(Section::new(
            "Experience",
            SectionContent::Experience(vec![ExperienceEntry::new(
                "Lead",
                "Acme",
                "Remote",
                "2020",
                "Built *tools* at [Acme](https://acme.io)",
            )]),
        ));
        let flow = to_page_flow(&doc, &RenderOptions::default()).unwrap();
        let desc = flow.paragraphs().last().unwrap();
        assert!(!desc.bullet);
        assert!(desc.runs.contains(&FlowRun::Link {
            text: "Acme".to_string(),
            url: "https://acme.io".to_string()
        }));
        assert!(desc.runs.iter().any(|r| matches!(
            r,
            FlowRun::Text(StyledText { text, italic: true, .. }) if text == "tools"
        )));
    }
}
