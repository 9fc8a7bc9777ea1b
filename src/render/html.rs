//! HTML rendering for résumé documents.
//!
//! The output is a complete, self-contained HTML page: it serves as the
//! on-screen preview and as the input of the external PDF service. Every
//! structural zone is a block element whose spacing classes come from its
//! spacing record.

use crate::error::Result;
use crate::model::{
    description_lines, has_bullets, BlockSpacing, Document, Header, LineSpacing, Section,
    SectionContent,
};
use crate::parser::inline::{escape_html, inline_html};

use super::RenderOptions;

/// Convert a document to HTML.
pub fn to_html(doc: &Document, options: &RenderOptions) -> Result<String> {
    let renderer = HtmlRenderer::new(options.clone());
    renderer.render(doc)
}

/// CSS classes for a single-line zone.
pub fn line_classes(spacing: LineSpacing) -> String {
    format!(
        "{} {}",
        if spacing.before {
            "space-before"
        } else {
            "compact-before"
        },
        if spacing.after {
            "space-after"
        } else {
            "compact-after"
        }
    )
}

/// CSS classes for a description block. `ultra-tight` replaces both.
pub fn block_classes(spacing: BlockSpacing) -> String {
    if spacing.ultra_tight {
        "ultra-tight".to_string()
    } else {
        line_classes(LineSpacing::new(spacing.before, spacing.after))
    }
}

/// HTML renderer.
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    /// Create a new HTML renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to a complete HTML page.
    pub fn render(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();
        output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        output.push_str("<meta charset=\"utf-8\">\n");
        output.push_str(&format!("<title>{}</title>\n", escape_html(&doc.filename)));
        output.push_str("<style>\n");
        output.push_str(&self.stylesheet(doc));
        output.push_str("</style>\n</head>\n<body>\n<div class=\"resume\">\n");
        output.push_str(&self.render_fragment(doc));
        output.push_str("</div>\n</body>\n</html>\n");
        Ok(output)
    }

    /// Render only the body fragment (header and sections), for embedding.
    pub fn render_fragment(&self, doc: &Document) -> String {
        let mut output = String::new();
        self.render_header(&mut output, &doc.header);
        for section in &doc.sections {
            self.render_section(&mut output, section);
        }
        output
    }

    fn stylesheet(&self, doc: &Document) -> String {
        let margin = self.options.margin_for(doc.margin_inches);
        let body_pt = self.options.font_size as f32 / 2.0;
        let name_pt = self.options.name_size as f32 / 2.0;
        format!(
            "@page {{ size: {page}; margin: {margin}in; }}\n\
body {{ font-family: \"{font}\", Arial, sans-serif; font-size: {body_pt}pt; margin: 0; color: #000; }}\n\
.resume {{ max-width: 8.5in; margin: 0 auto; padding: {margin}in; box-sizing: border-box; }}\n\
@media print {{ .resume {{ padding: 0; }} }}\n\
.name {{ font-size: {name_pt}pt; font-weight: bold; text-align: center; }}\n\
.headline, .contact {{ text-align: center; }}\n\
.section-title {{ font-size: {body_pt}pt; font-weight: bold; border-bottom: 1px solid #000; }}\n\
.entry-line {{ display: flex; justify-content: space-between; }}\n\
.entry-line.primary .left {{ font-weight: bold; }}\n\
.entry-line.secondary span {{ font-style: italic; }}\n\
.description ul, .text-block ul {{ margin: 0; padding-left: 1.2em; }}\n\
.description p, .text-block p {{ margin: 0; }}\n\
.space-before {{ margin-top: 12pt; }}\n\
.compact-before {{ margin-top: 2pt; }}\n\
.space-after {{ margin-bottom: 6pt; }}\n\
.compact-after {{ margin-bottom: 2pt; }}\n\
.ultra-tight {{ margin-top: 0; margin-bottom: 0; }}\n\
a {{ color: #{link}; text-decoration: underline; }}\n",
            page = self.options.page.css_name(),
            margin = margin,
            font = escape_html(&self.options.font_family),
            body_pt = body_pt,
            name_pt = name_pt,
            link = self.options.link_color,
        )
    }

    fn render_header(&self, output: &mut String, header: &Header) {
        output.push_str("<header class=\"resume-header\">\n");
        output.push_str(&format!(
            "<h1 class=\"name {}\">{}</h1>\n",
            line_classes(header.spacing.name),
            inline_html(&header.name)
        ));
        if !header.title.trim().is_empty() {
            output.push_str(&format!(
                "<div class=\"headline {}\">{}</div>\n",
                line_classes(header.spacing.title),
                inline_html(&header.title)
            ));
        }
        let items = header.contact_items();
        if !items.is_empty() {
            let joined = items
                .iter()
                .map(|item| inline_html(item))
                .collect::<Vec<_>>()
                .join(" <span class=\"separator\">|</span> ");
            output.push_str(&format!(
                "<div class=\"contact {}\">{}</div>\n",
                line_classes(header.spacing.contact),
                joined
            ));
        }
        output.push_str("</header>\n");
    }

    fn render_section(&self, output: &mut String, section: &Section) {
        output.push_str(&format!(
            "<section class=\"resume-section {}\">\n",
            section.kind().as_str().replace('_', "-")
        ));
        output.push_str(&format!(
            "<h2 class=\"section-title {}\">{}</h2>\n",
            line_classes(section.title_spacing),
            inline_html(&section.display_title())
        ));

        match &section.content {
            SectionContent::Experience(entries) => {
                for e in entries {
                    output.push_str("<div class=\"entry\">\n");
                    two_column(output, "primary", e.spacing.header, &e.title, &e.dates);
                    two_column(output, "secondary", e.spacing.subheader, &e.company, &e.location);
                    description(output, "description", e.spacing.desc, &e.description);
                    output.push_str("</div>\n");
                }
            }
            SectionContent::Education(entries) => {
                for e in entries {
                    output.push_str("<div class=\"entry\">\n");
                    two_column(output, "primary", e.spacing.header, &e.university, &e.location);
                    two_column(output, "secondary", e.spacing.subheader, &e.degree, &e.dates);
                    description(output, "description", e.spacing.desc, &e.description);
                    output.push_str("</div>\n");
                }
            }
            SectionContent::StandardFull(entries) => {
                for e in entries {
                    output.push_str("<div class=\"entry\">\n");
                    two_column(
                        output,
                        "primary",
                        e.spacing.headline1,
                        &e.headline1_left,
                        &e.headline1_right,
                    );
                    two_column(
                        output,
                        "secondary",
                        e.spacing.headline2,
                        &e.headline2_left,
                        &e.headline2_right,
                    );
                    description(output, "description", e.spacing.desc, &e.description);
                    output.push_str("</div>\n");
                }
            }
            SectionContent::StandardOneHeadline(entries) => {
                for e in entries {
                    output.push_str("<div class=\"entry\">\n");
                    two_column(
                        output,
                        "primary",
                        e.spacing.headline1,
                        &e.headline_left,
                        &e.headline_right,
                    );
                    description(output, "description", e.spacing.desc, &e.description);
                    output.push_str("</div>\n");
                }
            }
            SectionContent::StandardBulletsOnly(entries) => {
                for e in entries {
                    output.push_str("<div class=\"entry\">\n");
                    description(output, "description", e.spacing.desc, &e.description);
                    output.push_str("</div>\n");
                }
            }
            SectionContent::Text(block) => {
                description(output, "text-block", block.spacing, &block.text);
            }
        }

        output.push_str("</section>\n");
    }
}

/// A flex row with a left and a right span.
fn two_column(output: &mut String, role: &str, spacing: LineSpacing, left: &str, right: &str) {
    output.push_str(&format!(
        "<div class=\"entry-line {} {}\"><span class=\"left\">{}</span><span class=\"right\">{}</span></div>\n",
        role,
        line_classes(spacing),
        inline_html(left),
        inline_html(right)
    ));
}

/// A description block: a bulleted list when any line is bulleted, else paragraphs.
fn description(output: &mut String, role: &str, spacing: BlockSpacing, text: &str) {
    let lines = description_lines(text);
    if lines.is_empty() {
        return;
    }

    output.push_str(&format!(
        "<div class=\"{} {}\">\n",
        role,
        block_classes(spacing)
    ));
    if has_bullets(&lines) {
        output.push_str("<ul>\n");
        for line in &lines {
            output.push_str(&format!("<li>{}</li>\n", inline_html(line.text)));
        }
        output.push_str("</ul>\n");
    } else {
        for line in &lines {
            output.push_str(&format!("<p>{}</p>\n", inline_html(line.text)));
        }
    }
    output.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExperienceEntry, SectionKind};

    #[test]
    fn test_line_classes() {
        assert_eq!(
            line_classes(LineSpacing::new(true, false)),
            "space-before compact-after"
        );
        assert_eq!(
            line_classes(LineSpacing::new(false, true)),
            "compact-before space-after"
        );
    }

    #[test]
    fn test_ultra_tight_replaces_both_classes() {
        for (before, after) in [(false, false), (true, false), (false, true), (true, true)] {
            let classes = block_classes(BlockSpacing::new(before, after, true));
            assert_eq!(classes, "ultra-tight");
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = Document::template();
        let options = RenderOptions::default();
        assert_eq!(
            to_html(&doc, &options).unwrap(),
            to_html(&doc, &options).unwrap()
        );
    }

    #[test]
    fn test_render_experience_entry() {
        let mut doc = Document::new();
        doc.add_section(Section::new(
            "Experience",
            SectionContent::Experience(vec![ExperienceEntry::new(
                "Engineer",
                "Acme",
                "Remote",
                "2020",
                "- Built **fast** things",
            )]),
        ));
        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("<h2 class=\"section-title space-before compact-after\">EXPERIENCE</h2>"));
        assert!(html.contains("<span class=\"left\">Engineer</span><span class=\"right\">2020</span>"));
        assert!(html.contains("<li>Built <strong>fast</strong> things</li>"));
        assert!(html.contains("<div class=\"description ultra-tight\">"));
        assert!(!html.contains("<p><li>"));
    }

    #[test]
    fn test_plain_description_renders_paragraphs() {
        let mut doc = Document::new();
        doc.add_section(Section::blank("Notes", SectionKind::StandardBulletsOnly));
        if let Some(SectionContent::StandardBulletsOnly(entries)) =
            doc.section_mut(0).map(|s| &mut s.content)
        {
            entries[0].description = "First\nSecond".to_string();
        }
        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("<p>First</p>\n<p>Second</p>"));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn test_text_block_bullets_are_list_items() {
        let mut doc = Document::new();
        doc.add_section(Section::blank("Summary", SectionKind::Text));
        if let Some(SectionContent::Text(block)) = doc.section_mut(0).map(|s| &mut s.content) {
            block.text = "- Rust\n- Go".to_string();
        }
        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("<ul>\n<li>Rust</li>\n<li>Go</li>\n</ul>"));
        assert!(!html.contains("<p>- Rust</p>"));
    }

    #[test]
    fn test_fragment_is_page_body() {
        let doc = Document::template();
        let renderer = HtmlRenderer::new(RenderOptions::default());
        let fragment = renderer.render_fragment(&doc);
        assert!(fragment.starts_with("<header class=\"resume-header\">"));
        assert!(!fragment.contains("<style>"));
        assert!(renderer.render(&doc).unwrap().contains(&fragment));
    }

    #[test]
    fn test_margin_in_stylesheet() {
        let mut doc = Document::new();
        doc.margin_inches = 0.75;
        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("margin: 0.75in"));

        let html = to_html(&doc, &RenderOptions::new().with_margin(1.0)).unwrap();
        assert!(html.contains("margin: 1in"));
    }

    #[test]
    fn test_header_escapes_text() {
        let mut doc = Document::new();
        doc.header.name = "A <B> & C".to_string();
        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("A &lt;B&gt; &amp; C"));
    }
}
