//! Integration tests for the renderers.

use resumark::render::{
    export_all, pageflow::FlowBlock, to_docx, to_html, to_page_flow, to_text, OutputFormat,
    RenderOptions,
};
use resumark::{BlockSpacing, Document, ExperienceEntry, Section, SectionContent};

fn experience_doc(spacing: BlockSpacing) -> Document {
    let mut entry = ExperienceEntry::new(
        "Engineer",
        "Acme",
        "Remote",
        "2020 - Now",
        "- Built **fast** things\n- Fixed [bugs](https://example.com/bugs)",
    );
    entry.spacing.desc = spacing;

    let mut doc = Document::new();
    doc.header.name = "Jane Doe".to_string();
    doc.add_section(Section::new(
        "Experience",
        SectionContent::Experience(vec![entry]),
    ));
    doc
}

#[test]
fn test_html_render_is_idempotent() {
    let doc = Document::template();
    let options = RenderOptions::default();
    let first = to_html(&doc, &options).unwrap();
    let second = to_html(&doc, &options).unwrap();
    assert_eq!(first, second);

    // Entry ids never reach the output.
    for section in &doc.sections {
        for id in section.content.entry_ids() {
            assert!(!first.contains(&format!("entry-{}", id.value())));
        }
    }
}

#[test]
fn test_ultra_tight_overrides_before_and_after() {
    for (before, after) in [(false, false), (true, false), (false, true), (true, true)] {
        let doc = experience_doc(BlockSpacing::new(before, after, true));

        let html = to_html(&doc, &RenderOptions::default()).unwrap();
        assert!(html.contains("<div class=\"description ultra-tight\">"));

        let flow = to_page_flow(&doc, &RenderOptions::default()).unwrap();
        let bullets: Vec<_> = flow.paragraphs().filter(|p| p.bullet).collect();
        assert_eq!(bullets.len(), 2);
        assert_eq!((bullets[0].spacing.before, bullets[0].spacing.after), (0, 0));
        assert_eq!(
            (bullets[1].spacing.before, bullets[1].spacing.after),
            (if before { 240 } else { 40 }, if after { 120 } else { 40 })
        );
    }
}

#[test]
fn test_spacing_classes_without_ultra_tight() {
    let doc = experience_doc(BlockSpacing::new(true, false, false));
    let html = to_html(&doc, &RenderOptions::default()).unwrap();
    assert!(html.contains("<div class=\"description space-before compact-after\">"));
}

#[test]
fn test_page_flow_layout() {
    let doc = experience_doc(BlockSpacing::tight_description());
    let options = RenderOptions::new().with_margin(1.0);
    let flow = to_page_flow(&doc, &options).unwrap();

    assert_eq!(flow.page_width, 12240);
    assert_eq!(flow.page_height, 15840);
    assert_eq!(flow.margin, 1440);

    let headings = flow
        .blocks
        .iter()
        .filter(|b| matches!(b, FlowBlock::RuledHeading(_)))
        .count();
    assert_eq!(headings, 1);

    let lines: Vec<_> = flow.paragraphs().map(|p| p.text()).collect();
    assert!(lines.contains(&"Engineer\t2020 - Now".to_string()));
    assert!(lines.contains(&"Acme\tRemote".to_string()));
    assert!(flow
        .paragraphs()
        .filter(|p| p.right_tab.is_some())
        .all(|p| p.right_tab == Some(12240 - 2 * 1440)));
}

#[test]
fn test_docx_package() {
    let bytes = to_docx(&Document::template(), &RenderOptions::default()).unwrap();
    assert!(bytes.len() > 100);
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn test_text_strips_markup() {
    let text = to_text(&experience_doc(BlockSpacing::tight_description())).unwrap();
    assert!(text.contains("- Built fast things"));
    assert!(text.contains("- Fixed bugs"));
    assert!(!text.contains("https://"));
}

#[test]
fn test_export_all_file_names() {
    let mut doc = Document::template();
    doc.filename = "jordan".to_string();
    let exports = export_all(&doc, &OutputFormat::ALL, &RenderOptions::default()).unwrap();
    let names: Vec<_> = exports.iter().map(|e| e.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "jordan.html",
            "jordan.md",
            "jordan.docx",
            "jordan.json",
            "jordan.txt"
        ]
    );
}
