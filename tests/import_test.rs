//! Integration tests for Markdown and project import.

use std::fs;

use resumark::{
    import_file, import_markdown, import_str, load_document, render, Error, JsonFormat, SectionContent,
    SectionKind,
};
use tempfile::TempDir;

const RESUME: &str = "# Sam Lee\n\
### Data Engineer\n\
sam@lee.io | +1 (206) 555-0100 | [github.com/samlee](https://github.com/samlee) | Willing to relocate\n\
\n\
## Experience\n\
**Data Engineer** | Fabrikam | Seattle, WA | 2019 - Now\n\
- Owned the warehouse\n\
- Wrote *many* pipelines\n\
**Intern** | Contoso\n\
\n\
## Education\n\
**M.S. Statistics** | Tech University | Atlanta, GA | 2017 - 2019\n\
\n\
## Projects\n\
**etl-kit** | 2020\n\
- Open source ETL toolkit\n\
\n\
## SKILLS\n\
SQL, Python, Spark\n";

#[test]
fn test_import_markdown_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sam.md");
    fs::write(&path, RESUME).unwrap();

    let doc = import_file(&path).unwrap();
    assert_eq!(doc.filename, "sam");
    assert_eq!(doc.header.name, "Sam Lee");
    assert_eq!(doc.header.email, "sam@lee.io");
    assert_eq!(doc.header.phone, "+1 (206) 555-0100");
    assert_eq!(doc.header.location, "Willing to relocate");

    let kinds: Vec<_> = doc.sections.iter().map(|s| s.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            SectionKind::Experience,
            SectionKind::Education,
            SectionKind::StandardOneHeadline,
            SectionKind::StandardBulletsOnly,
        ]
    );
}

#[test]
fn test_later_entries_keep_section_shape() {
    let doc = import_markdown(RESUME).unwrap();
    match &doc.sections[0].content {
        SectionContent::Experience(entries) => {
            assert_eq!(entries.len(), 2);
            assert_eq!(
                entries[0].description,
                "- Owned the warehouse\n- Wrote *many* pipelines"
            );
            assert_eq!(entries[1].title, "Intern");
            assert_eq!(entries[1].company, "Contoso");
            assert!(entries[1].location.is_empty());
            assert!(entries[1].dates.is_empty());
        }
        other => panic!("expected experience, got {:?}", other.kind()),
    }
}

#[test]
fn test_header_only_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("header.markdown");
    fs::write(&path, "# Sam Lee\n### Data Engineer\nsam@lee.io\n").unwrap();

    assert!(matches!(import_file(&path), Err(Error::NoSections)));
}

#[test]
fn test_header_only_text_fails_with_no_sections() {
    assert!(matches!(
        import_str("# Jane\n### Eng\njane@x.io"),
        Err(Error::NoSections)
    ));
    assert!(matches!(import_str(""), Err(Error::NoSections)));
}

#[test]
fn test_unrecognized_contact_tokens_are_dropped() {
    let doc = import_markdown("# A\n### B\na@b.co | linkedin.com/in/a | Portland, OR\n## Skills\nRust")
        .unwrap();
    assert_eq!(doc.header.email, "a@b.co");
    assert!(doc.header.links.is_empty());
    assert!(doc.header.location.is_empty());
}

#[test]
fn test_project_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let doc = import_markdown(RESUME).unwrap();
    let path = dir.path().join("project.json");
    fs::write(&path, render::to_json(&doc, JsonFormat::Pretty).unwrap()).unwrap();

    assert_eq!(load_document(&path).unwrap(), doc);
    assert_eq!(import_file(&path).unwrap(), doc);
}
