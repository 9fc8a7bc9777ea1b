//! Word-processor (.docx) output.
//!
//! Writes a [`FlowDocument`] with `docx-rs`. Paragraph spacing, tab stops
//! and run styles come straight from the page-flow structure; this module
//! only maps them onto the file format.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, AlignmentType, BorderType, Docx, Hyperlink, HyperlinkType, IndentLevel,
    Level, LevelJc, LevelText, NumberFormat, Numbering, NumberingId, PageMargin, Paragraph, Run,
    RunFonts, SpecialIndentType, Start, Tab, TabValueType, Table, TableBorder,
    TableBorderPosition, TableBorders, TableCell, TableRow, WidthType,
};

use crate::error::{Error, Result};
use crate::model::Document;

use super::pageflow::{
    FlowAlignment, FlowBlock, FlowDocument, FlowParagraph, FlowRun, PageFlowRenderer, StyledText,
};
use super::RenderOptions;

const BULLET_NUMBERING: usize = 1;

/// Convert a document to .docx bytes.
pub fn to_docx(doc: &Document, options: &RenderOptions) -> Result<Vec<u8>> {
    let flow = PageFlowRenderer::new(options.clone()).render(doc)?;
    write_docx(&flow)
}

/// Write a page-flow structure as .docx bytes.
pub fn write_docx(flow: &FlowDocument) -> Result<Vec<u8>> {
    let margin = i32::try_from(flow.margin.min(flow.page_width / 2)).unwrap_or(i32::MAX);
    let fonts = RunFonts::new()
        .ascii(&flow.font_family)
        .hi_ansi(&flow.font_family)
        .east_asia(&flow.font_family)
        .cs(&flow.font_family);

    let mut docx = Docx::new()
        .page_size(flow.page_width, flow.page_height)
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        )
        .default_fonts(fonts)
        .default_size(flow.font_size as usize)
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("•"),
                    LevelJc::new("left"),
                )
                .indent(Some(360), Some(SpecialIndentType::Hanging(360)), None, None),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING));

    let width = flow.content_width() as usize;
    for block in &flow.blocks {
        docx = match block {
            FlowBlock::Paragraph(p) => docx.add_paragraph(paragraph(p, &flow.link_color)),
            FlowBlock::RuledHeading(p) => docx.add_table(ruled_heading(p, &flow.link_color, width)),
        };
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| Error::Render(format!("Failed to write docx: {}", e)))?;

    let bytes = buffer.into_inner();
    log::debug!("Wrote {} bytes of docx", bytes.len());
    Ok(bytes)
}

fn paragraph(p: &FlowParagraph, link_color: &str) -> Paragraph {
    let mut out = Paragraph::new().line_spacing(
        docx_rs::LineSpacing::new()
            .before(p.spacing.before)
            .after(p.spacing.after),
    );

    if p.alignment == FlowAlignment::Center {
        out = out.align(AlignmentType::Center);
    }
    if p.bullet {
        out = out.numbering(NumberingId::new(BULLET_NUMBERING), IndentLevel::new(0));
    }
    if let Some(pos) = p.right_tab {
        out = out.add_tab(Tab::new().val(TabValueType::Right).pos(pos as usize));
    }

    for run in &p.runs {
        out = match run {
            FlowRun::Text(styled) => out.add_run(text_run(styled)),
            FlowRun::Tab => out.add_run(Run::new().add_tab()),
            FlowRun::Link { text, url } => out.add_hyperlink(
                Hyperlink::new(url, HyperlinkType::External).add_run(
                    Run::new()
                        .add_text(text)
                        .color(link_color)
                        .underline("single"),
                ),
            ),
        };
    }
    out
}

fn text_run(styled: &StyledText) -> Run {
    let mut run = Run::new().add_text(&styled.text);
    if styled.bold {
        run = run.bold();
    }
    if styled.italic {
        run = run.italic();
    }
    if let Some(size) = styled.size {
        run = run.size(size as usize);
    }
    run
}

/// A full-width single-cell table with only a bottom border.
fn ruled_heading(p: &FlowParagraph, link_color: &str, width: usize) -> Table {
    let cell = TableCell::new()
        .add_paragraph(paragraph(p, link_color))
        .width(width, WidthType::Dxa);

    let borders = TableBorders::with_empty().set(
        TableBorder::new(TableBorderPosition::Bottom)
            .border_type(BorderType::Single)
            .size(8)
            .color("000000"),
    );

    Table::new(vec![TableRow::new(vec![cell])])
        .set_grid(vec![width])
        .width(width, WidthType::Dxa)
        .set_borders(borders)
}
