mod footer;
pub mod layout;

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{register_base14, to_winansi_bytes, FontEntry};
use crate::model::{Record, ReportQuery, RowKind};

use footer::PageDecorator;
use layout::{
    column_widths, format_hours, CELL_PADDING, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_RIGHT,
    MARGIN_TOP, PAGE_HEIGHT, PAGE_WIDTH, ROW_HEIGHT, TITLE_FONT_SIZE, TITLE_SPACE_AFTER,
    TITLE_SPACE_BEFORE,
};

const BODY_FONT_SIZE: f32 = 10.0;
const HEADER_ROW_FONT_SIZE: f32 = 12.0;
const HEADER_ROW_HEIGHT: f32 = 24.0;
const TOTAL_FONT_SIZE: f32 = 12.0;
const TOTAL_SPACE_BEFORE: f32 = 4.0;

// Approximate ascender ratio for the base-14 Helvetica faces.
const ASCENDER_RATIO: f32 = 0.75;

pub(crate) const LIGHT_GRAY: f32 = 0.75;

/// Render the finished report as PDF bytes.
///
/// Pages are produced in phases: the body is laid out into per-page content
/// streams first; once the page count is known, the recurring bands are
/// drawn on every page and the deferred total is resolved; finally the
/// streams are compressed and assembled into the document.
pub fn render(query: &ReportQuery, records: &[Record]) -> Result<Vec<u8>, Error> {
    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let regular = register_base14(&mut pdf, "Helvetica", "F1", alloc());
    let bold = register_base14(&mut pdf, "Helvetica-Bold", "F2", alloc());

    let (grid, total) = layout::layout(records);

    let text_width = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let col_widths = column_widths(&grid.col_ratios, text_width);

    // Phase 1: body layout into per-page content streams
    let mut pages: Vec<Content> = Vec::new();
    let mut content = Content::new();
    let mut slot_top = PAGE_HEIGHT - MARGIN_TOP;

    // Title block, centered above the grid
    let title = format!("INVOICE: {} to {}", query.start_date, query.end_date);
    slot_top -= TITLE_SPACE_BEFORE;
    let title_width = bold.text_width(&title, TITLE_FONT_SIZE);
    draw_text(
        &mut content,
        &bold,
        TITLE_FONT_SIZE,
        MARGIN_LEFT + (text_width - title_width) / 2.0,
        slot_top - TITLE_FONT_SIZE * ASCENDER_RATIO,
        &title,
    );
    slot_top -= TITLE_FONT_SIZE + TITLE_SPACE_AFTER;

    // Shaded grid header row, first page only
    content.save_state();
    content.set_fill_gray(LIGHT_GRAY);
    content.rect(
        MARGIN_LEFT,
        slot_top - HEADER_ROW_HEIGHT,
        text_width,
        HEADER_ROW_HEIGHT,
    );
    content.fill_nonzero();
    content.restore_state();
    content.save_state();
    content.set_line_width(0.5);
    content.set_stroke_gray(LIGHT_GRAY);
    content.move_to(MARGIN_LEFT, slot_top - HEADER_ROW_HEIGHT);
    content.line_to(MARGIN_LEFT + text_width, slot_top - HEADER_ROW_HEIGHT);
    content.stroke();
    content.restore_state();
    {
        let baseline = slot_top - CELL_PADDING - HEADER_ROW_FONT_SIZE * ASCENDER_RATIO;
        let mut x = MARGIN_LEFT;
        for (label, width) in grid.header.iter().zip(&col_widths) {
            draw_text(&mut content, &bold, HEADER_ROW_FONT_SIZE, x + CELL_PADDING, baseline, label);
            x += width;
        }
    }
    slot_top -= HEADER_ROW_HEIGHT;

    // Data and filler rows; overflow breaks against the bottom margin
    for row in &grid.rows {
        if slot_top - ROW_HEIGHT < MARGIN_BOTTOM {
            pages.push(std::mem::replace(&mut content, Content::new()));
            slot_top = PAGE_HEIGHT - MARGIN_TOP;
        }
        if row.kind == RowKind::Data {
            let baseline = slot_top - CELL_PADDING - BODY_FONT_SIZE * ASCENDER_RATIO;
            let mut x = MARGIN_LEFT;
            for (cell, width) in row.cells.iter().zip(&col_widths) {
                draw_text(&mut content, &regular, BODY_FONT_SIZE, x + CELL_PADDING, baseline, cell);
                x += width;
            }
        }
        // filler rows advance the cursor without drawing
        slot_top -= ROW_HEIGHT;
    }

    // Trailing total, right-aligned once after the full grid
    if slot_top - ROW_HEIGHT < MARGIN_BOTTOM {
        pages.push(std::mem::replace(&mut content, Content::new()));
        slot_top = PAGE_HEIGHT - MARGIN_TOP;
    }
    slot_top -= TOTAL_SPACE_BEFORE;
    let total_text = format!("Total Billed Hours: {}", format_hours(total));
    let total_width = bold.text_width(&total_text, TOTAL_FONT_SIZE);
    draw_text(
        &mut content,
        &bold,
        TOTAL_FONT_SIZE,
        MARGIN_LEFT + text_width - total_width,
        slot_top - TOTAL_FONT_SIZE * ASCENDER_RATIO,
        &total_text,
    );
    pages.push(content);

    // Phase 2: recurring bands on every page, then the deferred page count
    let decorator = PageDecorator::new(&regular);
    let mut pending = decorator.open();
    for (page_index, page) in pages.iter_mut().enumerate() {
        decorator.end_page(page, page_index, &mut pending);
    }
    let total_pages = pages.len();
    pending.resolve(total_pages, &mut pages, &regular);

    // Phase 3: compress streams and assemble page objects
    let page_ids: Vec<Ref> = (0..total_pages).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..total_pages).map(|_| alloc()).collect();

    for (i, page) in pages.into_iter().enumerate() {
        let raw = page.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed)
            .filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(total_pages as i32);

    for i in 0..total_pages {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        for entry in [&regular, &bold] {
            fonts.pair(Name(entry.pdf_name.as_bytes()), entry.font_ref);
        }
    }

    Ok(pdf.finish())
}

pub(crate) fn draw_text(
    content: &mut Content,
    font: &FontEntry,
    size: f32,
    x: f32,
    baseline: f32,
    text: &str,
) {
    content
        .begin_text()
        .set_font(Name(font.pdf_name.as_bytes()), size)
        .next_line(x, baseline)
        .show(Str(&to_winansi_bytes(text)))
        .end_text();
}
