use log::warn;

use crate::model::{Grid, GridRow, Record, RowKind, COLUMN_HEADERS, COLUMN_RATIOS};

// Letter portrait geometry. The top margin is enlarged to 1.5 inches to
// reserve the recurring header band.
pub(crate) const PAGE_WIDTH: f32 = 612.0;
pub(crate) const PAGE_HEIGHT: f32 = 792.0;
pub(crate) const MARGIN_LEFT: f32 = 36.0;
pub(crate) const MARGIN_RIGHT: f32 = 36.0;
pub(crate) const MARGIN_TOP: f32 = 108.0;
pub(crate) const MARGIN_BOTTOM: f32 = 72.0;

pub(crate) const HEADER_BAND_HEIGHT: f32 = 108.0;
pub(crate) const TITLE_FONT_SIZE: f32 = 16.0;
pub(crate) const TITLE_SPACE_BEFORE: f32 = 28.35; // 1 cm
pub(crate) const TITLE_SPACE_AFTER: f32 = 5.67; // 0.2 cm
pub(crate) const FOOTER_BAND_HEIGHT: f32 = 50.0;
pub(crate) const SIGNATURE_BLOCK_HEIGHT: f32 = 20.0;
pub(crate) const ROW_HEIGHT: f32 = 20.0;
pub(crate) const CELL_PADDING: f32 = 5.0;

/// How many data rows fit on the first page before the footer band.
///
/// This capacity governs only the number of blank filler rows appended on
/// the first page; genuine overflow rows flow to continuation pages under
/// the renderer's own page-break check against the bottom margin. The two
/// height models deliberately differ, matching the system this replaces.
pub fn first_page_row_capacity() -> usize {
    let total = PAGE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let title_block = TITLE_FONT_SIZE + TITLE_SPACE_BEFORE + TITLE_SPACE_AFTER;
    let available =
        total - HEADER_BAND_HEIGHT - title_block - FOOTER_BAND_HEIGHT - SIGNATURE_BLOCK_HEIGHT;
    (available / ROW_HEIGHT) as usize
}

/// Plan the table grid for `records` and accumulate the billed-hours total.
///
/// Every record becomes one data row in input order. Rows whose hours field
/// does not parse are still emitted but excluded from the total. When the
/// data fits the first page, blank filler rows pad the remainder so the
/// footer band always starts at the same vertical offset.
pub fn layout(records: &[Record]) -> (Grid, f64) {
    let mut total = 0.0f64;
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        match record.parsed_hours() {
            Some(hours) => total += hours,
            None => warn!(
                "hours '{}' on {} is not a non-negative number; row rendered but excluded from total",
                record.hours, record.date,
            ),
        }
        rows.push(GridRow {
            cells: [
                record.date.clone(),
                record.student.clone(),
                record.subject.clone(),
                record.school.clone(),
                record.project.clone(),
                record.hours.clone(),
            ],
            kind: RowKind::Data,
        });
    }

    let capacity = first_page_row_capacity();
    if records.len() <= capacity {
        for _ in records.len()..capacity {
            rows.push(GridRow {
                cells: Default::default(),
                kind: RowKind::Filler,
            });
        }
    }

    let grid = Grid {
        header: COLUMN_HEADERS,
        col_ratios: COLUMN_RATIOS,
        rows,
    };
    (grid, total)
}

/// Format a total as `#,##0.00`: two decimal places, comma-grouped thousands.
pub fn format_hours(total: f64) -> String {
    let cents = (total * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{frac:02}")
}

/// Absolute column widths for the given relative ratios across `total_width`.
pub(crate) fn column_widths(ratios: &[f32; 6], total_width: f32) -> [f32; 6] {
    let ratio_sum: f32 = ratios.iter().sum();
    let mut widths = [0.0f32; 6];
    for (w, r) in widths.iter_mut().zip(ratios) {
        *w = total_width * r / ratio_sum;
    }
    widths
}
