use pdf_writer::Content;

use crate::fonts::FontEntry;

use super::layout::HEADER_BAND_HEIGHT;
use super::{draw_text, LIGHT_GRAY};

const ORG_LINES: [&str; 3] = [
    "Michael Ryan Hunsaker, M.Ed., Ph.D.",
    "Davis School District",
    "Farmington, UT 84025",
];
const COPYRIGHT: &str = "\u{a9} 2024 Michael Ryan Hunsaker, M.Ed., Ph.D. All Rights Reserved.";

// The header and footer bands span a fixed 527pt strip starting at x=34,
// independent of the body margins.
const BAND_X: f32 = 34.0;
const BAND_WIDTH: f32 = 527.0;
const HEADER_TOP_Y: f32 = 803.0;
const HEADER_FONT_SIZE: f32 = 12.0;
const HEADER_LINE_HEIGHT: f32 = 14.4;
const FOOTER_RULE_Y: f32 = 50.0;
const FOOTER_FONT_SIZE: f32 = 8.0;
const FOOTER_BASELINE_Y: f32 = FOOTER_RULE_Y - 12.0;

// The reserved placeholder drawable sits right of the "Page <n> of" label,
// occupying the last footer column (24:2:1 split of the band width).
const PLACEHOLDER_X: f32 = BAND_X + BAND_WIDTH * 1.0 / 27.0 * 26.0;
const LABEL_GAP: f32 = 2.0;
// Per-digit alignment width: the resolved count is right-aligned at
// digits * 5pt so it sits flush against the label on every page.
const DIGIT_ALIGN_WIDTH: f32 = 5.0;

/// Draws the recurring header and footer bands on every completed page and
/// owns the deferred total-page-count protocol.
pub(crate) struct PageDecorator<'a> {
    font: &'a FontEntry,
}

/// The pending total-page-count value, created when the document opens.
///
/// One placeholder slot is registered per completed page; [`resolve`]
/// consumes the token, so it can back-fill the true count exactly once.
///
/// [`resolve`]: PendingPageTotal::resolve
#[must_use = "an unresolved page total leaves every footer reading \"Page N of\" with no count"]
pub(crate) struct PendingPageTotal {
    slots: Vec<Slot>,
}

struct Slot {
    page: usize,
    x: f32,
    baseline: f32,
}

impl<'a> PageDecorator<'a> {
    pub(crate) fn new(font: &'a FontEntry) -> Self {
        Self { font }
    }

    /// Reserve the placeholder region. No content is known yet — the true
    /// page count only exists once the document is complete.
    pub(crate) fn open(&self) -> PendingPageTotal {
        PendingPageTotal { slots: Vec::new() }
    }

    /// Fires once per completed page, including the first.
    pub(crate) fn end_page(
        &self,
        content: &mut Content,
        page_index: usize,
        pending: &mut PendingPageTotal,
    ) {
        self.draw_header(content);
        self.draw_footer(content, page_index, pending);
    }

    fn draw_header(&self, content: &mut Content) {
        let mut baseline = HEADER_TOP_Y - 2.0 * HEADER_LINE_HEIGHT;
        for line in ORG_LINES {
            draw_text(content, self.font, HEADER_FONT_SIZE, BAND_X + 10.0, baseline, line);
            baseline -= HEADER_LINE_HEIGHT;
        }
        rule(content, HEADER_TOP_Y - HEADER_BAND_HEIGHT);
    }

    fn draw_footer(&self, content: &mut Content, page_index: usize, pending: &mut PendingPageTotal) {
        rule(content, FOOTER_RULE_Y);
        draw_text(
            content,
            self.font,
            FOOTER_FONT_SIZE,
            BAND_X,
            FOOTER_BASELINE_Y,
            COPYRIGHT,
        );

        let label = format!("Page {} of", page_index + 1);
        let label_width = self.font.text_width(&label, FOOTER_FONT_SIZE);
        draw_text(
            content,
            self.font,
            FOOTER_FONT_SIZE,
            PLACEHOLDER_X - LABEL_GAP - label_width,
            FOOTER_BASELINE_Y,
            &label,
        );

        // The placeholder itself stays empty until resolve().
        pending.slots.push(Slot {
            page: page_index,
            x: PLACEHOLDER_X,
            baseline: FOOTER_BASELINE_Y,
        });
    }
}

impl PendingPageTotal {
    /// Overwrite every reserved placeholder with the final page count.
    /// Consuming `self` makes a second resolution a compile error.
    pub(crate) fn resolve(self, total_pages: usize, pages: &mut [Content], font: &FontEntry) {
        let text = total_pages.to_string();
        let align_width = text.len() as f32 * DIGIT_ALIGN_WIDTH;
        let text_width = font.text_width(&text, FOOTER_FONT_SIZE);
        for slot in self.slots {
            draw_text(
                &mut pages[slot.page],
                font,
                FOOTER_FONT_SIZE,
                slot.x + align_width - text_width,
                slot.baseline,
                &text,
            );
        }
    }
}

fn rule(content: &mut Content, y: f32) {
    content.save_state();
    content.set_line_width(0.5);
    content.set_stroke_gray(LIGHT_GRAY);
    content.move_to(BAND_X, y);
    content.line_to(BAND_X + BAND_WIDTH, y);
    content.stroke();
    content.restore_state();
}
