use crate::error::Error;

/// The fixed set of billable project categories.
pub const CATEGORIES: [&str; 6] = [
    "UEB Literary Transcription",
    "UEB Technical Transcription",
    "Tactile Graphics Generation",
    "Large Print Generation",
    "3D Print Rendering",
    "3D Print Production",
];

pub const COLUMN_HEADERS: [&str; 6] = ["Date", "Student", "Subject", "School", "Project", "Time"];

/// Relative column width ratios, Date through Time.
pub const COLUMN_RATIOS: [f32; 6] = [2.0, 2.0, 2.0, 2.0, 2.0, 1.0];

/// One billable work entry in the ledger.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// Calendar date in zero-padded ISO text form (YYYY-MM-DD).
    pub date: String,
    /// Student identifier: two capitalized-then-lowercase letter pairs, e.g. "AbCd".
    pub student: String,
    pub subject: String,
    pub school: String,
    /// One of [`CATEGORIES`].
    pub project: String,
    /// Decimal hours, quarter-hour quantized. Kept as text at the store
    /// boundary; numeric interpretation happens per row at layout time.
    pub hours: String,
    pub notes: String,
    pub complete: bool,
}

impl Record {
    /// Tagged per-row parse of the hours field: `None` when the stored text
    /// is not a finite, non-negative real number. Such rows are still
    /// rendered but contribute nothing to the report total.
    pub fn parsed_hours(&self) -> Option<f64> {
        self.hours
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|h| h.is_finite() && *h >= 0.0)
    }
}

/// True when `id` matches the XxXx student-identifier pattern.
pub fn valid_student_id(id: &str) -> bool {
    let mut chars = id.chars();
    let (Some(a), Some(b), Some(c), Some(d), None) = (
        chars.next(),
        chars.next(),
        chars.next(),
        chars.next(),
        chars.next(),
    ) else {
        return false;
    };
    a.is_ascii_uppercase()
        && b.is_ascii_lowercase()
        && c.is_ascii_uppercase()
        && d.is_ascii_lowercase()
}

/// The (date range, category set) filter describing which records a report
/// includes. Both bounds are inclusive.
#[derive(Clone, Debug)]
pub struct ReportQuery {
    pub start_date: String,
    pub end_date: String,
    pub categories: Vec<String>,
}

impl ReportQuery {
    /// Dates pass through lexically without validation; the only enforced
    /// precondition is a non-empty category set. start <= end is
    /// deliberately not checked — a reversed range simply matches nothing.
    pub fn validate(&self) -> Result<(), Error> {
        if self.categories.is_empty() {
            return Err(Error::InvalidQuery("category set is empty".into()));
        }
        Ok(())
    }

    pub fn file_name(&self) -> String {
        format!("LedgerReport_{}_to_{}.pdf", self.start_date, self.end_date)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RowKind {
    Data,
    /// Blank row appended on the first page so the footer band starts at a
    /// fixed vertical offset regardless of data volume. Never drawn, never
    /// counted toward the total.
    Filler,
}

pub struct GridRow {
    pub cells: [String; 6],
    pub kind: RowKind,
}

/// The tabular body of the rendered document.
pub struct Grid {
    pub header: [&'static str; 6],
    pub col_ratios: [f32; 6],
    pub rows: Vec<GridRow>,
}

impl Grid {
    pub fn data_row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.kind == RowKind::Data).count()
    }

    pub fn filler_row_count(&self) -> usize {
        self.rows.iter().filter(|r| r.kind == RowKind::Filler).count()
    }
}
