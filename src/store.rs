use std::path::Path;

use log::debug;
use rusqlite::{params, params_from_iter, Connection};

use crate::error::Error;
use crate::model::{valid_student_id, Record, ReportQuery};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS ledger (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    student TEXT NOT NULL,
    subject TEXT NOT NULL,
    school TEXT NOT NULL,
    project TEXT NOT NULL,
    hours TEXT NOT NULL,
    notes TEXT NOT NULL,
    complete BOOLEAN NOT NULL
)";

/// Read access to the on-disk record store. The connection is acquired per
/// call site and released on drop; nothing is pooled or shared.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open the ledger database at `path`, creating the schema if missing.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert one work entry. The student identifier must match the XxXx
    /// pattern; everything else is stored as given.
    pub fn insert(&self, record: &Record) -> Result<(), Error> {
        if !valid_student_id(&record.student) {
            return Err(Error::InvalidRecord(format!(
                "student identifier '{}' does not match the XxXx pattern",
                record.student
            )));
        }
        let notes = record.notes.replace('\n', "\\n");
        self.conn.execute(
            "INSERT INTO ledger (date, student, subject, school, project, hours, notes, complete)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.date,
                record.student,
                record.subject,
                record.school,
                record.project,
                record.hours,
                notes,
                record.complete,
            ],
        )?;
        Ok(())
    }

    /// Fetch the records matching `query`, ordered ascending by date
    /// (lexical order equals chronological order for zero-padded ISO dates).
    /// An empty result set is not an error.
    pub fn fetch(&self, query: &ReportQuery) -> Result<Vec<Record>, Error> {
        query.validate()?;

        let sql = select_sql(query.categories.len());
        let mut stmt = self.conn.prepare(&sql)?;
        let bindings = std::iter::once(query.start_date.as_str())
            .chain(std::iter::once(query.end_date.as_str()))
            .chain(query.categories.iter().map(String::as_str));

        let rows = stmt.query_map(params_from_iter(bindings), |row| {
            Ok(Record {
                date: row.get("date")?,
                student: row.get("student")?,
                subject: row.get("subject")?,
                school: row.get("school")?,
                project: row.get("project")?,
                hours: row.get("hours")?,
                notes: row.get("notes")?,
                complete: row.get("complete")?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        debug!(
            "fetched {} ledger rows for {}..{} ({} categories)",
            records.len(),
            query.start_date,
            query.end_date,
            query.categories.len(),
        );
        Ok(records)
    }
}

/// The category condition is rebuilt per call since the set size varies:
/// 2 positional bindings for the date range plus one per selected category.
fn select_sql(category_count: usize) -> String {
    let placeholders = vec!["?"; category_count].join(",");
    format!(
        "SELECT date, student, subject, school, project, hours, notes, complete \
         FROM ledger WHERE date BETWEEN ? AND ? AND project IN ({placeholders}) \
         ORDER BY date"
    )
}
