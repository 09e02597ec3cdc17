#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ledger_report::model::{Record, CATEGORIES};
use ledger_report::store::Store;

/// Output directory: tests/output/<case>/
pub fn output_dir(case: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(case);
    std::fs::create_dir_all(&dir).expect("create output dir");
    dir
}

pub fn record(date: &str, student: &str, project: &str, hours: &str) -> Record {
    Record {
        date: date.into(),
        student: student.into(),
        subject: "Math".into(),
        school: "Farmington Elementary".into(),
        project: project.into(),
        hours: hours.into(),
        notes: String::new(),
        complete: true,
    }
}

pub fn all_categories() -> Vec<String> {
    CATEGORIES.iter().map(|c| c.to_string()).collect()
}

/// Create a fresh ledger database at `path` seeded with `records`.
pub fn seed_store(path: &Path, records: &[Record]) {
    let _ = std::fs::remove_file(path);
    let store = Store::open(path).expect("open store");
    for r in records {
        store.insert(r).expect("insert record");
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Decompress every Flate stream in the file. The report embeds no font
/// programs or images, so each stream is exactly one page's content, in
/// page order.
pub fn page_streams(pdf: &[u8]) -> Vec<String> {
    let mut pages = Vec::new();
    let marker = b"stream\n";
    let mut i = 0;
    while i + marker.len() <= pdf.len() {
        let here = &pdf[i..i + marker.len()];
        let is_endstream = i >= 3 && &pdf[i - 3..i] == b"end";
        if here == marker && !is_endstream {
            let start = i + marker.len();
            let Some(end_rel) = find(&pdf[start..], b"endstream") else {
                break;
            };
            let mut end = start + end_rel;
            if end > start && pdf[end - 1] == b'\n' {
                end -= 1;
            }
            if let Ok(raw) = miniz_oxide::inflate::decompress_to_vec_zlib(&pdf[start..end]) {
                pages.push(String::from_utf8_lossy(&raw).into_owned());
            }
            i = start + end_rel + b"endstream".len();
            continue;
        }
        i += 1;
    }
    pages
}
