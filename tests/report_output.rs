mod common;

use ledger_report::model::{ReportQuery, CATEGORIES};
use ledger_report::Error;

use common::{all_categories, output_dir, page_streams, record, seed_store};

fn query(start: &str, end: &str) -> ReportQuery {
    ReportQuery {
        start_date: start.into(),
        end_date: end.into(),
        categories: all_categories(),
    }
}

#[test]
fn single_page_report() {
    let dir = output_dir("single_page");
    let db = dir.join("ledger.db");
    seed_store(
        &db,
        &[
            record("2024-05-20", "AlPu", CATEGORIES[0], "1.5"),
            record("2024-05-21", "BeQu", CATEGORIES[2], "2.5"),
            record("2024-05-22", "CaRo", CATEGORIES[4], "N/A"),
        ],
    );

    let q = query("2024-05-16", "2024-06-15");
    let path = ledger_report::generate_report(&db, &q, &dir).expect("report generated");
    assert!(path.ends_with("LedgerReport_2024-05-16_to_2024-06-15.pdf"));

    let bytes = std::fs::read(&path).expect("read report");
    let pages = page_streams(&bytes);
    assert_eq!(pages.len(), 1, "three records fit on one page");

    let page = &pages[0];
    assert!(page.contains("(INVOICE: 2024-05-16 to 2024-06-15) Tj"));
    // the unparseable row is rendered verbatim but excluded from the total
    assert!(page.contains("(N/A) Tj"));
    assert!(page.contains("(Total Billed Hours: 4.00) Tj"));
    assert!(page.contains("(Page 1 of) Tj"));
    assert!(page.contains("(1) Tj"));
}

#[test]
fn multi_page_report_resolves_count_on_every_page() {
    let dir = output_dir("multi_page");
    let db = dir.join("ledger.db");
    let records: Vec<_> = (0..60)
        .map(|i| {
            record(
                &format!("2024-06-{:02}", 1 + i % 28),
                "AlPu",
                CATEGORIES[i % CATEGORIES.len()],
                "0.25",
            )
        })
        .collect();
    seed_store(&db, &records);

    let q = query("2024-06-01", "2024-06-30");
    let path = ledger_report::generate_report(&db, &q, &dir).expect("report generated");

    let bytes = std::fs::read(&path).expect("read report");
    let pages = page_streams(&bytes);
    assert_eq!(pages.len(), 3, "60 records flow onto three pages");

    for (i, page) in pages.iter().enumerate() {
        let label = format!("(Page {} of) Tj", i + 1);
        assert!(page.contains(&label), "page {} label", i + 1);
        assert!(page.contains("(3) Tj"), "page {} resolved count", i + 1);
    }
    assert!(pages[2].contains("(Total Billed Hours: 15.00) Tj"));
    // title and shaded header row appear on the first page only
    assert!(pages[0].contains("(INVOICE:"));
    assert!(!pages[1].contains("(INVOICE:"));
}

#[test]
fn empty_range_still_produces_a_report() {
    let dir = output_dir("empty_range");
    let db = dir.join("ledger.db");
    seed_store(&db, &[]);

    let q = query("2024-01-01", "2024-01-31");
    let path = ledger_report::generate_report(&db, &q, &dir).expect("report generated");

    let bytes = std::fs::read(&path).expect("read report");
    let pages = page_streams(&bytes);
    assert_eq!(pages.len(), 1);
    assert!(pages[0].contains("(Total Billed Hours: 0.00) Tj"));
    assert!(pages[0].contains("(Page 1 of) Tj"));
}

#[test]
fn empty_category_set_is_rejected_before_opening_the_store() {
    let dir = output_dir("bad_query");
    let q = ReportQuery {
        start_date: "2024-01-01".into(),
        end_date: "2024-01-31".into(),
        categories: Vec::new(),
    };
    let err = ledger_report::generate_report(&dir.join("absent.db"), &q, &dir)
        .expect_err("empty category set must fail");
    assert!(matches!(err, Error::InvalidQuery(_)));
}

#[test]
fn missing_destination_directory_is_an_io_error() {
    let dir = output_dir("missing_dest");
    let db = dir.join("ledger.db");
    seed_store(&db, &[record("2024-05-20", "AlPu", CATEGORIES[0], "1.0")]);

    let q = query("2024-05-16", "2024-06-15");
    let err = ledger_report::generate_report(&db, &q, &dir.join("does-not-exist"))
        .expect_err("writing into a missing directory must fail");
    assert!(matches!(err, Error::Io(_)));
}
