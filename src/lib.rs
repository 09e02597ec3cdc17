mod error;
mod fonts;
pub mod model;
pub mod pdf;
pub mod store;

pub use error::Error;

use std::path::{Path, PathBuf};
use std::time::Instant;

use model::ReportQuery;
use store::Store;

/// Query the ledger at `db_path` for the given date range and categories
/// and write the rendered report into `dest_dir`, returning the path of the
/// finished file. Runs synchronously to completion; any fatal condition
/// aborts the call before a success is signalled.
pub fn generate_report(
    db_path: &Path,
    query: &ReportQuery,
    dest_dir: &Path,
) -> Result<PathBuf, Error> {
    let t0 = Instant::now();
    query.validate()?;

    let store = Store::open(db_path)?;
    let records = store.fetch(query)?;
    let t_fetch = t0.elapsed();

    let bytes = pdf::render(query, &records)?;
    let t_render = t0.elapsed();

    let path = dest_dir.join(query.file_name());
    std::fs::write(&path, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: fetch={:.1}ms ({} rows), render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_fetch.as_secs_f64() * 1000.0,
        records.len(),
        (t_render - t_fetch).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(path)
}
