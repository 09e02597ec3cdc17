use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ledger_report::model::{ReportQuery, CATEGORIES};

/// Generate a billing report PDF from the work ledger.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the ledger database
    #[arg(long, default_value = "ledger.db")]
    db: PathBuf,

    /// Range start date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    start: String,

    /// Range end date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    end: String,

    /// Project category to include; may be repeated. Defaults to all categories.
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Directory the report is written into
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let categories = if args.categories.is_empty() {
        CATEGORIES.iter().map(|c| c.to_string()).collect()
    } else {
        args.categories
    };
    let query = ReportQuery {
        start_date: args.start,
        end_date: args.end,
        categories,
    };

    match ledger_report::generate_report(&args.db, &query, &args.out_dir) {
        Ok(path) => {
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
