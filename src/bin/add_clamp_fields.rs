//! Add missing optional clamp fields to an existing SQLite database.
//!
//! Usage: `add-clamp-fields [path/to/db]`
//!
//! Without a path, `instance/clamping_business.db` and then
//! `clamping_business.db` are tried in the current directory.

use clampkeeper::db::fields::{self, ColumnOutcome};
use clampkeeper::db::pool::DbPool;
use clampkeeper::errors::AppResult;
use clampkeeper::ui::messages::{error, info, success, warning};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "add-clamp-fields",
    version = env!("CARGO_PKG_VERSION"),
    about = "Add missing clamp fields to an existing SQLite database"
)]
struct Args {
    /// Database file (default: instance/clamping_business.db or clamping_business.db)
    path: Option<PathBuf>,
}

fn run(args: Args) -> AppResult<()> {
    let cwd = std::env::current_dir()?;
    let db_path = fields::resolve_database_path(args.path.as_deref(), &cwd)?;

    info(format!("Database: {}", db_path.display()));

    let pool = DbPool::open_existing(&db_path)?;
    let report = fields::migrate_clamp_fields(&pool.conn)?;

    for (spec, outcome) in &report.outcomes {
        match outcome {
            ColumnOutcome::Added => success(format!("Added column {} to {}", spec.column, spec.table)),
            ColumnOutcome::AlreadyPresent => {
                info(format!("Column {} already exists on {}", spec.column, spec.table))
            }
            ColumnOutcome::Failed(reason) => {
                warning(format!("Skipping {}.{}: {}", spec.table, spec.column, reason))
            }
        }
    }

    if report.committed {
        success("Migration complete.");
    } else {
        info("No changes needed.");
    }

    Ok(())
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        error(e);
        std::process::exit(1);
    }
}
