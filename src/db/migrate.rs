use crate::db::fields;
use crate::db::log::{self, LogOp};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, success, warning};
use rusqlite::{Connection, OptionalExtension, Result};

const LEGACY_FIELDS_VERSION: &str = "20240301_0002_add_clamp_fields";

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create `clamp_data` with the current schema, legacy fields included.
fn create_clamp_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS clamp_data (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            location        TEXT NOT NULL,
            registration    TEXT NOT NULL DEFAULT '',
            clamp_date      TEXT NOT NULL,
            time_in         TEXT NOT NULL,
            time_released   TEXT,
            offense         TEXT NOT NULL,
            payment_status  TEXT NOT NULL DEFAULT 'Processing',
            created_at      TEXT NOT NULL,
            image_path      TEXT DEFAULT '',
            time_called     TEXT DEFAULT '',
            car_type        TEXT DEFAULT '',
            color           TEXT DEFAULT '',
            clamp_reference TEXT DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_clamp_payment_status ON clamp_data(payment_status);
        "#,
    )?;
    Ok(())
}

fn create_appeal_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS appeal (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            clamp_id      INTEGER NOT NULL REFERENCES clamp_data(id),
            appeal_date   TEXT NOT NULL,
            appeal_reason TEXT NOT NULL,
            appeal_status TEXT NOT NULL DEFAULT 'Pending',
            notes         TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_appeal_clamp_id ON appeal(clamp_id);
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = ?1 AND target = ?2
         LIMIT 1",
    )?;
    Ok(chk
        .query_row([LogOp::MigrationApplied.as_str(), version], |_| Ok(()))
        .optional()?
        .is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    log::record(conn, LogOp::MigrationApplied, version, message)
}

/// Bring a pre-existing `clamp_data` up to date with the optional fields.
fn migrate_legacy_clamp_fields(conn: &Connection) -> AppResult<()> {
    if migration_applied(conn, LEGACY_FIELDS_VERSION)? {
        return Ok(());
    }

    let report = fields::migrate_clamp_fields(conn)?;

    for (spec, outcome) in &report.outcomes {
        if let fields::ColumnOutcome::Failed(reason) = outcome {
            error(format!("Skipping {}.{}: {}", spec.table, spec.column, reason));
        }
    }

    if report.failed() > 0 {
        return Err(AppError::Migration(format!(
            "{} of {} clamp fields could not be added",
            report.failed(),
            report.outcomes.len()
        )));
    }

    if report.committed {
        warning(format!(
            "Added {} missing field(s) to clamp_data.",
            report.added()
        ));
    }

    mark_applied(
        conn,
        LEGACY_FIELDS_VERSION,
        "Ensured optional clamp fields on clamp_data",
    )?;
    success(format!("Migration applied: {}", LEGACY_FIELDS_VERSION));
    Ok(())
}

/// Public entry point: create missing tables and run pending migrations.
///
/// Invoked by `init`, `db --migrate` and at server start-up. Idempotent.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    if table_exists(conn, "clamp_data")? {
        migrate_legacy_clamp_fields(conn)?;
    } else {
        create_clamp_table(conn)?;
        mark_applied(
            conn,
            LEGACY_FIELDS_VERSION,
            "Created clamp_data with optional clamp fields",
        )?;
        success("Created clamp_data table.");
    }

    if !table_exists(conn, "appeal")? {
        create_appeal_table(conn)?;
        success("Created appeal table.");
    }

    Ok(())
}
