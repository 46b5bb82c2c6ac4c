//! Audit trail kept in the `log` table.

use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::{Connection, params};

/// Operation names written to `log.operation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOp {
    Init,
    Add,
    Edit,
    Del,
    MigrationApplied,
}

impl LogOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogOp::Init => "init",
            LogOp::Add => "add",
            LogOp::Edit => "edit",
            LogOp::Del => "del",
            LogOp::MigrationApplied => "migration_applied",
        }
    }
}

pub fn record(conn: &Connection, op: LogOp, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message) VALUES (?1, ?2, ?3, ?4)",
    )?
    .execute(params![Local::now().to_rfc3339(), op.as_str(), target, message])?;
    Ok(())
}

/// A failed audit write never fails the operation it describes.
pub fn record_quiet(conn: &Connection, op: LogOp, target: &str, message: &str) {
    if let Err(e) = record(conn, op, target, message) {
        tracing::warn!(error = %e, op = op.as_str(), log_target = target, "audit log write failed");
        warning(format!("Failed to write internal log: {}", e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_operation_name_and_target() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE log (id INTEGER PRIMARY KEY, date TEXT NOT NULL,
             operation TEXT NOT NULL, target TEXT DEFAULT '', message TEXT NOT NULL);",
        )
        .unwrap();

        record(&conn, LogOp::Del, "clamp #4", "Clamp record deleted").unwrap();

        let (op, target): (String, String) = conn
            .query_row("SELECT operation, target FROM log", [], |r| {
                Ok((r.get(0)?, r.get(1)?))
            })
            .unwrap();
        assert_eq!(op, "del");
        assert_eq!(target, "clamp #4");
    }
}
