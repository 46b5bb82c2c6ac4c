//! Additive migration of the optional clamp columns.
//!
//! Older stores were created before `clamp_data` carried the photo, call-out
//! and vehicle-description fields. Each column is checked once; missing ones
//! are added with their default, existing ones are left alone. Nothing is
//! written unless at least one column was actually added.

use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use std::fmt;
use std::path::{Path, PathBuf};

/// Locations probed, in order, when no database path is given.
pub const DEFAULT_CANDIDATES: [&str; 2] = ["instance/clamping_business.db", "clamping_business.db"];

/// Typed column default, rendered to SQL only when the statement is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    Text(&'static str),
}

impl ColumnDefault {
    pub fn to_sql_literal(&self) -> String {
        match self {
            ColumnDefault::Text(s) => format!("'{}'", s.replace('\'', "''")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub table: &'static str,
    pub column: &'static str,
    pub sql_type: &'static str,
    pub default: ColumnDefault,
}

impl ColumnSpec {
    const fn text(table: &'static str, column: &'static str) -> Self {
        Self {
            table,
            column,
            sql_type: "TEXT",
            default: ColumnDefault::Text(""),
        }
    }

    fn alter_sql(&self) -> String {
        format!(
            "ALTER TABLE {} ADD COLUMN {} {} DEFAULT {}",
            self.table,
            self.column,
            self.sql_type,
            self.default.to_sql_literal()
        )
    }
}

pub const LEGACY_COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec::text("clamp_data", "image_path"),
    ColumnSpec::text("clamp_data", "time_called"),
    ColumnSpec::text("clamp_data", "car_type"),
    ColumnSpec::text("clamp_data", "color"),
    ColumnSpec::text("clamp_data", "clamp_reference"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOutcome {
    Added,
    AlreadyPresent,
    Failed(String),
}

impl fmt::Display for ColumnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnOutcome::Added => f.write_str("added"),
            ColumnOutcome::AlreadyPresent => f.write_str("already present"),
            ColumnOutcome::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FieldMigrationReport {
    pub outcomes: Vec<(ColumnSpec, ColumnOutcome)>,
    /// True when the run committed at least one schema change.
    pub committed: bool,
}

impl FieldMigrationReport {
    pub fn added(&self) -> usize {
        self.count(|o| matches!(o, ColumnOutcome::Added))
    }

    pub fn already_present(&self) -> usize {
        self.count(|o| matches!(o, ColumnOutcome::AlreadyPresent))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ColumnOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&ColumnOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Check if `table` has a column named `column`.
pub fn column_exists(conn: &Connection, table: &str, column: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn apply_column(conn: &Connection, spec: &ColumnSpec) -> ColumnOutcome {
    match column_exists(conn, spec.table, spec.column) {
        Ok(true) => ColumnOutcome::AlreadyPresent,
        Ok(false) => match conn.execute(&spec.alter_sql(), []) {
            Ok(_) => ColumnOutcome::Added,
            Err(e) => ColumnOutcome::Failed(e.to_string()),
        },
        Err(e) => ColumnOutcome::Failed(e.to_string()),
    }
}

/// Add every missing column of `LEGACY_COLUMNS`.
///
/// All changes share one transaction, committed only if something was added.
/// A failing column is recorded and the remaining columns are still processed.
pub fn migrate_clamp_fields(conn: &Connection) -> AppResult<FieldMigrationReport> {
    migrate_columns(conn, &LEGACY_COLUMNS)
}

pub fn migrate_columns(conn: &Connection, specs: &[ColumnSpec]) -> AppResult<FieldMigrationReport> {
    let tx = conn.unchecked_transaction()?;
    let mut report = FieldMigrationReport::default();

    for spec in specs {
        let outcome = apply_column(&tx, spec);
        report.outcomes.push((*spec, outcome));
    }

    if report.added() > 0 {
        tx.commit()?;
        report.committed = true;
    } else {
        tx.rollback()?;
    }

    Ok(report)
}

/// Resolve which database file the utility should operate on.
///
/// An explicit path must exist. Without one, `DEFAULT_CANDIDATES` are probed
/// relative to `base`.
pub fn resolve_database_path(explicit: Option<&Path>, base: &Path) -> AppResult<PathBuf> {
    if let Some(p) = explicit {
        if p.exists() {
            return Ok(p.to_path_buf());
        }
        return Err(AppError::DatabaseNotFound(p.display().to_string()));
    }

    DEFAULT_CANDIDATES
        .iter()
        .map(|c| base.join(c))
        .find(|p| p.exists())
        .ok_or(AppError::NoDatabase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_literal_is_quoted_and_escaped() {
        assert_eq!(ColumnDefault::Text("").to_sql_literal(), "''");
        assert_eq!(ColumnDefault::Text("it's").to_sql_literal(), "'it''s'");
    }

    #[test]
    fn alter_statement_carries_type_and_default() {
        assert_eq!(
            LEGACY_COLUMNS[0].alter_sql(),
            "ALTER TABLE clamp_data ADD COLUMN image_path TEXT DEFAULT ''"
        );
    }

    #[test]
    fn failure_on_one_column_does_not_stop_the_rest() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE clamp_data (id INTEGER PRIMARY KEY, location TEXT);")
            .unwrap();

        let specs = [
            ColumnSpec::text("no_such_table", "image_path"),
            ColumnSpec::text("clamp_data", "color"),
        ];
        let report = migrate_columns(&conn, &specs).unwrap();

        assert!(matches!(report.outcomes[0].1, ColumnOutcome::Failed(_)));
        assert_eq!(report.outcomes[1].1, ColumnOutcome::Added);
        assert!(report.committed);
        assert!(column_exists(&conn, "clamp_data", "color").unwrap());
    }
}
