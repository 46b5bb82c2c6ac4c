//! Access layer for `appeal`.

use crate::db::clamps::{clamp_exists, parse_db_date};
use crate::errors::{AppError, AppResult};
use crate::models::{AppealPatch, AppealRecord, AppealStatus, AppealWithClamp, NewAppeal};
use chrono::Local;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params, params_from_iter};

const SELECT_APPEAL: &str = "SELECT a.id, a.clamp_id, a.appeal_date, a.appeal_reason,
        a.appeal_status, a.notes, a.created_at
 FROM appeal a";

pub fn map_appeal_row(row: &Row) -> Result<AppealRecord> {
    let date_str: String = row.get("appeal_date")?;
    let status_str: String = row.get("appeal_status")?;

    let appeal_status = AppealStatus::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            Box::new(AppError::InvalidAppealStatus(status_str.clone())),
        )
    })?;

    Ok(AppealRecord {
        id: row.get("id")?,
        clamp_id: row.get("clamp_id")?,
        appeal_date: parse_db_date(2, &date_str)?,
        appeal_reason: row.get("appeal_reason")?,
        appeal_status,
        notes: row.get("notes")?,
        created_at: row.get("created_at")?,
    })
}

fn ensure_clamp(conn: &Connection, clamp_id: i64) -> AppResult<()> {
    if clamp_exists(conn, clamp_id)? {
        Ok(())
    } else {
        Err(AppError::not_found("Clamp", clamp_id))
    }
}

/// Blank notes are stored as NULL.
fn normalize_notes(notes: &Option<String>) -> Option<String> {
    notes
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Insert a new appeal against an existing clamp and return its id.
pub fn create_appeal(conn: &Connection, appeal: &NewAppeal) -> AppResult<i64> {
    appeal.validate()?;
    ensure_clamp(conn, appeal.clamp_id)?;

    conn.execute(
        "INSERT INTO appeal (clamp_id, appeal_date, appeal_reason, appeal_status, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            appeal.clamp_id,
            appeal.appeal_date.format("%Y-%m-%d").to_string(),
            appeal.appeal_reason.trim(),
            appeal.appeal_status.to_db_str(),
            normalize_notes(&appeal.notes),
            Local::now().to_rfc3339(),
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn get_appeal(conn: &Connection, id: i64) -> AppResult<AppealRecord> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_APPEAL} WHERE a.id = ?1"))?;
    stmt.query_row([id], map_appeal_row)
        .optional()?
        .ok_or_else(|| AppError::not_found("Appeal", id))
}

pub fn list_appeals(conn: &Connection) -> AppResult<Vec<AppealRecord>> {
    let mut stmt = conn.prepare(&format!("{SELECT_APPEAL} ORDER BY a.id ASC"))?;
    let rows = stmt.query_map([], map_appeal_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_appeals_for_clamp(conn: &Connection, clamp_id: i64) -> AppResult<Vec<AppealRecord>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_APPEAL} WHERE a.clamp_id = ?1 ORDER BY a.id ASC"
    ))?;
    let rows = stmt.query_map([clamp_id], map_appeal_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// All appeals with the location and registration of the disputed clamp.
pub fn list_appeals_with_clamp(conn: &Connection) -> AppResult<Vec<AppealWithClamp>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.clamp_id, a.appeal_date, a.appeal_reason,
                a.appeal_status, a.notes, a.created_at,
                c.location, c.registration
         FROM appeal a
         JOIN clamp_data c ON c.id = a.clamp_id
         ORDER BY a.id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(AppealWithClamp {
            appeal: map_appeal_row(row)?,
            location: row.get("location")?,
            registration: row
                .get::<_, Option<String>>("registration")?
                .unwrap_or_default(),
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_appeals_for_clamp(conn: &Connection, clamp_id: i64) -> AppResult<i64> {
    let n = conn.query_row(
        "SELECT COUNT(*) FROM appeal WHERE clamp_id = ?1",
        [clamp_id],
        |row| row.get(0),
    )?;
    Ok(n)
}

/// Overwrite the fields present in `patch` and return the updated appeal.
pub fn update_appeal(conn: &Connection, id: i64, patch: &AppealPatch) -> AppResult<AppealRecord> {
    patch.validate()?;

    if patch.is_empty() {
        return get_appeal(conn, id);
    }

    if let Some(clamp_id) = patch.clamp_id {
        ensure_clamp(conn, clamp_id)?;
    }

    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(v) = patch.clamp_id {
        sets.push("clamp_id");
        values.push(Box::new(v));
    }
    if let Some(v) = patch.appeal_date {
        sets.push("appeal_date");
        values.push(Box::new(v.format("%Y-%m-%d").to_string()));
    }
    if let Some(v) = &patch.appeal_reason {
        sets.push("appeal_reason");
        values.push(Box::new(v.trim().to_string()));
    }
    if let Some(v) = patch.appeal_status {
        sets.push("appeal_status");
        values.push(Box::new(v.to_db_str()));
    }
    if let Some(v) = &patch.notes {
        sets.push("notes");
        values.push(Box::new(normalize_notes(v)));
    }

    let assignments = sets
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{} = ?{}", col, i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE appeal SET {} WHERE id = ?{}",
        assignments,
        values.len() + 1
    );
    values.push(Box::new(id));

    let changed = conn.execute(&sql, params_from_iter(values.iter()))?;
    if changed == 0 {
        return Err(AppError::not_found("Appeal", id));
    }

    get_appeal(conn, id)
}

pub fn delete_appeal(conn: &Connection, id: i64) -> AppResult<()> {
    let deleted = conn.execute("DELETE FROM appeal WHERE id = ?1", [id])?;
    if deleted == 0 {
        return Err(AppError::not_found("Appeal", id));
    }
    Ok(())
}
