//! Access layer for `clamp_data`.

use crate::errors::{AppError, AppResult};
use crate::models::{ClampFilter, ClampPatch, ClampRecord, NewClamp, PaymentStatus};
use crate::utils::time::parse_time;
use chrono::{Local, NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result, Row, ToSql, params, params_from_iter};

const SELECT_CLAMP: &str = "SELECT id, location, registration, clamp_date, time_in, time_released,
        offense, payment_status, created_at,
        image_path, time_called, car_type, color, clamp_reference
 FROM clamp_data";

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

pub(crate) fn parse_db_date(col: usize, s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| conversion_error(col, AppError::InvalidDate(s.to_string())))
}

fn parse_db_time(col: usize, s: &str) -> Result<NaiveTime> {
    parse_time(s).ok_or_else(|| conversion_error(col, AppError::InvalidTime(s.to_string())))
}

pub fn map_clamp_row(row: &Row) -> Result<ClampRecord> {
    let date_str: String = row.get("clamp_date")?;
    let time_in_str: String = row.get("time_in")?;
    let released: Option<String> = row.get("time_released")?;
    let status_str: String = row.get("payment_status")?;

    let payment_status = PaymentStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(7, AppError::InvalidPaymentStatus(status_str.clone())))?;

    // Older rows store an empty string rather than NULL for "not released".
    let time_released = match released.as_deref() {
        None | Some("") => None,
        Some(s) => Some(parse_db_time(5, s)?),
    };

    Ok(ClampRecord {
        id: row.get("id")?,
        location: row.get("location")?,
        registration: row.get::<_, Option<String>>("registration")?.unwrap_or_default(),
        clamp_date: parse_db_date(3, &date_str)?,
        time_in: parse_db_time(4, &time_in_str)?,
        time_released,
        offense: row.get("offense")?,
        payment_status,
        created_at: row.get("created_at")?,
        image_path: row.get::<_, Option<String>>("image_path")?.unwrap_or_default(),
        time_called: row.get::<_, Option<String>>("time_called")?.unwrap_or_default(),
        car_type: row.get::<_, Option<String>>("car_type")?.unwrap_or_default(),
        color: row.get::<_, Option<String>>("color")?.unwrap_or_default(),
        clamp_reference: row
            .get::<_, Option<String>>("clamp_reference")?
            .unwrap_or_default(),
    })
}

fn fmt_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

/// Insert a new clamp record and return its id.
pub fn create_clamp(conn: &Connection, clamp: &NewClamp) -> AppResult<i64> {
    clamp.validate()?;

    conn.execute(
        "INSERT INTO clamp_data (location, registration, clamp_date, time_in, time_released,
                                 offense, payment_status, created_at,
                                 image_path, time_called, car_type, color, clamp_reference)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            clamp.location.trim(),
            clamp.registration.trim(),
            clamp.clamp_date.format("%Y-%m-%d").to_string(),
            fmt_time(clamp.time_in),
            clamp.time_released.map(fmt_time),
            clamp.offense.trim(),
            clamp.payment_status.to_db_str(),
            Local::now().to_rfc3339(),
            clamp.image_path,
            clamp.time_called,
            clamp.car_type,
            clamp.color,
            clamp.clamp_reference,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn find_clamp(conn: &Connection, id: i64) -> AppResult<Option<ClampRecord>> {
    let mut stmt = conn.prepare_cached(&format!("{SELECT_CLAMP} WHERE id = ?1"))?;
    Ok(stmt.query_row([id], map_clamp_row).optional()?)
}

pub fn get_clamp(conn: &Connection, id: i64) -> AppResult<ClampRecord> {
    find_clamp(conn, id)?.ok_or_else(|| AppError::not_found("Clamp", id))
}

pub fn clamp_exists(conn: &Connection, id: i64) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM clamp_data WHERE id = ?1")?;
    Ok(stmt.exists([id])?)
}

/// List clamp records in insertion order, optionally filtered.
pub fn list_clamps(conn: &Connection, filter: Option<ClampFilter>) -> AppResult<Vec<ClampRecord>> {
    let (sql, args): (String, Vec<String>) = match filter {
        None => (format!("{SELECT_CLAMP} ORDER BY id ASC"), vec![]),
        Some(ClampFilter::PaymentStatus(s)) => (
            format!("{SELECT_CLAMP} WHERE payment_status = ?1 ORDER BY id ASC"),
            vec![s.to_db_str().to_string()],
        ),
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(args.iter()), map_clamp_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Overwrite the fields present in `patch` and return the updated record.
///
/// Runs as a single UPDATE; fields left as `None` keep their stored value.
pub fn update_clamp(conn: &Connection, id: i64, patch: &ClampPatch) -> AppResult<ClampRecord> {
    patch.validate()?;

    if patch.is_empty() {
        return get_clamp(conn, id);
    }

    let mut sets: Vec<&str> = Vec::new();
    let mut values: Vec<Box<dyn ToSql>> = Vec::new();

    let mut set = |column: &'static str, value: Box<dyn ToSql>| {
        sets.push(column);
        values.push(value);
    };

    if let Some(v) = &patch.location {
        set("location", Box::new(v.trim().to_string()));
    }
    if let Some(v) = &patch.registration {
        set("registration", Box::new(v.trim().to_string()));
    }
    if let Some(v) = patch.clamp_date {
        set("clamp_date", Box::new(v.format("%Y-%m-%d").to_string()));
    }
    if let Some(v) = patch.time_in {
        set("time_in", Box::new(fmt_time(v)));
    }
    if let Some(v) = patch.time_released {
        set("time_released", Box::new(v.map(fmt_time)));
    }
    if let Some(v) = &patch.offense {
        set("offense", Box::new(v.trim().to_string()));
    }
    if let Some(v) = patch.payment_status {
        set("payment_status", Box::new(v.to_db_str()));
    }
    if let Some(v) = &patch.image_path {
        set("image_path", Box::new(v.clone()));
    }
    if let Some(v) = &patch.time_called {
        set("time_called", Box::new(v.clone()));
    }
    if let Some(v) = &patch.car_type {
        set("car_type", Box::new(v.clone()));
    }
    if let Some(v) = &patch.color {
        set("color", Box::new(v.clone()));
    }
    if let Some(v) = &patch.clamp_reference {
        set("clamp_reference", Box::new(v.clone()));
    }

    let assignments = sets
        .iter()
        .enumerate()
        .map(|(i, col)| format!("{} = ?{}", col, i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE clamp_data SET {} WHERE id = ?{}",
        assignments,
        values.len() + 1
    );
    values.push(Box::new(id));

    let changed = conn.execute(&sql, params_from_iter(values.iter()))?;
    if changed == 0 {
        return Err(AppError::not_found("Clamp", id));
    }

    get_clamp(conn, id)
}

/// Delete a clamp record.
///
/// Refused with `ClampHasAppeals` while any appeal references the clamp; the
/// check and the delete are one statement.
pub fn delete_clamp(conn: &Connection, id: i64) -> AppResult<()> {
    let deleted = conn.execute(
        "DELETE FROM clamp_data
         WHERE id = ?1
           AND NOT EXISTS (SELECT 1 FROM appeal WHERE clamp_id = ?1)",
        [id],
    )?;

    if deleted == 1 {
        return Ok(());
    }

    if clamp_exists(conn, id)? {
        Err(AppError::ClampHasAppeals(id))
    } else {
        Err(AppError::not_found("Clamp", id))
    }
}
