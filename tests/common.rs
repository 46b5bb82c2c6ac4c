#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use clampkeeper::db::initialize::init_db;
use clampkeeper::db::pool::DbPool;
use clampkeeper::models::NewClamp;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn ck() -> Command {
    cargo_bin_cmd!("clampkeeper")
}

pub fn add_fields() -> Command {
    cargo_bin_cmd!("add-clamp-fields")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_clampkeeper.db", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh empty directory inside the system temp dir
pub fn setup_test_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_clampkeeper_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test dir");
    path
}

/// Open a test DB with the current schema
pub fn open_store(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

pub fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("valid time")
}

pub fn main_st_clamp() -> NewClamp {
    NewClamp::new("Main St", date("2024-01-01"), time("09:00"), "No permit")
}

/// Build a store shaped like the ones created before the optional clamp
/// fields existed, with one row already in it.
pub fn create_legacy_store(db_path: &str) {
    create_legacy_store_with_times(db_path, "08:15", None);
}

/// Same as `create_legacy_store`, with the row's time columns stored as given.
pub fn create_legacy_store_with_times(db_path: &str, time_in: &str, time_released: Option<&str>) {
    let conn = rusqlite::Connection::open(db_path).expect("open legacy db");
    conn.execute_batch(
        r#"
        CREATE TABLE clamp_data (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            location       TEXT NOT NULL,
            registration   TEXT DEFAULT '',
            clamp_date     TEXT NOT NULL,
            time_in        TEXT NOT NULL,
            time_released  TEXT,
            offense        TEXT NOT NULL,
            payment_status TEXT DEFAULT 'Processing',
            created_at     TEXT NOT NULL
        );
        "#,
    )
    .expect("create legacy schema");
    conn.execute(
        "INSERT INTO clamp_data (location, registration, clamp_date, time_in, time_released,
                                 offense, payment_status, created_at)
         VALUES ('Old Rd', 'CA 123-456', '2023-06-01', ?1, ?2, 'Blocking exit', 'Paid',
                 '2023-06-01T08:20:00+02:00')",
        rusqlite::params![time_in, time_released],
    )
    .expect("insert legacy row");
}

/// Column names of `table`
pub fn columns(db_path: &str, table: &str) -> Vec<String> {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info('{}')", table))
        .expect("prepare");
    stmt.query_map([], |row| row.get::<_, String>(1))
        .expect("query")
        .map(|r| r.expect("row"))
        .collect()
}
