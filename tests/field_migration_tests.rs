mod common;
use clampkeeper::db::clamps::list_clamps;
use clampkeeper::db::fields::{ColumnOutcome, LEGACY_COLUMNS, migrate_clamp_fields};
use clampkeeper::db::migrate::{run_pending_migrations, table_exists};
use clampkeeper::db::pool::DbPool;
use clampkeeper::models::{ClampFilter, PaymentStatus};
use common::{
    add_fields, columns, create_legacy_store, create_legacy_store_with_times, setup_test_db,
    setup_test_dir, time,
};
use predicates::str::contains;
use std::fs;

const LEGACY_NAMES: [&str; 5] = ["image_path", "time_called", "car_type", "color", "clamp_reference"];

#[test]
fn test_legacy_store_gains_exactly_the_missing_columns() {
    let db_path = setup_test_db("fields_legacy_gain");
    create_legacy_store(&db_path);
    let before = columns(&db_path, "clamp_data");

    let pool = DbPool::open_existing(&db_path).expect("open");
    let report = migrate_clamp_fields(&pool.conn).expect("migrate");

    assert_eq!(report.added(), 5);
    assert_eq!(report.failed(), 0);
    assert!(report.committed);

    let after = columns(&db_path, "clamp_data");
    assert_eq!(after.len(), before.len() + 5);
    for name in LEGACY_NAMES {
        assert!(after.iter().any(|c| c == name), "missing column {}", name);
    }

    // Existing rows read back the default for every new column.
    let blanks: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM clamp_data
             WHERE image_path = '' AND time_called = '' AND car_type = ''
               AND color = '' AND clamp_reference = ''",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(blanks, 1);
}

#[test]
fn test_second_run_changes_nothing() {
    let db_path = setup_test_db("fields_second_run");
    create_legacy_store(&db_path);

    let pool = DbPool::open_existing(&db_path).expect("open");
    migrate_clamp_fields(&pool.conn).expect("first run");
    let cols = columns(&db_path, "clamp_data");

    let report = migrate_clamp_fields(&pool.conn).expect("second run");
    assert_eq!(report.already_present(), LEGACY_COLUMNS.len());
    assert!(report.outcomes.iter().all(|(_, o)| *o == ColumnOutcome::AlreadyPresent));
    assert!(!report.committed);
    assert_eq!(columns(&db_path, "clamp_data"), cols);
}

#[test]
fn test_partially_migrated_store_only_gets_what_is_missing() {
    let db_path = setup_test_db("fields_partial");
    create_legacy_store(&db_path);

    let pool = DbPool::open_existing(&db_path).expect("open");
    pool.conn
        .execute("ALTER TABLE clamp_data ADD COLUMN color TEXT DEFAULT ''", [])
        .unwrap();

    let report = migrate_clamp_fields(&pool.conn).expect("migrate");
    assert_eq!(report.added(), 4);
    assert_eq!(report.already_present(), 1);

    let color = report
        .outcomes
        .iter()
        .find(|(spec, _)| spec.column == "color")
        .map(|(_, o)| o.clone());
    assert_eq!(color, Some(ColumnOutcome::AlreadyPresent));
}

#[test]
fn test_pending_migrations_upgrade_a_legacy_store() {
    let db_path = setup_test_db("fields_pending_legacy");
    create_legacy_store(&db_path);

    let pool = DbPool::new(&db_path).expect("open");
    run_pending_migrations(&pool.conn).expect("migrate");

    assert!(table_exists(&pool.conn, "appeal").unwrap());
    let records = list_clamps(&pool.conn, None).expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].location, "Old Rd");
    assert_eq!(records[0].clamp_reference, "");

    // Recorded once; the next run is a no-op.
    run_pending_migrations(&pool.conn).expect("migrate again");
    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(applied, 1);
}

#[test]
fn test_legacy_rows_with_fractional_seconds_are_readable() {
    let db_path = setup_test_db("fields_fractional_times");
    create_legacy_store_with_times(&db_path, "08:15:00.000000", Some("10:40:00.000000"));

    let pool = DbPool::new(&db_path).expect("open");
    run_pending_migrations(&pool.conn).expect("migrate");

    let records = list_clamps(&pool.conn, None).expect("list");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].time_in, time("08:15"));
    assert_eq!(records[0].time_released, Some(time("10:40")));
    assert_eq!(records[0].time_in_str(), "08:15");

    let paid = list_clamps(
        &pool.conn,
        Some(ClampFilter::PaymentStatus(PaymentStatus::Paid)),
    )
    .expect("list paid");
    assert_eq!(paid.len(), 1);
}

#[test]
fn test_utility_migrates_explicit_path() {
    let db_path = setup_test_db("fields_cli_explicit");
    create_legacy_store(&db_path);

    add_fields()
        .env("NO_COLOR", "1")
        .arg(&db_path)
        .assert()
        .success()
        .stdout(contains("Added column image_path to clamp_data"))
        .stdout(contains("Added column clamp_reference to clamp_data"))
        .stdout(contains("Migration complete."));

    add_fields()
        .env("NO_COLOR", "1")
        .arg(&db_path)
        .assert()
        .success()
        .stdout(contains("Column color already exists on clamp_data"))
        .stdout(contains("No changes needed."));
}

#[test]
fn test_utility_reports_missing_explicit_path() {
    let dir = setup_test_dir("fields_cli_missing");
    let missing = dir.join("nope.db");

    add_fields()
        .arg(&missing)
        .assert()
        .failure()
        .stderr(contains("Database not found at"));

    assert!(!missing.exists());
}

#[test]
fn test_utility_without_candidates_fails() {
    let dir = setup_test_dir("fields_cli_no_candidates");

    add_fields()
        .current_dir(&dir)
        .assert()
        .failure()
        .stderr(contains("No database file found"));
}

#[test]
fn test_utility_prefers_instance_directory() {
    let dir = setup_test_dir("fields_cli_instance");
    fs::create_dir_all(dir.join("instance")).unwrap();

    let instance_db = dir.join("instance").join("clamping_business.db");
    let root_db = dir.join("clamping_business.db");
    create_legacy_store(&instance_db.to_string_lossy());
    create_legacy_store(&root_db.to_string_lossy());

    add_fields()
        .env("NO_COLOR", "1")
        .current_dir(&dir)
        .assert()
        .success()
        .stdout(contains("Migration complete."));

    assert!(columns(&instance_db.to_string_lossy(), "clamp_data").contains(&"color".to_string()));
    assert!(!columns(&root_db.to_string_lossy(), "clamp_data").contains(&"color".to_string()));
}
