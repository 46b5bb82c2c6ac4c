mod common;
use clampkeeper::db::clamps::create_clamp;
use clampkeeper::db::pool::DbPool;
use clampkeeper::models::PaymentStatus;
use common::{ck, columns, create_legacy_store, main_st_clamp, setup_test_db};
use predicates::str::contains;

fn init(db_path: &str) {
    ck().args(["--db", db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));
}

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("cli_init");
    init(&db_path);

    let cols = columns(&db_path, "clamp_data");
    assert!(cols.contains(&"payment_status".to_string()));
    assert!(cols.contains(&"clamp_reference".to_string()));
    assert!(!columns(&db_path, "appeal").is_empty());
}

#[test]
fn test_list_empty_and_filtered() {
    let db_path = setup_test_db("cli_list");
    init(&db_path);

    ck().env("NO_COLOR", "1")
        .args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("No clamp records."));

    {
        let pool = DbPool::new(&db_path).unwrap();
        let mut paid = main_st_clamp();
        paid.location = "Paid Ave".into();
        paid.payment_status = PaymentStatus::Paid;
        create_clamp(&pool.conn, &main_st_clamp()).unwrap();
        create_clamp(&pool.conn, &paid).unwrap();
    }

    ck().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("Main St"))
        .stdout(contains("Paid Ave"));

    let out = ck()
        .args(["--db", &db_path, "list", "--paid"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8_lossy(&out);
    assert!(text.contains("Paid Ave"));
    assert!(!text.contains("Main St"));
}

#[test]
fn test_list_rejects_unknown_status() {
    let db_path = setup_test_db("cli_list_bad_status");
    init(&db_path);

    ck().args(["--db", &db_path, "list", "--status", "Waived"])
        .assert()
        .failure()
        .stderr(contains("Invalid payment status: Waived"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("cli_db_info");
    init(&db_path);
    {
        let pool = DbPool::new(&db_path).unwrap();
        create_clamp(&pool.conn, &main_st_clamp()).unwrap();
    }

    ck().args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("Clamp records:"))
        .stdout(contains("2024-01-01"));

    ck().args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed."));
}

#[test]
fn test_db_migrate_upgrades_legacy_store() {
    let db_path = setup_test_db("cli_db_migrate");
    create_legacy_store(&db_path);

    ck().args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migration completed."));

    let cols = columns(&db_path, "clamp_data");
    assert!(cols.contains(&"time_called".to_string()));
    assert!(!columns(&db_path, "appeal").is_empty());
}

#[test]
fn test_log_print_shows_init() {
    let db_path = setup_test_db("cli_log");
    init(&db_path);

    ck().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("migration_applied"))
        .stdout(contains("init"));
}
