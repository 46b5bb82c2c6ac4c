use crate::db::pool::DbPool;
use crate::models::{AppealStatus, PaymentStatus};
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

fn count_where(pool: &DbPool, table: &str, column: &str, value: &str) -> rusqlite::Result<i64> {
    pool.conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1"),
        [value],
        |row| row.get(0),
    )
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.1} KB", CYAN, RESET, file_kb);

    //
    // 2) CLAMPS BY PAYMENT STATUS
    //
    let clamps: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM clamp_data", [], |row| row.get(0))?;
    println!("{}• Clamp records:{} {}{}{}", CYAN, RESET, GREEN, clamps, RESET);
    for status in PaymentStatus::ALL {
        let n = count_where(pool, "clamp_data", "payment_status", status.to_db_str())?;
        println!("    {:<11} {}", status.to_db_str(), n);
    }

    //
    // 3) APPEALS BY STATUS
    //
    let appeals: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM appeal", [], |row| row.get(0))?;
    println!("{}• Appeals:{} {}{}{}", CYAN, RESET, GREEN, appeals, RESET);
    for status in AppealStatus::ALL {
        let n = count_where(pool, "appeal", "appeal_status", status.to_db_str())?;
        println!("    {:<11} {}", status.to_db_str(), n);
    }

    //
    // 4) DATE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(clamp_date), MAX(clamp_date) FROM clamp_data",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let dash = format!("{GREY}--{RESET}");

    println!("{}• Clamp dates:{}", CYAN, RESET);
    println!("    from: {}", first.unwrap_or_else(|| dash.clone()));
    println!("    to:   {}", last.unwrap_or(dash));

    println!();
    Ok(())
}
