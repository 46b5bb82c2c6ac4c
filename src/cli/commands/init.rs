use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::log::{self, LogOp};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped with `--test`)
///  - the SQLite database
///  - all pending DB migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    cfg.init_all(cli.test)?;
    let db_str = cfg.database.clone();

    println!("⚙️  Initializing clampkeeper…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &db_str);

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;

    println!("✅ Database initialized at {}", &db_str);

    log::record_quiet(
        &pool.conn,
        LogOp::Init,
        "Database initialized",
        &format!("Database initialized at {}", &db_str),
    );

    println!("🎉 clampkeeper initialization completed!");
    Ok(())
}
