use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::server::{self, AppState};
use crate::telemetry;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { bind, port } = cmd {
        telemetry::init();

        let mut cfg = cfg.clone();
        if let Some(b) = bind {
            cfg.bind_address = b.clone();
        }
        if let Some(p) = port {
            cfg.port = *p;
        }

        // Schema must be current before the first request.
        {
            let pool = DbPool::new(&cfg.database)?;
            run_pending_migrations(&pool.conn)?;
        }

        let addr = cfg.listen_addr();
        info(format!("Serving {} on http://{}", cfg.database, addr));

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(server::serve(AppState::from_config(&cfg), &addr))?;
    }

    Ok(())
}
