//! HTTP front end: router, shared state and server start-up.
//!
//! Handlers never share a connection. Each request opens its own `DbPool` on
//! a blocking thread and drops it when the work is done; the database path is
//! the only thing kept in the state.

pub mod api;
pub mod appeals;
pub mod clamps;
pub mod response;

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::views::invoices::InvoiceTerms;
use axum::Router;
use axum::routing::{get, post};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
    pub terms: Arc<InvoiceTerms>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>, terms: InvoiceTerms) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
            terms: Arc::new(terms),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            crate::utils::path::expand_tilde(&cfg.database),
            InvoiceTerms {
                currency: cfg.currency.clone(),
                clamp_fee: cfg.clamp_fee,
            },
        )
    }

    /// Run `f` against a fresh connection on the blocking pool.
    pub async fn with_db<F, T>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&DbPool) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = Arc::clone(&self.db_path);
        tokio::task::spawn_blocking(move || {
            let pool = DbPool::new(path.as_path())?;
            f(&pool)
        })
        .await
        .map_err(|e| AppError::Server(format!("database task failed: {}", e)))?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(clamps::index))
        .route("/add-clamp", post(clamps::add))
        .route("/edit-clamp/{id}", get(clamps::edit_form).post(clamps::edit))
        .route("/delete-clamp/{id}", get(clamps::delete))
        .route("/invoicing", get(clamps::invoicing))
        .route("/presentation/invoice/{id}", get(clamps::invoice))
        .route("/appeals", get(appeals::index))
        .route("/add-appeal", post(appeals::add))
        .route("/edit-appeal/{id}", get(appeals::edit_form).post(appeals::edit))
        .route("/delete-appeal/{id}", get(appeals::delete))
        .route("/api/clamp/{id}", get(api::clamp_lookup))
        .fallback(response::not_found_page)
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(state: AppState, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Server(format!("cannot bind {}: {}", addr, e)))?;

    tracing::info!(%addr, db = %state.db_path.display(), "clampkeeper listening");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| AppError::Server(e.to_string()))
}
