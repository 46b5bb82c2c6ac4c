//! Clamp record pages and form handlers.

use super::AppState;
use super::response::{NoticeQuery, redirect_with_notice, rejected_write};
use crate::core::forms::ClampForm;
use crate::db::clamps;
use crate::db::log::{LogOp, record_quiet};
use crate::errors::AppError;
use crate::models::{ClampFilter, PaymentStatus};
use crate::views;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

pub async fn index(
    State(state): State<AppState>,
    Query(q): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let records = state
        .with_db(|pool| clamps::list_clamps(&pool.conn, None))
        .await?;
    Ok(Html(views::clamps::list_page(&records, q.as_deref())))
}

pub async fn add(State(state): State<AppState>, Form(form): Form<ClampForm>) -> Response {
    let clamp = match form.parse() {
        Ok(c) => c,
        Err(e) => return rejected_write(e, "/"),
    };

    let result = state
        .with_db(move |pool| {
            let id = clamps::create_clamp(&pool.conn, &clamp)?;
            record_quiet(
                &pool.conn,
                LogOp::Add,
                &format!("clamp #{}", id),
                &format!("{} at {}", clamp.offense, clamp.location),
            );
            Ok(id)
        })
        .await;

    match result {
        Ok(id) => {
            tracing::info!(id, "clamp record created");
            redirect_with_notice("/", &format!("Clamp #{} added.", id)).into_response()
        }
        Err(e) => rejected_write(e, "/"),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(q): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let record = state
        .with_db(move |pool| clamps::get_clamp(&pool.conn, id))
        .await?;
    Ok(Html(views::clamps::edit_page(&record, q.as_deref())))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ClampForm>,
) -> Response {
    let back = format!("/edit-clamp/{}", id);

    let patch = match form.to_patch() {
        Ok(p) => p,
        Err(e) => return rejected_write(e, &back),
    };

    let result = state
        .with_db(move |pool| {
            let updated = clamps::update_clamp(&pool.conn, id, &patch)?;
            record_quiet(
                &pool.conn,
                LogOp::Edit,
                &format!("clamp #{}", id),
                &format!("payment status {}", updated.payment_status),
            );
            Ok(updated)
        })
        .await;

    match result {
        Ok(_) => {
            tracing::info!(id, "clamp record updated");
            redirect_with_notice("/", &format!("Clamp #{} updated.", id)).into_response()
        }
        Err(e) => rejected_write(e, &back),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let result = state
        .with_db(move |pool| {
            clamps::delete_clamp(&pool.conn, id)?;
            record_quiet(&pool.conn, LogOp::Del, &format!("clamp #{}", id), "Clamp record deleted");
            Ok(())
        })
        .await;

    match result {
        Ok(()) => {
            tracing::info!(id, "clamp record deleted");
            redirect_with_notice("/", &format!("Clamp #{} deleted.", id)).into_response()
        }
        Err(e) => rejected_write(e, "/"),
    }
}

pub async fn invoicing(
    State(state): State<AppState>,
    Query(q): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let paid = state
        .with_db(|pool| {
            clamps::list_clamps(
                &pool.conn,
                Some(ClampFilter::PaymentStatus(PaymentStatus::Paid)),
            )
        })
        .await?;
    Ok(Html(views::invoices::invoicing_page(
        &paid,
        &state.terms,
        q.as_deref(),
    )))
}

pub async fn invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let record = state
        .with_db(move |pool| clamps::get_clamp(&pool.conn, id))
        .await?;
    Ok(Html(views::invoices::invoice_page(&record, &state.terms)))
}
