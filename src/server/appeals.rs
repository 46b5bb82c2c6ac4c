//! Appeal pages and form handlers.

use super::AppState;
use super::response::{NoticeQuery, redirect_with_notice, rejected_write};
use crate::core::forms::AppealForm;
use crate::db::log::{LogOp, record_quiet};
use crate::db::{appeals, clamps};
use crate::errors::AppError;
use crate::views;
use axum::Form;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Response};

pub async fn index(
    State(state): State<AppState>,
    Query(q): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let (rows, all_clamps) = state
        .with_db(|pool| {
            Ok((
                appeals::list_appeals_with_clamp(&pool.conn)?,
                clamps::list_clamps(&pool.conn, None)?,
            ))
        })
        .await?;
    Ok(Html(views::appeals::list_page(&rows, &all_clamps, q.as_deref())))
}

pub async fn add(State(state): State<AppState>, Form(form): Form<AppealForm>) -> Response {
    let appeal = match form.parse() {
        Ok(a) => a,
        Err(e) => return rejected_write(e, "/appeals"),
    };

    let result = state
        .with_db(move |pool| {
            let id = appeals::create_appeal(&pool.conn, &appeal)?;
            record_quiet(
                &pool.conn,
                LogOp::Add,
                &format!("appeal #{}", id),
                &format!("against clamp #{}", appeal.clamp_id),
            );
            Ok(id)
        })
        .await;

    match result {
        Ok(id) => {
            tracing::info!(id, "appeal filed");
            redirect_with_notice("/appeals", &format!("Appeal #{} filed.", id)).into_response()
        }
        // An unknown clamp id here is bad form input, not a missing page.
        Err(AppError::NotFound { entity, id }) => redirect_with_notice(
            "/appeals",
            &AppError::not_found(entity, id).to_string(),
        )
        .into_response(),
        Err(e) => rejected_write(e, "/appeals"),
    }
}

pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(q): Query<NoticeQuery>,
) -> Result<Html<String>, AppError> {
    let (appeal, all_clamps) = state
        .with_db(move |pool| {
            Ok((
                appeals::get_appeal(&pool.conn, id)?,
                clamps::list_clamps(&pool.conn, None)?,
            ))
        })
        .await?;
    Ok(Html(views::appeals::edit_page(
        &appeal,
        &all_clamps,
        q.as_deref(),
    )))
}

pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<AppealForm>,
) -> Response {
    let back = format!("/edit-appeal/{}", id);

    let patch = match form.to_patch() {
        Ok(p) => p,
        Err(e) => return rejected_write(e, &back),
    };

    let result = state
        .with_db(move |pool| {
            let updated = appeals::update_appeal(&pool.conn, id, &patch)?;
            record_quiet(
                &pool.conn,
                LogOp::Edit,
                &format!("appeal #{}", id),
                &format!("status {}", updated.appeal_status),
            );
            Ok(updated)
        })
        .await;

    match result {
        Ok(_) => {
            tracing::info!(id, "appeal updated");
            redirect_with_notice("/appeals", &format!("Appeal #{} updated.", id)).into_response()
        }
        Err(AppError::NotFound { entity: "Clamp", id: clamp_id }) => redirect_with_notice(
            &back,
            &AppError::not_found("Clamp", clamp_id).to_string(),
        )
        .into_response(),
        Err(e) => rejected_write(e, &back),
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let result = state
        .with_db(move |pool| {
            appeals::delete_appeal(&pool.conn, id)?;
            record_quiet(&pool.conn, LogOp::Del, &format!("appeal #{}", id), "Appeal deleted");
            Ok(())
        })
        .await;

    match result {
        Ok(()) => {
            tracing::info!(id, "appeal deleted");
            redirect_with_notice("/appeals", &format!("Appeal #{} deleted.", id)).into_response()
        }
        Err(e) => rejected_write(e, "/appeals"),
    }
}
