//! JSON endpoints used by the pages' scripts.

use super::AppState;
use crate::db::clamps;
use crate::models::ClampSummary;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// `{id, location, registration}` of one clamp, or 404 `{error}`.
///
/// A non-numeric id cannot name a clamp, so it gets the same 404 body.
pub async fn clamp_lookup(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<ClampSummary>, ApiError> {
    let Ok(id) = raw.trim().parse::<i64>() else {
        return Err(api_error(StatusCode::NOT_FOUND, "Clamp not found"));
    };

    let found = state
        .with_db(move |pool| clamps::find_clamp(&pool.conn, id))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, id, "clamp lookup failed");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    match found {
        Some(c) => Ok(Json(ClampSummary::from(&c))),
        None => Err(api_error(StatusCode::NOT_FOUND, "Clamp not found")),
    }
}
