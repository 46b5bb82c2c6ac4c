//! Turning handler outcomes into HTTP responses.

use crate::errors::{AppError, ErrorKind};
use crate::views;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

/// `?notice=...` carried across a redirect and shown once as a banner.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    pub fn as_deref(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

/// 303 redirect to `path` with a notice attached.
pub fn redirect_with_notice(path: &str, notice: &str) -> Redirect {
    match serde_urlencoded::to_string([("notice", notice)]) {
        Ok(q) => Redirect::to(&format!("{}?{}", path, q)),
        Err(_) => Redirect::to(path),
    }
}

/// Failed write: missing records become a 404, everything else goes back to
/// `back` with the error as a notice.
pub fn rejected_write(err: AppError, back: &str) -> Response {
    if err.is_not_found() {
        return err.into_response();
    }
    tracing::warn!(error = %err, "write rejected");
    redirect_with_notice(back, &err.to_string()).into_response()
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<p>{}</p>\n<p><a href=\"/\">Back to clamp records</a></p>\n",
        views::escape(message)
    );
    (
        status,
        Html(views::layout(status.canonical_reason().unwrap_or("Error"), None, &body)),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Store | ErrorKind::Internal => {
                tracing::error!(error = %self, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        error_page(status, &self.to_string())
    }
}

pub async fn not_found_page() -> Response {
    error_page(StatusCode::NOT_FOUND, "Page not found")
}
