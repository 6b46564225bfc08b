pub mod calendars;
pub mod events;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use gencal_core::GencalError;
use serde::Serialize;

use crate::state::AppState;

/// Every route of the server.
pub fn router(state: AppState) -> Router {
    let list_url = state.list_url();
    let prefix = state.config().calendar_prefix.clone();

    let mut router = Router::new()
        .merge(calendars::router(&prefix))
        .merge(events::router());

    // With an empty prefix the calendar list already lives at "/"
    if !prefix.is_empty() {
        router = router.route("/", get(move || async move { Redirect::to(&list_url) }));
    }

    router.with_state(state)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert errors to HTTP responses, picking the status from the error kind
pub struct AppError {
    status: StatusCode,
    error: anyhow::Error,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::NOT_FOUND,
            error: anyhow::anyhow!(message.into()),
        }
    }
}

fn status_for(error: &anyhow::Error) -> StatusCode {
    match error.downcast_ref::<GencalError>() {
        Some(GencalError::InvalidMonth { .. } | GencalError::InvalidWeekday(_)) => {
            StatusCode::BAD_REQUEST
        }
        Some(GencalError::MissingCalendarGroup(_)) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = %self.error, "request failed");
        }
        let body = Json(ErrorResponse {
            error: self.error.to_string(),
        });
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        AppError {
            status: status_for(&error),
            error,
        }
    }
}
