//! The "events" demo app

use axum::{
    Router,
    extract::{Path, Query, State},
    response::Html,
    routing::get,
};
use gencal_core::{CalendarMonth, CalendarRenderer, NamedField, RecordRef};
use serde::Deserialize;

use crate::markup;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events/", get(list_events))
        .route("/events/{id}/", get(event_detail))
}

#[derive(Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// GET /events/ - All events, with a calendar of the month (today's by default)
async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Html<String>, AppError> {
    let current = CalendarMonth::current(state.today());
    let month = CalendarMonth::new(
        query.year.unwrap_or(current.year()),
        query.month.unwrap_or(current.month()),
    )?;

    let events = state.store().events();
    let records: Vec<RecordRef> = events.iter().map(|e| e.clone() as RecordRef).collect();
    let unit = CalendarRenderer::new("events", state.first_weekday()?)
        .with_today(state.today())
        .with_year(state.config().calendar.with_year)
        .render(month, &records, &NamedField::default());

    Ok(Html(markup::event_list_page(&events, &unit).into_string()))
}

/// GET /events/:id/ - One event
async fn event_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let event = state
        .store()
        .event(id)
        .ok_or_else(|| AppError::not_found(format!("Event not found: {}", id)))?;

    Ok(Html(markup::event_detail_page(&event).into_string()))
}
