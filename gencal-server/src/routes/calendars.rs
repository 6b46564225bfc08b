//! Calendar list and month views

use axum::{
    Json, Router,
    extract::{Path, State},
    response::Html,
    routing::get,
};
use gencal_core::{CalendarGroup, CalendarMonth, CalendarRenderer, MonthUnit};

use crate::markup;
use crate::routes::AppError;
use crate::state::AppState;

pub fn router(prefix: &str) -> Router<AppState> {
    Router::new()
        .route(&format!("{prefix}/"), get(list_calendars))
        .route(&format!("{prefix}/{{slug}}/"), get(current_month))
        .route(&format!("{prefix}/{{slug}}/{{year}}/"), get(year_view))
        .route(&format!("{prefix}/{{slug}}/{{year}}/{{month}}/"), get(month_view))
        .route(
            &format!("{prefix}/{{slug}}/{{year}}/{{month}}/{{day}}/"),
            get(day_view),
        )
        .route(
            &format!("{prefix}/{{slug}}/{{year}}/{{month}}/units.json"),
            get(month_units),
        )
}

/// GET {prefix}/ - List all calendars
async fn list_calendars(State(state): State<AppState>) -> Html<String> {
    let groups = state.store().groups().all();
    let prefix = &state.config().calendar_prefix;
    Html(markup::calendar_list_page(&groups, prefix).into_string())
}

/// GET {prefix}/:slug/ - This month
async fn current_month(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    render_page(&state, &slug, None, None)
}

/// GET {prefix}/:slug/:year/ - This month of the given year
async fn year_view(
    State(state): State<AppState>,
    Path((slug, year)): Path<(String, i32)>,
) -> Result<Html<String>, AppError> {
    render_page(&state, &slug, Some(year), None)
}

/// GET {prefix}/:slug/:year/:month/
async fn month_view(
    State(state): State<AppState>,
    Path((slug, year, month)): Path<(String, i32, u32)>,
) -> Result<Html<String>, AppError> {
    render_page(&state, &slug, Some(year), Some(month))
}

/// GET {prefix}/:slug/:year/:month/:day/ - The day is accepted but records are
/// still shown for the whole month
async fn day_view(
    State(state): State<AppState>,
    Path((slug, year, month, _day)): Path<(String, i32, u32, u32)>,
) -> Result<Html<String>, AppError> {
    render_page(&state, &slug, Some(year), Some(month))
}

/// GET {prefix}/:slug/:year/:month/units.json - Render units for external templates
async fn month_units(
    State(state): State<AppState>,
    Path((slug, year, month)): Path<(String, i32, u32)>,
) -> Result<Json<MonthUnit>, AppError> {
    let month = CalendarMonth::new(year, month)?;
    let group = state.store().groups().find(&slug)?;
    Ok(Json(month_unit(&state, group, month)?))
}

fn render_page(
    state: &AppState,
    slug: &str,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<Html<String>, AppError> {
    let current = CalendarMonth::current(state.today());
    let month = CalendarMonth::new(
        year.unwrap_or(current.year()),
        month.unwrap_or(current.month()),
    )?;
    let group = state.store().groups().find(slug)?;
    let unit = month_unit(state, group, month)?;

    Ok(Html(
        markup::calendar_page(group, &unit, &state.list_url()).into_string(),
    ))
}

fn month_unit(
    state: &AppState,
    group: &CalendarGroup,
    month: CalendarMonth,
) -> Result<MonthUnit, AppError> {
    let store = state.store();
    let records = group.records_for_month(store, month)?;
    let links = state.links();

    Ok(CalendarRenderer::new(&group.slug, state.first_weekday()?)
        .with_today(state.today())
        .with_year(state.config().calendar.with_year)
        .with_links(&links)
        .render(month, &records, store.resolver()))
}
