use crate::errors::AppError;
use crate::loaders;
use crate::state::AppState;
use crate::{legacy, ui};
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    season: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MatchupsQuery {
    year: Option<String>,
    week: Option<String>,
}

/// Query params arrive as free text; an unparseable value is the caller's
/// mistake, not an upstream failure, so it gets a 400 instead of the
/// default-shape treatment.
fn parse_year(raw: Option<&str>, field: &str) -> Result<Option<i32>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| AppError::bad_request(format!("{field} must be a number"))),
    }
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = loaders::load_home(&state.api).await;
    Html(ui::render_home(&data))
}

pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<SeasonQuery>,
) -> Result<Html<String>, AppError> {
    let season = parse_year(query.season.as_deref(), "season")?;
    let data = loaders::load_history(&state.api, season).await;
    Ok(Html(ui::render_history(&data)))
}

pub async fn champions(State(state): State<AppState>) -> Html<String> {
    let data = loaders::load_champions(&state.api).await;
    Html(ui::render_champions(&data))
}

pub async fn managers(State(state): State<AppState>) -> Html<String> {
    let data = loaders::load_managers(&state.api).await;
    Html(ui::render_managers(&data))
}

pub async fn manager(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Html<String> {
    let data = loaders::load_manager(&state.api, &name).await;
    Html(ui::render_manager(&data))
}

pub async fn tidbits(State(state): State<AppState>) -> Html<String> {
    let data = loaders::load_tidbits(&state.api).await;
    Html(ui::render_tidbits(&data))
}

pub async fn records(State(state): State<AppState>) -> Html<String> {
    let data = loaders::load_records(&state.api).await;
    Html(ui::render_records(&data))
}

pub async fn matchups(
    State(state): State<AppState>,
    Query(query): Query<MatchupsQuery>,
) -> Result<Html<String>, AppError> {
    let year = parse_year(query.year.as_deref(), "year")?;
    let week = parse_year(query.week.as_deref(), "week")?;
    let data = loaders::load_matchups(&state.api, year, week).await;
    Ok(Html(ui::render_matchups(&data)))
}

pub async fn legacy_dst(
    State(state): State<AppState>,
    Path(team): Path<String>,
    Query(query): Query<SeasonQuery>,
) -> Result<Html<String>, AppError> {
    let season = parse_year(query.season.as_deref(), "season")?;
    let stats = loaders::load_dst_stats(&state.api, &team, season).await;

    let default_season = season.unwrap_or_else(|| Local::now().year());
    let current = legacy::render_current_season(&stats, default_season);
    let career = legacy::render_career(&stats);
    Ok(Html(ui::render_legacy_dst(&team, &current, &career)))
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub upstream: String,
    pub overall: String,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let upstream = match state.api.ping().await {
        Ok(()) => "healthy".to_string(),
        Err(err) => format!("unreachable: {err}"),
    };
    let overall = if upstream == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthStatus {
        upstream,
        overall: overall.to_string(),
    })
}
