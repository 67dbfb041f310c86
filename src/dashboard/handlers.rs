//! Dashboard route handlers

use super::{ApiError, DashboardState};
use crate::{
    core::{
        account, expense,
        period::Period,
        summary::{Summary, summarize},
    },
    entities::expense::Model,
    errors::Error,
};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info};

const RECENT_LIMIT: u64 = 20;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    identifier: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    success: bool,
    name: Option<String>,
    theme: String,
}

pub async fn auth(
    State(state): State<DashboardState>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let account = account::authenticate(&state.database, &request.identifier, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    info!(account_id = %account.id, "Dashboard login");
    Ok(Json(AuthResponse {
        success: true,
        name: account.display_name,
        theme: account.theme,
    }))
}

/// Total and count of one window
#[derive(Debug, Serialize)]
pub struct WindowTotals {
    total: i64,
    count: u64,
}

impl From<&Summary> for WindowTotals {
    fn from(summary: &Summary) -> Self {
        Self {
            total: summary.total,
            count: summary.count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    today: WindowTotals,
    week: WindowTotals,
    month: WindowTotals,
    by_category: Value,
    by_mood: Value,
    recent: Vec<Model>,
}

async fn window(
    db: &DatabaseConnection,
    owner_id: &str,
    period: Period,
    today: NaiveDate,
) -> Result<Summary, Error> {
    let (start, end) = period.range(today);
    Ok(summarize(&expense::find_in_range(db, owner_id, start, end).await?))
}

pub async fn data(
    State(state): State<DashboardState>,
    Path(identifier): Path<String>,
) -> Result<Json<DashboardData>, ApiError> {
    let db = state.database.as_ref();
    let owner_id = account::find_by_identifier(db, &identifier)
        .await?
        .map_or(identifier, |a| a.id);
    let today = state.config.today();
    debug!(%owner_id, %today, "Loading dashboard data");

    let today_summary = window(db, &owner_id, Period::Today, today).await?;
    let week_summary = window(db, &owner_id, Period::Week, today).await?;
    let month_summary = window(db, &owner_id, Period::Month, today).await?;
    let recent = expense::find_recent(db, &owner_id, RECENT_LIMIT).await?;

    let mut month_json = serde_json::to_value(&month_summary).map_err(Error::from)?;

    Ok(Json(DashboardData {
        today: (&today_summary).into(),
        week: (&week_summary).into(),
        month: (&month_summary).into(),
        by_category: month_json["byCategory"].take(),
        by_mood: month_json["byMood"].take(),
        recent,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    theme: String,
}

pub async fn theme(
    State(state): State<DashboardState>,
    Path(identifier): Path<String>,
    Json(request): Json<ThemeRequest>,
) -> Result<Json<Value>, ApiError> {
    account::set_theme(&state.database, &identifier, &request.theme).await?;
    Ok(Json(json!({ "success": true })))
}
