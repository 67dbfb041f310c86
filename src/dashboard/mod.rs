//! Dashboard API - JSON endpoints behind the web dashboard.
//!
//! # Routes
//!
//! - `GET /health`
//! - `POST /api/auth` - check identifier (account id or alias) and password
//! - `GET /api/data/:identifier` - totals, breakdowns and recent records
//! - `POST /api/theme/:identifier` - store the preferred theme
//!
//! The routes carry no session; the dashboard front end keeps the identifier
//! after a successful login.

mod handlers;

use crate::{config::AppConfig, errors::Error};
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// State shared by every handler
#[derive(Clone)]
pub struct DashboardState {
    /// Database connection
    pub database: Arc<DatabaseConnection>,
    /// Loaded application configuration (for the local "today")
    pub config: Arc<AppConfig>,
}

impl DashboardState {
    /// Creates the handler state.
    #[must_use]
    pub const fn new(database: Arc<DatabaseConnection>, config: Arc<AppConfig>) -> Self {
        Self { database, config }
    }
}

/// Builds the dashboard router with permissive CORS and request tracing.
pub fn create_router(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/auth", post(handlers::auth))
        .route("/api/data/:identifier", get(handlers::data))
        .route("/api/theme/:identifier", post(handlers::theme))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the dashboard API on `0.0.0.0:port` until the process exits.
pub async fn serve(state: DashboardState, port: u16) -> Result<(), Error> {
    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Dashboard API listening on {}", listener.local_addr()?);
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}

/// Error response: `{"error": message}` with a status code
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 401 with the given message
    #[must_use]
    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
        }
    }

    /// 404 with the given message
    #[must_use]
    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::AccountNotFound { .. } => Self::not_found("Account not found"),
            other => {
                error!(error = %other, "Dashboard request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "An internal error occurred".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
