/*!
 * # Health Check Module
 *
 * `GET /health` reports whether the service can reach its database.
 * It answers 200 with `"status": "up"` when the ping succeeds and
 * 503 with `"status": "down"` otherwise.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::AppState;

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

/// Health report body
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    /// Deployment environment the service was configured for
    pub environment: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    fn status_code(self) -> StatusCode {
        match self {
            HealthStatus::Up => StatusCode::OK,
            HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Basic health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = HealthInfo),
        (status = 503, description = "Database unreachable", body = HealthInfo)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    debug!("Health check endpoint called");

    let status = match crate::db::check_connection(&state.db).await {
        Ok(()) => HealthStatus::Up,
        Err(e) => {
            error!("Database health check failed: {}", e);
            HealthStatus::Down
        }
    };

    (
        status.status_code(),
        Json(HealthInfo {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: state.config.environment.clone(),
            timestamp: Utc::now(),
        }),
    )
}

/// Routes for health checks
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_http_code() {
        assert_eq!(HealthStatus::Up.status_code(), StatusCode::OK);
        assert_eq!(
            HealthStatus::Down.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(HealthStatus::Up).unwrap(), "up");
        assert_eq!(serde_json::to_value(HealthStatus::Down).unwrap(), "down");
    }
}
