use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::time::Instant;
use tracing::error;

use crate::handlers::AppState;

/// Component health status
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub status: ComponentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub repository: ComponentHealth,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub checks: HealthChecks,
    pub timestamp: String,
}

/// `GET /health`: pings the repository; 503 when it is unreachable.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let started = Instant::now();
    let ping = state.parts.ping().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let repository = match ping {
        Ok(()) => ComponentHealth {
            status: ComponentStatus::Up,
            message: None,
            latency_ms,
        },
        Err(e) => {
            error!(error = %e, "Repository health check failed");
            ComponentHealth {
                status: ComponentStatus::Down,
                message: Some(e.response_message()),
                latency_ms,
            }
        }
    };

    let healthy = repository.status == ComponentStatus::Up;
    let body = HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.config.environment.clone(),
        checks: HealthChecks { repository },
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}
