use axum::{extract::State, response::IntoResponse};
use serde::Serialize;

use crate::web::{responses::ok, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// Liveness check including database connectivity
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1")
        .execute(&state.context.database.pool())
        .await
    {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    ok(HealthResponse {
        status: if database == "connected" {
            "healthy"
        } else {
            "unhealthy"
        },
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}
