//! Origin server HTTP handlers
//!
//! Updates and deletes answer with the migration report produced while the
//! change was applied.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use tracing::info;

use crate::models::{OriginServerCreateRequest, OriginServerDeleteRequest, OriginServerUpdateRequest};
use crate::web::{
    responses::{created, handle_error, handle_result, MigrationReportResponse},
    AppState,
};

/// List registered origin servers ordered by display index
pub async fn list_origin_servers(State(state): State<AppState>) -> Response {
    handle_result(state.context.origin_service.list_origins().await)
}

/// Register a new origin server
pub async fn add_origin_server(
    State(state): State<AppState>,
    Json(request): Json<OriginServerCreateRequest>,
) -> Response {
    match state.context.origin_service.add_origin(request).await {
        Ok(server) => created(server).into_response(),
        Err(e) => handle_error(e),
    }
}

/// Reconfigure an origin server and migrate the programs bound to it
pub async fn update_origin_server(
    State(state): State<AppState>,
    Json(request): Json<OriginServerUpdateRequest>,
) -> Response {
    info!(
        "Origin update requested for '{}'",
        request.name.as_deref().unwrap_or_default()
    );
    let result = state.context.origin_service.update_origin(request).await;
    handle_result(result.map(MigrationReportResponse::from))
}

/// Remove an origin server and retire the programs bound to it
pub async fn delete_origin_server(
    State(state): State<AppState>,
    Json(request): Json<OriginServerDeleteRequest>,
) -> Response {
    info!("Origin removal requested for '{}'", request.name);
    let result = state.context.origin_service.delete_origin(&request.name).await;
    handle_result(result.map(MigrationReportResponse::from))
}
