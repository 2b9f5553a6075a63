//! Filler and custom show handlers

use axum::{extract::State, response::Response, Json};

use crate::errors::AppError;
use crate::models::{CustomShow, Filler};
use crate::web::{responses::handle_result, AppState};

pub async fn list_fillers(State(state): State<AppState>) -> Response {
    let result = state.context.fillers.get_all_fillers().await;
    handle_result(result.map_err(AppError::from))
}

pub async fn save_filler(State(state): State<AppState>, Json(filler): Json<Filler>) -> Response {
    if filler.id.trim().is_empty() {
        return handle_result::<()>(Err(AppError::validation("Filler id must not be empty")));
    }
    let result = state.context.fillers.save_filler(&filler.id, &filler).await;
    handle_result(result.map(|_| filler).map_err(AppError::from))
}

pub async fn list_custom_shows(State(state): State<AppState>) -> Response {
    let result = state.context.custom_shows.get_all_shows().await;
    handle_result(result.map_err(AppError::from))
}

pub async fn save_custom_show(
    State(state): State<AppState>,
    Json(show): Json<CustomShow>,
) -> Response {
    if show.id.trim().is_empty() {
        return handle_result::<()>(Err(AppError::validation("Custom show id must not be empty")));
    }
    let result = state.context.custom_shows.save_show(&show.id, &show).await;
    handle_result(result.map(|_| show).map_err(AppError::from))
}
