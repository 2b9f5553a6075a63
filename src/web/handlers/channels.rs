use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use crate::errors::{AppError, AppResult};
use crate::models::Channel;
use crate::web::{responses::handle_result, AppState};

pub async fn list_channels(State(state): State<AppState>) -> Response {
    let result: AppResult<Vec<Channel>> = state
        .context
        .channels
        .list_channels()
        .await
        .map_err(AppError::from);
    handle_result(result)
}

/// Read a single channel through the channel cache
pub async fn get_channel(State(state): State<AppState>, Path(number): Path<i32>) -> Response {
    let context = &state.context;
    let result = match context
        .channel_cache
        .get_or_load(number, context.channels.as_ref())
        .await
    {
        Ok(Some(channel)) => Ok(Channel::clone(&channel)),
        Ok(None) => Err(AppError::not_found("channel", number.to_string())),
        Err(e) => Err(e.into()),
    };
    handle_result(result)
}

/// Insert or replace a channel and drop its cached copy
pub async fn save_channel(
    State(state): State<AppState>,
    Json(channel): Json<Channel>,
) -> Response {
    let context = &state.context;
    let result = context.channels.save_channel(&channel).await;
    context.channel_cache.invalidate(channel.number).await;
    handle_result(result.map(|_| channel).map_err(AppError::from))
}
