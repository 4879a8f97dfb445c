use axum::{
    Json,
    extract::{Path, State},
};
use gompa_core::pages::{self, AudioGuideView, AudioListingView};

use crate::{
    AppState,
    api::ApiResponse,
    infra::errors::{AppError, AppResult},
};

pub async fn list_audio_guides_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<AudioListingView>> {
    let view = pages::audio::compose_listing(&state.catalog).await;
    Json(ApiResponse::success(view))
}

pub async fn get_audio_guide_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<AudioGuideView>>> {
    pages::audio::compose_guide(&state.catalog, &id)
        .await
        .map(|view| Json(ApiResponse::success(view)))
        .ok_or_else(|| AppError::not_found("Site not found"))
}
