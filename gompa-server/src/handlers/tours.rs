use axum::{
    Json,
    extract::{Path, State},
};
use gompa_core::pages::{self, TourListingView, TourView};

use crate::{
    AppState,
    api::ApiResponse,
    infra::errors::{AppError, AppResult},
};

pub async fn list_tours_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<TourListingView>> {
    let view = pages::tours::compose_listing(&state.catalog).await;
    Json(ApiResponse::success(view))
}

pub async fn get_tour_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TourView>>> {
    pages::tours::compose_tour(&state.catalog, &id)
        .await
        .map(|view| Json(ApiResponse::success(view)))
        .ok_or_else(|| AppError::not_found("Site not found"))
}
