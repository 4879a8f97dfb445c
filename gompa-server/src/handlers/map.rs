use axum::{
    Json,
    extract::{Query, State},
};
use gompa_core::pages::{self, MapParams, MapView};

use crate::{AppState, api::ApiResponse};

/// Map page. `viewport_width` falls back to the configured default.
pub async fn map_handler(
    State(state): State<AppState>,
    Query(params): Query<MapParams>,
) -> Json<ApiResponse<MapView>> {
    let view = pages::map::compose_map(
        &state.catalog,
        &params,
        state.config().catalog.default_viewport_width,
    )
    .await;
    Json(ApiResponse::success(view))
}
