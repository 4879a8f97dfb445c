use axum::{
    Json,
    extract::{Path, Query, State},
};
use gompa_core::pages::{self, ListingParams, SiteDetailView, SiteListingView};
use tracing::debug;

use crate::{
    AppState,
    api::ApiResponse,
    infra::errors::{AppError, AppResult},
};

/// Catalog listing with `search`, `tradition` and `order` query parameters.
pub async fn list_sites_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> Json<ApiResponse<SiteListingView>> {
    let view = pages::sites::compose_listing(&state.catalog, &params).await;
    debug!(showing = view.showing, total = view.total, "sites listing composed");
    Json(ApiResponse::success(view))
}

pub async fn get_site_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SiteDetailView>>> {
    pages::sites::compose_detail(&state.catalog, &id)
        .await
        .map(|view| Json(ApiResponse::success(view)))
        .ok_or_else(|| AppError::not_found("Site not found"))
}
