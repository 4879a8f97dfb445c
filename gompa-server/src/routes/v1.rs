use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    api::routes::v1,
    handlers::{admin, audio_guides, map, sites, tours},
};

/// Create all v1 API routes, registered under their full `/api/v1` paths.
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        // Public catalog pages
        .route(v1::sites::COLLECTION, get(sites::list_sites_handler))
        .route(v1::sites::ITEM, get(sites::get_site_handler))
        .route(v1::tours::COLLECTION, get(tours::list_tours_handler))
        .route(v1::tours::ITEM, get(tours::get_tour_handler))
        .route(
            v1::audio_guides::COLLECTION,
            get(audio_guides::list_audio_guides_handler),
        )
        .route(
            v1::audio_guides::ITEM,
            get(audio_guides::get_audio_guide_handler),
        )
        .route(v1::map::VIEW, get(map::map_handler))
        .merge(create_admin_routes())
}

/// Admin routes. Gating happens inside each handler so that every
/// non-authorized caller gets the same login redirect.
fn create_admin_routes() -> Router<AppState> {
    Router::new()
        .route(v1::admin::DASHBOARD, get(admin::dashboard_handler))
        .route(v1::admin::SITES, post(admin::create_site_handler))
        .route(
            v1::admin::SITE,
            get(admin::edit_form_handler)
                .put(admin::update_site_handler)
                .delete(admin::delete_site_handler),
        )
}
