pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

use crate::resume::handlers;
use crate::state::AppState;

/// Browser origins allowed to call the API (local front-end dev servers).
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/upload_resume/",
            // Uploads are read whole with no size cap.
            post(handlers::handle_upload_resume).layer(DefaultBodyLimit::disable()),
        )
        .layer(cors_layer())
        .with_state(state)
}

/// Fixed origin allow-list. Credentials are allowed, so methods and headers are
/// mirrored from the preflight rather than sent as `*`.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
