//! API routes
//!
//! Thin translation layer: routes map onto the auth, registry, and profile
//! operations; errors map to status codes via the shared error system.

pub mod auth;
pub mod business_info;
pub mod health;
pub mod website_setup;

use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::state::AppState;

/// Type alias for JSON handler results
pub type ApiResult<T> = Result<axum::Json<T>, shared::error::AppError>;

/// Create the combined router
pub fn router(state: AppState) -> Router {
    // Public routes - no auth required
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh));

    // Protected routes - require a valid access token
    let protected = Router::new()
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/website-setups/mine",
            get(website_setup::get_mine).put(website_setup::update_mine),
        )
        .route(
            "/api/business-info/mine",
            get(business_info::get_mine)
                .post(business_info::create_mine)
                .put(business_info::update_mine),
        )
        .route("/api/business-info/mine/publish", post(business_info::publish))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
