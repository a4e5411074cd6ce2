//! Route handlers for the Tastebud API.

pub mod health;
pub mod restaurants;
pub mod sessions;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Sessions
        .route("/api/sessions", post(sessions::create_session))
        .route("/api/sessions/:id", get(sessions::session_detail))
        .route("/api/sessions/:id/join", post(sessions::join_session))
        .route("/api/sessions/:id/vote", post(sessions::cast_vote))
        .route("/api/sessions/:id/matches", get(sessions::matches))
        .route("/api/sessions/:id/my-votes", get(sessions::my_votes))
        .route(
            "/api/sessions/:id/restaurants",
            get(sessions::session_restaurants),
        )
        // Catalog
        .route("/api/restaurants", get(restaurants::list_restaurants))
        .route("/api/restaurants/filters", get(restaurants::filter_options))
}
