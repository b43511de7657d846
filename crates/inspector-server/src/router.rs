//! HTTP router configuration.
//!
//! This module provides functions to build the Axum router with all
//! necessary routes and middleware.

use std::time::Duration;

use axum::Router;
use axum::routing::{any, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handler::{
    client_ip, dashboard, delay, headers, health_check, inspect_json, status_echo, user_agent,
};
use crate::state::AppState;

/// Build the main application router.
///
/// Routes:
/// - `GET /` - HTML dashboard
/// - `GET /json` - Full request details as JSON
/// - `GET /ip` - Client IP
/// - `GET /user-agent` - User agent
/// - `GET /headers` - Request headers as JSON
/// - `ANY /status/:code` - Respond with the given status
/// - `ANY /delay/:ms` - Respond after a delay
/// - `GET /health` - Health check
///
/// `request_timeout` bounds every request, including `/delay`.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    // Inspection routes
    let inspect_routes = Router::new()
        .route("/", get(dashboard))
        .route("/json", get(inspect_json))
        .route("/ip", get(client_ip))
        .route("/user-agent", get(user_agent))
        .route("/headers", get(headers));

    // Status and timing utilities
    let utility_routes = Router::new()
        .route("/status/:code", any(status_echo))
        .route("/delay/:ms", any(delay))
        .route("/health", get(health_check));

    Router::new()
        .merge(inspect_routes)
        .merge(utility_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
