pub mod handlers;
pub mod models;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::server::AppState;

/// Listeners poll `GET /musicPlayer` for the party's snapshot and send
/// controls through `POST /musicPlayer`; there is no push channel.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/musicPlayer",
            get(handlers::get_player_state).post(handlers::update_player),
        )
        .route("/parties", post(handlers::create_party))
        .route("/v1/info", get(handlers::get_info))
        .route("/v1/stats", get(handlers::get_stats))
}

/// The full service: routes, state, CORS for browser clients, request tracing.
pub fn app(state: Arc<AppState>) -> Router {
    router()
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
