use super::{
    handlers::{health, index, metrics, simulation},
    middleware::instrumentation::instrumentation_middleware,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use crate::domain::simulation::entity::Endpoint;
use axum::{
    Router,
    http::{HeaderValue, header},
    middleware,
    routing::get,
};
use tower_http::set_header::SetResponseHeaderLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(Endpoint::Index.path(), get(index::index))
        .route(Endpoint::Health.path(), get(health::health_check))
        .route(Endpoint::Metrics.path(), get(metrics::scrape_metrics))
        // Simulated traffic
        .route(Endpoint::Data.path(), get(simulation::get_data))
        .route(Endpoint::Slow.path(), get(simulation::slow_endpoint))
        .route(Endpoint::Error.path(), get(simulation::force_error))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            instrumentation_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(state)
}
