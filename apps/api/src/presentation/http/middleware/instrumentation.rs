use crate::{infrastructure::monitoring::MetricsService, presentation::http::state::AppState};
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// One request's slot in the `active_requests` gauge.
///
/// The gauge is incremented on creation and decremented on drop, so the pair stays matched
/// when the handler returns an error response, panics, or the connection is dropped mid-flight.
pub struct InFlightRequest {
    metrics: Arc<MetricsService>,
    started_at: Instant,
}

impl InFlightRequest {
    pub fn begin(metrics: Arc<MetricsService>) -> Self {
        metrics.request_started();
        Self {
            metrics,
            started_at: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Releases the gauge slot and returns the request latency.
    pub fn finish(self) -> Duration {
        self.elapsed()
    }
}

impl Drop for InFlightRequest {
    fn drop(&mut self) {
        self.metrics.request_finished();
    }
}

/// Label for the `endpoint` dimension: the matched route, or the raw path when nothing matched.
fn endpoint_label(request: &Request) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned())
}

pub async fn instrumentation_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = endpoint_label(&request);
    let in_flight = InFlightRequest::begin(state.metrics.clone());

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency = in_flight.finish();
    state
        .metrics
        .record_request(method.as_str(), &path, status, latency);
    tracing::info!(
        method = %method,
        path = %path,
        status,
        "{} {} status={} duration={:.4}s",
        method,
        path,
        status,
        latency.as_secs_f64()
    );

    response
}
