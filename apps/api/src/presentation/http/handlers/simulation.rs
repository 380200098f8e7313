//! Endpoints with simulated latency and failures.
//!
//! All randomness comes from the [`Simulator`](crate::domain::simulation::simulator::Simulator)
//! in [`AppState`]; sleeping uses the tokio timer, so only the current request waits.

use super::health::unix_timestamp;
use crate::{
    domain::simulation::{entity::ErrorKind, value_objects::round_to_hundredths},
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub status: &'static str,
    pub items: u32,
    pub timestamp: f64,
}

#[derive(Debug, Serialize)]
pub struct SlowResponse {
    pub status: &'static str,
    pub delay: f64,
}

/// Variable latency with an occasional internal error.
pub async fn get_data(State(state): State<AppState>) -> Result<Json<DataResponse>, AppError> {
    tokio::time::sleep(state.simulator.data_latency()).await;

    if state.simulator.data_fails() {
        state.metrics.record_error(ErrorKind::Internal);
        return Err(AppError::SimulatedInternal);
    }

    let items = state.simulator.item_count();
    tracing::info!("Returning {} items from /api/data", items);
    Ok(Json(DataResponse {
        status: "ok",
        items,
        timestamp: unix_timestamp(),
    }))
}

/// Always slow enough to trip latency alerts.
pub async fn slow_endpoint(State(state): State<AppState>) -> Json<SlowResponse> {
    let delay = state.simulator.slow_latency();
    tokio::time::sleep(delay).await;

    let seconds = delay.as_secs_f64();
    tracing::warn!("Slow response on /api/slow took {:.2}s", seconds);
    Json(SlowResponse {
        status: "ok",
        delay: round_to_hundredths(seconds),
    })
}

/// Always fails; used to exercise error alerts.
pub async fn force_error(State(state): State<AppState>) -> AppError {
    state.metrics.record_error(ErrorKind::Forced);
    AppError::Forced
}
