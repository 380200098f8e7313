use crate::{
    infrastructure::monitoring::CONTENT_TYPE,
    presentation::http::{errors::AppError, state::AppState},
};
use axum::{extract::State, http::header, response::IntoResponse};

/// Prometheus scrape endpoint.
pub async fn scrape_metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.metrics.render_exposition()?;
    Ok(([(header::CONTENT_TYPE, CONTENT_TYPE)], body))
}
