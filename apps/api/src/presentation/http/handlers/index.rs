use crate::{domain::simulation::entity::Endpoint, presentation::http::state::AppState};
use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Serialize)]
pub struct IndexResponse {
    app: String,
    endpoints: Vec<&'static str>,
}

pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    Json(IndexResponse {
        app: state.config.app_name.clone(),
        endpoints: Endpoint::advertised_paths(),
    })
}
