//! HTTP error handling and response conversion.
//!
//! Handler failures are expressed as [`AppError`] values that map to a status code and a
//! `{"error": "..."}` JSON body. The synthetic failures of the demo endpoints go through the
//! same path as real faults, so they are logged once, here, when they become a response.

use crate::infrastructure::monitoring::MetricsError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Application-level errors returned from handlers.
#[derive(Debug)]
pub enum AppError {
    /// Random failure branch of `/api/data` (500).
    SimulatedInternal,

    /// Unconditional failure of `/api/error` (500).
    Forced,

    /// Exposition could not be rendered (500).
    Metrics(MetricsError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SimulatedInternal => write!(f, "Simulated internal server error on /api/data"),
            Self::Forced => write!(f, "Forced error triggered on /api/error"),
            Self::Metrics(err) => write!(f, "Metrics error: {}", err),
        }
    }
}

impl AppError {
    /// Get the appropriate HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::SimulatedInternal | Self::Forced | Self::Metrics(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message placed in the response body.
    fn user_message(&self) -> &'static str {
        match self {
            Self::SimulatedInternal => "Internal server error",
            Self::Forced => "Forced error for testing",
            Self::Metrics(_) => "Metrics rendering failed",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!("{}", self);
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

impl From<MetricsError> for AppError {
    fn from(err: MetricsError) -> Self {
        AppError::Metrics(err)
    }
}
