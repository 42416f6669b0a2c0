//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::HoroscopeError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Invalid request input
    BadRequest(String),
    /// Birth place could not be resolved; user-correctable input
    Geocoding(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("VALIDATION_ERROR", msg))
            }
            AppError::Geocoding(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("GEOCODING_ERROR", msg),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<HoroscopeError> for AppError {
    fn from(err: HoroscopeError) -> Self {
        match err {
            HoroscopeError::Validation(msg) => AppError::BadRequest(msg),
            HoroscopeError::Geocoding(e) => AppError::Geocoding(e.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeocodingError;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err: AppError = HoroscopeError::validation("month out of range").into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_geocoding_maps_to_unprocessable() {
        let err: AppError =
            HoroscopeError::from(GeocodingError::NotFound("Atlantis".into())).into();
        assert!(matches!(err, AppError::Geocoding(_)));
    }

    #[test]
    fn test_computation_maps_to_internal() {
        let err: AppError = HoroscopeError::computation("no positions").into();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
