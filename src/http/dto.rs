//! Data Transfer Objects for the HTTP API.
//!
//! The domain records already derive Serialize/Deserialize, so most response
//! bodies reuse them directly; the types here cover request envelopes and
//! the few response shapes that have no domain counterpart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::models::{BirthDetails, HoroscopePrediction, NatalChart, TimeFrame, Transit};
pub use crate::services::insights::Recommendation;

/// Request body for the prediction endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Prediction window
    #[serde(default)]
    pub time_frame: TimeFrame,
    /// Birth details; when present the prediction is personalized against
    /// the natal chart
    #[serde(default)]
    pub birth_details: Option<BirthDetails>,
}

/// Response for the current-transits endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitsResponse {
    pub transits: Vec<Transit>,
    pub timestamp: DateTime<Utc>,
}

/// Response for kundali generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KundaliResponse {
    pub natal_chart: NatalChart,
    /// Generated per-house insight text
    pub insights: String,
}

/// Response for the recommendations endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}

/// Request body for the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Existing session id; omitted on the first message
    #[serde(default)]
    pub session_id: Option<String>,
    pub message: String,
}

/// Response for the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub session_id: String,
    pub reply: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
}
