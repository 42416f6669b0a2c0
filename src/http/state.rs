//! Application state for the HTTP server.

use std::sync::Arc;

use crate::ephemeris::EphemerisProvider;
use crate::services::chat::ChatHistory;
use crate::services::geocoding::Geocoder;
use crate::services::insights::InsightGenerator;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Planetary position source
    pub ephemeris: Arc<dyn EphemerisProvider>,
    /// Birth place resolution collaborator
    pub geocoder: Arc<dyn Geocoder>,
    /// Free-text insight collaborator
    pub insights: Arc<dyn InsightGenerator>,
    /// Per-session chat transcripts
    pub chat_history: ChatHistory,
}

impl AppState {
    pub fn new(
        ephemeris: Arc<dyn EphemerisProvider>,
        geocoder: Arc<dyn Geocoder>,
        insights: Arc<dyn InsightGenerator>,
    ) -> Self {
        Self {
            ephemeris,
            geocoder,
            insights,
            chat_history: ChatHistory::new(),
        }
    }
}
