//! Error taxonomy for the computation pipeline.
//!
//! Per-body ephemeris failures are recoverable and absorbed inside the
//! engines (the failing body is skipped). Everything else propagates to the
//! boundary layer, which maps it to a user-facing response.

use crate::models::{BodyCode, CelestialBody};

/// A single body/time query against the ephemeris provider failed.
///
/// Callers are expected to skip the body and keep computing the rest of the
/// batch; a single failure must never abort the whole request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EphemerisError {
    /// The provider cannot resolve the requested instant.
    #[error("julian day {jd} is outside the supported range for {body}")]
    OutOfRange { body: CelestialBody, jd: f64 },
    /// The provider has no data for the requested body.
    #[error("no ephemeris data for body {0}")]
    UnknownBody(CelestialBody),
    /// The provider received a code outside its body mapping. Carries the
    /// raw code, which maps to no [`CelestialBody`].
    #[error("no ephemeris data for provider code {0}")]
    UnknownCode(BodyCode),
    /// Provider-specific failure.
    #[error("ephemeris query failed for {body}: {message}")]
    Provider { body: CelestialBody, message: String },
}

/// Location lookup exhausted its retries or returned not-found.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeocodingError {
    #[error("no coordinates found for '{0}'")]
    NotFound(String),
    /// The geocoding service was unreachable after all retry attempts.
    #[error("geocoding service unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error type for the computation pipeline.
#[derive(Debug, thiserror::Error)]
pub enum HoroscopeError {
    /// Ephemeris totally unavailable (as opposed to a single-body failure).
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),

    #[error(transparent)]
    Geocoding(#[from] GeocodingError),

    /// Malformed birth date/time components, rejected before any computation.
    #[error("invalid birth details: {0}")]
    Validation(String),

    /// Unexpected arithmetic or collaborator failure. Always logged with the
    /// inputs at the point of failure before being surfaced.
    #[error("computation failed: {0}")]
    Computation(String),

    /// The LLM insight collaborator failed.
    #[error("insight generation failed: {0}")]
    Insight(String),
}

impl HoroscopeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }
}
