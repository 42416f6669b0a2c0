//! Ephemeris provider boundary.
//!
//! The provider contract mirrors the conventional ephemeris query surface:
//! `query(julian_day, body_code, frame)` returning position and speed
//! components. The core uses only the longitude and the sign of the
//! longitude speed (retrograde = negative).
//!
//! The sidereal frame is an explicit parameter on every call rather than a
//! process-wide mode switch, so transit computations (Fagan-Bradley) and
//! natal computations (Lahiri) cannot leak frame state across concurrent
//! requests.

pub mod analytic;

use serde::{Deserialize, Serialize};

use crate::models::{BodyCode, CelestialBody, JulianDay};

pub use crate::error::EphemerisError;

pub use analytic::AnalyticEphemeris;

/// Reference frame for ecliptic longitudes.
///
/// Two distinct sidereal modes are deliberately supported: the transit
/// pipeline runs under Fagan-Bradley and the natal pipeline under Lahiri,
/// mirroring how the two use cases diverge in this domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiderealFrame {
    Tropical,
    Lahiri,
    FaganBradley,
}

/// Reference ayanamsa values at J2000.0, degrees.
const LAHIRI_J2000_DEG: f64 = 23.85292;
const FAGAN_BRADLEY_J2000_DEG: f64 = 24.73681;

/// Accumulated general precession in longitude since J2000.0, degrees.
///
/// IAU 2006 rate, truncated to the quadratic term; `t` is Julian centuries
/// since J2000.0.
fn general_precession_deg(t: f64) -> f64 {
    (5028.796195 * t + 1.1054348 * t * t) / 3600.0
}

impl SiderealFrame {
    /// Ayanamsa correction in degrees at the given instant.
    ///
    /// Sidereal longitude = tropical longitude - ayanamsa. The ayanamsa is
    /// the J2000 reference offset of the system plus the precession
    /// accumulated since.
    pub fn ayanamsa_deg(self, jd: JulianDay) -> f64 {
        let reference = match self {
            SiderealFrame::Tropical => return 0.0,
            SiderealFrame::Lahiri => LAHIRI_J2000_DEG,
            SiderealFrame::FaganBradley => FAGAN_BRADLEY_J2000_DEG,
        };
        reference + general_precession_deg(jd.centuries_since_j2000())
    }
}

/// One position sample from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSample {
    /// Ecliptic longitude in [0, 360), already corrected for the requested frame.
    pub longitude: f64,
    /// Ecliptic latitude in degrees.
    pub latitude: f64,
    /// Distance in AU.
    pub distance: f64,
    /// Longitude speed in degrees per day. Negative means retrograde motion.
    pub speed_longitude: f64,
    pub speed_latitude: f64,
    pub speed_distance: f64,
}

/// Precomputed planetary-position provider.
pub trait EphemerisProvider: Send + Sync {
    fn query(
        &self,
        jd: JulianDay,
        body: BodyCode,
        frame: SiderealFrame,
    ) -> Result<EphemerisSample, EphemerisError>;
}

/// Longitude and retrograde flag for one body, as consumed by the engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub longitude: f64,
    pub is_retrograde: bool,
}

/// Query one body's position under the given frame.
///
/// Ketu cannot be queried: it has no provider-side identity and is always
/// derived from Rahu by the engines.
pub fn position(
    provider: &dyn EphemerisProvider,
    jd: JulianDay,
    body: CelestialBody,
    frame: SiderealFrame,
) -> Result<BodyPosition, EphemerisError> {
    let code = body
        .provider_code()
        .ok_or(EphemerisError::UnknownBody(body))?;
    let sample = provider.query(jd, code, frame)?;
    Ok(BodyPosition {
        longitude: sample.longitude,
        is_retrograde: sample.speed_longitude < 0.0,
    })
}
