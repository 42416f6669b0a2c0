//! Transit, natal chart and prediction record types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::celestial::{CelestialBody, ZodiacSign};

/// Prediction time frame requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeFrame {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// A single transiting body, produced fresh for the requested instant and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transit {
    pub body: CelestialBody,
    /// Ecliptic longitude in [0, 360).
    pub longitude: f64,
    /// Position within the sign, `longitude mod 30`.
    pub degree_in_sign: f64,
    pub sign: ZodiacSign,
    /// Equal-division house number, 1-12.
    pub house: u8,
    pub is_retrograde: bool,
}

/// Natal chart derived once per birth-detail input. Purely a function of
/// (birth instant, birth latitude, birth longitude).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    /// Ascendant ecliptic longitude in [0, 360).
    pub ascendant: f64,
    pub ascendant_sign: ZodiacSign,
    /// Placidus house cusp longitudes, cusp 1 through 12.
    pub house_cusps: [f64; 12],
    /// Per-body sidereal longitude.
    pub positions: BTreeMap<CelestialBody, f64>,
    /// Per-body equal-division house number.
    pub houses: BTreeMap<CelestialBody, u8>,
}

impl NatalChart {
    pub fn longitude_of(&self, body: CelestialBody) -> Option<f64> {
        self.positions.get(&body).copied()
    }
}

/// The assembled prediction record. Field set is the contract the HTTP
/// boundary serializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoroscopePrediction {
    pub time_frame: TimeFrame,
    pub general: String,
    pub career: String,
    pub love: String,
    pub health: String,
    pub finances: String,
    pub lucky_number: u8,
    pub lucky_color: String,
    pub transits: Vec<Transit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natal_chart: Option<NatalChart>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
