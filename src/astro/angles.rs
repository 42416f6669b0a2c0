//! Modular angle arithmetic on the ecliptic circle.

use crate::models::ZodiacSign;

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_deg(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 {
        r + 360.0
    } else {
        r
    }
}

/// Minimum angular separation between two longitudes, folded into [0, 180].
pub fn separation_deg(a: f64, b: f64) -> f64 {
    let delta = normalize_deg(a - b);
    if delta > 180.0 {
        360.0 - delta
    } else {
        delta
    }
}

/// Zodiac sign containing the given longitude. Total over all of R/360.
pub fn sign_of(longitude: f64) -> ZodiacSign {
    let index = (normalize_deg(longitude) / 30.0).floor() as usize;
    ZodiacSign::from_index(index)
}

/// Equal-division house number, 1-12, periodic with period 360.
///
/// This is the simplified whole-circle rule used for transits and for natal
/// planet-to-house mapping; the true Placidus cusps are only used for the
/// ascendant itself.
pub fn house_of(longitude: f64) -> u8 {
    ((normalize_deg(longitude) / 30.0).floor() as u8 % 12) + 1
}

/// Position within the sign, `longitude mod 30`, in [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    normalize_deg(longitude) % 30.0
}
