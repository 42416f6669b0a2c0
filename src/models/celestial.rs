//! Celestial bodies and zodiac signs.

use serde::{Deserialize, Serialize};

/// The fixed set of tracked bodies.
///
/// Rahu is the mean lunar ascending node. Ketu (the descending node) is never
/// queried from the ephemeris provider directly: it is always derived as
/// Rahu's longitude + 180 deg, inheriting Rahu's retrograde flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CelestialBody {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
    Rahu,
    Ketu,
}

/// All bodies in enumeration order. Transit lists are emitted in this order.
pub const ALL_BODIES: [CelestialBody; 9] = [
    CelestialBody::Sun,
    CelestialBody::Moon,
    CelestialBody::Mars,
    CelestialBody::Mercury,
    CelestialBody::Jupiter,
    CelestialBody::Venus,
    CelestialBody::Saturn,
    CelestialBody::Rahu,
    CelestialBody::Ketu,
];

/// Provider-side body code, decoupled from the enum so a provider can be
/// swapped without touching the domain type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyCode(pub i32);

impl std::fmt::Display for BodyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl CelestialBody {
    /// Bodies that are queried from the ephemeris provider (Ketu excluded:
    /// it is derived, never queried).
    pub fn queryable() -> impl Iterator<Item = CelestialBody> {
        ALL_BODIES.iter().copied().filter(|b| *b != CelestialBody::Ketu)
    }

    /// Static mapping to the provider body code.
    ///
    /// Returns `None` for Ketu, which has no provider-side identity.
    pub const fn provider_code(self) -> Option<BodyCode> {
        // Codes follow the conventional ephemeris numbering (0 = Sun,
        // 1 = Moon, ..., 10 = mean lunar node).
        match self {
            CelestialBody::Sun => Some(BodyCode(0)),
            CelestialBody::Moon => Some(BodyCode(1)),
            CelestialBody::Mercury => Some(BodyCode(2)),
            CelestialBody::Venus => Some(BodyCode(3)),
            CelestialBody::Mars => Some(BodyCode(4)),
            CelestialBody::Jupiter => Some(BodyCode(5)),
            CelestialBody::Saturn => Some(BodyCode(6)),
            CelestialBody::Rahu => Some(BodyCode(10)),
            CelestialBody::Ketu => None,
        }
    }

    /// Display name used in prediction fragments.
    pub const fn name(self) -> &'static str {
        match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mars => "Mars",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Venus => "Venus",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Rahu => "Rahu",
            CelestialBody::Ketu => "Ketu",
        }
    }

    /// Chart glyph for the SVG renderer.
    pub const fn glyph(self) -> &'static str {
        match self {
            CelestialBody::Sun => "\u{2609}",
            CelestialBody::Moon => "\u{263D}",
            CelestialBody::Mars => "\u{2642}",
            CelestialBody::Mercury => "\u{263F}",
            CelestialBody::Jupiter => "\u{2643}",
            CelestialBody::Venus => "\u{2640}",
            CelestialBody::Saturn => "\u{2644}",
            CelestialBody::Rahu => "\u{260A}",
            CelestialBody::Ketu => "\u{260B}",
        }
    }
}

impl std::fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The 12 zodiac signs, each spanning a contiguous 30 deg longitude band
/// starting at 0 deg Aries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// All signs in zodiacal order, for index lookups (0 = Aries, 11 = Pisces).
pub const ALL_SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign from a zodiacal index, taken modulo 12.
    pub fn from_index(index: usize) -> ZodiacSign {
        ALL_SIGNS[index % 12]
    }

    pub const fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl std::fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
