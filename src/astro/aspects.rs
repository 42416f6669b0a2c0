//! Named angular relationships between two longitudes.

use serde::{Deserialize, Serialize};

use crate::astro::angles::separation_deg;

/// A named aspect relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl Aspect {
    pub const fn name(self) -> &'static str {
        match self {
            Aspect::Conjunction => "conjunction",
            Aspect::Sextile => "sextile",
            Aspect::Square => "square",
            Aspect::Trine => "trine",
            Aspect::Opposition => "opposition",
        }
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Aspect table in matching priority order: (aspect, exact angle, orb).
/// The first entry whose target angle is within its orb of the separation
/// wins; at most one aspect applies per pair.
const ASPECT_TABLE: [(Aspect, f64, f64); 5] = [
    (Aspect::Conjunction, 0.0, 10.0),
    (Aspect::Sextile, 60.0, 6.0),
    (Aspect::Square, 90.0, 8.0),
    (Aspect::Trine, 120.0, 10.0),
    (Aspect::Opposition, 180.0, 10.0),
];

/// Aspect formed by two longitudes, if any.
pub fn aspect_between(a: f64, b: f64) -> Option<Aspect> {
    let separation = separation_deg(a, b);
    ASPECT_TABLE
        .iter()
        .find(|(_, angle, orb)| (separation - angle).abs() <= *orb)
        .map(|(aspect, _, _)| *aspect)
}
