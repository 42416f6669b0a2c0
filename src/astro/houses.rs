//! Ascendant and house-cusp computation.
//!
//! The ascendant and MC follow the standard spherical astronomy formulas
//! (Meeus, *Astronomical Algorithms* 2nd ed., Ch. 12-13). Intermediate
//! Placidus cusps are found by the classical semi-arc iteration; the
//! opposite cusps follow by adding 180 deg.
//!
//! This is the one place geography enters the computation.

use serde::{Deserialize, Serialize};

use crate::astro::angles::normalize_deg;
use crate::ephemeris::SiderealFrame;
use crate::error::HoroscopeError;
use crate::models::JulianDay;

/// House numbering strategy.
///
/// `EqualFromAries` is the simplified whole-circle approximation used when no
/// reliable geographic fix exists; `Placidus` requires true coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseStrategy {
    EqualFromAries,
    Placidus,
}

impl HouseStrategy {
    /// House number for a longitude under this strategy.
    ///
    /// `EqualFromAries` ignores the cusps; `Placidus` places the longitude
    /// in the sector between consecutive cusps.
    pub fn house_of(self, longitude: f64, cusps: &[f64; 12]) -> u8 {
        match self {
            HouseStrategy::EqualFromAries => crate::astro::angles::house_of(longitude),
            HouseStrategy::Placidus => {
                let lon = normalize_deg(longitude);
                for i in 0..12 {
                    let span = normalize_deg(cusps[(i + 1) % 12] - cusps[i]);
                    let offset = normalize_deg(lon - cusps[i]);
                    if offset < span {
                        return (i as u8) + 1;
                    }
                }
                12
            }
        }
    }
}

/// Life-domain meaning of a house. Unknown input yields a generic fallback.
pub fn house_meaning(house: u8) -> &'static str {
    match house {
        1 => "personality and self-expression",
        2 => "finances and material possessions",
        3 => "communication and short travels",
        4 => "home and family",
        5 => "creativity and romance",
        6 => "work and health",
        7 => "relationships and partnerships",
        8 => "transformation and shared resources",
        9 => "higher education and philosophy",
        10 => "career and public image",
        11 => "friendships and group activities",
        12 => "spirituality and hidden matters",
        _ => "unknown area",
    }
}

/// Greenwich mean sidereal time in degrees (Meeus 12.4).
fn gmst_deg(jd: JulianDay) -> f64 {
    let t = jd.centuries_since_j2000();
    normalize_deg(
        280.46061837 + 360.98564736629 * (jd.value() - 2_451_545.0) + 0.000387933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Mean obliquity of the ecliptic in degrees.
fn obliquity_deg(jd: JulianDay) -> f64 {
    let t = jd.centuries_since_j2000();
    23.439291111 - 0.013004167 * t
}

/// Ecliptic longitude of the point on the ecliptic with right ascension `ra`.
/// All angles in radians; result in [0, 2*pi).
fn ecliptic_longitude_of_ra(ra: f64, eps: f64) -> f64 {
    f64::atan2(ra.sin(), ra.cos() * eps.cos()).rem_euclid(std::f64::consts::TAU)
}

/// One Placidus intermediate cusp by semi-arc iteration.
///
/// `offset_deg` is the equatorial offset from the RAMC (30/60 for the 11th
/// and 12th cusps, 120/150 for the 2nd and 3rd), `fraction` the semi-arc
/// fraction (1/3 or 2/3). Angles in radians except where noted.
fn placidus_cusp_ra(
    ramc: f64,
    phi: f64,
    eps: f64,
    offset_deg: f64,
    fraction: f64,
) -> Result<f64, HoroscopeError> {
    let above_horizon = offset_deg < 90.0;
    let mut ra = ramc + offset_deg.to_radians();
    for _ in 0..30 {
        let decl = (eps.sin() * ra.sin()).asin();
        let tt = phi.tan() * decl.tan();
        if tt.abs() > 1.0 {
            // The semi-arc is undefined: circumpolar ecliptic degrees.
            return Err(HoroscopeError::computation(format!(
                "placidus cusps undefined at latitude {:.2} deg",
                phi.to_degrees()
            )));
        }
        let ad = tt.asin();
        let next = if above_horizon {
            ramc + fraction * (std::f64::consts::FRAC_PI_2 - ad)
        } else {
            ramc + std::f64::consts::PI - fraction * (std::f64::consts::FRAC_PI_2 + ad)
        };
        if (next - ra).abs() < 1e-10 {
            ra = next;
            break;
        }
        ra = next;
    }
    Ok(ra)
}

/// Ascendant degree and the 12 Placidus house cusps for a date/time and
/// geographic position, under the requested reference frame.
///
/// Returns `(ascendant, cusps)` where `cusps[0]` is the first house cusp
/// (the ascendant itself) through `cusps[11]`, all in [0, 360).
pub fn ascendant_and_cusps(
    jd: JulianDay,
    latitude: f64,
    longitude: f64,
    frame: SiderealFrame,
) -> Result<(f64, [f64; 12]), HoroscopeError> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(HoroscopeError::validation(format!(
            "coordinates ({latitude}, {longitude}) out of range"
        )));
    }

    let lst = normalize_deg(gmst_deg(jd) + longitude).to_radians();
    let eps = obliquity_deg(jd).to_radians();
    let phi = latitude.to_radians();

    // Meeus Ch. 13 ascendant, with both atan2 arguments negated to select
    // the eastern (rising) intersection of the ecliptic and horizon rather
    // than the setting one.
    let asc = f64::atan2(lst.cos(), -(lst.sin() * eps.cos() + phi.tan() * eps.sin()))
        .rem_euclid(std::f64::consts::TAU);
    let mc = f64::atan2(lst.sin(), lst.cos() * eps.cos()).rem_euclid(std::f64::consts::TAU);

    // RAMC = LST by definition.
    let ra11 = placidus_cusp_ra(lst, phi, eps, 30.0, 1.0 / 3.0)?;
    let ra12 = placidus_cusp_ra(lst, phi, eps, 60.0, 2.0 / 3.0)?;
    let ra2 = placidus_cusp_ra(lst, phi, eps, 120.0, 2.0 / 3.0)?;
    let ra3 = placidus_cusp_ra(lst, phi, eps, 150.0, 1.0 / 3.0)?;

    let c11 = ecliptic_longitude_of_ra(ra11, eps).to_degrees();
    let c12 = ecliptic_longitude_of_ra(ra12, eps).to_degrees();
    let c2 = ecliptic_longitude_of_ra(ra2, eps).to_degrees();
    let c3 = ecliptic_longitude_of_ra(ra3, eps).to_degrees();

    let asc_deg = asc.to_degrees();
    let mc_deg = mc.to_degrees();

    let ayanamsa = frame.ayanamsa_deg(jd);
    let correct = |deg: f64| normalize_deg(deg - ayanamsa);

    let cusps = [
        correct(asc_deg),
        correct(c2),
        correct(c3),
        correct(mc_deg + 180.0),
        correct(c11 + 180.0),
        correct(c12 + 180.0),
        correct(asc_deg + 180.0),
        correct(c2 + 180.0),
        correct(c3 + 180.0),
        correct(mc_deg),
        correct(c11),
        correct(c12),
    ];

    Ok((cusps[0], cusps))
}
