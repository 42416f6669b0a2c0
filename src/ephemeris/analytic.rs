//! Built-in analytic ephemeris provider.
//!
//! Low-precision planetary theory, good to a few arcminutes over the
//! supported range, which is ample for sign/house/aspect work:
//!
//! - Sun: truncated solar theory (Meeus, *Astronomical Algorithms* 2nd ed.,
//!   Ch. 25).
//! - Moon: leading periodic terms of the lunar theory (Meeus Ch. 47).
//! - Rahu: mean lunar ascending node polynomial (Meeus Ch. 47).
//! - Planets: Keplerian propagation of the JPL approximate mean elements
//!   (Standish), heliocentric positions differenced against Earth to obtain
//!   geocentric ecliptic longitude.
//!
//! Longitude speed is obtained by symmetric finite difference, which is
//! what the retrograde flag is derived from.

use crate::error::EphemerisError;
use crate::models::{BodyCode, CelestialBody, JulianDay};

use super::{EphemerisProvider, EphemerisSample, SiderealFrame};

/// Supported JD range: 1800-01-01 .. 2200-01-01. The mean-element fits
/// degrade outside this window.
const JD_MIN: f64 = 2_378_496.5;
const JD_MAX: f64 = 2_524_593.5;

/// Step for the symmetric speed difference, days.
const SPEED_STEP_DAYS: f64 = 0.5;

/// Keplerian mean elements at J2000 plus per-century rates
/// (a in AU, angles in degrees).
struct MeanElements {
    a: (f64, f64),
    e: (f64, f64),
    i: (f64, f64),
    l: (f64, f64),
    long_peri: (f64, f64),
    long_node: (f64, f64),
}

/// JPL approximate elements, valid 1800 AD - 2050 AD (Standish), usable with
/// reduced accuracy over the wider supported range.
const MERCURY: MeanElements = MeanElements {
    a: (0.38709927, 0.00000037),
    e: (0.20563593, 0.00001906),
    i: (7.00497902, -0.00594749),
    l: (252.25032350, 149472.67411175),
    long_peri: (77.45779628, 0.16047689),
    long_node: (48.33076593, -0.12534081),
};
const VENUS: MeanElements = MeanElements {
    a: (0.72333566, 0.00000390),
    e: (0.00677672, -0.00004107),
    i: (3.39467605, -0.00078890),
    l: (181.97909950, 58517.81538729),
    long_peri: (131.60246718, 0.00268329),
    long_node: (76.67984255, -0.27769418),
};
const EARTH_MOON_BARY: MeanElements = MeanElements {
    a: (1.00000261, 0.00000562),
    e: (0.01671123, -0.00004392),
    i: (-0.00001531, -0.01294668),
    l: (100.46457166, 35999.37244981),
    long_peri: (102.93768193, 0.32327364),
    long_node: (0.0, 0.0),
};
const MARS: MeanElements = MeanElements {
    a: (1.52371034, 0.00001847),
    e: (0.09339410, 0.00007882),
    i: (1.84969142, -0.00813131),
    l: (-4.55343205, 19140.30268499),
    long_peri: (-23.94362959, 0.44441088),
    long_node: (49.55953891, -0.29257343),
};
const JUPITER: MeanElements = MeanElements {
    a: (5.20288700, -0.00011607),
    e: (0.04838624, -0.00013253),
    i: (1.30439695, -0.00183714),
    l: (34.39644051, 3034.74612775),
    long_peri: (14.72847983, 0.21252668),
    long_node: (100.47390909, 0.20469106),
};
const SATURN: MeanElements = MeanElements {
    a: (9.53667594, -0.00125060),
    e: (0.05386179, -0.00050991),
    i: (2.48599187, 0.00193609),
    l: (49.95424423, 1222.49362201),
    long_peri: (92.59887831, -0.41897216),
    long_node: (113.66242448, -0.28867794),
};

fn normalize_deg(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 {
        r + 360.0
    } else {
        r
    }
}

/// Signed angular difference a - b folded into [-180, 180).
fn wrapped_delta_deg(a: f64, b: f64) -> f64 {
    let mut d = normalize_deg(a - b);
    if d >= 180.0 {
        d -= 360.0;
    }
    d
}

/// Solve Kepler's equation E - e*sin(E) = M by Newton iteration.
/// All angles in radians.
fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let mut e_anom = mean_anomaly + eccentricity * mean_anomaly.sin();
    for _ in 0..10 {
        let delta = (e_anom - eccentricity * e_anom.sin() - mean_anomaly)
            / (1.0 - eccentricity * e_anom.cos());
        e_anom -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    e_anom
}

impl MeanElements {
    /// Heliocentric J2000-ecliptic position in AU at `t` Julian centuries
    /// since J2000.
    fn heliocentric_xyz(&self, t: f64) -> (f64, f64, f64) {
        let a = self.a.0 + self.a.1 * t;
        let e = self.e.0 + self.e.1 * t;
        let i = (self.i.0 + self.i.1 * t).to_radians();
        let l = self.l.0 + self.l.1 * t;
        let long_peri = self.long_peri.0 + self.long_peri.1 * t;
        let long_node = self.long_node.0 + self.long_node.1 * t;

        let m = normalize_deg(l - long_peri).to_radians();
        let omega = (long_peri - long_node).to_radians();
        let node = long_node.to_radians();

        let e_anom = solve_kepler(m, e);
        let xp = a * (e_anom.cos() - e);
        let yp = a * (1.0 - e * e).sqrt() * e_anom.sin();

        let (sin_o, cos_o) = omega.sin_cos();
        let (sin_n, cos_n) = node.sin_cos();
        let (sin_i, cos_i) = i.sin_cos();

        let x = (cos_o * cos_n - sin_o * sin_n * cos_i) * xp
            + (-sin_o * cos_n - cos_o * sin_n * cos_i) * yp;
        let y = (cos_o * sin_n + sin_o * cos_n * cos_i) * xp
            + (-sin_o * sin_n + cos_o * cos_n * cos_i) * yp;
        let z = (sin_o * sin_i) * xp + (cos_o * sin_i) * yp;
        (x, y, z)
    }
}

/// Geocentric tropical ecliptic longitude of the Sun, degrees (Meeus Ch. 25).
fn sun_longitude_deg(t: f64) -> f64 {
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();
    normalize_deg(l0 + c)
}

/// Geocentric tropical ecliptic longitude of the Moon, degrees.
///
/// Leading periodic terms of Meeus Ch. 47, good to roughly 0.1 deg.
fn moon_longitude_deg(t: f64) -> f64 {
    let lp = 218.3164477 + 481267.88123421 * t - 0.0015786 * t * t;
    let d = (297.8501921 + 445267.1114034 * t - 0.0018819 * t * t).to_radians();
    let m = (357.5291092 + 35999.0502909 * t - 0.0001536 * t * t).to_radians();
    let mp = (134.9633964 + 477198.8675055 * t + 0.0087414 * t * t).to_radians();
    let f = (93.2720950 + 483202.0175233 * t - 0.0036539 * t * t).to_radians();

    let correction = 6.288774 * mp.sin()
        + 1.274027 * (2.0 * d - mp).sin()
        + 0.658314 * (2.0 * d).sin()
        + 0.213618 * (2.0 * mp).sin()
        - 0.185116 * m.sin()
        - 0.114332 * (2.0 * f).sin()
        + 0.058793 * (2.0 * d - 2.0 * mp).sin()
        + 0.057066 * (2.0 * d - m - mp).sin()
        + 0.053322 * (2.0 * d + mp).sin()
        + 0.045758 * (2.0 * d - m).sin();
    normalize_deg(lp + correction)
}

/// Mean lunar ascending node (Rahu) longitude, degrees (Meeus Ch. 47).
fn mean_node_longitude_deg(t: f64) -> f64 {
    normalize_deg(125.0445479 - 1934.1362891 * t + 0.0020754 * t * t + t * t * t / 467_441.0)
}

/// Accumulated general precession since J2000, degrees. Converts the
/// J2000-frame planetary longitudes to longitudes of date, matching the
/// of-date solar and lunar series.
fn precession_deg(t: f64) -> f64 {
    (5028.796195 * t + 1.1054348 * t * t) / 3600.0
}

/// Geocentric tropical longitude, latitude and distance of a planet.
fn planet_geocentric(elements: &MeanElements, t: f64) -> (f64, f64, f64) {
    let (px, py, pz) = elements.heliocentric_xyz(t);
    let (ex, ey, ez) = EARTH_MOON_BARY.heliocentric_xyz(t);
    let (gx, gy, gz) = (px - ex, py - ey, pz - ez);
    let distance = (gx * gx + gy * gy + gz * gz).sqrt();
    let longitude = normalize_deg(gy.atan2(gx).to_degrees() + precession_deg(t));
    let latitude = (gz / distance).asin().to_degrees();
    (longitude, latitude, distance)
}

/// Built-in analytic ephemeris.
///
/// Stateless and deterministic: repeated queries for the same instant and
/// frame return identical samples.
#[derive(Debug, Default, Clone)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }

    /// Tropical longitude, latitude and distance for a body code.
    fn tropical(&self, body: BodyCode, jd: JulianDay) -> Option<(f64, f64, f64)> {
        let t = jd.centuries_since_j2000();
        match body.0 {
            0 => Some((sun_longitude_deg(t), 0.0, 1.0)),
            1 => Some((moon_longitude_deg(t), 0.0, 0.00257)),
            2 => Some(planet_geocentric(&MERCURY, t)),
            3 => Some(planet_geocentric(&VENUS, t)),
            4 => Some(planet_geocentric(&MARS, t)),
            5 => Some(planet_geocentric(&JUPITER, t)),
            6 => Some(planet_geocentric(&SATURN, t)),
            10 => Some((mean_node_longitude_deg(t), 0.0, 0.00257)),
            _ => None,
        }
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn query(
        &self,
        jd: JulianDay,
        body: BodyCode,
        frame: SiderealFrame,
    ) -> Result<EphemerisSample, EphemerisError> {
        let body_name = body_for_code(body).ok_or(EphemerisError::UnknownCode(body))?;
        if !(JD_MIN..=JD_MAX).contains(&jd.value()) {
            return Err(EphemerisError::OutOfRange {
                body: body_name,
                jd: jd.value(),
            });
        }

        let (lon, lat, dist) = self
            .tropical(body, jd)
            .ok_or(EphemerisError::UnknownBody(body_name))?;

        // Symmetric finite difference for the speed components.
        let before = JulianDay::new(jd.value() - SPEED_STEP_DAYS);
        let after = JulianDay::new(jd.value() + SPEED_STEP_DAYS);
        let (lon_b, lat_b, dist_b) = self.tropical(body, before).unwrap_or((lon, lat, dist));
        let (lon_a, lat_a, dist_a) = self.tropical(body, after).unwrap_or((lon, lat, dist));
        let span = 2.0 * SPEED_STEP_DAYS;
        let speed_longitude = wrapped_delta_deg(lon_a, lon_b) / span;
        let speed_latitude = (lat_a - lat_b) / span;
        let speed_distance = (dist_a - dist_b) / span;

        // The ayanamsa drift is negligible across the sampling window, so the
        // sidereal correction does not affect the speed sign.
        let longitude = normalize_deg(lon - frame.ayanamsa_deg(jd));

        Ok(EphemerisSample {
            longitude,
            latitude: lat,
            distance: dist,
            speed_longitude,
            speed_latitude,
            speed_distance,
        })
    }
}

/// Reverse mapping for error reporting. `None` for codes outside the
/// tracked set.
fn body_for_code(code: BodyCode) -> Option<CelestialBody> {
    CelestialBody::queryable().find(|b| b.provider_code() == Some(code))
}
