//! Current planetary transit computation.

use log::{debug, warn};

use crate::astro::{degree_in_sign, house_of, normalize_deg, sign_of};
use crate::ephemeris::{self, BodyPosition, EphemerisProvider, SiderealFrame};
use crate::models::{CelestialBody, JulianDay, Transit, ALL_BODIES};

/// Sidereal frame used for all transit computations.
pub const TRANSIT_FRAME: SiderealFrame = SiderealFrame::FaganBradley;

fn transit_from_position(body: CelestialBody, position: BodyPosition) -> Transit {
    Transit {
        body,
        longitude: position.longitude,
        degree_in_sign: degree_in_sign(position.longitude),
        sign: sign_of(position.longitude),
        house: house_of(position.longitude),
        is_retrograde: position.is_retrograde,
    }
}

/// Transit positions of all tracked bodies at the given instant.
///
/// Per-body provider failures are logged and the body omitted; a single
/// failure never aborts the batch. Ketu is appended opposite Rahu when the
/// Rahu query succeeded. The list is returned in enumeration order of
/// [`CelestialBody`].
pub fn transits_at(provider: &dyn EphemerisProvider, jd: JulianDay) -> Vec<Transit> {
    debug!("calculating transits for JD {}", jd.value());

    let mut transits = Vec::with_capacity(ALL_BODIES.len());
    for body in CelestialBody::queryable() {
        match ephemeris::position(provider, jd, body, TRANSIT_FRAME) {
            Ok(position) => {
                debug!(
                    "transit {}: {:.2} deg{}",
                    body,
                    position.longitude,
                    if position.is_retrograde { " (R)" } else { "" }
                );
                transits.push(transit_from_position(body, position));
            }
            Err(e) => {
                warn!("skipping transit for {body}: {e}");
            }
        }
    }

    // Ketu sits exactly opposite Rahu and shares its retrograde state.
    if let Some(rahu) = transits.iter().find(|t| t.body == CelestialBody::Rahu) {
        let ketu = BodyPosition {
            longitude: normalize_deg(rahu.longitude + 180.0),
            is_retrograde: rahu.is_retrograde,
        };
        transits.push(transit_from_position(CelestialBody::Ketu, ketu));
    }

    transits
}

/// Transit positions for the current system UTC time.
pub fn current_transits(provider: &dyn EphemerisProvider) -> Vec<Transit> {
    transits_at(provider, JulianDay::now())
}
