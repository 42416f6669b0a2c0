//! Natal chart computation.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::astro::{ascendant_and_cusps, normalize_deg, sign_of, HouseStrategy};
use crate::ephemeris::{self, EphemerisProvider, SiderealFrame};
use crate::error::HoroscopeError;
use crate::models::{BirthDetails, CelestialBody, JulianDay, NatalChart};
use crate::services::geocoding::{geocode_with_retry, Coordinates, Geocoder};

/// Sidereal frame used for all natal computations. Deliberately different
/// from the transit frame.
pub const NATAL_FRAME: SiderealFrame = SiderealFrame::Lahiri;

/// What to do when the birth place cannot be geocoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSource {
    /// Surface the lookup error. A silently assumed position produces a
    /// plausible-looking but wrong chart, so this is the default.
    #[default]
    Strict,
    /// Legacy behavior: assume (0, 0) and keep going.
    ZeroFallback,
}

/// Natal chart for a birth instant at known geographic coordinates.
///
/// Planet positions are queried under the natal frame with per-body failure
/// tolerance; Ketu is derived from Rahu. The ascendant uses the true
/// Placidus computation while per-body house numbers use the equal-division
/// rule, an intentional simplification kept from the prediction model.
pub fn natal_chart(
    provider: &dyn EphemerisProvider,
    birth_jd: JulianDay,
    latitude: f64,
    longitude: f64,
) -> Result<NatalChart, HoroscopeError> {
    debug!("calculating natal chart for JD {}", birth_jd.value());

    let mut positions: BTreeMap<CelestialBody, f64> = BTreeMap::new();
    for body in CelestialBody::queryable() {
        match ephemeris::position(provider, birth_jd, body, NATAL_FRAME) {
            Ok(position) => {
                debug!("natal {}: {:.2} deg", body, position.longitude);
                positions.insert(body, position.longitude);
            }
            Err(e) => {
                warn!("skipping natal position for {body}: {e}");
            }
        }
    }

    if let Some(rahu) = positions.get(&CelestialBody::Rahu).copied() {
        positions.insert(CelestialBody::Ketu, normalize_deg(rahu + 180.0));
    }

    if positions.is_empty() {
        return Err(HoroscopeError::computation(format!(
            "no natal positions could be computed for JD {}",
            birth_jd.value()
        )));
    }

    let (ascendant, house_cusps) = ascendant_and_cusps(birth_jd, latitude, longitude, NATAL_FRAME)
        .map_err(|e| {
            warn!(
                "ascendant computation failed at ({latitude}, {longitude}), JD {}: {e}",
                birth_jd.value()
            );
            e
        })?;

    // Per-body houses keep the equal-division rule the prediction text is
    // written against, independent of the Placidus cusps above.
    let houses = positions
        .iter()
        .map(|(body, lon)| {
            (*body, HouseStrategy::EqualFromAries.house_of(*lon, &house_cusps))
        })
        .collect();

    Ok(NatalChart {
        ascendant,
        ascendant_sign: sign_of(ascendant),
        house_cusps,
        positions,
        houses,
    })
}

/// Natal chart from raw birth details, resolving the birth place through the
/// geocoder collaborator when no explicit coordinates are supplied.
pub async fn natal_chart_for_details(
    provider: &dyn EphemerisProvider,
    geocoder: &dyn Geocoder,
    details: &BirthDetails,
    on_geocode_failure: CoordinateSource,
) -> Result<NatalChart, HoroscopeError> {
    details.validate()?;

    let coords = match (details.latitude, details.longitude) {
        (Some(latitude), Some(longitude)) => Coordinates {
            latitude,
            longitude,
        },
        _ => {
            let address = details.address();
            match geocode_with_retry(geocoder, &address).await {
                Ok(coords) => coords,
                Err(e) if on_geocode_failure == CoordinateSource::ZeroFallback => {
                    warn!("geocoding '{address}' failed ({e}), falling back to (0, 0)");
                    Coordinates {
                        latitude: 0.0,
                        longitude: 0.0,
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    natal_chart(provider, details.julian_day(), coords.latitude, coords.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::house_of;
    use crate::ephemeris::AnalyticEphemeris;
    use crate::services::geocoding::StaticGeocoder;

    fn birth_details() -> BirthDetails {
        BirthDetails {
            year: 2000,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            city: "Mumbai".to_string(),
            country: "India".to_string(),
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_chart_at_null_island_is_deterministic() {
        let provider = AnalyticEphemeris::new();
        let jd = JulianDay::from_calendar(2000, 1, 1, 0, 0);
        let a = natal_chart(&provider, jd, 0.0, 0.0).unwrap();
        let b = natal_chart(&provider, jd, 0.0, 0.0).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.positions.len(), 9);
    }

    #[test]
    fn test_ketu_opposite_rahu() {
        let provider = AnalyticEphemeris::new();
        let jd = JulianDay::from_calendar(1990, 6, 15, 12, 30);
        let chart = natal_chart(&provider, jd, 19.08, 72.88).unwrap();
        let rahu = chart.longitude_of(CelestialBody::Rahu).unwrap();
        let ketu = chart.longitude_of(CelestialBody::Ketu).unwrap();
        assert!((ketu - normalize_deg(rahu + 180.0)).abs() < 1e-12);
    }

    #[test]
    fn test_houses_follow_equal_division_rule() {
        let provider = AnalyticEphemeris::new();
        let jd = JulianDay::from_calendar(1985, 11, 2, 4, 45);
        let chart = natal_chart(&provider, jd, 51.5, -0.12).unwrap();
        for (body, longitude) in &chart.positions {
            assert_eq!(chart.houses[body], house_of(*longitude));
        }
    }

    #[test]
    fn test_ascendant_sign_matches_longitude() {
        let provider = AnalyticEphemeris::new();
        let jd = JulianDay::from_calendar(1975, 3, 21, 18, 0);
        let chart = natal_chart(&provider, jd, 28.61, 77.21).unwrap();
        assert_eq!(chart.ascendant_sign, sign_of(chart.ascendant));
        assert_eq!(chart.ascendant, chart.house_cusps[0]);
    }

    #[tokio::test]
    async fn test_geocode_failure_surfaces_by_default() {
        let provider = AnalyticEphemeris::new();
        let geocoder = StaticGeocoder::new();
        let err = natal_chart_for_details(
            &provider,
            &geocoder,
            &birth_details(),
            CoordinateSource::Strict,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, HoroscopeError::Geocoding(_)));
    }

    #[tokio::test]
    async fn test_geocode_failure_zero_fallback() {
        let provider = AnalyticEphemeris::new();
        let geocoder = StaticGeocoder::new();
        let chart = natal_chart_for_details(
            &provider,
            &geocoder,
            &birth_details(),
            CoordinateSource::ZeroFallback,
        )
        .await
        .unwrap();
        // Same chart as computing directly at (0, 0).
        let direct = natal_chart(
            &provider,
            JulianDay::from_calendar(2000, 1, 1, 0, 0),
            0.0,
            0.0,
        )
        .unwrap();
        assert_eq!(chart, direct);
    }

    #[tokio::test]
    async fn test_explicit_coordinates_bypass_geocoder() {
        let provider = AnalyticEphemeris::new();
        let geocoder = StaticGeocoder::new(); // would fail if consulted
        let mut details = birth_details();
        details.latitude = Some(19.08);
        details.longitude = Some(72.88);
        let chart = natal_chart_for_details(
            &provider,
            &geocoder,
            &details,
            CoordinateSource::Strict,
        )
        .await
        .unwrap();
        assert_eq!(chart.positions.len(), 9);
    }

    #[tokio::test]
    async fn test_invalid_details_rejected_before_computation() {
        let provider = AnalyticEphemeris::new();
        let geocoder = StaticGeocoder::new().with_entry("Mumbai, India", 19.08, 72.88);
        let mut details = birth_details();
        details.month = 13;
        let err = natal_chart_for_details(
            &provider,
            &geocoder,
            &details,
            CoordinateSource::Strict,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, HoroscopeError::Validation(_)));
    }
}
