//! End-to-end pipeline tests: birth details through natal chart, transits
//! and prediction assembly, using a scripted ephemeris provider so every
//! longitude is known in advance.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use horoscope_rust::astro::{house_of, normalize_deg, sign_of};
use horoscope_rust::ephemeris::{
    AnalyticEphemeris, EphemerisError, EphemerisProvider, EphemerisSample, SiderealFrame,
};
use horoscope_rust::models::{
    BirthDetails, CelestialBody, JulianDay, TimeFrame, ALL_BODIES,
};
use horoscope_rust::services::geocoding::StaticGeocoder;
use horoscope_rust::services::natal::{natal_chart_for_details, CoordinateSource};
use horoscope_rust::services::{build_predictions, natal_chart, transits_at};

/// Provider that replays fixed longitudes regardless of date or frame.
struct ScriptedProvider {
    longitudes: HashMap<i32, (f64, f64)>, // code -> (longitude, speed)
}

impl ScriptedProvider {
    fn new(entries: &[(CelestialBody, f64, f64)]) -> Self {
        let longitudes = entries
            .iter()
            .map(|(body, lon, speed)| {
                (body.provider_code().unwrap().0, (*lon, *speed))
            })
            .collect();
        Self { longitudes }
    }
}

impl EphemerisProvider for ScriptedProvider {
    fn query(
        &self,
        _jd: JulianDay,
        body: horoscope_rust::models::BodyCode,
        _frame: SiderealFrame,
    ) -> Result<EphemerisSample, EphemerisError> {
        let (longitude, speed) = self
            .longitudes
            .get(&body.0)
            .copied()
            .ok_or(EphemerisError::UnknownCode(body))?;
        Ok(EphemerisSample {
            longitude,
            latitude: 0.0,
            distance: 1.0,
            speed_longitude: speed,
            speed_latitude: 0.0,
            speed_distance: 0.0,
        })
    }
}

fn full_script() -> ScriptedProvider {
    ScriptedProvider::new(&[
        (CelestialBody::Sun, 10.0, 0.98),      // Aries, house 1
        (CelestialBody::Moon, 45.0, 13.2),     // Taurus, house 2
        (CelestialBody::Mercury, 50.0, -1.2),  // Taurus, house 2, retrograde
        (CelestialBody::Venus, 130.0, 1.2),    // Leo, house 5
        (CelestialBody::Mars, 170.0, 0.5),     // Virgo, house 6
        (CelestialBody::Jupiter, 250.0, 0.08), // Sagittarius, house 9
        (CelestialBody::Saturn, 285.0, 0.03),  // Capricorn, house 10
        (CelestialBody::Rahu, 300.0, -0.05),   // Aquarius, house 11
    ])
}

#[test]
fn scripted_transits_flow_into_every_bucket() {
    let provider = full_script();
    let transits = transits_at(&provider, JulianDay::new(2451545.0));
    assert_eq!(transits.len(), 9);

    // Ketu derived from Rahu, same retrograde flag.
    let ketu = transits
        .iter()
        .find(|t| t.body == CelestialBody::Ketu)
        .unwrap();
    assert!((ketu.longitude - 120.0).abs() < 1e-9);
    assert!(ketu.is_retrograde);

    let prediction = build_predictions(
        TimeFrame::Daily,
        &transits,
        None,
        &mut StdRng::seed_from_u64(1),
    );

    // Sun house 1 -> career, Moon/Mercury house 2 -> finances,
    // Venus house 5 and Ketu house 5 -> love, Mars house 6 -> health.
    assert!(prediction.career.contains("Transiting Sun"));
    assert!(prediction.finances.contains("Transiting Moon"));
    assert!(prediction.finances.contains("Transiting Mercury"));
    assert!(prediction.love.contains("Transiting Venus"));
    assert!(prediction.health.contains("Transiting Mars"));
    // Moon and Mercury sit 5 degrees apart in Taurus.
    assert!(prediction.general.contains("conjunct"));
    // Mercury is retrograde in the script.
    assert!(prediction.general.contains("(retrograde)"));
}

#[test]
fn transit_order_follows_body_enumeration() {
    let provider = full_script();
    let transits = transits_at(&provider, JulianDay::new(2451545.0));
    let order: Vec<CelestialBody> = transits.iter().map(|t| t.body).collect();
    assert_eq!(order, ALL_BODIES.to_vec());
}

#[test]
fn partial_provider_failure_shrinks_the_list() {
    struct HalfBroken(ScriptedProvider);
    impl EphemerisProvider for HalfBroken {
        fn query(
            &self,
            jd: JulianDay,
            body: horoscope_rust::models::BodyCode,
            frame: SiderealFrame,
        ) -> Result<EphemerisSample, EphemerisError> {
            if body.0 == CelestialBody::Saturn.provider_code().unwrap().0 {
                return Err(EphemerisError::Provider {
                    body: CelestialBody::Saturn,
                    message: "scripted outage".to_string(),
                });
            }
            self.0.query(jd, body, frame)
        }
    }

    let provider = HalfBroken(full_script());
    let transits = transits_at(&provider, JulianDay::new(2451545.0));
    assert_eq!(transits.len(), 8);
    assert!(transits.iter().all(|t| t.body != CelestialBody::Saturn));
}

#[tokio::test]
async fn birth_details_to_natal_chart_via_geocoder() {
    let provider = AnalyticEphemeris::new();
    let geocoder = StaticGeocoder::new().with_entry("Mumbai, India", 19.0760, 72.8777);
    let details = BirthDetails {
        year: 1990,
        month: 6,
        day: 15,
        hour: 12,
        minute: 30,
        city: "Mumbai".to_string(),
        country: "India".to_string(),
        latitude: None,
        longitude: None,
    };

    let chart = natal_chart_for_details(&provider, &geocoder, &details, CoordinateSource::Strict)
        .await
        .unwrap();

    assert_eq!(chart.positions.len(), 9);
    assert_eq!(chart.ascendant_sign, sign_of(chart.ascendant));
    for (body, longitude) in &chart.positions {
        assert_eq!(chart.houses[body], house_of(*longitude));
    }

    // Same chart when the caller passes the coordinates directly.
    let direct = natal_chart(
        &provider,
        JulianDay::from_calendar(1990, 6, 15, 12, 30),
        19.0760,
        72.8777,
    )
    .unwrap();
    assert_eq!(chart, direct);
}

#[tokio::test]
async fn prediction_with_natal_chart_mentions_natal_aspects() {
    // Natal chart under the scripted provider puts Sun at 10.0; a transit
    // at the same longitude is a conjunction to the natal Sun.
    let provider = full_script();
    let geocoder = StaticGeocoder::new().with_entry("Greenwich, UK", 51.4769, 0.0);
    let details = BirthDetails {
        year: 2000,
        month: 3,
        day: 20,
        hour: 6,
        minute: 0,
        city: "Greenwich".to_string(),
        country: "UK".to_string(),
        latitude: None,
        longitude: None,
    };

    let chart = natal_chart_for_details(&provider, &geocoder, &details, CoordinateSource::Strict)
        .await
        .unwrap();
    let transits = transits_at(&provider, JulianDay::new(2451625.0));
    let prediction = build_predictions(
        TimeFrame::Weekly,
        &transits,
        Some(&chart),
        &mut StdRng::seed_from_u64(9),
    );

    assert!(prediction.general.contains("is conjunction your natal Sun"));
    assert_eq!(prediction.time_frame, TimeFrame::Weekly);
    assert!(prediction.natal_chart.is_some());
}

#[test]
fn analytic_provider_sidereal_frames_differ_by_ayanamsa() {
    let provider = AnalyticEphemeris::new();
    let jd = JulianDay::from_calendar(2020, 1, 1, 0, 0);
    let code = CelestialBody::Sun.provider_code().unwrap();
    let tropical = provider.query(jd, code, SiderealFrame::Tropical).unwrap();
    let lahiri = provider.query(jd, code, SiderealFrame::Lahiri).unwrap();
    let expected = normalize_deg(tropical.longitude - SiderealFrame::Lahiri.ayanamsa_deg(jd));
    assert!((lahiri.longitude - expected).abs() < 1e-9);
}
