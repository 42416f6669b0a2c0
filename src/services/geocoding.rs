//! Location lookup collaborator.
//!
//! The geocoder is an external network service; the core only depends on the
//! [`Geocoder`] trait. Transient unavailability is retried a small fixed
//! number of times with a short backoff; not-found is permanent and
//! propagated to the caller as a user-correctable input problem.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::GeocodingError;

/// Geographic coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Free-text address to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodingError>;
}

const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_secs(2);

/// Geocode with retries on transient unavailability.
///
/// Not-found responses are returned immediately; only `Unavailable` errors
/// are retried, up to [`MAX_ATTEMPTS`] total attempts.
pub async fn geocode_with_retry(
    geocoder: &dyn Geocoder,
    address: &str,
) -> Result<Coordinates, GeocodingError> {
    let mut last_err = None;
    for attempt in 1..=MAX_ATTEMPTS {
        match geocoder.geocode(address).await {
            Ok(coords) => return Ok(coords),
            Err(GeocodingError::NotFound(msg)) => return Err(GeocodingError::NotFound(msg)),
            Err(err @ GeocodingError::Unavailable(_)) => {
                warn!("geocoding attempt {attempt}/{MAX_ATTEMPTS} for '{address}' failed: {err}");
                last_err = Some(err);
                if attempt < MAX_ATTEMPTS {
                    tokio::time::sleep(RETRY_BACKOFF).await;
                }
            }
        }
    }
    Err(last_err.expect("at least one attempt"))
}

/// Nominatim configuration loaded from environment variables.
///
/// # Environment Variables
/// - `GEOCODER_BASE_URL` (optional, default: `https://nominatim.openstreetmap.org`)
/// - `GEOCODER_USER_AGENT` (optional, default: `horoscope-rust`)
#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl NominatimConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("GEOCODER_BASE_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string()),
            user_agent: std::env::var("GEOCODER_USER_AGENT")
                .unwrap_or_else(|_| "horoscope-rust".to_string()),
        }
    }
}

/// Nominatim HTTP geocoder.
pub struct NominatimGeocoder {
    client: reqwest::Client,
    config: NominatimConfig,
}

/// One place record from the Nominatim search response. Coordinates come
/// back as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(config: NominatimConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(NominatimConfig::from_env())
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodingError> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.config.base_url,
            urlencoding::encode(address)
        );

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .send()
            .await
            .map_err(|e| GeocodingError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodingError::Unavailable(format!(
                "geocoder returned HTTP {}",
                response.status()
            )));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodingError::Unavailable(e.to_string()))?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::NotFound(address.to_string()))?;

        let latitude = place
            .lat
            .parse()
            .map_err(|_| GeocodingError::Unavailable(format!("bad latitude '{}'", place.lat)))?;
        let longitude = place
            .lon
            .parse()
            .map_err(|_| GeocodingError::Unavailable(format!("bad longitude '{}'", place.lon)))?;

        Ok(Coordinates {
            latitude,
            longitude,
        })
    }
}

/// Fixed in-memory geocoder for tests and offline runs.
#[derive(Debug, Default, Clone)]
pub struct StaticGeocoder {
    entries: HashMap<String, Coordinates>,
}

impl StaticGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, address: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        self.entries.insert(
            address.into().to_lowercase(),
            Coordinates {
                latitude,
                longitude,
            },
        );
        self
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodingError> {
        self.entries
            .get(&address.to_lowercase())
            .copied()
            .ok_or_else(|| GeocodingError::NotFound(address.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    struct CountingGeocoder {
        calls: AtomicU32,
        fail_first: u32,
    }

    #[async_trait]
    impl Geocoder for CountingGeocoder {
        async fn geocode(&self, _address: &str) -> Result<Coordinates, GeocodingError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.fail_first {
                Err(GeocodingError::Unavailable("flaky".into()))
            } else {
                Ok(Coordinates {
                    latitude: 19.08,
                    longitude: 72.88,
                })
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_recovers_from_transient_failure() {
        let geocoder = CountingGeocoder {
            calls: AtomicU32::new(0),
            fail_first: 2,
        };
        let coords = geocode_with_retry(&geocoder, "Mumbai, India").await.unwrap();
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 3);
        assert_eq!(coords.latitude, 19.08);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_gives_up_after_three_attempts() {
        let geocoder = CountingGeocoder {
            calls: AtomicU32::new(0),
            fail_first: 10,
        };
        let err = geocode_with_retry(&geocoder, "Nowhere").await.unwrap_err();
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 3);
        assert!(matches!(err, GeocodingError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        struct NotFound(AtomicU32);
        #[async_trait]
        impl Geocoder for NotFound {
            async fn geocode(&self, address: &str) -> Result<Coordinates, GeocodingError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Err(GeocodingError::NotFound(address.to_string()))
            }
        }
        let geocoder = NotFound(AtomicU32::new(0));
        let err = geocode_with_retry(&geocoder, "Atlantis").await.unwrap_err();
        assert_eq!(geocoder.0.load(Ordering::SeqCst), 1);
        assert!(matches!(err, GeocodingError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_static_geocoder_case_insensitive() {
        let geocoder = StaticGeocoder::new().with_entry("Mumbai, India", 19.08, 72.88);
        let coords = geocoder.geocode("mumbai, india").await.unwrap();
        assert_eq!(coords.longitude, 72.88);
        assert!(geocoder.geocode("Paris, France").await.is_err());
    }
}
