//! Birth details and input validation.

use serde::{Deserialize, Serialize};

use crate::error::HoroscopeError;
use crate::models::time::JulianDay;

/// Birth date, time and place as submitted by the caller.
///
/// Coordinates may be supplied directly; otherwise the city/country pair is
/// resolved through the geocoder collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthDetails {
    pub year: i32,
    /// Birth month (1-12)
    pub month: u32,
    /// Birth day (1-31)
    pub day: u32,
    /// Birth hour (0-23)
    pub hour: u32,
    /// Birth minute (0-59)
    pub minute: u32,
    pub city: String,
    pub country: String,
    /// Explicit birth latitude in degrees, bypassing geocoding when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Explicit birth longitude in degrees, bypassing geocoding when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl BirthDetails {
    /// Reject malformed date/time components before any computation begins.
    pub fn validate(&self) -> Result<(), HoroscopeError> {
        if chrono::NaiveDate::from_ymd_opt(self.year, self.month, self.day).is_none() {
            return Err(HoroscopeError::validation(format!(
                "invalid calendar date {:04}-{:02}-{:02}",
                self.year, self.month, self.day
            )));
        }
        if self.hour > 23 {
            return Err(HoroscopeError::validation(format!(
                "hour {} out of range 0-23",
                self.hour
            )));
        }
        if self.minute > 59 {
            return Err(HoroscopeError::validation(format!(
                "minute {} out of range 0-59",
                self.minute
            )));
        }
        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(HoroscopeError::validation(format!(
                    "latitude {lat} out of range -90..90"
                )));
            }
        }
        if let Some(lon) = self.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(HoroscopeError::validation(format!(
                    "longitude {lon} out of range -180..180"
                )));
            }
        }
        Ok(())
    }

    /// Birth instant as a Julian Day (treated as UTC).
    pub fn julian_day(&self) -> JulianDay {
        JulianDay::from_calendar(self.year, self.month, self.day, self.hour, self.minute)
    }

    /// Free-text address for the geocoder.
    pub fn address(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}
