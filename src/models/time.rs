use chrono::{Datelike, Timelike};
use serde::*;

/// Julian Day representation.
/// JD 2451545.0 = 2000-01-01 12:00:00 UTC (J2000.0)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDay(f64);

/// Julian Day of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;

impl JulianDay {
    /// Create a new JD value.
    pub fn new(v: f64) -> Self {
        Self(v)
    }

    /// Raw JD value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Julian centuries since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        (self.0 - J2000_JD) / 36525.0
    }

    /// JD from proleptic Gregorian calendar components.
    ///
    /// The fractional day is `hour + minute/60` expressed in days, matching
    /// the standard Fliegel-Van Flandern calendar-to-JD formula.
    pub fn from_calendar(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        let y = year as i64;
        let m = month as i64;
        let d = day as i64;

        // Fliegel & Van Flandern (1968), gives the JDN at noon.
        let a = (14 - m) / 12;
        let yy = y + 4800 - a;
        let mm = m + 12 * a - 3;
        let jdn = d + (153 * mm + 2) / 5 + 365 * yy + yy / 4 - yy / 100 + yy / 400 - 32045;

        let day_fraction = (hour as f64 + minute as f64 / 60.0) / 24.0;
        Self(jdn as f64 - 0.5 + day_fraction)
    }

    /// JD from a chrono UTC instant.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        let base = Self::from_calendar(dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute());
        let seconds = dt.second() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9;
        Self(base.0 + seconds / 86_400.0)
    }

    /// JD of the current system UTC time.
    pub fn now() -> Self {
        Self::from_datetime(chrono::Utc::now())
    }
}

impl From<f64> for JulianDay {
    fn from(v: f64) -> Self {
        JulianDay::new(v)
    }
}

#[cfg(test)]
mod tests {
    use super::{JulianDay, J2000_JD};

    #[test]
    fn test_jd_new() {
        let jd = JulianDay::new(2451545.0);
        assert_eq!(jd.value(), 2451545.0);
    }

    #[test]
    fn test_jd_from_f64() {
        let jd: JulianDay = 2458849.0.into();
        assert_eq!(jd.value(), 2458849.0);
    }

    #[test]
    fn test_j2000_epoch() {
        // 2000-01-01 12:00 UTC is exactly J2000.0
        let jd = JulianDay::from_calendar(2000, 1, 1, 12, 0);
        assert_eq!(jd.value(), J2000_JD);
    }

    #[test]
    fn test_j2000_midnight() {
        let jd = JulianDay::from_calendar(2000, 1, 1, 0, 0);
        assert_eq!(jd.value(), 2451544.5);
    }

    #[test]
    fn test_known_epoch_1990() {
        // Meeus example 7.a: 1957-10-04.81 = JD 2436116.31; use an exact
        // midnight case instead: 1990-01-01 00:00 UTC = JD 2447892.5.
        let jd = JulianDay::from_calendar(1990, 1, 1, 0, 0);
        assert_eq!(jd.value(), 2447892.5);
    }

    #[test]
    fn test_fractional_day() {
        let midnight = JulianDay::from_calendar(2000, 1, 1, 0, 0);
        let six_thirty = JulianDay::from_calendar(2000, 1, 1, 6, 30);
        let delta = six_thirty.value() - midnight.value();
        // One ulp at JD magnitude is ~4.6e-10, so the comparison cannot be
        // tighter than that.
        assert!((delta - 6.5 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_datetime_matches_calendar() {
        let dt = chrono::DateTime::parse_from_rfc3339("2000-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let jd = JulianDay::from_datetime(dt);
        assert_eq!(jd.value(), 2451544.5);
    }

    #[test]
    fn test_centuries_since_j2000() {
        let jd = JulianDay::new(J2000_JD + 36525.0);
        assert!((jd.centuries_since_j2000() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ordering() {
        let a = JulianDay::new(2451545.0);
        let b = JulianDay::new(2451546.0);
        assert!(a < b);
    }
}
