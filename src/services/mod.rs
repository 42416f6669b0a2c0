//! Service layer for the astrological pipeline.
//!
//! The engines orchestrate the ephemeris provider and the pure math in
//! [`crate::astro`]; the collaborator modules (geocoding, insights, chart
//! rendering) wrap external services behind narrow trait boundaries.

pub mod chart;
pub mod chat;
pub mod geocoding;
pub mod insights;
pub mod natal;
pub mod predictions;
pub mod transits;

pub use natal::{natal_chart, CoordinateSource};
pub use predictions::build_predictions;
pub use transits::{current_transits, transits_at};
