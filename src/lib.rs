//! # Horoscope Rust Backend
//!
//! Astrological computation engine and REST API.
//!
//! This crate computes planetary transits, natal charts and house placements
//! from birth details, composes natural-language predictions from the derived
//! angles, and exposes everything over an Axum-based REST API. External
//! collaborators (geocoding, LLM insight generation, chart rendering) sit
//! behind narrow trait boundaries so the arithmetic core stays pure and
//! deterministic.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types (celestial bodies, transits, natal charts, birth details)
//! - [`ephemeris`]: Planetary position provider boundary and the built-in analytic provider
//! - [`astro`]: Pure angle, house and aspect math
//! - [`services`]: Transit/natal engines, prediction composition, geocoding, insights
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Reference frames
//!
//! Transit and natal computations intentionally use different sidereal
//! ayanamsa modes (Fagan-Bradley and Lahiri respectively). The frame is an
//! explicit parameter on every ephemeris call; there is no process-global
//! mode switch, so concurrent requests cannot leak frame state into each
//! other.

pub mod astro;

pub mod ephemeris;
pub mod error;

pub mod models;

pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::HoroscopeError;
