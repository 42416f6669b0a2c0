//! HTTP server module for the horoscope backend.
//!
//! Exposes the service layer as an axum-based REST API. The handlers only
//! parse requests, delegate to the services and serialize responses; all
//! astrological logic lives below this layer.

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
