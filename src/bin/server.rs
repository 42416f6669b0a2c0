//! Horoscope HTTP server binary.
//!
//! Entry point for the REST API: wires the analytic ephemeris, the Nominatim
//! geocoder and the Groq insight client into the router and starts serving.
//!
//! # Usage
//!
//! ```bash
//! GROQ_API_KEY=... cargo run --bin horoscope-server --features http-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)
//! - `GROQ_API_KEY`: Groq API key (required)
//! - `GROQ_MODEL`, `GROQ_BASE_URL`: Groq overrides (optional)
//! - `GEOCODER_BASE_URL`, `GEOCODER_USER_AGENT`: Nominatim overrides (optional)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use horoscope_rust::ephemeris::AnalyticEphemeris;
use horoscope_rust::http::{create_router, AppState};
use horoscope_rust::services::geocoding::NominatimGeocoder;
use horoscope_rust::services::insights::{GroqClient, GroqConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting horoscope HTTP server");

    let groq_config = GroqConfig::from_env().map_err(|e| anyhow::anyhow!(e))?;
    let state = AppState::new(
        Arc::new(AnalyticEphemeris::new()),
        Arc::new(NominatimGeocoder::from_env()),
        Arc::new(GroqClient::new(groq_config)),
    );

    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
