//! Common test utilities for wayfarer-geo integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use wayfarer_core::GeoConfig;
use wayfarer_geo::OsmBackend;
use wiremock::MockServer;

/// One mock server standing in for every OSM service.
pub struct GeoHarness {
    /// The mock HTTP server
    pub server: MockServer,
    /// Configuration pointing every service at the server
    pub config: GeoConfig,
}

impl GeoHarness {
    /// Starts a mock server and builds a matching configuration.
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base = server.uri();
        let config = GeoConfig {
            user_agent: "wayfarer-tests/0.1".to_string(),
            nominatim_url: base.clone(),
            osrm_url: base.clone(),
            overpass_url: format!("{base}/api/interpreter"),
            wikipedia_url: format!("{base}/api/rest_v1"),
            timeout_secs: 2,
            overpass_timeout_secs: 2,
            wikipedia_timeout_secs: 2,
            ..GeoConfig::default()
        };
        Self { server, config }
    }

    /// An OSM backend talking to the mock server.
    pub fn backend(&self) -> OsmBackend {
        OsmBackend::new(&self.config).unwrap()
    }
}

/// A Nominatim hit as JSON.
pub fn hit(name: &str, lat: f64, lng: f64) -> serde_json::Value {
    serde_json::json!({
        "display_name": name,
        "lat": lat.to_string(),
        "lon": lng.to_string(),
    })
}

/// An OSRM response with a single route.
pub fn osrm_route(distance: f64, duration: f64) -> serde_json::Value {
    serde_json::json!({
        "code": "Ok",
        "routes": [{"distance": distance, "duration": duration}],
    })
}
