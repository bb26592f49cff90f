//! OSRM route lookups.

use super::{build_http_client, check_status, join_url, json_body, transport_error};
use crate::types::Route;
use serde::Deserialize;
use wayfarer_core::{Coordinates, GeoConfig, Result, TravelMode};

const SERVICE: &str = "osrm";

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    distance: f64,
    duration: f64,
}

/// Client for the OSRM `/route/v1` service.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl OsrmClient {
    /// Creates a client from configuration.
    pub fn new(config: &GeoConfig) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config, config.timeout_secs)?,
            base_url: config.osrm_url.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// URL of the route between two points; OSRM wants `lng,lat` order.
    pub fn route_url(&self, from: Coordinates, to: Coordinates, mode: TravelMode) -> String {
        join_url(
            &self.base_url,
            &format!(
                "route/v1/{}/{},{};{},{}",
                mode.osrm_profile(),
                from.lng,
                from.lat,
                to.lng,
                to.lat
            ),
        )
    }

    /// First route between two points, or `None` when OSRM finds none.
    pub async fn route(
        &self,
        from: Coordinates,
        to: Coordinates,
        mode: TravelMode,
    ) -> Result<Option<Route>> {
        let response = self
            .http
            .get(self.route_url(from, to, mode))
            .query(&[("overview", "false")])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, self.timeout_secs, e))?;
        let body: RouteResponse = json_body(SERVICE, check_status(SERVICE, response)?).await?;

        Ok(body.routes.into_iter().next().map(|r| Route {
            distance_m: r.distance,
            duration_s: r.duration,
        }))
    }
}
