//! Nominatim text search and geocoding.

use super::{build_http_client, check_status, join_url, json_body, transport_error};
use crate::types::{Place, UNNAMED_PLACE};
use serde::Deserialize;
use wayfarer_core::geo::viewbox;
use wayfarer_core::{Coordinates, GeoConfig, Result};

const SERVICE: &str = "nominatim";

/// Half-size of the bounded search box around a `near` point.
const NEARBY_RADIUS_M: u32 = 2000;

/// A raw Nominatim hit; coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(default)]
    display_name: String,
    lat: String,
    lon: String,
}

impl Hit {
    fn into_place(self) -> Option<Place> {
        let (Ok(lat), Ok(lng)) = (self.lat.parse::<f64>(), self.lon.parse::<f64>()) else {
            tracing::warn!(lat = %self.lat, lon = %self.lon, "skipping hit with bad coordinates");
            return None;
        };
        let name = match self.display_name.trim() {
            "" => UNNAMED_PLACE.to_string(),
            trimmed => trimmed.to_string(),
        };
        Some(Place::new(name, lat, lng))
    }
}

/// Query to retry with when a search comes back empty.
///
/// Coffee-ish queries collapse to `cafe`; anything else gets ` cafe`
/// appended, which is the token most likely present in OSM names.
pub fn fallback_query(query: &str) -> String {
    let lower = query.to_lowercase();
    if lower.starts_with("caf") || lower.contains("coffee") {
        "cafe".to_string()
    } else {
        format!("{query} cafe")
    }
}

/// Client for the Nominatim `/search` endpoint.
#[derive(Debug, Clone)]
pub struct NominatimClient {
    http: reqwest::Client,
    search_url: String,
    timeout_secs: u64,
}

impl NominatimClient {
    /// Creates a client from configuration.
    pub fn new(config: &GeoConfig) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config, config.timeout_secs)?,
            search_url: join_url(&config.nominatim_url, "search"),
            timeout_secs: config.timeout_secs,
        })
    }

    async fn get(&self, params: &[(&str, String)]) -> Result<Vec<Place>> {
        let response = self
            .http
            .get(&self.search_url)
            .query(params)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, self.timeout_secs, e))?;
        let hits: Vec<Hit> = json_body(SERVICE, check_status(SERVICE, response)?).await?;
        Ok(hits.into_iter().filter_map(Hit::into_place).collect())
    }

    /// Text search, optionally bounded to a small box around `near`.
    ///
    /// An empty result triggers one retry with [`fallback_query`].
    pub async fn search(
        &self,
        query: &str,
        near: Option<Coordinates>,
        limit: usize,
    ) -> Result<Vec<Place>> {
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(center) = near {
            params.push(("viewbox", viewbox(center, NEARBY_RADIUS_M)));
            params.push(("bounded", "1".to_string()));
        }

        let places = self.get(&params).await?;
        if !places.is_empty() {
            return Ok(places);
        }

        let fallback = fallback_query(query);
        if fallback == query {
            return Ok(places);
        }
        tracing::debug!(query, fallback = %fallback, "no hits, retrying with fallback query");
        params[0].1 = fallback;
        self.get(&params).await
    }

    /// Text search ranked around `center` without bounding the results.
    pub async fn search_around(
        &self,
        query: &str,
        center: Coordinates,
        limit: usize,
    ) -> Result<Vec<Place>> {
        self.get(&[
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("limit", limit.to_string()),
            ("lat", center.lat.to_string()),
            ("lon", center.lng.to_string()),
        ])
        .await
    }

    /// Position of the best match for a destination name.
    pub async fn geocode(&self, destination: &str) -> Result<Option<Coordinates>> {
        let places = self
            .get(&[
                ("q", destination.to_string()),
                ("format", "json".to_string()),
                ("limit", "1".to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .await?;
        Ok(places.first().map(Place::coordinates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_for_coffee_queries() {
        assert_eq!(fallback_query("Cafes"), "cafe");
        assert_eq!(fallback_query("good coffee"), "cafe");
    }

    #[test]
    fn test_fallback_appends_cafe() {
        assert_eq!(fallback_query("bakery"), "bakery cafe");
    }

    #[test]
    fn test_fallback_can_equal_query() {
        assert_eq!(fallback_query("cafe"), "cafe");
    }

    #[test]
    fn test_hit_parsing() {
        let hit = Hit {
            display_name: "  ".to_string(),
            lat: "36.75".to_string(),
            lon: "3.04".to_string(),
        };
        let place = hit.into_place();
        assert_eq!(place, Some(Place::new(UNNAMED_PLACE, 36.75, 3.04)));
    }

    #[test]
    fn test_hit_with_bad_coordinates_skipped() {
        let hit = Hit {
            display_name: "Nowhere".to_string(),
            lat: "north".to_string(),
            lon: "3.04".to_string(),
        };
        assert!(hit.into_place().is_none());
    }
}
