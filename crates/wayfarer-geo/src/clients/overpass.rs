//! Overpass API POI search.

use super::{build_http_client, check_status, json_body, transport_error};
use crate::types::{Poi, UNNAMED_PLACE};
use serde::Deserialize;
use std::collections::BTreeMap;
use wayfarer_core::{Coordinates, GeoConfig, Result};

const SERVICE: &str = "overpass";

/// An OSM `key=value` filter; a `None` value matches any value of `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsmTag {
    /// Tag key, e.g. `amenity`.
    pub key: &'static str,
    /// Tag value, e.g. `cafe`; `None` for "any".
    pub value: Option<&'static str>,
}

impl OsmTag {
    /// Exact `key=value` match.
    pub const fn exact(key: &'static str, value: &'static str) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    /// Key-only match.
    pub const fn any(key: &'static str) -> Self {
        Self { key, value: None }
    }

    fn selector(&self) -> String {
        match self.value {
            Some(v) => format!("[\"{}\"=\"{v}\"]", self.key),
            None => format!("[\"{}\"]", self.key),
        }
    }
}

/// Builds an Overpass QL query for nodes, ways and relations matching any
/// of `tags` within `radius_m` of `center`.
pub fn build_query(tags: &[OsmTag], center: Coordinates, radius_m: u32) -> String {
    let around = format!("(around:{radius_m},{},{})", center.lat, center.lng);
    let body: String = tags
        .iter()
        .map(|tag| {
            let sel = tag.selector();
            format!("node{sel}{around};way{sel}{around};rel{sel}{around};")
        })
        .collect();
    format!("[out:json][timeout:25];({body});out center 120;")
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct LatLon {
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Element {
    #[serde(rename = "type", default)]
    kind: String,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<LatLon>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

impl Element {
    fn into_poi(self) -> Option<Poi> {
        let (lat, lng) = if self.kind == "node" {
            (self.lat?, self.lon?)
        } else {
            let center = self.center?;
            (center.lat?, center.lon?)
        };
        let name = self
            .tags
            .get("name")
            .or_else(|| self.tags.get("name:en"))
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNNAMED_PLACE.to_string());
        Some(Poi {
            name,
            lat,
            lng,
            tags: self.tags,
        })
    }
}

/// Client for an Overpass interpreter endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    http: reqwest::Client,
    url: String,
    timeout_secs: u64,
}

impl OverpassClient {
    /// Creates a client from configuration.
    pub fn new(config: &GeoConfig) -> Result<Self> {
        Ok(Self {
            http: build_http_client(config, config.overpass_timeout_secs)?,
            url: config.overpass_url.clone(),
            timeout_secs: config.overpass_timeout_secs,
        })
    }

    /// POIs matching `tags` around `center`.
    pub async fn search(
        &self,
        tags: &[OsmTag],
        center: Coordinates,
        radius_m: u32,
    ) -> Result<Vec<Poi>> {
        let query = build_query(tags, center, radius_m);
        tracing::debug!(tags = tags.len(), radius_m, "querying overpass");

        let response = self
            .http
            .post(&self.url)
            .form(&[("data", query)])
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, self.timeout_secs, e))?;
        let body: OverpassResponse = json_body(SERVICE, check_status(SERVICE, response)?).await?;

        Ok(body
            .elements
            .into_iter()
            .filter_map(Element::into_poi)
            .collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_exact_and_wildcard() {
        let q = build_query(
            &[OsmTag::exact("amenity", "cafe"), OsmTag::any("historic")],
            Coordinates::new(36.75, 3.04),
            1500,
        );
        assert!(q.starts_with("[out:json][timeout:25];("));
        assert!(q.ends_with(");out center 120;"));
        assert!(q.contains("node[\"amenity\"=\"cafe\"](around:1500,36.75,3.04);"));
        assert!(q.contains("rel[\"historic\"](around:1500,36.75,3.04);"));
        assert_eq!(q.matches("way[").count(), 2);
    }

    #[test]
    fn test_node_element() {
        let el: Element = serde_json::from_value(serde_json::json!({
            "type": "node", "lat": 1.5, "lon": 2.5, "tags": {"name": " Kiosk "}
        }))
        .unwrap();
        let poi = el.into_poi().unwrap();
        assert_eq!(poi.name, "Kiosk");
        assert_eq!((poi.lat, poi.lng), (1.5, 2.5));
    }

    #[test]
    fn test_way_uses_center_and_english_name() {
        let el: Element = serde_json::from_value(serde_json::json!({
            "type": "way", "center": {"lat": 3.0, "lon": 4.0},
            "tags": {"name:en": "Garden", "leisure": "garden"}
        }))
        .unwrap();
        let poi = el.into_poi().unwrap();
        assert_eq!(poi.name, "Garden");
        assert_eq!(poi.tags.get("leisure").map(String::as_str), Some("garden"));
    }

    #[test]
    fn test_element_without_coordinates_skipped() {
        let el: Element =
            serde_json::from_value(serde_json::json!({"type": "relation", "tags": {}})).unwrap();
        assert!(el.into_poi().is_none());
    }

    #[test]
    fn test_unnamed_element() {
        let el: Element =
            serde_json::from_value(serde_json::json!({"type": "node", "lat": 0.0, "lon": 0.0}))
                .unwrap();
        assert_eq!(el.into_poi().unwrap().name, UNNAMED_PLACE);
    }
}
