//! Geocoding, routing and nearby-search tools.

use super::support::{make_tool, parse_args, serialize_response};
use crate::error::McpErrorExt;
use crate::registry::{ToolRegistry, ToolResult};
use rmcp::model::{ErrorData, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use wayfarer_core::{Coordinates, TravelMode};
use wayfarer_geo::{DEFAULT_NEARBY_LIMIT, GeoBackend, nearby_search_with_walk, walking_time};

/// Largest result count a search tool accepts.
pub const MAX_LIMIT: usize = 50;

fn default_limit() -> usize {
    DEFAULT_NEARBY_LIMIT
}

/// Arguments of `nominatim_search`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// Free-text query, e.g. "cafe" or "museum in Algiers"
    pub query: String,
    /// Latitude to bound the search around (needs lng)
    #[serde(default)]
    pub lat: Option<f64>,
    /// Longitude to bound the search around (needs lat)
    #[serde(default)]
    pub lng: Option<f64>,
    /// Maximum number of results (default 3)
    #[serde(default = "default_limit")]
    pub limit: usize,
}

/// Arguments of `osrm_walking_time`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WalkArgs {
    /// Origin latitude
    pub o_lat: f64,
    /// Origin longitude
    pub o_lng: f64,
    /// Destination latitude
    pub d_lat: f64,
    /// Destination longitude
    pub d_lng: f64,
}

/// Arguments of `wikipedia_summary`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WikiArgs {
    /// Page title, e.g. "Casbah of Algiers"
    pub title: String,
}

/// Arguments of `nearby_search_with_walk`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct NearbyArgs {
    /// What to look for, e.g. "cafe"
    pub query: String,
    /// Origin latitude
    pub origin_lat: f64,
    /// Origin longitude
    pub origin_lng: f64,
    /// Maximum number of results (default 3)
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Travel mode: foot (default), bike or driving
    #[serde(default)]
    pub mode: Option<String>,
}

/// Validated position from raw tool arguments.
pub fn coordinates(field: &str, lat: f64, lng: f64) -> Result<Coordinates, ErrorData> {
    let valid = lat.is_finite()
        && lng.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lng);
    if valid {
        Ok(Coordinates::new(lat, lng))
    } else {
        Err(ErrorData::invalid_params(
            format!("{field} is not a valid position: ({lat}, {lng})"),
            None,
        ))
    }
}

/// Travel mode from an optional tool argument.
pub fn travel_mode(raw: Option<&str>) -> Result<TravelMode, ErrorData> {
    match raw {
        None => Ok(TravelMode::default()),
        Some(s) => s.parse().map_err(|e: wayfarer_core::Error| e.to_mcp_error()),
    }
}

fn clamp_limit(limit: usize) -> usize {
    limit.clamp(1, MAX_LIMIT)
}

/// Registry holding the geo tools.
#[derive(Clone)]
pub struct GeoTools {
    backend: Arc<dyn GeoBackend>,
}

impl GeoTools {
    /// Tools over a shared backend.
    pub fn new(backend: Arc<dyn GeoBackend>) -> Self {
        Self { backend }
    }
}

impl std::fmt::Debug for GeoTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoTools")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl ToolRegistry for GeoTools {
    fn tools(&self) -> Vec<Tool> {
        vec![
            make_tool::<SearchArgs>(
                "nominatim_search",
                "Search OpenStreetMap for places. With lat/lng the search is bounded \
                 to a small box around that point.",
            ),
            make_tool::<WalkArgs>(
                "osrm_walking_time",
                "Walking distance (m) and duration (s) between two points; falls back \
                 to a straight-line estimate when no route is available.",
            ),
            make_tool::<WikiArgs>(
                "wikipedia_summary",
                "Short Wikipedia summary and link for a page title.",
            ),
            make_tool::<NearbyArgs>(
                "nearby_search_with_walk",
                "Find places near an origin and include distance and travel time for \
                 each, in the chosen mode.",
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let backend = Arc::clone(&self.backend);

        match name {
            "nominatim_search" => Some(Box::pin(async move {
                let args: SearchArgs = parse_args("nominatim_search", args)?;
                let near = match (args.lat, args.lng) {
                    (Some(lat), Some(lng)) => Some(coordinates("lat/lng", lat, lng)?),
                    _ => None,
                };
                let places = backend
                    .search_places(&args.query, near, clamp_limit(args.limit))
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&places)
            })),

            "osrm_walking_time" => Some(Box::pin(async move {
                let args: WalkArgs = parse_args("osrm_walking_time", args)?;
                let origin = coordinates("origin", args.o_lat, args.o_lng)?;
                let dest = coordinates("destination", args.d_lat, args.d_lng)?;
                let estimate = walking_time(backend.as_ref(), origin, dest).await;
                serialize_response(&estimate)
            })),

            "wikipedia_summary" => Some(Box::pin(async move {
                let args: WikiArgs = parse_args("wikipedia_summary", args)?;
                let summary = backend
                    .wiki_summary(&args.title)
                    .await
                    .map_err(|e| e.to_mcp_error())?;
                serialize_response(&summary)
            })),

            "nearby_search_with_walk" => Some(Box::pin(async move {
                let args: NearbyArgs = parse_args("nearby_search_with_walk", args)?;
                let origin = coordinates("origin", args.origin_lat, args.origin_lng)?;
                let mode = travel_mode(args.mode.as_deref())?;
                let response = nearby_search_with_walk(
                    backend.as_ref(),
                    &args.query,
                    origin,
                    clamp_limit(args.limit),
                    mode,
                )
                .await
                .map_err(|e| e.to_mcp_error())?;
                serialize_response(&response)
            })),

            _ => None,
        }
    }
}
