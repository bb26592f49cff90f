//! Result types returned by the geo clients and the travel helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use wayfarer_core::geo::{map_url, round_to};
use wayfarer_core::{Coordinates, TravelMode};

/// Name used when a service returns a place without one.
pub const UNNAMED_PLACE: &str = "Unnamed place";

/// A geocoded place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Display name (Nominatim's full `display_name`).
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl Place {
    /// Creates a place.
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
        }
    }

    /// Position of the place.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// A point of interest from Overpass, with its raw OSM tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poi {
    /// `name`, `name:en` or [`UNNAMED_PLACE`].
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// OSM tags of the element.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Poi {
    /// Position of the POI.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// A routed leg from OSRM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Length in meters.
    pub distance_m: f64,
    /// Duration in seconds.
    pub duration_s: f64,
}

/// Where a distance/duration figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    /// Routed by OSRM.
    Osrm,
    /// Straight-line estimate.
    Haversine,
}

/// Walking distance and time between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkEstimate {
    /// Distance in whole meters.
    pub distance_m: u64,
    /// Duration in whole seconds.
    pub duration_s: u64,
    /// How the figures were obtained.
    pub source: RouteSource,
}

/// Short Wikipedia summary for a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiSummary {
    /// Page title.
    pub title: String,
    /// Lead extract, if the page exists.
    pub extract: Option<String>,
    /// Desktop page URL, if the page exists.
    pub url: Option<String>,
}

/// One nearby-search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCard {
    /// Place name.
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// Distance from the origin in km (2 decimals).
    pub distance_km: f64,
    /// Travel time from the origin in minutes.
    pub duration_min: i64,
    /// OpenStreetMap link.
    pub map_url: String,
}

impl PlaceCard {
    /// Builds a card from a place and a leg length/duration.
    pub fn new(place: &Place, distance_m: f64, duration_s: f64) -> Self {
        Self {
            name: place.name.clone(),
            lat: place.lat,
            lng: place.lng,
            distance_km: round_to(distance_m / 1000.0, 2),
            duration_min: (duration_s / 60.0).round() as i64,
            map_url: map_url(place.lat, place.lng),
        }
    }
}

/// Response of `nearby_search_with_walk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyResponse {
    /// The search text.
    pub query: String,
    /// Where distances are measured from.
    pub origin: Coordinates,
    /// Travel mode used for durations.
    pub mode: TravelMode,
    /// Results, in search order.
    pub cards: Vec<PlaceCard>,
}

impl NearbyResponse {
    /// Number of cards listed in [`NearbyResponse::summary_markdown`].
    pub const SUMMARY_LIMIT: usize = 3;

    /// Deterministic Markdown rendering of the first few cards.
    pub fn summary_markdown(&self) -> String {
        if self.cards.is_empty() {
            return "No results found.".to_string();
        }
        let shown = self.cards.len().min(Self::SUMMARY_LIMIT);
        let mut lines = vec![format!(
            "Here are {shown} places near ({}, {}) — mode: **{}**:\n",
            self.origin.lat, self.origin.lng, self.mode
        )];
        for (i, card) in self.cards.iter().take(shown).enumerate() {
            lines.push(format!(
                "{}. **{}**\n   - ~{} km, {} min on {}\n   - [Map]({})\n",
                i + 1,
                card.name,
                card.distance_km,
                card.duration_min,
                self.mode,
                card.map_url
            ));
        }
        lines.join("\n")
    }
}
