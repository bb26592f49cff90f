//! In-memory [`GeoBackend`] for tests and offline demos.

use crate::backend::GeoBackend;
use crate::clients::OsmTag;
use crate::types::{Place, Poi, Route, WikiSummary};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use wayfarer_core::geo::haversine_m;
use wayfarer_core::{Coordinates, Error, Result, TravelMode};

/// How [`MockGeoBackend::route`] answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteBehavior {
    /// Straight-line distance covered at a fixed speed.
    Straight {
        /// Speed in km/h.
        speed_kmh: f64,
    },
    /// No route found.
    NoRoute,
    /// Transport failure.
    Fail,
}

/// Scripted backend; every call is recorded as `"<method>:<arg>"`.
#[derive(Debug)]
pub struct MockGeoBackend {
    places: Vec<Place>,
    around: HashMap<String, Vec<Place>>,
    center: Option<Coordinates>,
    pois: Vec<Poi>,
    pois_fail: bool,
    routes: RouteBehavior,
    summaries: HashMap<String, WikiSummary>,
    calls: Mutex<Vec<String>>,
}

impl Default for MockGeoBackend {
    fn default() -> Self {
        Self {
            places: Vec::new(),
            around: HashMap::new(),
            center: None,
            pois: Vec::new(),
            pois_fail: false,
            routes: RouteBehavior::Straight { speed_kmh: 5.0 },
            summaries: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockGeoBackend {
    /// Empty backend: no places, no POIs, no center, 5 km/h routes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places returned by every `search_places` call.
    pub fn with_places(mut self, places: Vec<Place>) -> Self {
        self.places = places;
        self
    }

    /// Places returned by `search_around` for an exact query.
    pub fn with_around(mut self, query: impl Into<String>, places: Vec<Place>) -> Self {
        self.around.insert(query.into(), places);
        self
    }

    /// Result of `geocode`.
    pub fn with_center(mut self, center: Coordinates) -> Self {
        self.center = Some(center);
        self
    }

    /// POIs returned by `pois`.
    pub fn with_pois(mut self, pois: Vec<Poi>) -> Self {
        self.pois = pois;
        self
    }

    /// Make `pois` fail.
    pub fn with_failing_pois(mut self) -> Self {
        self.pois_fail = true;
        self
    }

    /// Route behavior.
    pub fn with_routes(mut self, routes: RouteBehavior) -> Self {
        self.routes = routes;
        self
    }

    /// Summary returned for a title.
    pub fn with_summary(mut self, summary: WikiSummary) -> Self {
        self.summaries.insert(summary.title.clone(), summary);
        self
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl GeoBackend for MockGeoBackend {
    async fn search_places(
        &self,
        query: &str,
        _near: Option<Coordinates>,
        limit: usize,
    ) -> Result<Vec<Place>> {
        self.record(format!("search_places:{query}"));
        Ok(self.places.iter().take(limit).cloned().collect())
    }

    async fn search_around(
        &self,
        query: &str,
        _center: Coordinates,
        limit: usize,
    ) -> Result<Vec<Place>> {
        self.record(format!("search_around:{query}"));
        Ok(self
            .around
            .get(query)
            .map(|p| p.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn geocode(&self, destination: &str) -> Result<Option<Coordinates>> {
        self.record(format!("geocode:{destination}"));
        Ok(self.center)
    }

    async fn route(
        &self,
        from: Coordinates,
        to: Coordinates,
        mode: TravelMode,
    ) -> Result<Option<Route>> {
        self.record(format!("route:{mode}"));
        match self.routes {
            RouteBehavior::Straight { speed_kmh } => {
                let distance_m = haversine_m(from, to);
                Ok(Some(Route {
                    distance_m,
                    duration_s: distance_m / (speed_kmh * 1000.0 / 3600.0),
                }))
            }
            RouteBehavior::NoRoute => Ok(None),
            RouteBehavior::Fail => Err(Error::http("mock route failure")),
        }
    }

    async fn pois(&self, tags: &[OsmTag], _center: Coordinates, radius_m: u32) -> Result<Vec<Poi>> {
        self.record(format!("pois:{}:{radius_m}", tags.len()));
        if self.pois_fail {
            return Err(Error::upstream("overpass", 504));
        }
        Ok(self.pois.clone())
    }

    async fn wiki_summary(&self, title: &str) -> Result<WikiSummary> {
        self.record(format!("wiki_summary:{title}"));
        Ok(self.summaries.get(title).cloned().unwrap_or(WikiSummary {
            title: title.to_string(),
            extract: None,
            url: None,
        }))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
