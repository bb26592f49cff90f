//! Abstract geo backend.
//!
//! The travel helpers and the MCP tools depend on [`GeoBackend`] rather
//! than on the HTTP clients, so tests can swap in
//! [`MockGeoBackend`](crate::mock::MockGeoBackend).

use crate::clients::{NominatimClient, OsmTag, OsrmClient, OverpassClient, WikipediaClient};
use crate::types::{Place, Poi, Route, WikiSummary};
use async_trait::async_trait;
use wayfarer_core::{Coordinates, GeoConfig, Result, TravelMode};

/// Geocoding, routing, POI and encyclopedia lookups.
#[async_trait]
pub trait GeoBackend: Send + Sync {
    /// Text search, bounded near `near` when given, with a fallback query
    /// on an empty result.
    async fn search_places(
        &self,
        query: &str,
        near: Option<Coordinates>,
        limit: usize,
    ) -> Result<Vec<Place>>;

    /// Text search ranked around `center`, unbounded.
    async fn search_around(
        &self,
        query: &str,
        center: Coordinates,
        limit: usize,
    ) -> Result<Vec<Place>>;

    /// Best position for a destination name.
    async fn geocode(&self, destination: &str) -> Result<Option<Coordinates>>;

    /// Route between two points in `mode`.
    async fn route(
        &self,
        from: Coordinates,
        to: Coordinates,
        mode: TravelMode,
    ) -> Result<Option<Route>>;

    /// POIs matching any of `tags` within `radius_m` of `center`.
    async fn pois(&self, tags: &[OsmTag], center: Coordinates, radius_m: u32) -> Result<Vec<Poi>>;

    /// Wikipedia summary for a title.
    async fn wiki_summary(&self, title: &str) -> Result<WikiSummary>;

    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

/// [`GeoBackend`] over the public OpenStreetMap services.
#[derive(Debug, Clone)]
pub struct OsmBackend {
    nominatim: NominatimClient,
    osrm: OsrmClient,
    overpass: OverpassClient,
    wikipedia: WikipediaClient,
}

impl OsmBackend {
    /// Builds all four clients from configuration.
    pub fn new(config: &GeoConfig) -> Result<Self> {
        Ok(Self {
            nominatim: NominatimClient::new(config)?,
            osrm: OsrmClient::new(config)?,
            overpass: OverpassClient::new(config)?,
            wikipedia: WikipediaClient::new(config)?,
        })
    }
}

#[async_trait]
impl GeoBackend for OsmBackend {
    async fn search_places(
        &self,
        query: &str,
        near: Option<Coordinates>,
        limit: usize,
    ) -> Result<Vec<Place>> {
        self.nominatim.search(query, near, limit).await
    }

    async fn search_around(
        &self,
        query: &str,
        center: Coordinates,
        limit: usize,
    ) -> Result<Vec<Place>> {
        self.nominatim.search_around(query, center, limit).await
    }

    async fn geocode(&self, destination: &str) -> Result<Option<Coordinates>> {
        self.nominatim.geocode(destination).await
    }

    async fn route(
        &self,
        from: Coordinates,
        to: Coordinates,
        mode: TravelMode,
    ) -> Result<Option<Route>> {
        self.osrm.route(from, to, mode).await
    }

    async fn pois(&self, tags: &[OsmTag], center: Coordinates, radius_m: u32) -> Result<Vec<Poi>> {
        self.overpass.search(tags, center, radius_m).await
    }

    async fn wiki_summary(&self, title: &str) -> Result<WikiSummary> {
        self.wikipedia.summary(title).await
    }

    fn name(&self) -> &str {
        "osm"
    }
}
