//! Wayfarer Geo: OpenStreetMap lookups and travel planning.
//!
//! Depends on `wayfarer-core` (dependency level 1).
//!
//! # Modules
//!
//! - [`clients`]: Nominatim, OSRM, Overpass and Wikipedia HTTP clients
//! - [`backend`]: The [`GeoBackend`] trait and its OSM implementation
//! - [`nearby`]: Nearby search with travel times
//! - [`planner`]: Day-by-day trip planning
//! - [`mock`]: Scripted backend for tests

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod clients;
pub mod mock;
pub mod nearby;
pub mod planner;
pub mod types;

pub use backend::{GeoBackend, OsmBackend};
pub use mock::{MockGeoBackend, RouteBehavior};
pub use nearby::{DEFAULT_NEARBY_LIMIT, nearby_search_with_walk, walking_time};
pub use planner::{DayPlan, PlanItem, TripLinks, TripPlan, TripRequest, plan_trip};
pub use types::{
    NearbyResponse, Place, PlaceCard, Poi, Route, RouteSource, UNNAMED_PLACE, WalkEstimate,
    WikiSummary,
};
