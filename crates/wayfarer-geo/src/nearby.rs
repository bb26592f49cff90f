//! Nearby search enriched with travel time.

use crate::backend::GeoBackend;
use crate::types::{NearbyResponse, PlaceCard, RouteSource, WalkEstimate};
use wayfarer_core::geo::haversine_m;
use wayfarer_core::{Coordinates, Result, TravelMode};

/// Default number of nearby results.
pub const DEFAULT_NEARBY_LIMIT: usize = 3;

/// Walking distance and time from `origin` to `dest`.
///
/// Uses the routed foot leg when there is one. No route, an upstream error
/// or a transport failure all fall back to the straight-line distance at
/// walking speed. Figures are truncated to whole meters and seconds.
pub async fn walking_time(
    backend: &dyn GeoBackend,
    origin: Coordinates,
    dest: Coordinates,
) -> WalkEstimate {
    match backend.route(origin, dest, TravelMode::Foot).await {
        Ok(Some(route)) => WalkEstimate {
            distance_m: route.distance_m as u64,
            duration_s: route.duration_s as u64,
            source: RouteSource::Osrm,
        },
        Ok(None) => straight_walk(origin, dest),
        Err(e) => {
            tracing::warn!(error = %e, "routing failed, using straight-line estimate");
            straight_walk(origin, dest)
        }
    }
}

fn straight_walk(origin: Coordinates, dest: Coordinates) -> WalkEstimate {
    let meters = haversine_m(origin, dest);
    WalkEstimate {
        distance_m: meters as u64,
        duration_s: TravelMode::Foot.fallback_duration_s(meters) as u64,
        source: RouteSource::Haversine,
    }
}

/// Searches `query` near `origin` and attaches a travel estimate in `mode`
/// to each result, keeping search order.
pub async fn nearby_search_with_walk(
    backend: &dyn GeoBackend,
    query: &str,
    origin: Coordinates,
    limit: usize,
    mode: TravelMode,
) -> Result<NearbyResponse> {
    let places = backend.search_places(query, Some(origin), limit).await?;
    tracing::debug!(query, found = places.len(), %mode, "nearby search");

    let mut cards = Vec::with_capacity(places.len());
    for place in &places {
        let dest = place.coordinates();
        let (distance_m, duration_s) = match backend.route(origin, dest, mode).await {
            Ok(Some(route)) => (route.distance_m, route.duration_s),
            Ok(None) => fallback_leg(origin, dest, mode),
            Err(e) => {
                tracing::warn!(error = %e, place = %place.name, "routing failed");
                fallback_leg(origin, dest, mode)
            }
        };
        cards.push(PlaceCard::new(place, distance_m, duration_s));
    }

    Ok(NearbyResponse {
        query: query.to_string(),
        origin,
        mode,
        cards,
    })
}

fn fallback_leg(origin: Coordinates, dest: Coordinates, mode: TravelMode) -> (f64, f64) {
    let meters = haversine_m(origin, dest);
    (meters, mode.fallback_duration_s(meters))
}
