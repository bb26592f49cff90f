//! Day-by-day trip planning.
//!
//! [`plan_trip`] geocodes the destination (or starts from the traveller's
//! position), pulls category-accurate POIs from Overpass with a Nominatim
//! backfill, estimates travel times and spreads the POIs over the trip
//! days so each day mixes categories and no POI repeats.

pub mod dates;
pub mod diversify;
pub mod interests;
pub mod links;

use crate::backend::GeoBackend;
use crate::types::{Place, Poi};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use wayfarer_core::geo::{haversine_km, map_url, round_to};
use wayfarer_core::{Coordinates, Error, Result, TravelMode};

pub use dates::{date_range, parse_date, resolve_dates};
pub use diversify::diversify;
pub use interests::{Bucket, DEFAULT_INTERESTS, expand_interests, select_buckets, tags_for};
pub use links::{flights_link, hotels_link};

/// Note attached to a plan built from POIs.
pub const PLAN_NOTE: &str = "POIs from Overpass + Nominatim fallback; diversified days; \
                             realistic walking times; global de-dup across days.";

/// Note attached when the destination cannot be geocoded.
pub const NO_CENTER_NOTE: &str = "Could not locate the city center for your destination.";

/// Overpass search radius cap, in km.
pub const MAX_SEARCH_RADIUS_KM: f64 = 12.0;

/// Below this many Overpass results the Nominatim backfill runs.
pub const BACKFILL_THRESHOLD: usize = 12;

const BACKFILL_QUERIES: [&str; 4] = ["museum", "restaurant", "cafe", "park"];
const BACKFILL_LIMIT: usize = 30;
const MIN_WALK_MIN: i64 = 3;
const WALK_MIN_PER_KM: f64 = 12.0;
const MAX_PLAUSIBLE_WALK_KMH: f64 = 8.0;
const NEAREST_FALLBACK: usize = 20;
const LOOKAHEAD_FACTOR: usize = 4;

/// Most stops placed on one day.
pub const MAX_LIMIT_PER_DAY: usize = 50;

fn default_pace() -> String {
    "moderate".to_string()
}

fn default_limit_per_day() -> usize {
    5
}

fn default_radius_km() -> f64 {
    MAX_SEARCH_RADIUS_KM
}

/// What the traveller asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// City or area to visit.
    pub destination: String,
    /// First day, in any format [`parse_date`] accepts.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day, in any format [`parse_date`] accepts.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Interest keywords; `None` means [`DEFAULT_INTERESTS`].
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    /// Free-form pace, echoed back.
    #[serde(default = "default_pace")]
    pub pace: String,
    /// How the traveller gets around.
    #[serde(default)]
    pub mode: TravelMode,
    /// Traveller position; when set, search and timings start here.
    #[serde(default)]
    pub origin: Option<Coordinates>,
    /// Maximum POIs per day (at least one is always allowed).
    #[serde(default = "default_limit_per_day")]
    pub limit_per_day: usize,
    /// Search radius in km, capped at [`MAX_SEARCH_RADIUS_KM`].
    #[serde(default = "default_radius_km")]
    pub radius_km: f64,
}

impl TripRequest {
    /// Request with default pace, mode, limit and radius.
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            start_date: None,
            end_date: None,
            interests: None,
            pace: default_pace(),
            mode: TravelMode::default(),
            origin: None,
            limit_per_day: default_limit_per_day(),
            radius_km: default_radius_km(),
        }
    }

    /// Sets the trip dates.
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// Sets the interests.
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = Some(interests.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the pace.
    pub fn with_pace(mut self, pace: impl Into<String>) -> Self {
        self.pace = pace.into();
        self
    }

    /// Sets the travel mode.
    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the traveller position.
    pub fn with_origin(mut self, origin: Coordinates) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Sets the per-day limit.
    pub fn with_limit_per_day(mut self, limit: usize) -> Self {
        self.limit_per_day = limit;
        self
    }

    /// Sets the search radius.
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }
}

/// One stop in a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    /// Short name (text before the first comma).
    pub name: String,
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
    /// OpenStreetMap link.
    pub map_url: String,
    /// Distance from the origin (or center) in km, 2 decimals.
    pub distance_km: Option<f64>,
    /// Travel time in minutes.
    pub duration_min: Option<i64>,
}

/// Stops for one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    /// The date.
    pub date: NaiveDate,
    /// Stops, in visiting order.
    pub items: Vec<PlanItem>,
}

/// Booking deeplinks for the trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripLinks {
    /// Google Flights search.
    pub flights: String,
    /// Booking.com search.
    pub hotels: String,
}

/// A planned trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPlan {
    /// Destination as requested.
    pub destination: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Travel mode.
    pub mode: TravelMode,
    /// Pace, as requested.
    pub pace: String,
    /// Expanded interest terms.
    pub interests: Vec<String>,
    /// Days with at least one stop.
    pub itinerary: Vec<DayPlan>,
    /// Booking deeplinks.
    pub links: TripLinks,
    /// How the plan was built.
    pub notes: String,
}

#[derive(Debug, Clone)]
struct Candidate {
    item: PlanItem,
    bucket: Bucket,
}

type ItemKey = (String, i64, i64);

fn item_key(item: &PlanItem) -> ItemKey {
    (
        item.name.to_lowercase(),
        (item.lat * 1e6).round() as i64,
        (item.lng * 1e6).round() as i64,
    )
}

fn short_name(name: &str) -> &str {
    name.split(',').next().unwrap_or(name)
}

fn normalized_name(name: &str) -> String {
    short_name(name.trim()).trim().to_lowercase()
}

fn estimate_minutes(km: f64, mode: TravelMode) -> i64 {
    match mode {
        TravelMode::Foot => MIN_WALK_MIN.max((km * WALK_MIN_PER_KM).round() as i64),
        TravelMode::Bike => (km * 4.0).round() as i64,
        TravelMode::Driving => (km * 2.5).round() as i64,
    }
}

fn max_km(mode: TravelMode) -> f64 {
    match mode {
        TravelMode::Foot => 6.0,
        TravelMode::Bike => 12.0,
        TravelMode::Driving => 30.0,
    }
}

fn implausible_walk(distance_km: f64, duration_min: i64) -> bool {
    if distance_km <= 0.0 || duration_min <= 0 {
        return false;
    }
    60.0 * distance_km / duration_min as f64 > MAX_PLAUSIBLE_WALK_KMH
}

/// Keeps one POI per normalized name (the one closest to `center`), then
/// sorts by distance at metre precision. Returns each POI with its
/// distance in km.
fn dedupe_by_name(raw: Vec<Poi>, center: Coordinates) -> Vec<(Poi, f64)> {
    let mut kept: Vec<(Poi, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for poi in raw {
        let key = normalized_name(&poi.name);
        if key.is_empty() {
            continue;
        }
        let d = haversine_km(center, poi.coordinates());
        match index.get(&key) {
            Some(&i) => {
                if d < kept[i].1 {
                    kept[i] = (poi, d);
                }
            }
            None => {
                index.insert(key, kept.len());
                kept.push((poi, d));
            }
        }
    }
    kept.sort_by_key(|(_, d)| (d * 1000.0).round() as i64);
    kept
}

fn base_item(poi: &Poi) -> PlanItem {
    PlanItem {
        name: short_name(&poi.name).to_string(),
        lat: poi.lat,
        lng: poi.lng,
        map_url: map_url(poi.lat, poi.lng),
        distance_km: None,
        duration_min: None,
    }
}

async fn timed_from_origin(
    backend: &dyn GeoBackend,
    origin: Coordinates,
    poi: &Poi,
    mode: TravelMode,
) -> PlanItem {
    let mut item = base_item(poi);
    let route = match backend.route(origin, poi.coordinates(), mode).await {
        Ok(route) => route,
        Err(e) => {
            tracing::warn!(error = %e, poi = %item.name, "routing failed, leaving times empty");
            None
        }
    };
    if let Some(route) = route {
        let km = round_to(route.distance_m / 1000.0, 2);
        let mut minutes = (route.duration_s / 60.0).round() as i64;
        if mode == TravelMode::Foot {
            if implausible_walk(km, minutes) {
                minutes = (km * WALK_MIN_PER_KM).round() as i64;
            }
            minutes = minutes.max(MIN_WALK_MIN);
        }
        item.distance_km = Some(km);
        item.duration_min = Some(minutes);
    }
    item
}

async fn gather_pois(
    backend: &dyn GeoBackend,
    request: &TripRequest,
    center: Coordinates,
) -> Vec<Poi> {
    let buckets = select_buckets(request.interests.as_deref().unwrap_or_default());
    let tags = tags_for(&buckets);
    let radius_m = (request.radius_km.clamp(0.0, MAX_SEARCH_RADIUS_KM) * 1000.0) as u32;

    let mut raw = match backend.pois(&tags, center, radius_m).await {
        Ok(pois) => pois,
        Err(e) => {
            tracing::warn!(error = %e, "overpass search failed, relying on backfill");
            Vec::new()
        }
    };
    tracing::debug!(found = raw.len(), radius_m, buckets = buckets.len(), "overpass POIs");

    if raw.len() < BACKFILL_THRESHOLD {
        for kind in BACKFILL_QUERIES {
            let query = format!("{kind} in {}", request.destination);
            match backend.search_around(&query, center, BACKFILL_LIMIT).await {
                Ok(places) => raw.extend(places.into_iter().map(place_to_poi)),
                Err(e) => tracing::warn!(error = %e, %query, "backfill search failed"),
            }
        }
    }
    raw
}

fn place_to_poi(place: Place) -> Poi {
    Poi {
        name: place.name,
        lat: place.lat,
        lng: place.lng,
        tags: Default::default(),
    }
}

fn spread_over_days(
    candidates: Vec<Candidate>,
    days: Vec<NaiveDate>,
    per_day: usize,
) -> Vec<DayPlan> {
    let mut plan = Vec::new();
    let mut used: HashSet<ItemKey> = HashSet::new();
    let mut pool = candidates;

    for day in days {
        if pool.is_empty() {
            break;
        }
        let lookahead: Vec<Candidate> = pool
            .iter()
            .take(per_day.saturating_mul(LOOKAHEAD_FACTOR))
            .cloned()
            .collect();

        let mut items = Vec::new();
        for candidate in diversify(lookahead, per_day, |c| c.bucket) {
            if items.len() >= per_day {
                break;
            }
            if used.insert(item_key(&candidate.item)) {
                items.push(candidate.item);
            }
        }
        if !items.is_empty() {
            plan.push(DayPlan { date: day, items });
        }
        pool.retain(|c| !used.contains(&item_key(&c.item)));
    }
    plan
}

/// Plans a trip. `today` anchors the default date range.
pub async fn plan_trip(
    backend: &dyn GeoBackend,
    request: &TripRequest,
    today: NaiveDate,
) -> Result<TripPlan> {
    let destination = request.destination.trim();
    if destination.is_empty() && request.origin.is_none() {
        return Err(Error::validation_field(
            "destination",
            "a destination or an origin is required",
        ));
    }

    let (start, end) = resolve_dates(
        request.start_date.as_deref(),
        request.end_date.as_deref(),
        today,
    );
    let interests = expand_interests(request.interests.as_deref().unwrap_or_default());
    let links = TripLinks {
        flights: flights_link(destination, start, end),
        hotels: hotels_link(destination, start, end),
    };
    let finish = |notes: &str, itinerary: Vec<DayPlan>| TripPlan {
        destination: request.destination.clone(),
        start_date: start,
        end_date: end,
        mode: request.mode,
        pace: request.pace.clone(),
        interests: interests.clone(),
        itinerary,
        links: links.clone(),
        notes: notes.to_string(),
    };

    let center = match request.origin {
        Some(origin) => origin,
        None => match backend.geocode(destination).await? {
            Some(center) => center,
            None => {
                tracing::info!(destination, "destination not found");
                return Ok(finish(NO_CENTER_NOTE, Vec::new()));
            }
        },
    };

    let pois = dedupe_by_name(gather_pois(backend, request, center).await, center);
    tracing::debug!(unique = pois.len(), "POIs after de-duplication");

    let mode = request.mode;
    let mut candidates = Vec::with_capacity(pois.len());
    for (poi, d_center) in &pois {
        let bucket = Bucket::from_osm_tags(&poi.tags);
        let item = match request.origin {
            Some(origin) => timed_from_origin(backend, origin, poi, mode).await,
            None => PlanItem {
                distance_km: Some(round_to(*d_center, 2)),
                duration_min: Some(estimate_minutes(*d_center, mode)),
                ..base_item(poi)
            },
        };
        candidates.push(Candidate { item, bucket });
    }

    if let Some(origin) = request.origin {
        let limit = max_km(mode);
        candidates.retain(|c| c.item.distance_km.unwrap_or(0.0) <= limit);
        if candidates.is_empty() {
            tracing::debug!(limit, "nothing within reach, keeping nearest POIs");
            candidates = pois
                .iter()
                .map(|(poi, _)| Candidate {
                    item: PlanItem {
                        distance_km: Some(round_to(haversine_km(origin, poi.coordinates()), 2)),
                        ..base_item(poi)
                    },
                    bucket: Bucket::from_osm_tags(&poi.tags),
                })
                .collect();
            candidates.sort_by(|a, b| {
                a.item
                    .distance_km
                    .unwrap_or(0.0)
                    .total_cmp(&b.item.distance_km.unwrap_or(0.0))
            });
            candidates.truncate(NEAREST_FALLBACK);
        }
    }

    let itinerary = spread_over_days(
        candidates,
        date_range(start, end),
        request.limit_per_day.clamp(1, MAX_LIMIT_PER_DAY),
    );
    tracing::info!(
        destination,
        days = itinerary.len(),
        stops = itinerary.iter().map(|d| d.items.len()).sum::<usize>(),
        "trip planned"
    );
    Ok(finish(PLAN_NOTE, itinerary))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(name: &str, lat: f64) -> PlanItem {
        PlanItem {
            name: name.to_string(),
            lat,
            lng: 3.0,
            map_url: map_url(lat, 3.0),
            distance_km: None,
            duration_min: None,
        }
    }

    #[test]
    fn test_normalized_name() {
        assert_eq!(normalized_name("  Jardin d'Essai, Hamma, Algiers "), "jardin d'essai");
        assert_eq!(normalized_name(", nowhere"), "");
    }

    #[test]
    fn test_estimate_minutes() {
        assert_eq!(estimate_minutes(0.1, TravelMode::Foot), 3);
        assert_eq!(estimate_minutes(1.0, TravelMode::Foot), 12);
        assert_eq!(estimate_minutes(2.0, TravelMode::Bike), 8);
        assert_eq!(estimate_minutes(4.0, TravelMode::Driving), 10);
    }

    #[test]
    fn test_implausible_walk() {
        assert!(implausible_walk(2.0, 10));
        assert!(!implausible_walk(1.0, 12));
        assert!(!implausible_walk(0.0, 0));
    }

    #[test]
    fn test_dedupe_keeps_closest_in_first_order() {
        let center = Coordinates::new(36.75, 3.0);
        let poi = |name: &str, lat: f64| Poi {
            name: name.to_string(),
            lat,
            lng: 3.0,
            tags: Default::default(),
        };
        let out = dedupe_by_name(
            vec![
                poi("Far Museum", 36.80),
                poi("Post Office, Algiers", 36.77),
                poi("post office", 36.751),
                poi("", 36.75),
            ],
            center,
        );
        let names: Vec<_> = out.iter().map(|(p, _)| p.name.as_str()).collect();
        assert_eq!(names, ["post office", "Far Museum"]);
    }

    #[test]
    fn test_spread_never_repeats() {
        let candidates: Vec<Candidate> = (0..7)
            .map(|i| Candidate {
                item: item(&format!("Spot {i}"), 36.7 + f64::from(i) * 0.001),
                bucket: if i % 2 == 0 { Bucket::Parks } else { Bucket::Food },
            })
            .collect();
        let start = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let days = date_range(start, NaiveDate::from_ymd_opt(2026, 5, 4).unwrap());
        let plan = spread_over_days(candidates, days, 3);

        assert_eq!(plan.len(), 3);
        assert_eq!(plan[2].items.len(), 1);
        let mut seen = HashSet::new();
        for day in &plan {
            for it in &day.items {
                assert!(seen.insert(item_key(it)));
            }
        }
        assert_eq!(plan[0].items[0].name, "Spot 1");
        assert_eq!(plan[0].items[1].name, "Spot 0");
    }
}
