//! Interest terms, coarse buckets and their OSM tags.

use crate::clients::OsmTag;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Interests used when the request names none.
pub const DEFAULT_INTERESTS: [&str; 4] = ["landmarks", "museums", "cafes", "parks"];

/// Coarse POI category. The declaration order is the diversification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Historic sites and places of worship
    History,
    /// Attractions, viewpoints, towers
    Landmarks,
    /// Museums
    Museums,
    /// Restaurants, fast food, bakeries
    Food,
    /// Cafes
    Cafes,
    /// Parks and gardens
    Parks,
}

impl Bucket {
    /// All buckets, in diversification order.
    pub const ALL: [Bucket; 6] = [
        Bucket::History,
        Bucket::Landmarks,
        Bucket::Museums,
        Bucket::Food,
        Bucket::Cafes,
        Bucket::Parks,
    ];

    /// Bucket name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::History => "history",
            Self::Landmarks => "landmarks",
            Self::Museums => "museums",
            Self::Food => "food",
            Self::Cafes => "cafes",
            Self::Parks => "parks",
        }
    }

    /// Bucket with exactly this name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == name)
    }

    /// Bucket a single search term belongs to.
    pub fn for_term(term: &str) -> Option<Self> {
        let bucket = match term {
            "restaurant" | "restaurants" | "bakery" | "kebab" | "meze" | "street food"
            | "lokanta" => Self::Food,
            "cafe" | "cafes" | "coffee" | "coffee shop" => Self::Cafes,
            "museum" | "museums" | "art museum" => Self::Museums,
            "historic" | "historical sites" | "mosque" | "palace" | "basilica"
            | "archaeology" => Self::History,
            "landmarks" | "monuments" | "viewpoints" | "viewpoint" | "tower" => Self::Landmarks,
            "parks" | "park" | "gardens" | "promenade" => Self::Parks,
            _ => return None,
        };
        Some(bucket)
    }

    /// OSM tags fetched for this bucket.
    pub fn tags(self) -> &'static [OsmTag] {
        const FOOD: &[OsmTag] = &[
            OsmTag::exact("amenity", "restaurant"),
            OsmTag::exact("amenity", "cafe"),
            OsmTag::exact("amenity", "fast_food"),
            OsmTag::exact("amenity", "food_court"),
            OsmTag::exact("shop", "bakery"),
        ];
        const CAFES: &[OsmTag] = &[
            OsmTag::exact("amenity", "cafe"),
            OsmTag::exact("amenity", "coffee_shop"),
        ];
        const MUSEUMS: &[OsmTag] = &[OsmTag::exact("tourism", "museum")];
        const HISTORY: &[OsmTag] = &[
            OsmTag::exact("tourism", "museum"),
            OsmTag::any("historic"),
            OsmTag::exact("amenity", "place_of_worship"),
        ];
        const LANDMARKS: &[OsmTag] = &[
            OsmTag::exact("tourism", "attraction"),
            OsmTag::exact("tourism", "viewpoint"),
            OsmTag::any("historic"),
            OsmTag::exact("man_made", "tower"),
        ];
        const PARKS: &[OsmTag] = &[
            OsmTag::exact("leisure", "park"),
            OsmTag::exact("leisure", "garden"),
        ];
        match self {
            Self::History => HISTORY,
            Self::Landmarks => LANDMARKS,
            Self::Museums => MUSEUMS,
            Self::Food => FOOD,
            Self::Cafes => CAFES,
            Self::Parks => PARKS,
        }
    }

    /// Classifies a POI by its OSM tags; anything unrecognised is a landmark.
    pub fn from_osm_tags(tags: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| tags.get(key).map(String::as_str);
        match (get("amenity"), get("shop"), get("tourism")) {
            (Some("restaurant" | "fast_food" | "food_court"), _, _) => Self::Food,
            (Some("cafe"), _, _) => Self::Cafes,
            (_, Some("bakery"), _) => Self::Food,
            (_, _, Some("museum")) => Self::Museums,
            _ if get("historic").is_some_and(|v| !v.is_empty()) => Self::History,
            (_, _, Some("attraction" | "viewpoint")) => Self::Landmarks,
            _ if get("man_made") == Some("tower") => Self::Landmarks,
            _ if matches!(get("leisure"), Some("park" | "garden")) => Self::Parks,
            _ => Self::Landmarks,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn expansion(term: &str) -> Option<&'static [&'static str]> {
    let terms: &'static [&'static str] = match term {
        "food" => &[
            "restaurants",
            "cafe",
            "cafes",
            "coffee",
            "bakery",
            "street food",
            "kebab",
            "lokanta",
            "meze",
        ],
        "cafes" => &["cafe", "cafes", "coffee", "coffee shop"],
        "history" => &[
            "historical sites",
            "museums",
            "mosque",
            "palace",
            "basilica",
            "archaeology",
        ],
        "museums" => &["museums", "art museum"],
        "landmarks" => &["landmarks", "monuments", "viewpoints"],
        "parks" => &["parks", "gardens", "promenade"],
        _ => return None,
    };
    Some(terms)
}

fn normalize_terms(interests: &[String]) -> Vec<String> {
    if interests.is_empty() {
        DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()
    } else {
        interests.iter().map(|t| t.trim().to_lowercase()).collect()
    }
}

/// Expands interest keywords into search terms.
///
/// Known keywords expand through a fixed table, unknown terms are kept
/// as-is (lowercased). Duplicates and blanks are dropped, first occurrence
/// wins. An empty result falls back to [`DEFAULT_INTERESTS`].
pub fn expand_interests(interests: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for term in normalize_terms(interests) {
        let expanded: Vec<String> = match expansion(&term) {
            Some(terms) => terms.iter().map(|s| s.to_string()).collect(),
            None => vec![term],
        };
        for t in expanded {
            if !t.is_empty() && !out.contains(&t) {
                out.push(t);
            }
        }
    }
    if out.is_empty() {
        DEFAULT_INTERESTS.iter().map(|s| s.to_string()).collect()
    } else {
        out
    }
}

/// Buckets to query for the given interests.
pub fn select_buckets(interests: &[String]) -> BTreeSet<Bucket> {
    let buckets: BTreeSet<Bucket> = normalize_terms(interests)
        .iter()
        .filter_map(|t| Bucket::from_name(t).or_else(|| Bucket::for_term(t)))
        .collect();
    if buckets.is_empty() {
        [
            Bucket::Landmarks,
            Bucket::Museums,
            Bucket::Cafes,
            Bucket::Food,
            Bucket::Parks,
        ]
        .into_iter()
        .collect()
    } else {
        buckets
    }
}

/// Union of the buckets' tags without repeats.
pub fn tags_for(buckets: &BTreeSet<Bucket>) -> Vec<OsmTag> {
    let mut tags: Vec<OsmTag> = Vec::new();
    for tag in buckets.iter().flat_map(|b| b.tags()) {
        if !tags.contains(tag) {
            tags.push(*tag);
        }
    }
    tags
}
