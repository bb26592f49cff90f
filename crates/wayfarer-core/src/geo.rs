//! Geographic primitives shared by the geo clients, the planner and the tools.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Meters per degree of latitude, roughly.
const METERS_PER_DEGREE: f64 = 111_000.0;

/// Smallest half-width of a search viewbox, in degrees.
const MIN_VIEWBOX_DEGREES: f64 = 0.005;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude
    pub lat: f64,
    /// Longitude
    pub lng: f64,
}

impl Coordinates {
    /// Creates a coordinate pair.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// Shared great-circle formula; `radius` selects the output unit.
fn great_circle(a: Coordinates, b: Coordinates, radius: f64) -> f64 {
    let (phi1, phi2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();
    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * radius * h.sqrt().asin()
}

/// Straight-line distance between two points in meters.
pub fn haversine_m(a: Coordinates, b: Coordinates) -> f64 {
    great_circle(a, b, EARTH_RADIUS_M)
}

/// Straight-line distance between two points in kilometers.
pub fn haversine_km(a: Coordinates, b: Coordinates) -> f64 {
    great_circle(a, b, EARTH_RADIUS_KM)
}

/// Builds a Nominatim `viewbox` (`left,top,right,bottom` in lng/lat order)
/// around `center`.
pub fn viewbox(center: Coordinates, radius_m: u32) -> String {
    let d = (f64::from(radius_m) / METERS_PER_DEGREE).max(MIN_VIEWBOX_DEGREES);
    format!(
        "{},{},{},{}",
        center.lng - d,
        center.lat - d,
        center.lng + d,
        center.lat + d
    )
}

/// OpenStreetMap link centred on a point.
pub fn map_url(lat: f64, lng: f64) -> String {
    format!("https://www.openstreetmap.org/?mlat={lat}&mlon={lng}#map=15/{lat}/{lng}")
}

/// Rounds to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// How the traveller moves between places.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// Walking
    #[default]
    Foot,
    /// Cycling
    Bike,
    /// Driving
    Driving,
}

impl TravelMode {
    /// OSRM routing profile for this mode.
    pub fn osrm_profile(self) -> &'static str {
        match self {
            Self::Foot => "walking",
            Self::Bike => "cycling",
            Self::Driving => "driving",
        }
    }

    /// Canonical name (`foot`, `bike`, `driving`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Foot => "foot",
            Self::Bike => "bike",
            Self::Driving => "driving",
        }
    }

    /// Nominal speed used when no route is available.
    pub fn fallback_speed_kmh(self) -> f64 {
        match self {
            Self::Foot => 5.0,
            Self::Bike => 15.0,
            Self::Driving => 24.0,
        }
    }

    /// Seconds needed to cover `meters` at the fallback speed.
    pub fn fallback_duration_s(self, meters: f64) -> f64 {
        meters / (self.fallback_speed_kmh() * 1000.0 / 3600.0)
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "foot" | "walk" | "walking" => Ok(Self::Foot),
            "bike" | "cycling" => Ok(Self::Bike),
            "driving" | "car" => Ok(Self::Driving),
            other => Err(Error::validation_field(
                "mode",
                format!("unknown travel mode '{other}' (expected foot, bike or driving)"),
            )),
        }
    }
}
