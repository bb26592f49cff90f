//! The `plan_trip` tool.

use super::geo::{coordinates, travel_mode};
use super::support::{make_tool, parse_args, serialize_response};
use crate::error::McpErrorExt;
use crate::registry::{ToolRegistry, ToolResult};
use rmcp::model::{ErrorData, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use wayfarer_geo::planner::MAX_LIMIT_PER_DAY;
use wayfarer_geo::{GeoBackend, TripRequest, plan_trip};

/// Tool name.
pub const PLAN_TRIP_TOOL: &str = "plan_trip";

/// Arguments of `plan_trip`.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct PlanTripArgs {
    /// City or area to visit, e.g. "Algiers"
    pub destination: String,
    /// First day (YYYY-MM-DD, DD-MM-YYYY, DD/MM/YYYY or YYYY/MM/DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day, same formats as start_date
    #[serde(default)]
    pub end_date: Option<String>,
    /// Interests such as food, cafes, history, museums, landmarks, parks
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    /// Pace of the trip (default "moderate")
    #[serde(default)]
    pub pace: Option<String>,
    /// Travel mode: foot (default), bike or driving
    #[serde(default)]
    pub mode: Option<String>,
    /// Traveller latitude; with origin_lng, search and timings start here
    #[serde(default)]
    pub origin_lat: Option<f64>,
    /// Traveller longitude
    #[serde(default)]
    pub origin_lng: Option<f64>,
    /// Stops per day (default 5, at most 50)
    #[serde(default)]
    pub limit_per_day: Option<usize>,
    /// Search radius in km (default and maximum 12)
    #[serde(default)]
    pub radius_km: Option<f64>,
}

impl PlanTripArgs {
    /// Converts the arguments into a planner request.
    pub fn into_request(self) -> Result<TripRequest, ErrorData> {
        let mut request =
            TripRequest::new(self.destination).with_mode(travel_mode(self.mode.as_deref())?);
        request.start_date = self.start_date;
        request.end_date = self.end_date;
        request.interests = self.interests;
        if let Some(pace) = self.pace {
            request = request.with_pace(pace);
        }
        if let (Some(lat), Some(lng)) = (self.origin_lat, self.origin_lng) {
            request = request.with_origin(coordinates("origin", lat, lng)?);
        }
        if let Some(limit) = self.limit_per_day {
            request = request.with_limit_per_day(limit.clamp(1, MAX_LIMIT_PER_DAY));
        }
        if let Some(radius) = self.radius_km {
            request = request.with_radius_km(radius);
        }
        Ok(request)
    }
}

/// Registry holding `plan_trip`.
#[derive(Clone)]
pub struct TripTools {
    backend: Arc<dyn GeoBackend>,
}

impl TripTools {
    /// Trip planning over a shared backend.
    pub fn new(backend: Arc<dyn GeoBackend>) -> Self {
        Self { backend }
    }
}

impl std::fmt::Debug for TripTools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripTools")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl ToolRegistry for TripTools {
    fn tools(&self) -> Vec<Tool> {
        vec![make_tool::<PlanTripArgs>(
            PLAN_TRIP_TOOL,
            "Plan a day-by-day itinerary for a destination: diversified points of \
             interest with distances and travel times, plus flight and hotel links.",
        )]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        if name != PLAN_TRIP_TOOL {
            return None;
        }
        let backend = Arc::clone(&self.backend);
        Some(Box::pin(async move {
            let request = parse_args::<PlanTripArgs>(PLAN_TRIP_TOOL, args)?.into_request()?;
            let today = chrono::Local::now().date_naive();
            let plan = plan_trip(backend.as_ref(), &request, today)
                .await
                .map_err(|e| e.to_mcp_error())?;
            serialize_response(&plan)
        }))
    }
}
