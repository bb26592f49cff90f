//! Tool groups served by Wayfarer.

pub mod geo;
pub mod health;
pub mod human;
pub mod support;
pub mod trip;

pub use geo::GeoTools;
pub use health::{HEALTH_TOOL, HealthResponse, HealthTools};
pub use human::{ASK_HUMAN_TOOL, ASK_USER_TOOL, AskArgs, HumanTools};
pub use trip::{PLAN_TRIP_TOOL, PlanTripArgs, TripTools};
