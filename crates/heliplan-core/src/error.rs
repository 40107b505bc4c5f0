//! Engine failures and reportable planning conditions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Conditions that prevent a fuel plan from being produced at all.
///
/// Validation failures return before any calculation runs; there is no
/// partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("route needs at least 2 landing stops, found {landing_stops}")]
    InsufficientRouteLength { landing_stops: usize },

    #[error("waypoint {waypoint_id}: invalid coordinates ({reason})")]
    InvalidWaypointCoordinates { waypoint_id: String, reason: String },

    #[error("aircraft field {field}: {reason}")]
    MissingOrInvalidAircraftData { field: &'static str, reason: String },

    #[error("fuel policy field {field} is missing")]
    MissingFuelPolicyField { field: &'static str },

    #[error("fuel policy field {field} has invalid value {value}")]
    InvalidFuelPolicyField { field: &'static str, value: f64 },

    #[error("weather field {field} is missing")]
    MissingWeatherField { field: &'static str },

    #[error("weather field {field} has invalid value {value}")]
    InvalidWeather { field: &'static str, value: f64 },

    #[error("planning rule {field} has invalid value {value}")]
    InvalidPlanningRule { field: &'static str, value: f64 },
}

/// Non-fatal conditions surfaced alongside a completed plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// A navigation waypoint preceded the first landing stop and was dropped.
    AmbiguousLeadingWaypoint { waypoint_id: String },
    /// Fuel required at a stop exceeds tank capacity; the stop's actual fuel is clamped.
    InsufficientFuelCapacity {
        stop_id: String,
        stop_index: usize,
        required_fuel: f64,
        max_fuel_capacity: f64,
        shortfall: f64,
    },
}

impl std::fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanWarning::AmbiguousLeadingWaypoint { waypoint_id } => write!(
                f,
                "navigation waypoint {waypoint_id} precedes the first landing stop and was dropped"
            ),
            PlanWarning::InsufficientFuelCapacity {
                stop_id,
                required_fuel,
                max_fuel_capacity,
                shortfall,
                ..
            } => write!(
                f,
                "stop {stop_id} requires {required_fuel:.0} lbs but capacity is {max_fuel_capacity:.0} lbs (short {shortfall:.0} lbs)"
            ),
        }
    }
}
