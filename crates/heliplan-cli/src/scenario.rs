//! Planning scenario files.
//!
//! A scenario bundles the four engine inputs in one JSON document:
//!
//! ```json
//! {
//!   "name": "Forties shuttle",
//!   "waypoints": [{"id": "ABZ", "name": "Aberdeen", "coordinates": [-2.198, 57.204]}],
//!   "aircraft": {"cruise_speed": 145, "fuel_burn_rate": 1100, "...": "..."},
//!   "weather": {"wind_speed": 20, "wind_direction": 270},
//!   "fuel_policy": {"passenger_weight": 220, "...": "..."}
//! }
//! ```
//!
//! `weather` may be omitted for calm air; when present it needs both fields.
//! Aircraft and policy fields are validated by the engine, not here.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use heliplan_core::{
    compute_fuel_plan_with_rules, AircraftData, EngineError, FuelPlanResult, FuelPolicyData,
    PlanningRules, Waypoint, Weather, WeatherData,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub waypoints: Vec<Waypoint>,
    pub aircraft: AircraftData,
    #[serde(default)]
    pub weather: Option<WeatherData>,
    pub fuel_policy: FuelPolicyData,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid scenario document")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn plan(&self, rules: &PlanningRules) -> Result<FuelPlanResult, EngineError> {
        let weather = Weather::from_data(self.weather.as_ref())?;
        compute_fuel_plan_with_rules(
            &self.waypoints,
            &self.aircraft,
            &weather,
            &self.fuel_policy,
            rules,
        )
    }
}
