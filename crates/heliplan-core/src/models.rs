//! Input data models for the fuel and capacity planning engine.
//!
//! Inputs arrive in two shapes: the raw records supplied by the route editor,
//! aircraft registry and fuel-policy module (every required number is an
//! `Option` so absence can be told apart from zero), and the validated types
//! the calculators work on. Nothing here invents a value that was not supplied.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

// ========== ROUTE ==========

/// Whether the aircraft lands at a route point or flies over it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaypointRole {
    /// Aircraft lands here (rig, platform, heliport)
    #[default]
    LandingStop,
    /// Flown over, no landing
    NavigationWaypoint,
}

/// A point on the route as supplied by the route editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// `[lon, lat]` in decimal degrees
    #[serde(default)]
    pub coordinates: Option<[f64; 2]>,
    /// Untagged points are landing stops
    #[serde(default)]
    pub role: WaypointRole,
}

impl Waypoint {
    pub fn stop(id: impl Into<String>, name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates: Some([lon, lat]),
            role: WaypointRole::LandingStop,
        }
    }

    pub fn nav(id: impl Into<String>, name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinates: Some([lon, lat]),
            role: WaypointRole::NavigationWaypoint,
        }
    }

    pub fn is_landing_stop(&self) -> bool {
        self.role == WaypointRole::LandingStop
    }

    /// Validated position of this point.
    pub fn position(&self) -> Result<Position, EngineError> {
        let Some([lon, lat]) = self.coordinates else {
            return Err(EngineError::InvalidWaypointCoordinates {
                waypoint_id: self.id.clone(),
                reason: "coordinates missing".to_string(),
            });
        };
        if !lon.is_finite() || !lat.is_finite() {
            return Err(EngineError::InvalidWaypointCoordinates {
                waypoint_id: self.id.clone(),
                reason: format!("non-finite coordinates [{lon}, {lat}]"),
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(EngineError::InvalidWaypointCoordinates {
                waypoint_id: self.id.clone(),
                reason: format!("latitude {lat} out of range"),
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(EngineError::InvalidWaypointCoordinates {
                waypoint_id: self.id.clone(),
                reason: format!("longitude {lon} out of range"),
            });
        }
        Ok(Position { lat, lon })
    }
}

/// A validated geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

/// Reference to a landing stop within the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRef {
    pub id: String,
    pub name: String,
    /// Index among landing stops (0 = departure)
    pub index: usize,
}

// ========== AIRCRAFT ==========

/// Aircraft performance record as supplied by the aircraft registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftData {
    #[serde(default)]
    pub registration: Option<String>,
    /// Cruise true airspeed in knots
    #[serde(default)]
    pub cruise_speed: Option<f64>,
    /// Cruise fuel flow in lbs/hr
    #[serde(default)]
    pub fuel_burn_rate: Option<f64>,
    #[serde(default)]
    pub empty_weight: Option<f64>,
    #[serde(default)]
    pub max_takeoff_weight: Option<f64>,
    #[serde(default)]
    pub max_fuel_capacity: Option<f64>,
    #[serde(default)]
    pub max_passengers: Option<f64>,
}

/// Validated aircraft performance. Weights and fuel in lbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    pub registration: Option<String>,
    pub cruise_speed: f64,
    pub fuel_burn_rate: f64,
    pub empty_weight: f64,
    pub max_takeoff_weight: f64,
    pub max_fuel_capacity: f64,
    pub max_passengers: u32,
}

impl Aircraft {
    /// Validate a registry record. Every field must be present, finite and positive.
    pub fn from_data(data: &AircraftData) -> Result<Self, EngineError> {
        let cruise_speed = require_aircraft_field("cruise_speed", data.cruise_speed)?;
        let fuel_burn_rate = require_aircraft_field("fuel_burn_rate", data.fuel_burn_rate)?;
        let empty_weight = require_aircraft_field("empty_weight", data.empty_weight)?;
        let max_takeoff_weight =
            require_aircraft_field("max_takeoff_weight", data.max_takeoff_weight)?;
        let max_fuel_capacity =
            require_aircraft_field("max_fuel_capacity", data.max_fuel_capacity)?;
        let max_passengers = require_aircraft_field("max_passengers", data.max_passengers)?;
        if max_passengers.fract() != 0.0 || max_passengers > f64::from(u32::MAX) {
            return Err(EngineError::MissingOrInvalidAircraftData {
                field: "max_passengers",
                reason: format!("{max_passengers} is not a whole passenger count"),
            });
        }

        Ok(Self {
            registration: data.registration.clone(),
            cruise_speed,
            fuel_burn_rate,
            empty_weight,
            max_takeoff_weight,
            max_fuel_capacity,
            max_passengers: max_passengers as u32,
        })
    }
}

impl TryFrom<&AircraftData> for Aircraft {
    type Error = EngineError;

    fn try_from(data: &AircraftData) -> Result<Self, Self::Error> {
        Self::from_data(data)
    }
}

fn require_aircraft_field(field: &'static str, value: Option<f64>) -> Result<f64, EngineError> {
    match value {
        None => Err(EngineError::MissingOrInvalidAircraftData {
            field,
            reason: "missing".to_string(),
        }),
        Some(v) if !v.is_finite() => Err(EngineError::MissingOrInvalidAircraftData {
            field,
            reason: format!("{v} is not a number"),
        }),
        Some(v) if v <= 0.0 => Err(EngineError::MissingOrInvalidAircraftData {
            field,
            reason: format!("{v} must be positive"),
        }),
        Some(v) => Ok(v),
    }
}

// ========== WEATHER ==========

/// Wind record as supplied by the weather module.
///
/// A missing record means calm air; a present record must carry both fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub wind_direction: Option<f64>,
}

/// Surface wind for the route. Absent weather is calm air, stated explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Knots
    pub wind_speed: f64,
    /// Degrees true, direction the wind blows from
    pub wind_direction: f64,
}

impl Weather {
    pub fn calm() -> Self {
        Self::default()
    }

    pub fn new(wind_speed: f64, wind_direction: f64) -> Self {
        Self {
            wind_speed,
            wind_direction,
        }
    }

    /// Resolve an optional weather record. `None` is calm air.
    pub fn from_data(data: Option<&WeatherData>) -> Result<Self, EngineError> {
        let Some(data) = data else {
            return Ok(Self::calm());
        };
        let wind_speed = data
            .wind_speed
            .ok_or(EngineError::MissingWeatherField { field: "wind_speed" })?;
        let wind_direction = data
            .wind_direction
            .ok_or(EngineError::MissingWeatherField {
                field: "wind_direction",
            })?;
        Self::new(wind_speed, wind_direction).validated()
    }

    /// Reject negative or non-finite wind and normalise the direction to [0, 360).
    pub fn validated(&self) -> Result<Self, EngineError> {
        if !self.wind_speed.is_finite() || self.wind_speed < 0.0 {
            return Err(EngineError::InvalidWeather {
                field: "wind_speed",
                value: self.wind_speed,
            });
        }
        if !self.wind_direction.is_finite() {
            return Err(EngineError::InvalidWeather {
                field: "wind_direction",
                value: self.wind_direction,
            });
        }
        Ok(Self {
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction.rem_euclid(360.0),
        })
    }
}

// ========== FUEL POLICY ==========

/// How reserve fuel is specified by the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReserveMethod {
    /// Fixed quantity in lbs (`reserve_fuel`)
    #[default]
    Fixed,
    /// Percentage of trip fuel (`reserve_fuel_percent`)
    Percent,
}

/// Operator fuel policy as supplied by the policy module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelPolicyData {
    #[serde(default)]
    pub passenger_weight: Option<f64>,
    #[serde(default)]
    pub taxi_fuel: Option<f64>,
    #[serde(default)]
    pub contingency_percent: Option<f64>,
    #[serde(default)]
    pub reserve_method: ReserveMethod,
    #[serde(default)]
    pub reserve_fuel: Option<f64>,
    #[serde(default)]
    pub reserve_fuel_percent: Option<f64>,
    /// Minutes on deck at each intermediate stop
    #[serde(default)]
    pub deck_time_per_stop: Option<f64>,
    /// Ground-running fuel flow in lbs/hr
    #[serde(default)]
    pub deck_fuel_flow: Option<f64>,
    #[serde(default)]
    pub cargo_weight: Option<f64>,
}

/// Resolved reserve requirement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", content = "value", rename_all = "lowercase")]
pub enum Reserve {
    Fixed(f64),
    Percent(f64),
}

impl Reserve {
    pub fn fuel_for_trip(&self, trip_fuel: f64) -> f64 {
        match *self {
            Reserve::Fixed(lbs) => lbs,
            Reserve::Percent(pct) => trip_fuel * pct / 100.0,
        }
    }
}

/// Validated fuel policy. Zero is valid data; absence is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPolicy {
    pub passenger_weight: f64,
    pub taxi_fuel: f64,
    pub contingency_percent: f64,
    pub reserve: Reserve,
    pub deck_time_per_stop: f64,
    pub deck_fuel_flow: f64,
    pub cargo_weight: f64,
}

impl FuelPolicy {
    pub fn from_data(data: &FuelPolicyData) -> Result<Self, EngineError> {
        let passenger_weight = require_policy_field("passenger_weight", data.passenger_weight)?;
        if passenger_weight == 0.0 {
            return Err(EngineError::InvalidFuelPolicyField {
                field: "passenger_weight",
                value: passenger_weight,
            });
        }

        let reserve = match data.reserve_method {
            ReserveMethod::Fixed => {
                Reserve::Fixed(require_policy_field("reserve_fuel", data.reserve_fuel)?)
            }
            ReserveMethod::Percent => Reserve::Percent(require_policy_field(
                "reserve_fuel_percent",
                data.reserve_fuel_percent,
            )?),
        };

        Ok(Self {
            passenger_weight,
            taxi_fuel: require_policy_field("taxi_fuel", data.taxi_fuel)?,
            contingency_percent: require_policy_field(
                "contingency_percent",
                data.contingency_percent,
            )?,
            reserve,
            deck_time_per_stop: require_policy_field(
                "deck_time_per_stop",
                data.deck_time_per_stop,
            )?,
            deck_fuel_flow: require_policy_field("deck_fuel_flow", data.deck_fuel_flow)?,
            cargo_weight: require_policy_field("cargo_weight", data.cargo_weight)?,
        })
    }

    /// Fuel burned on deck at a single intermediate stop.
    pub fn deck_fuel_per_stop(&self) -> f64 {
        self.deck_time_per_stop / 60.0 * self.deck_fuel_flow
    }
}

impl TryFrom<&FuelPolicyData> for FuelPolicy {
    type Error = EngineError;

    fn try_from(data: &FuelPolicyData) -> Result<Self, Self::Error> {
        Self::from_data(data)
    }
}

fn require_policy_field(field: &'static str, value: Option<f64>) -> Result<f64, EngineError> {
    let value = value.ok_or(EngineError::MissingFuelPolicyField { field })?;
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidFuelPolicyField { field, value });
    }
    Ok(value)
}
