//! Fuel and passenger-capacity planning for offshore helicopter routes.
//!
//! Given an ordered route, aircraft performance, wind and an operator fuel
//! policy, computes per-leg trip fuel, auxiliary fuel, the fuel required at
//! each landing stop and the passengers that can be carried.

pub mod auxiliary;
pub mod error;
pub mod leg_fuel;
pub mod memo;
pub mod models;
pub mod plan;
pub mod rules;
pub mod segmenter;
pub mod spatial;
pub mod stop_fuel;

pub use auxiliary::{calculate_auxiliary_fuel, AuxiliaryFuel};
pub use error::{EngineError, PlanWarning};
pub use leg_fuel::{calculate_leg, calculate_legs, LegResult};
pub use memo::{FuelPlanMemo, PlanFingerprint};
pub use models::{
    Aircraft, AircraftData, FuelPolicy, FuelPolicyData, Position, Reserve, ReserveMethod, StopRef,
    Waypoint, WaypointRole, Weather, WeatherData,
};
pub use plan::{
    compute_fuel_plan, compute_fuel_plan_with_rules, format_duration_hm, FuelPlanResult,
    RouteCapacity, RouteTotals,
};
pub use rules::PlanningRules;
pub use segmenter::{segment_route, Leg, RouteSegmentation};
pub use spatial::haversine_distance;
pub use stop_fuel::{calculate_stop_records, FuelBreakdown, StopFuelRecord};
