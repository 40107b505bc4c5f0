//! Per-leg distance, wind-adjusted time and trip fuel.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{Aircraft, Position, Waypoint, Weather};
use crate::rules::PlanningRules;
use crate::segmenter::Leg;
use crate::spatial::{distance_nm, headwind_component, initial_bearing_deg};

/// Time and fuel for one leg.
///
/// Distance, time and fuel are summed segment by segment. `heading_deg`,
/// `ground_speed` and `headwind_component` are representative values taken on
/// the direct course between the two stops and are for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegResult {
    pub departure_id: String,
    pub arrival_id: String,
    /// Nautical miles
    pub distance: f64,
    pub flight_time_hours: f64,
    /// Trip fuel in lbs
    pub fuel_required: f64,
    /// Knots
    pub ground_speed: f64,
    /// Knots, positive = headwind
    pub headwind_component: f64,
    pub heading_deg: f64,
    pub segment_count: usize,
}

/// Performance over a single straight segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPerformance {
    pub distance: f64,
    pub heading_deg: f64,
    pub headwind_component: f64,
    pub ground_speed: f64,
    pub time_hours: f64,
    pub fuel: f64,
}

pub fn ground_speed(cruise_speed: f64, headwind: f64, rules: &PlanningRules) -> f64 {
    (cruise_speed - headwind).max(rules.min_ground_speed_kt)
}

pub fn segment_performance(
    from: Position,
    to: Position,
    aircraft: &Aircraft,
    weather: &Weather,
    rules: &PlanningRules,
) -> SegmentPerformance {
    let distance = distance_nm(from, to);
    let heading_deg = initial_bearing_deg(from, to);
    let headwind = headwind_component(weather.wind_speed, weather.wind_direction, heading_deg);
    let gs = ground_speed(aircraft.cruise_speed, headwind, rules);
    let time_hours = distance / gs;

    SegmentPerformance {
        distance,
        heading_deg,
        headwind_component: headwind,
        ground_speed: gs,
        time_hours,
        fuel: time_hours * aircraft.fuel_burn_rate,
    }
}

/// Compute time and fuel for one leg, flying through its intermediate waypoints.
pub fn calculate_leg(
    leg: &Leg,
    aircraft: &Aircraft,
    weather: &Weather,
    rules: &PlanningRules,
) -> Result<LegResult, EngineError> {
    let positions = leg
        .points()
        .map(Waypoint::position)
        .collect::<Result<Vec<_>, _>>()?;

    let mut distance = 0.0;
    let mut flight_time_hours = 0.0;
    let mut fuel_required = 0.0;
    for pair in positions.windows(2) {
        let segment = segment_performance(pair[0], pair[1], aircraft, weather, rules);
        distance += segment.distance;
        flight_time_hours += segment.time_hours;
        fuel_required += segment.fuel;
    }

    let direct = segment_performance(
        leg.departure_stop.position()?,
        leg.arrival_stop.position()?,
        aircraft,
        weather,
        rules,
    );

    let result = LegResult {
        departure_id: leg.departure_stop.id.clone(),
        arrival_id: leg.arrival_stop.id.clone(),
        distance,
        flight_time_hours,
        fuel_required,
        ground_speed: direct.ground_speed,
        headwind_component: direct.headwind_component,
        heading_deg: direct.heading_deg,
        segment_count: positions.len() - 1,
    };

    tracing::debug!(
        from = %result.departure_id,
        to = %result.arrival_id,
        distance_nm = result.distance,
        time_h = result.flight_time_hours,
        fuel_lbs = result.fuel_required,
        "Leg computed"
    );

    Ok(result)
}

pub fn calculate_legs(
    legs: &[Leg],
    aircraft: &Aircraft,
    weather: &Weather,
    rules: &PlanningRules,
) -> Result<Vec<LegResult>, EngineError> {
    legs.iter()
        .map(|leg| calculate_leg(leg, aircraft, weather, rules))
        .collect()
}
