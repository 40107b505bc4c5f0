//! Fuel plan assembly and the public planning entry point.

use serde::{Deserialize, Serialize};

use crate::auxiliary::{calculate_auxiliary_fuel, AuxiliaryFuel};
use crate::error::{EngineError, PlanWarning};
use crate::leg_fuel::{calculate_legs, LegResult};
use crate::models::{Aircraft, AircraftData, FuelPolicy, FuelPolicyData, StopRef, Waypoint, Weather};
use crate::rules::PlanningRules;
use crate::segmenter::segment_route;
use crate::stop_fuel::{calculate_stop_records, StopFuelRecord};

/// Passenger capacity for the route as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteCapacity {
    /// Limited by the most restrictive stop before the destination
    Limited {
        passengers: u32,
        limiting_stop: StopRef,
    },
    Undetermined { reason: String },
}

impl RouteCapacity {
    pub fn passengers(&self) -> Option<u32> {
        match self {
            RouteCapacity::Limited { passengers, .. } => Some(*passengers),
            RouteCapacity::Undetermined { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTotals {
    pub distance_nm: f64,
    pub flight_time_hours: f64,
    pub trip_fuel: f64,
    /// Trip fuel plus all auxiliary fuel
    pub total_fuel: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPlanResult {
    pub legs: Vec<LegResult>,
    pub auxiliary_fuel: AuxiliaryFuel,
    pub stop_records: Vec<StopFuelRecord>,
    pub route_max_capacity: RouteCapacity,
    pub totals: RouteTotals,
    #[serde(default)]
    pub warnings: Vec<PlanWarning>,
}

impl FuelPlanResult {
    pub fn has_capacity_shortfall(&self) -> bool {
        self.stop_records
            .iter()
            .any(|record| record.capacity_shortfall.is_some())
    }
}

/// Minimum passenger capacity over every stop except the destination.
///
/// Ties resolve to the earliest stop.
pub fn route_capacity(records: &[StopFuelRecord]) -> RouteCapacity {
    let limiting = records
        .iter()
        .filter(|record| !record.is_last_stop)
        .fold(None::<&StopFuelRecord>, |best, record| match best {
            Some(best) if best.max_passengers <= record.max_passengers => Some(best),
            _ => Some(record),
        });

    match limiting {
        Some(record) => RouteCapacity::Limited {
            passengers: record.max_passengers,
            limiting_stop: record.stop.clone(),
        },
        None => RouteCapacity::Undetermined {
            reason: "route has no departure stop before the destination".to_string(),
        },
    }
}

pub fn aggregate(
    legs: Vec<LegResult>,
    auxiliary_fuel: AuxiliaryFuel,
    stop_records: Vec<StopFuelRecord>,
    warnings: Vec<PlanWarning>,
) -> FuelPlanResult {
    let trip_fuel: f64 = legs.iter().map(|leg| leg.fuel_required).sum();
    let totals = RouteTotals {
        distance_nm: legs.iter().map(|leg| leg.distance).sum(),
        flight_time_hours: legs.iter().map(|leg| leg.flight_time_hours).sum(),
        trip_fuel,
        total_fuel: trip_fuel + auxiliary_fuel.total,
    };
    let route_max_capacity = route_capacity(&stop_records);

    FuelPlanResult {
        legs,
        auxiliary_fuel,
        stop_records,
        route_max_capacity,
        totals,
        warnings,
    }
}

/// Compute a fuel plan with the default engine rules.
pub fn compute_fuel_plan(
    waypoints: &[Waypoint],
    aircraft: &AircraftData,
    weather: &Weather,
    fuel_policy: &FuelPolicyData,
) -> Result<FuelPlanResult, EngineError> {
    compute_fuel_plan_with_rules(
        waypoints,
        aircraft,
        weather,
        fuel_policy,
        &PlanningRules::default(),
    )
}

/// Compute a fuel plan.
///
/// Pure function of its inputs: every call validates and recomputes from
/// scratch. Inputs are validated in order rules, aircraft, fuel policy,
/// weather, waypoint coordinates, route length; the first failure is returned.
pub fn compute_fuel_plan_with_rules(
    waypoints: &[Waypoint],
    aircraft: &AircraftData,
    weather: &Weather,
    fuel_policy: &FuelPolicyData,
    rules: &PlanningRules,
) -> Result<FuelPlanResult, EngineError> {
    rules.validate()?;
    let aircraft = Aircraft::from_data(aircraft)?;
    let policy = FuelPolicy::from_data(fuel_policy)?;
    let weather = weather.validated()?;
    for waypoint in waypoints {
        waypoint.position()?;
    }

    let segmentation = segment_route(waypoints)?;
    let legs = calculate_legs(&segmentation.legs, &aircraft, &weather, rules)?;

    let trip_fuel: f64 = legs.iter().map(|leg| leg.fuel_required).sum();
    let auxiliary_fuel =
        calculate_auxiliary_fuel(trip_fuel, segmentation.intermediate_stop_count(), &policy);

    let stops: Vec<StopRef> = (0..segmentation.actual_stops.len())
        .filter_map(|index| segmentation.stop_ref(index))
        .collect();
    let (stop_records, capacity_warnings) = calculate_stop_records(
        &stops,
        &legs,
        auxiliary_fuel.reserve_fuel,
        &aircraft,
        &policy,
    );

    let mut warnings = segmentation.warnings;
    warnings.extend(capacity_warnings);

    let plan = aggregate(legs, auxiliary_fuel, stop_records, warnings);
    tracing::debug!(
        legs = plan.legs.len(),
        trip_fuel = plan.totals.trip_fuel,
        total_fuel = plan.totals.total_fuel,
        passengers = ?plan.route_max_capacity.passengers(),
        "Fuel plan computed"
    );
    Ok(plan)
}

/// Render a duration in hours as `H:MM`, rounded to the nearest minute.
pub fn format_duration_hm(hours: f64) -> String {
    let total_minutes = (hours.max(0.0) * 60.0).round() as u64;
    format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop_fuel::FuelBreakdown;

    fn record(index: usize, max_passengers: u32, is_last_stop: bool) -> StopFuelRecord {
        StopFuelRecord {
            stop: StopRef {
                id: format!("S{index}"),
                name: format!("Stop {index}"),
                index,
            },
            required_fuel: 0.0,
            actual_fuel: 0.0,
            capacity_shortfall: None,
            max_passenger_weight: 0.0,
            max_passengers,
            breakdown: FuelBreakdown {
                trip_fuel: 0.0,
                contingency_fuel: 0.0,
                deck_fuel: 0.0,
                taxi_fuel: 0.0,
                reserve_fuel: 0.0,
            },
            is_first_stop: index == 0,
            is_last_stop,
        }
    }

    #[test]
    fn capacity_ignores_destination() {
        let records = vec![record(0, 6, false), record(1, 4, false), record(2, 0, true)];
        match route_capacity(&records) {
            RouteCapacity::Limited {
                passengers,
                limiting_stop,
            } => {
                assert_eq!(passengers, 4);
                assert_eq!(limiting_stop.id, "S1");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn capacity_ties_resolve_to_earliest_stop() {
        let records = vec![record(0, 5, false), record(1, 5, false), record(2, 9, true)];
        let RouteCapacity::Limited { limiting_stop, .. } = route_capacity(&records) else {
            panic!("expected limited capacity");
        };
        assert_eq!(limiting_stop.index, 0);
    }

    #[test]
    fn capacity_without_departure_stop_is_undetermined() {
        let capacity = route_capacity(&[record(0, 5, true)]);
        assert!(matches!(capacity, RouteCapacity::Undetermined { .. }));
        assert_eq!(capacity.passengers(), None);
        assert!(matches!(route_capacity(&[]), RouteCapacity::Undetermined { .. }));
    }

    #[test]
    fn durations_render_as_hours_and_minutes() {
        assert_eq!(format_duration_hm(0.41667), "0:25");
        assert_eq!(format_duration_hm(1.5), "1:30");
        assert_eq!(format_duration_hm(2.0), "2:00");
        assert_eq!(format_duration_hm(-1.0), "0:00");
    }

    #[test]
    fn invalid_ground_speed_floor_is_rejected_before_inputs() {
        let waypoints = [
            Waypoint::stop("A", "A", 0.0, 0.0),
            Waypoint::stop("B", "B", 1.0, 0.0),
        ];
        for floor in [0.0, f64::NAN] {
            let rules = PlanningRules {
                min_ground_speed_kt: floor,
            };
            let err = compute_fuel_plan_with_rules(
                &waypoints,
                &AircraftData::default(),
                &Weather::calm(),
                &FuelPolicyData::default(),
                &rules,
            )
            .unwrap_err();
            assert!(matches!(
                err,
                EngineError::InvalidPlanningRule {
                    field: "min_ground_speed_kt",
                    ..
                }
            ));
        }
    }
}
