//! Per-stop required fuel and weight-limited passenger capacity.
//!
//! Walks the landing stops from destination back to departure, accumulating
//! the trip fuel still to be flown from each stop.

use serde::{Deserialize, Serialize};

use crate::auxiliary::{contingency_fuel, deck_fuel};
use crate::error::PlanWarning;
use crate::leg_fuel::LegResult;
use crate::models::{Aircraft, FuelPolicy, StopRef};

/// Components of the fuel required on departure from a stop, lbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelBreakdown {
    pub trip_fuel: f64,
    pub contingency_fuel: f64,
    pub deck_fuel: f64,
    pub taxi_fuel: f64,
    pub reserve_fuel: f64,
}

impl FuelBreakdown {
    pub fn total(&self) -> f64 {
        self.trip_fuel + self.contingency_fuel + self.deck_fuel + self.taxi_fuel + self.reserve_fuel
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopFuelRecord {
    pub stop: StopRef,
    pub required_fuel: f64,
    /// Required fuel clamped to tank capacity
    pub actual_fuel: f64,
    /// Required fuel beyond tank capacity, if any
    pub capacity_shortfall: Option<f64>,
    pub max_passenger_weight: f64,
    pub max_passengers: u32,
    pub breakdown: FuelBreakdown,
    pub is_first_stop: bool,
    pub is_last_stop: bool,
}

/// Passengers that fit in the weight left after aircraft, fuel and cargo.
pub fn passenger_capacity(
    actual_fuel: f64,
    aircraft: &Aircraft,
    policy: &FuelPolicy,
) -> (f64, u32) {
    let max_passenger_weight = (aircraft.max_takeoff_weight
        - aircraft.empty_weight
        - actual_fuel
        - policy.cargo_weight)
        .max(0.0);
    let by_weight = (max_passenger_weight / policy.passenger_weight).floor();
    let max_passengers = by_weight.min(f64::from(aircraft.max_passengers)) as u32;
    (max_passenger_weight, max_passengers)
}

/// Build one record per landing stop.
///
/// `legs[j]` must be the leg departing `stops[j]`. `reserve_fuel` is carried
/// at every stop; taxi fuel only at the first.
pub fn calculate_stop_records(
    stops: &[StopRef],
    legs: &[LegResult],
    reserve_fuel: f64,
    aircraft: &Aircraft,
    policy: &FuelPolicy,
) -> (Vec<StopFuelRecord>, Vec<PlanWarning>) {
    let n = stops.len();
    let mut records = Vec::with_capacity(n);
    let mut warnings = Vec::new();
    let mut remaining_trip_fuel = 0.0;

    for (i, stop) in stops.iter().enumerate().rev() {
        if let Some(leg) = legs.get(i) {
            remaining_trip_fuel += leg.fuel_required;
        }
        let remaining_intermediate_stops = n.saturating_sub(i + 2);

        let breakdown = FuelBreakdown {
            trip_fuel: remaining_trip_fuel,
            contingency_fuel: contingency_fuel(remaining_trip_fuel, policy),
            deck_fuel: deck_fuel(remaining_intermediate_stops, policy),
            taxi_fuel: if i == 0 { policy.taxi_fuel } else { 0.0 },
            reserve_fuel,
        };
        let required_fuel = breakdown.total();
        let actual_fuel = required_fuel.min(aircraft.max_fuel_capacity);

        let capacity_shortfall = if required_fuel > aircraft.max_fuel_capacity {
            let shortfall = required_fuel - aircraft.max_fuel_capacity;
            tracing::warn!(
                stop_id = %stop.id,
                required_fuel,
                max_fuel_capacity = aircraft.max_fuel_capacity,
                "Required fuel exceeds tank capacity"
            );
            warnings.push(PlanWarning::InsufficientFuelCapacity {
                stop_id: stop.id.clone(),
                stop_index: i,
                required_fuel,
                max_fuel_capacity: aircraft.max_fuel_capacity,
                shortfall,
            });
            Some(shortfall)
        } else {
            None
        };

        let (max_passenger_weight, max_passengers) =
            passenger_capacity(actual_fuel, aircraft, policy);

        records.push(StopFuelRecord {
            stop: stop.clone(),
            required_fuel,
            actual_fuel,
            capacity_shortfall,
            max_passenger_weight,
            max_passengers,
            breakdown,
            is_first_stop: i == 0,
            is_last_stop: i + 1 == n,
        });
    }

    records.reverse();
    warnings.reverse();
    (records, warnings)
}
