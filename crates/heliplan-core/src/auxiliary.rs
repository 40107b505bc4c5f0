//! Route-wide auxiliary fuel: taxi, contingency, reserve and deck.

use serde::{Deserialize, Serialize};

use crate::models::FuelPolicy;

/// Auxiliary fuel totals for the whole route, lbs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuxiliaryFuel {
    /// Burned once, at departure
    pub taxi_fuel: f64,
    pub contingency_fuel: f64,
    pub reserve_fuel: f64,
    pub deck_fuel: f64,
    pub total: f64,
}

pub fn contingency_fuel(trip_fuel: f64, policy: &FuelPolicy) -> f64 {
    trip_fuel * policy.contingency_percent / 100.0
}

/// Deck fuel for a number of intermediate landing stops.
pub fn deck_fuel(intermediate_stops: usize, policy: &FuelPolicy) -> f64 {
    intermediate_stops as f64 * policy.deck_fuel_per_stop()
}

/// Compute auxiliary fuel for a route.
///
/// `intermediate_stops` counts landing stops strictly between departure and
/// destination.
pub fn calculate_auxiliary_fuel(
    trip_fuel: f64,
    intermediate_stops: usize,
    policy: &FuelPolicy,
) -> AuxiliaryFuel {
    let taxi_fuel = policy.taxi_fuel;
    let contingency_fuel = contingency_fuel(trip_fuel, policy);
    let reserve_fuel = policy.reserve.fuel_for_trip(trip_fuel);
    let deck_fuel = deck_fuel(intermediate_stops, policy);

    AuxiliaryFuel {
        taxi_fuel,
        contingency_fuel,
        reserve_fuel,
        deck_fuel,
        total: taxi_fuel + contingency_fuel + reserve_fuel + deck_fuel,
    }
}
