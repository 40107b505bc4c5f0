//! Fingerprint-keyed memoisation of fuel plans.
//!
//! The engine is stateless; this is an optional layer for callers that
//! recompute on every keystroke and want identical inputs to skip the work.

use dashmap::DashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::error::EngineError;
use crate::models::{AircraftData, FuelPolicyData, Waypoint, Weather};
use crate::plan::{compute_fuel_plan_with_rules, FuelPlanResult};
use crate::rules::PlanningRules;

const DEFAULT_MAX_ENTRIES: usize = 64;
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(300);

/// Hash of the complete input set of one planning call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlanFingerprint(u64);

impl PlanFingerprint {
    /// Fingerprint the inputs. Floats are hashed through their exact `Debug`
    /// rendering so `None`, `NaN` and `-0.0` stay distinct.
    pub fn of(
        waypoints: &[Waypoint],
        aircraft: &AircraftData,
        weather: &Weather,
        fuel_policy: &FuelPolicyData,
        rules: &PlanningRules,
    ) -> Self {
        let rendered = format!("{waypoints:?}|{aircraft:?}|{weather:?}|{fuel_policy:?}|{rules:?}");
        let mut hasher = DefaultHasher::new();
        rendered.hash(&mut hasher);
        Self(hasher.finish())
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct MemoEntry {
    result: Result<FuelPlanResult, EngineError>,
    computed_at: Instant,
}

pub struct FuelPlanMemo {
    entries: DashMap<PlanFingerprint, MemoEntry>,
    rules: PlanningRules,
    max_entries: usize,
    max_age: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for FuelPlanMemo {
    fn default() -> Self {
        Self::new(PlanningRules::default())
    }
}

impl FuelPlanMemo {
    pub fn new(rules: PlanningRules) -> Self {
        Self::with_limits(rules, DEFAULT_MAX_ENTRIES, DEFAULT_MAX_AGE)
    }

    pub fn with_limits(rules: PlanningRules, max_entries: usize, max_age: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            rules,
            max_entries: max_entries.max(1),
            max_age,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Return the memoised result for these inputs, computing it on a miss.
    /// Errors are memoised as well as plans.
    pub fn get_or_compute(
        &self,
        waypoints: &[Waypoint],
        aircraft: &AircraftData,
        weather: &Weather,
        fuel_policy: &FuelPolicyData,
    ) -> Result<FuelPlanResult, EngineError> {
        let fingerprint =
            PlanFingerprint::of(waypoints, aircraft, weather, fuel_policy, &self.rules);

        if let Some(entry) = self.entries.get(&fingerprint) {
            if self.is_fresh(&entry) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(fingerprint = fingerprint.value(), "Fuel plan memo hit");
                return entry.result.clone();
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(fingerprint = fingerprint.value(), "Fuel plan memo miss");
        let result =
            compute_fuel_plan_with_rules(waypoints, aircraft, weather, fuel_policy, &self.rules);
        self.entries.insert(
            fingerprint,
            MemoEntry {
                result: result.clone(),
                computed_at: Instant::now(),
            },
        );
        self.prune();
        result
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Lookups answered from the memo.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Lookups that had to run the planner, including stale entries.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    fn is_fresh(&self, entry: &MemoEntry) -> bool {
        entry.computed_at.elapsed() <= self.max_age
    }

    /// Expire stale plans, then evict the oldest survivors past `max_entries`.
    fn prune(&self) {
        self.entries.retain(|_, entry| self.is_fresh(entry));

        let excess = self.entries.len().saturating_sub(self.max_entries);
        if excess == 0 {
            return;
        }

        let mut by_age: Vec<(Instant, PlanFingerprint)> = self
            .entries
            .iter()
            .map(|entry| (entry.computed_at, *entry.key()))
            .collect();
        by_age.sort_unstable_by_key(|(computed_at, _)| *computed_at);
        for (_, fingerprint) in by_age.into_iter().take(excess) {
            self.entries.remove(&fingerprint);
        }
        tracing::debug!(evicted = excess, "Fuel plan memo over capacity");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(lon_b: f64) -> Vec<Waypoint> {
        vec![
            Waypoint::stop("A", "A", 0.0, 0.0),
            Waypoint::stop("B", "B", lon_b, 0.0),
        ]
    }

    fn aircraft() -> AircraftData {
        AircraftData {
            registration: None,
            cruise_speed: Some(120.0),
            fuel_burn_rate: Some(600.0),
            empty_weight: Some(10_000.0),
            max_takeoff_weight: Some(12_000.0),
            max_fuel_capacity: Some(2_000.0),
            max_passengers: Some(12.0),
        }
    }

    fn policy() -> FuelPolicyData {
        FuelPolicyData {
            passenger_weight: Some(200.0),
            taxi_fuel: Some(50.0),
            contingency_percent: Some(10.0),
            reserve_fuel: Some(400.0),
            deck_time_per_stop: Some(5.0),
            deck_fuel_flow: Some(300.0),
            cargo_weight: Some(0.0),
            ..FuelPolicyData::default()
        }
    }

    #[test]
    fn fingerprint_tracks_every_input() {
        let rules = PlanningRules::default();
        let calm = Weather::calm();
        let base = PlanFingerprint::of(&route(1.0), &aircraft(), &calm, &policy(), &rules);
        let same = PlanFingerprint::of(&route(1.0), &aircraft(), &calm, &policy(), &rules);
        assert_eq!(base, same);

        let moved = PlanFingerprint::of(&route(1.1), &aircraft(), &calm, &policy(), &rules);
        assert_ne!(base, moved);

        let windy = Weather::new(5.0, 0.0);
        let windy = PlanFingerprint::of(&route(1.0), &aircraft(), &windy, &policy(), &rules);
        assert_ne!(base, windy);

        let mut no_taxi = policy();
        no_taxi.taxi_fuel = None;
        let missing = PlanFingerprint::of(&route(1.0), &aircraft(), &calm, &no_taxi, &rules);
        assert_ne!(base, missing);
    }

    #[test]
    fn repeated_inputs_reuse_the_entry() {
        let memo = FuelPlanMemo::default();
        let first = memo
            .get_or_compute(&route(1.0), &aircraft(), &Weather::calm(), &policy())
            .unwrap();
        let second = memo
            .get_or_compute(&route(1.0), &aircraft(), &Weather::calm(), &policy())
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(memo.len(), 1);
        assert_eq!((memo.hits(), memo.misses()), (1, 1));

        memo.get_or_compute(&route(2.0), &aircraft(), &Weather::calm(), &policy())
            .unwrap();
        assert_eq!(memo.len(), 2);

        memo.clear();
        assert!(memo.is_empty());
    }

    #[test]
    fn errors_are_memoised() {
        let memo = FuelPlanMemo::default();
        let mut data = aircraft();
        data.cruise_speed = None;
        let err = memo
            .get_or_compute(&route(1.0), &data, &Weather::calm(), &policy())
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingOrInvalidAircraftData { .. }));
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn oldest_entries_are_evicted_past_the_limit() {
        let memo = FuelPlanMemo::with_limits(PlanningRules::default(), 2, Duration::from_secs(60));
        for lon in [1.0, 2.0, 3.0] {
            memo.get_or_compute(&route(lon), &aircraft(), &Weather::calm(), &policy())
                .unwrap();
        }
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn stale_entry_is_recomputed() {
        let memo = FuelPlanMemo::with_limits(PlanningRules::default(), 8, Duration::from_millis(5));
        let first = memo
            .get_or_compute(&route(1.0), &aircraft(), &Weather::calm(), &policy())
            .unwrap();
        std::thread::sleep(Duration::from_millis(25));
        let second = memo
            .get_or_compute(&route(1.0), &aircraft(), &Weather::calm(), &policy())
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(memo.hits(), 0);
        assert_eq!(memo.misses(), 2);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn expired_entries_are_pruned_on_insert() {
        let memo = FuelPlanMemo::with_limits(PlanningRules::default(), 8, Duration::from_millis(5));
        for lon in [1.0, 2.0, 3.0] {
            memo.get_or_compute(&route(lon), &aircraft(), &Weather::calm(), &policy())
                .unwrap();
        }
        std::thread::sleep(Duration::from_millis(25));

        memo.get_or_compute(&route(4.0), &aircraft(), &Weather::calm(), &policy())
            .unwrap();
        assert_eq!(memo.len(), 1);
    }
}
