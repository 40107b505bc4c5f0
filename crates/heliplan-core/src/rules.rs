//! Engine constants for the planning calculations.
//!
//! These are physical and numerical limits of the engine itself. Operator fuel
//! policy never lives here and never has defaults.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration for the planning calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningRules {
    /// Lowest ground speed used for time/fuel, knots. Keeps strong headwinds
    /// from producing near-zero or negative speeds.
    pub min_ground_speed_kt: f64,
}

impl Default for PlanningRules {
    fn default() -> Self {
        Self {
            min_ground_speed_kt: 10.0,
        }
    }
}

impl PlanningRules {
    pub fn validate(&self) -> Result<(), EngineError> {
        let floor = self.min_ground_speed_kt;
        if !floor.is_finite() || floor <= 0.0 {
            return Err(EngineError::InvalidPlanningRule {
                field: "min_ground_speed_kt",
                value: floor,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_valid() {
        assert_eq!(PlanningRules::default().validate(), Ok(()));
    }

    #[test]
    fn ground_speed_floor_must_be_positive_and_finite() {
        for floor in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let rules = PlanningRules {
                min_ground_speed_kt: floor,
            };
            assert!(matches!(
                rules.validate(),
                Err(EngineError::InvalidPlanningRule {
                    field: "min_ground_speed_kt",
                    ..
                })
            ));
        }
    }
}
