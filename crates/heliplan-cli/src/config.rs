//! CLI configuration from environment.

use std::env;

use heliplan_core::PlanningRules;

pub const DEFAULT_LOG_FILTER: &str = "heliplan=info";

#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing` filter directive
    pub log_filter: String,
    pub rules: PlanningRules,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(
            env::var("HELIPLAN_LOG").ok(),
            env::var("HELIPLAN_MIN_GROUND_SPEED_KT").ok(),
        )
    }

    fn from_vars(log_filter: Option<String>, min_ground_speed: Option<String>) -> Self {
        let mut rules = PlanningRules::default();
        if let Some(kt) = min_ground_speed
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|kt| kt.is_finite() && *kt > 0.0)
        {
            rules.min_ground_speed_kt = kt;
        }

        Self {
            log_filter: log_filter.unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            rules,
        }
    }
}
