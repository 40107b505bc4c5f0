//! Fuel plan report rendering.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use heliplan_core::{format_duration_hm, FuelPlanResult, RouteCapacity};
use serde::Serialize;

/// Envelope for `--json` output.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub scenario: Option<&'a str>,
    pub result: &'a FuelPlanResult,
}

impl<'a> JsonReport<'a> {
    pub fn new(scenario: Option<&'a str>, result: &'a FuelPlanResult) -> Self {
        Self {
            generated_at: Utc::now(),
            scenario,
            result,
        }
    }
}

/// Render a plain-text stop-by-stop report.
pub fn render_text_report(scenario: Option<&str>, result: &FuelPlanResult) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_report(&mut out, scenario, result);
    out
}

fn write_report(
    out: &mut String,
    scenario: Option<&str>,
    result: &FuelPlanResult,
) -> std::fmt::Result {
    if let Some(name) = scenario {
        writeln!(out, "Fuel plan: {name}")?;
        writeln!(out)?;
    }

    writeln!(out, "LEGS")?;
    for leg in &result.legs {
        writeln!(
            out,
            "  {:>6} -> {:<6} {:>6.1} nm  hdg {:>3.0}  gs {:>5.1} kt  hw {:>+5.1} kt  {:>5}  {:>7.0} lbs",
            leg.departure_id,
            leg.arrival_id,
            leg.distance,
            leg.heading_deg,
            leg.ground_speed,
            leg.headwind_component,
            format_duration_hm(leg.flight_time_hours),
            leg.fuel_required,
        )?;
    }

    let aux = &result.auxiliary_fuel;
    writeln!(out)?;
    writeln!(out, "AUXILIARY FUEL")?;
    writeln!(
        out,
        "  taxi {:>7.0}  contingency {:>7.0}  reserve {:>7.0}  deck {:>7.0}  total {:>7.0}",
        aux.taxi_fuel,
        aux.contingency_fuel,
        aux.reserve_fuel,
        aux.deck_fuel,
        aux.total,
    )?;

    writeln!(out)?;
    writeln!(out, "STOPS")?;
    for record in &result.stop_records {
        let marker = if record.is_last_stop { " (dest)" } else { "" };
        write!(
            out,
            "  {:<20} required {:>7.0}  fuel {:>7.0}  pax {:>2}{}",
            record.stop.name,
            record.required_fuel,
            record.actual_fuel,
            record.max_passengers,
            marker,
        )?;
        if let Some(shortfall) = record.capacity_shortfall {
            write!(out, "  SHORT {shortfall:.0} lbs")?;
        }
        writeln!(out)?;
    }

    let totals = &result.totals;
    writeln!(out)?;
    writeln!(
        out,
        "TOTAL  {:.1} nm  {}  trip {:.0} lbs  total {:.0} lbs",
        totals.distance_nm,
        format_duration_hm(totals.flight_time_hours),
        totals.trip_fuel,
        totals.total_fuel,
    )?;
    match &result.route_max_capacity {
        RouteCapacity::Limited {
            passengers,
            limiting_stop,
        } => writeln!(
            out,
            "ROUTE CAPACITY  {passengers} pax (limited at {})",
            limiting_stop.name
        )?,
        RouteCapacity::Undetermined { reason } => {
            writeln!(out, "ROUTE CAPACITY  undetermined: {reason}")?
        }
    }

    if !result.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "WARNINGS")?;
        for warning in &result.warnings {
            writeln!(out, "  {warning}")?;
        }
    }
    Ok(())
}
