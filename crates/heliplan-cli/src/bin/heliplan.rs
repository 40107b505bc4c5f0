//! Compute a fuel and passenger-capacity plan for a scenario file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use heliplan_cli::{render_text_report, Config, JsonReport, Scenario};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario JSON file (waypoints, aircraft, weather, fuel_policy)
    #[arg(long, short)]
    input: PathBuf,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,

    /// Ground speed floor in knots (overrides HELIPLAN_MIN_GROUND_SPEED_KT)
    #[arg(long)]
    min_ground_speed: Option<f64>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .init();

    if let Some(kt) = args.min_ground_speed {
        anyhow::ensure!(kt.is_finite() && kt > 0.0, "--min-ground-speed must be positive");
        config.rules.min_ground_speed_kt = kt;
    }

    let scenario = Scenario::load(&args.input)?;
    tracing::info!(
        input = %args.input.display(),
        points = scenario.waypoints.len(),
        "Planning scenario"
    );

    let result = match scenario.plan(&config.rules) {
        Ok(result) => result,
        Err(err) => {
            tracing::error!("Fuel plan failed: {}", err);
            eprintln!("error: {err}");
            return Ok(ExitCode::from(2));
        }
    };

    if args.json {
        let report = JsonReport::new(scenario.name.as_deref(), &result);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text_report(scenario.name.as_deref(), &result));
    }

    Ok(if result.has_capacity_shortfall() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
