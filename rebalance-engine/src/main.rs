use std::error::Error;
use std::process::ExitCode;

use rebalance_engine::instance::Instance;
use rebalance_engine::planner::Planner;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(path: &str) -> Result<(), Box<dyn Error>> {
    let instance = Instance::load(path)?;
    let config = instance.params.planner_config()?;
    let mut stations = instance.stations()?;

    let plan = Planner::new(config).plan(&mut stations, &instance.travel_times)?;

    for cluster in &plan.clusters {
        info!(
            cluster = cluster.slot + 1,
            medoid = ?cluster.medoid,
            members = cluster.summary.members(),
            surplus = cluster.summary.surplus,
            deficit = cluster.summary.deficit,
            balanced = cluster.summary.balanced,
            imbalance = cluster.summary.total_abs_difference,
            average_bcrf = cluster.summary.average_bcrf,
            tuples = cluster.evaluation.tuples.len(),
            delta_udf = cluster.evaluation.delta_udf,
            "cluster"
        );
    }
    info!(
        total_delta_udf = plan.total_delta_udf,
        units_moved = plan.units_moved(),
        "rebalancing plan"
    );

    let rows = plan.export_rows(&stations);
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn main() -> ExitCode {
    enable_tracing();

    let mut args = std::env::args().skip(1);
    let (Some(path), None) = (args.next(), args.next()) else {
        eprintln!("usage: rebalance <instance.json>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "planning failed");
            ExitCode::FAILURE
        }
    }
}
