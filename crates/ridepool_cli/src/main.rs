use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ridepool_core::dispatch::dispatch_all;
use ridepool_io::config::ScenarioConfig;
use ridepool_io::demand::{generate_synthetic_requests, DemandProfile, StationProbability};
use ridepool_io::export::{build_summary, write_requests_csv, write_schedule_csv, write_summary_json};
use ridepool_io::stations::StationIndex;
use ridepool_io::tables::{load_request_rows, load_station_graph, load_vehicles, request_id_of};

/// Run a ride-pooling dispatch scenario from a configuration file.
#[derive(Debug, Parser)]
#[command(name = "ridepool", about = "Online insertion-based ride-pooling dispatch simulator")]
struct Cli {
    /// Path to the scenario TOML configuration file.
    config: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ridepool: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config_path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = ScenarioConfig::from_path(config_path)?;
    let mut index = StationIndex::default();

    let graph = load_station_graph(&config.files.distance_path, &config.files.waytime_path, &mut index)?;
    index_is_complete(&graph, &index)?;

    let mut vehicles = load_vehicles(&config.files.vehicles_path)?;
    let weights = config.dispatch_weights();

    let (requests, request_rows) = if config.basic.requests_from_csv {
        let requests_path = config
            .files
            .requests_path
            .as_ref()
            .ok_or("requests_from_csv is set but files.requests_path is missing")?;
        let rows = load_request_rows(requests_path)?;
        // `row.start_time`/`row.time` are minutes since `basic.start_date`, the
        // same clock `demand.rs` uses for synthetic requests; a replayed
        // request whose promised pickup falls outside the scenario window is
        // dropped, matching `simulation.py::from_csv`'s start_date/end_date filter.
        let window_minutes = (config.basic.end_date - config.basic.start_date).num_minutes();
        let requests = rows
            .iter()
            .filter_map(|row| {
                if row.start_time < 0 || row.start_time > window_minutes {
                    eprintln!(
                        "ridepool: dropping request {}: promised_time outside [start_date, end_date]",
                        row.id
                    );
                    return None;
                }
                let origin = index.get(&row.start_id)?;
                let destination = index.get(&row.destination_id)?;
                let request = ridepool_core::request::Request::new(
                    request_id_of(row),
                    origin,
                    destination,
                    row.passangers,
                    row.start_time,
                    row.time,
                    weights.delay_max,
                    &graph,
                );
                if let Err(ref err) = request {
                    eprintln!("ridepool: dropping request {}: {err}", row.id);
                }
                request.ok()
            })
            .collect::<Vec<_>>();
        (requests, rows)
    } else {
        let order_behaviour = config
            .order_behaviour
            .as_ref()
            .ok_or("requests_from_csv is false but [order_behaviour] is missing")?;
        let demand_path = config
            .files
            .demand_path
            .as_ref()
            .ok_or("synthetic demand selected but files.demand_path is missing")?;
        let station_probability_path = config
            .files
            .station_probability_path
            .as_ref()
            .ok_or("synthetic demand selected but files.station_probability_path is missing")?;

        let demand = DemandProfile::load(demand_path)?;
        let station_probability = StationProbability::load(station_probability_path, &mut index)?;
        let mut rng = rand::thread_rng();
        let requests = generate_synthetic_requests(
            config.basic.start_date,
            config.basic.end_date,
            order_behaviour,
            weights.delay_max,
            &demand,
            &station_probability,
            &graph,
            &mut rng,
        )?;
        (requests, Vec::new())
    };

    let total = requests.len();
    let outcome = dispatch_all(
        &mut vehicles,
        &requests,
        &graph,
        &weights,
        Some(&mut |done, total| {
            if total > 0 && done % (total / 10).max(1) == 0 {
                println!("progress: {}%", done * 100 / total.max(1));
            }
        }),
    );

    std::fs::create_dir_all(&config.outputs.output_dir)?;
    write_schedule_csv(
        &config.outputs.output_dir.join("schedule.csv"),
        &vehicles,
        &graph,
        &index,
        &weights,
    )?;

    if !request_rows.is_empty() {
        let denied_ids: std::collections::HashSet<_> = outcome.denied.iter().map(|id| id.0).collect();
        let (denied_rows, served_rows): (Vec<_>, Vec<_>) =
            request_rows.into_iter().partition(|row| denied_ids.contains(&row.id));
        write_requests_csv(&config.outputs.output_dir.join("requests.csv"), &served_rows)?;
        write_requests_csv(
            &config.outputs.output_dir.join("requests_denied.csv"),
            &denied_rows,
        )?;
    }

    let summary = build_summary(&vehicles, &graph);
    write_summary_json(&config.outputs.output_dir.join("summary.json"), &summary)?;

    println!(
        "dispatched {} requests, {} denied",
        total,
        outcome.denied.len()
    );
    Ok(())
}

fn index_is_complete(
    graph: &ridepool_core::graph::StationGraph,
    index: &StationIndex,
) -> Result<(), Box<dyn std::error::Error>> {
    graph.validate_complete(&index.ids())?;
    Ok(())
}
