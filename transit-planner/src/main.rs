use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use transit_planner::network::{
    ConnectivityReport, JsonFileSource, SharedNetwork, TransitGraph,
};
use transit_planner::planner::{Endpoint, Planner, SearchConfig, find_path};

/// Plan trips over a transit network.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the cheapest trip between two stations
    Plan {
        /// Network file in JSON
        network: PathBuf,
        from: String,
        to: String,
        /// Print the trip summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report counts and connectivity problems of a network
    Check {
        /// Network file in JSON
        network: PathBuf,
    },
}

impl Command {
    fn network(&self) -> &PathBuf {
        match self {
            Command::Plan { network, .. } | Command::Check { network } => network,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let path = cli.command.network();
    let network = match SharedNetwork::load(&JsonFileSource::new(path)) {
        Ok(network) => network,
        Err(e) => {
            eprintln!("Failed to load network from {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };
    let graph = network.current();
    let config = SearchConfig::from_env();

    match &cli.command {
        Command::Plan { from, to, json, .. } => plan(&graph, &config, from, to, *json),
        Command::Check { .. } => check(&graph, &config),
    }
}

fn plan(graph: &TransitGraph, config: &SearchConfig, from: &str, to: &str, json: bool) -> ExitCode {
    let trip = match Planner::new(graph, config).plan(from, to) {
        Ok(trip) => trip,
        Err(e) => {
            match e.endpoint() {
                Some(Endpoint::Source) => eprintln!("Start station '{from}' not found."),
                Some(Endpoint::Target) => eprintln!("Destination station '{to}' not found."),
                None => {}
            }
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let summary = trip.summary();

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to serialize trip: {e}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("{} -> {}", summary.from, summary.to);
    println!(
        "  {} km travelled, {} stations, {} transfer(s), about {} min",
        summary.total_distance_km, summary.station_count, summary.transfer_count, summary.travel_time_mins
    );
    for segment in trip.segments() {
        println!(
            "  {}: {} -> {} ({} stops, {:.2} km)",
            segment.line,
            segment.start_station,
            segment.end_station,
            segment.hop_count(),
            segment.distance_km
        );
    }

    ExitCode::SUCCESS
}

fn check(graph: &TransitGraph, config: &SearchConfig) -> ExitCode {
    println!("Stations: {}", graph.station_count());
    println!("Edges:    {}", graph.edge_count());
    println!("Lines:    {}", graph.line_count());

    if graph.is_empty() {
        eprintln!("No stations found in network!");
        return ExitCode::FAILURE;
    }

    let report = ConnectivityReport::analyze(graph);
    let issues = report.issues();
    if issues.is_empty() {
        println!("Graph appears to be properly connected.");
    } else {
        println!("Graph connectivity issues found:");
        for issue in &issues {
            println!("  - {issue}");
        }
    }

    // Smoke-test a route between the first two connected stations
    let connected: Vec<_> = graph
        .stations()
        .filter(|s| graph.neighbors(s).next().is_some())
        .take(2)
        .collect();
    if let [source, target] = connected.as_slice() {
        match find_path(graph, source.as_str(), target.as_str(), config) {
            Ok(result) if result.is_found() => {
                println!("Test route {source} -> {target}: {:.2} km", result.cost)
            }
            Ok(_) => println!("Test route {source} -> {target}: no path"),
            Err(e) => println!("Test route {source} -> {target}: {e}"),
        }
    }

    if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
