//! Strait Highways
//!
//! Places shipping highway waypoints between ports around an island, running
//! the optimizer on a background thread and polling it the way an interactive
//! front end would.
//!
//! ```text
//! cargo run -p strait-highways --release
//! cargo run -p strait-highways --release -- --scenario demos/strait-highways/scenarios/strait.json
//! RUST_LOG=route_optimize=debug cargo run -p strait-highways
//! ```

mod scenario;

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use route_optimize::spawn_optimizer;
use route_types::OptimizationResult;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

/// Highway placement demo
#[derive(Parser)]
#[command(name = "strait-highways")]
#[command(about = "Place shipping highways between ports", long_about = None)]
struct Cli {
    /// JSON scenario to load instead of the built-in strait
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of swarm iterations
    #[arg(long)]
    iterations: Option<usize>,

    /// Score particles on all cores
    #[arg(long)]
    parallel: bool,

    /// Print the built-in scenario as JSON and exit
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::strait(),
    };
    if cli.dump {
        println!("{}", serde_json::to_string_pretty(&scenario)?);
        return Ok(());
    }

    let mut swarm = scenario.config.swarm().clone().with_parallel(cli.parallel);
    if let Some(seed) = cli.seed {
        swarm = swarm.with_seed(seed);
    }
    if let Some(iterations) = cli.iterations {
        swarm = swarm.with_iterations(iterations);
    }
    let config = scenario.config.clone().with_swarm(swarm);
    let problem = scenario.problem();

    println!("=== CortenForge Demo: Strait Highways ===");
    println!();
    println!(
        "{} ports, {} demands, {} islands",
        problem.anchor_count(),
        problem.demands().len(),
        problem.obstacles().len()
    );
    println!();

    let start = Instant::now();
    let mut handle = spawn_optimizer(problem, config).context("invalid scenario")?;
    let result = loop {
        if let Some(result) = handle.try_result() {
            break result;
        }
        // Stand-in for a frame of UI work
        thread::sleep(Duration::from_millis(50));
    };
    let result = result.context("highway optimization failed")?;
    info!(
        elapsed_ms = start.elapsed().as_millis(),
        "optimizer finished"
    );

    report(&scenario, &result);
    Ok(())
}

fn report(scenario: &Scenario, result: &OptimizationResult) {
    println!("{result}");
    println!();

    println!("Waypoints:");
    for (i, w) in result.waypoints.iter().enumerate() {
        println!("  W{i}: ({:.1}, {:.1})", w.x, w.y);
    }
    println!();

    println!("Visible edges: {}", result.edges.len());
    println!();

    println!("Routes:");
    for route in &result.demand_routes {
        let demand = route.demand;
        let label = format!(
            "{} -> {} (x{})",
            scenario.port_name(demand.origin()),
            scenario.port_name(demand.destination()),
            demand.weight()
        );
        match route.cost {
            Some(cost) => println!(
                "  {label}: cost {cost:.1}, {} stops, {} highway legs",
                route.points.len(),
                route.highway_edges
            ),
            None => println!("  {label}: unreachable"),
        }
    }
}
