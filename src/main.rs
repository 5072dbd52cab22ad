/*
 * 3D Boid Flocking Simulation
 *
 * Runs a flock either headless (fixed number of steps, stats logged through
 * tracing, final stats printed as JSON) or in the interactive viewer when the
 * crate is built with the `viewer` feature.
 */

use std::path::PathBuf;

use boids3d::{Flock, FlockError, FlockStats, Preset, SimulationParams};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "boids3d", about = "3D boid flocking simulation")]
struct Args {
    /// Built-in parameter set to start from
    #[arg(long, value_enum, default_value_t = Preset::Scene)]
    preset: Preset,

    /// JSON parameter file; fields it leaves out keep the scene defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the population size
    #[arg(long)]
    agents: Option<usize>,

    /// Seed for the initial flock (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Run without a window
    #[arg(long)]
    headless: bool,

    /// Steps to run in headless mode
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Log flock statistics every N steps in headless mode (0 = never)
    #[arg(long, default_value_t = 60)]
    log_every: u64,

    /// Scan neighbors on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Use the spatial grid broad-phase
    #[arg(long)]
    grid: bool,
}

fn main() -> Result<(), FlockError> {
    init_tracing();
    let args = Args::parse();

    let params = resolve_params(&args)?;
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(agents = params.num_agents, seed, preset = ?args.preset, "resolved simulation parameters");

    if args.headless {
        run_headless(&params, seed, args.frames, args.log_every)
    } else {
        run_viewer(params, seed)
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("boids3d=info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn resolve_params(args: &Args) -> Result<SimulationParams, FlockError> {
    let mut params = match &args.config {
        Some(path) => SimulationParams::from_json_file(path)?,
        None => args.preset.params(),
    };

    if let Some(agents) = args.agents {
        params.num_agents = agents;
    }
    params.enable_parallel |= args.parallel;
    params.enable_spatial_grid |= args.grid;

    params.validate()?;
    Ok(params)
}

fn run_headless(params: &SimulationParams, seed: u64, frames: u64, log_every: u64) -> Result<(), FlockError> {
    let mut flock = Flock::seeded(params.num_agents, params, seed);

    for _ in 0..frames {
        flock.advance(params);

        if log_every > 0 && flock.frame() % log_every == 0 {
            let stats = FlockStats::measure(&flock, params);
            info!(
                frame = stats.frame,
                mean_speed = stats.mean_speed,
                max_speed = stats.max_speed,
                mean_neighbors = stats.mean_neighbors,
                out_of_bounds = stats.out_of_bounds,
                "flock stats"
            );
        }
    }

    let stats = FlockStats::measure(&flock, params);
    println!("{}", serde_json::to_string(&stats)?);
    Ok(())
}

#[cfg(feature = "viewer")]
fn run_viewer(params: SimulationParams, seed: u64) -> Result<(), FlockError> {
    boids3d::app::run(boids3d::app::LaunchConfig { params, seed });
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn run_viewer(_params: SimulationParams, _seed: u64) -> Result<(), FlockError> {
    Err(FlockError::ViewerUnavailable)
}
