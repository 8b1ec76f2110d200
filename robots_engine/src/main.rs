//! robots - runs Martian Robots programs from the command line
//!
//! Reads a program from a file or standard input, runs every robot in order and prints
//! one report per robot, e.g. `3 3 N LOST`. The run can optionally be animated in the
//! terminal and recorded as a JSON replay.

use clap::Parser;
use robots_engine::{FailurePolicy, Program, RandomProgramOptions, Result, SimulationConfig};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run Martian Robots programs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program file to run (standard input when omitted)
    input: Option<PathBuf>,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip robots that cannot be placed instead of aborting the run
    #[arg(long)]
    skip_malformed: bool,

    /// Animate the run in the terminal
    #[arg(short, long)]
    draw: bool,

    /// Pause between animation frames in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Write a JSON replay of the run to this file
    #[arg(long)]
    replay: Option<String>,

    /// Generate a random program from this seed instead of reading one
    #[arg(long)]
    random: Option<u64>,

    /// Number of robots in a random program
    #[arg(long, default_value_t = 3)]
    robots: usize,

    /// X boundary of a random program's planet
    #[arg(long, default_value_t = 5)]
    width: u32,

    /// Y boundary of a random program's planet
    #[arg(long, default_value_t = 3)]
    height: u32,

    /// Maximum number of instructions per robot in a random program
    #[arg(long, default_value_t = 20)]
    max_instructions: usize,
}

fn main() {
    // Initialize logging, on stderr so reports can be piped
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("robots=info,robots_engine=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            SimulationConfig::load(path)?
        }
        None => SimulationConfig::default(),
    };

    // Command line flags override the configuration file
    if args.skip_malformed {
        config.failure_policy = FailurePolicy::Skip;
    }
    if args.draw {
        config.render.enabled = true;
    }
    if let Some(delay_ms) = args.delay_ms {
        config.render.frame_delay_ms = delay_ms;
    }
    if args.replay.is_some() {
        config.replay.path = args.replay.clone();
    }

    let program = match args.random {
        Some(seed) => {
            let options = RandomProgramOptions {
                x_boundary: args.width,
                y_boundary: args.height,
                robots: args.robots,
                max_instructions: args.max_instructions,
            };
            let program = Program::random(seed, &options);
            info!(seed, "Generated random program:\n{}", program);
            program
        }
        None => Program::parse(&read_input(args.input.as_deref())?)?,
    };

    let mut simulation = config.simulation(program);
    let reports = simulation.run()?;

    for report in &reports {
        println!("{}", report);
    }
    for skipped in simulation.skipped() {
        eprintln!("skipped robot entry {}: {}", skipped.index, skipped.error);
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut contents = String::new();
            io::stdin().read_to_string(&mut contents)?;
            Ok(contents)
        }
    }
}
