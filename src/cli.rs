//! CLI argument parsing for the u-crew binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "u-crew", about = "Driver duty construction for timetabled trips")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build duties for an instance file and report bounds
    Solve {
        /// Path to a JSON instance
        instance: PathBuf,
        /// Print the solution as JSON instead of a text report
        #[arg(long)]
        json: bool,
        /// Only schedule the first N trips of the sorted timetable
        #[arg(short, long)]
        trips: Option<usize>,
        /// Fail if the solution needs more duties than this
        #[arg(long)]
        max_duties: Option<usize>,
        /// Fail if driving utilization (0..1) falls below this
        #[arg(long)]
        min_utilization: Option<f64>,
    },
    /// Print a random instance as JSON
    Generate {
        /// Number of trips
        #[arg(short, long, default_value_t = 40)]
        trips: usize,
        /// Number of depots
        #[arg(short, long, default_value_t = 2)]
        depots: usize,
        /// Random seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
    },
}
