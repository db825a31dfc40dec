//! u-crew: builds driver duties for a timetable and reports duty-count bounds.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use u_crew::instance::{generate, GeneratorConfig, Instance};
use u_crew::models::Solution;
use u_crew::scheduler::{peak_vehicle_count, DutyBounds, Insertions, SolutionKpi};
use u_crew::validation::audit;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Solve {
            instance,
            json,
            trips,
            max_duties,
            min_utilization,
        } => solve(
            &instance,
            SolveOptions {
                json,
                trips,
                max_duties,
                min_utilization,
            },
        ),
        Command::Generate {
            trips,
            depots,
            seed,
        } => {
            let config = GeneratorConfig::default()
                .with_trips(trips)
                .with_depots(depots);
            let file = generate(&config, &mut StdRng::seed_from_u64(seed))?;
            println!("{}", serde_json::to_string_pretty(&file)?);
            Ok(())
        }
    }
}

struct SolveOptions {
    json: bool,
    trips: Option<usize>,
    max_duties: Option<usize>,
    min_utilization: Option<f64>,
}

fn solve(path: &std::path::Path, options: SolveOptions) -> Result<()> {
    let mut instance = Instance::from_path(path)
        .with_context(|| format!("failed to load instance {}", path.display()))?;
    if let Some(limit) = options.trips {
        instance.truncate(limit);
    }

    let solution = Insertions::new().solve_instance(&instance);
    let bounds = DutyBounds::new(&instance.trips, &instance.regulations, &solution);

    let violations = audit(&solution, &instance.regulations);
    for v in &violations {
        tracing::warn!(kind = ?v.violation_type, "{}", v.message);
    }

    let kpi = SolutionKpi::calculate(&solution);

    if options.json {
        println!("{}", serde_json::to_string_pretty(&solution)?);
    } else {
        print_report(&instance, &solution, &bounds, &kpi);
    }

    info!(
        duties = solution.duty_count(),
        gap = bounds.gap(),
        violations = violations.len(),
        "solve finished"
    );

    let max_duties = options.max_duties.unwrap_or(usize::MAX);
    let min_utilization = options.min_utilization.unwrap_or(0.0);
    if !kpi.meets_thresholds(max_duties, min_utilization) {
        bail!(
            "solution misses targets: {} duties at {:.1}% utilization",
            kpi.duty_count,
            kpi.driving_utilization * 100.0
        );
    }
    Ok(())
}

fn print_report(instance: &Instance, solution: &Solution, bounds: &DutyBounds, kpi: &SolutionKpi) {
    for duty in &solution.duties {
        println!("{duty}");
    }

    println!();
    println!("LB/UB: ({}, {})", bounds.lower, bounds.upper);
    println!("Peak vehicles: {}", peak_vehicle_count(&instance.trips));
    println!(
        "Driving utilization: {:.1}%  idle: {} min  breaks: {}  rests: {}",
        kpi.driving_utilization * 100.0,
        kpi.idle_time,
        kpi.total_breaks,
        kpi.total_rests
    );
}
