//! Poisson spatial scan: events against a background population.
//!
//! Reads two point files (`x,y` per line), clusters the events where their
//! local intensity is significantly above the background rate, prints the
//! per-cluster summary to stdout and writes one `x,y,clusterId` record per
//! event to the output file.

use clap::Parser;
use spatial_scan::{io::load_points, scan_poisson, PoissonConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "scan_poisson")]
#[command(about = "Detect event clusters against a background point set")]
struct Args {
    /// Background point file
    background: PathBuf,

    /// Event point file
    events: PathBuf,

    /// Output file for labeled event records
    output: PathBuf,

    /// Search radius (also the index cell size)
    #[arg(short, long)]
    radius: f64,

    /// Significance level for the per-point Poisson test
    #[arg(short = 'a', long, default_value_t = 0.05)]
    significance: f64,

    /// Scale factor on the expected background rate
    #[arg(short, long, default_value_t = 1.0)]
    baseline: f64,

    /// Discard clusters with this many core points or fewer
    #[arg(short = 'c', long, default_value_t = 0)]
    min_core: u32,

    /// Include non-core (border) points in clusters
    #[arg(long)]
    border: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let background = load_points(&args.background)?;
    let events = load_points(&args.events)?;

    println!("Number of background points: {}", background.len());
    println!("Number of event points: {}", events.len());
    let bounds = spatial_scan::BoundingBox::from_points(&background)
        .union(spatial_scan::BoundingBox::from_points(&events));
    println!("X Range: {:.6} - {:.6}", bounds.x_min, bounds.x_max);
    println!("Y Range: {:.6} - {:.6}", bounds.y_min, bounds.y_max);
    println!("Search radius: {:.6}", args.radius);

    let config = PoissonConfig {
        radius: args.radius,
        significance: args.significance,
        baseline_ratio: args.baseline,
        min_core: args.min_core,
        include_border: args.border,
    };
    let scan = scan_poisson(&background, &events, &config)?;

    let mut stdout = std::io::stdout().lock();
    scan.write_report(&mut stdout)?;

    let mut out = BufWriter::new(File::create(&args.output)?);
    scan.write_records(&mut out)?;

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
