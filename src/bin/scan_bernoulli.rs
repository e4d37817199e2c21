//! Bernoulli spatial scan: cases against controls.
//!
//! Reads two point files (`x,y` per line), clusters the cases where the
//! local case/control ratio is significantly above the overall case
//! probability, prints the per-cluster summary to stdout and writes
//! `x,y,caseFlag,clusterId` records to the output file. Control records
//! are only emitted when border inclusion is on.

use clap::Parser;
use spatial_scan::{io::load_points, scan_bernoulli, BernoulliConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "scan_bernoulli")]
#[command(about = "Detect case clusters against a control point set")]
struct Args {
    /// Case point file
    cases: PathBuf,

    /// Control point file
    controls: PathBuf,

    /// Output file for labeled point records
    output: PathBuf,

    /// Search radius (also the index cell size)
    #[arg(short, long)]
    radius: f64,

    /// Significance level for the per-point Binomial test
    #[arg(short = 'a', long, default_value_t = 0.05)]
    significance: f64,

    /// Scale factor on the baseline case probability
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
    let cases = load_points(&args.cases)?;
    let controls = load_points(&args.controls)?;

    println!("Number of cases: {}", cases.len());
    println!("Number of controls: {}", controls.len());
    let bounds = spatial_scan::BoundingBox::from_points(&cases)
        .union(spatial_scan::BoundingBox::from_points(&controls));
    println!("X Range: {:.6} - {:.6}", bounds.x_min, bounds.x_max);
    println!("Y Range: {:.6} - {:.6}", bounds.y_min, bounds.y_max);
    println!("Search radius: {:.6}", args.radius);

    let config = BernoulliConfig {
        radius: args.radius,
        significance: args.significance,
        baseline_ratio: args.baseline,
        min_core: args.min_core,
        include_border: args.border,
    };
    let scan = scan_bernoulli(&cases, &controls, &config)?;

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
