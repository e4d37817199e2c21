//! Density (DBSCAN-style) spatial scan over a single point set.
//!
//! Reads one point file (`x,y` per line), clusters points whose neighbor
//! count within the radius reaches the threshold, and writes one
//! `x,y,clusterId` record per point to the output file.

use clap::Parser;
use spatial_scan::{io::load_points, scan_density, DensityConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "scan_density")]
#[command(about = "Cluster a point set by local density")]
struct Args {
    /// Point file
    points: PathBuf,

    /// Output file for labeled point records
    output: PathBuf,

    /// Search radius (also the index cell size)
    #[arg(short, long)]
    radius: f64,

    /// Minimum neighbor count (self included) for a core point
    #[arg(short = 'p', long)]
    min_pts: u32,

    /// Discard clusters with this many core points or fewer
    #[arg(short = 'c', long, default_value_t = 0)]
    min_core: u32,

    /// Include non-core (border) points in clusters
    #[arg(long)]
    border: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let points = load_points(&args.points)?;

    println!("Number of points: {}", points.len());
    let bounds = spatial_scan::BoundingBox::from_points(&points);
    println!("X Range: {:.6} - {:.6}", bounds.x_min, bounds.x_max);
    println!("Y Range: {:.6} - {:.6}", bounds.y_min, bounds.y_max);
    println!("Search radius: {:.6}", args.radius);

    let config = DensityConfig {
        radius: args.radius,
        min_pts: args.min_pts,
        min_core: args.min_core,
        include_border: args.border,
    };
    let scan = scan_density(&points, &config)?;

    println!("Clusters found: {}", scan.num_clusters);

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
