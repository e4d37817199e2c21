//! Benchmark the scan pipeline on synthetic data.
//!
//! Run with: cargo run --release --bin bench_scan
//!
//! Usage:
//!   bench_scan                 Default size (100k background, 10k events)
//!   bench_scan -n 1000000      1M background points
//!   bench_scan --hotspots 20   Plant 20 event hotspots
//!
//! Generates a uniform background over a square extent plus events drawn
//! partly from planted hotspots, then times each pipeline phase.

use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use spatial_scan::validation::validate_labels;
use spatial_scan::{scan_poisson, BoundingBox, PoissonConfig};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "bench_scan")]
#[command(about = "Benchmark the Poisson scan at various scales")]
struct Args {
    /// Background point count
    #[arg(short = 'n', long, default_value_t = 100_000)]
    background: usize,

    /// Event point count
    #[arg(short = 'e', long, default_value_t = 10_000)]
    events: usize,

    /// Number of planted event hotspots
    #[arg(long, default_value_t = 5)]
    hotspots: usize,

    /// Fraction of events drawn from hotspots (rest uniform)
    #[arg(long, default_value_t = 0.3)]
    hotspot_fraction: f64,

    /// Square extent side length
    #[arg(long, default_value_t = 1000.0)]
    extent: f64,

    /// Search radius
    #[arg(short, long, default_value_t = 5.0)]
    radius: f64,

    /// Random seed
    #[arg(short, long, default_value_t = 12345)]
    seed: u64,

    /// Number of iterations to run (useful for profiling)
    #[arg(long, default_value_t = 1)]
    repeat: usize,
}

fn uniform_points<R: Rng>(n: usize, extent: f64, rng: &mut R) -> Vec<[f64; 2]> {
    (0..n)
        .map(|_| [rng.gen_range(0.0..extent), rng.gen_range(0.0..extent)])
        .collect()
}

fn event_points<R: Rng>(args: &Args, rng: &mut R) -> Vec<[f64; 2]> {
    let n_hot = ((args.events as f64) * args.hotspot_fraction) as usize;
    let n_uniform = args.events - n_hot;

    let centers: Vec<[f64; 2]> = (0..args.hotspots.max(1))
        .map(|_| {
            [
                rng.gen_range(0.0..args.extent),
                rng.gen_range(0.0..args.extent),
            ]
        })
        .collect();

    let mut points = uniform_points(n_uniform, args.extent, rng);
    for i in 0..n_hot {
        let c = centers[i % centers.len()];
        let dx = rng.gen_range(-args.radius..args.radius);
        let dy = rng.gen_range(-args.radius..args.radius);
        points.push([
            (c[0] + dx).clamp(0.0, args.extent),
            (c[1] + dy).clamp(0.0, args.extent),
        ]);
    }
    points
}

fn format_rate(count: usize, ms: f64) -> String {
    if ms <= 0.0 {
        return "N/A".to_string();
    }
    let per_sec = count as f64 / (ms / 1000.0);
    if per_sec >= 1_000_000.0 {
        format!("{:.2}M/s", per_sec / 1_000_000.0)
    } else if per_sec >= 1_000.0 {
        format!("{:.1}k/s", per_sec / 1000.0)
    } else {
        format!("{:.0}/s", per_sec)
    }
}

fn main() {
    let args = Args::parse();

    println!("spatial-scan Benchmark");
    println!("======================\n");
    println!("Configuration:");
    println!("  background = {}", args.background);
    println!("  events     = {}", args.events);
    println!("  hotspots   = {}", args.hotspots);
    println!("  extent     = {}", args.extent);
    println!("  radius     = {}", args.radius);
    println!("  seed       = {}", args.seed);

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let t_gen = Instant::now();
    let background = uniform_points(args.background, args.extent, &mut rng);
    let events = event_points(&args, &mut rng);
    let gen_ms = t_gen.elapsed().as_secs_f64() * 1000.0;
    println!("\nPoint generation: {:.1}ms", gen_ms);

    let bounds =
        BoundingBox::from_points(&background).union(BoundingBox::from_points(&events));
    println!(
        "Grid: {} x {} cells",
        (bounds.width() / args.radius).ceil(),
        (bounds.height() / args.radius).ceil()
    );

    let config = PoissonConfig {
        radius: args.radius,
        significance: 0.05,
        baseline_ratio: 1.0,
        min_core: 2,
        include_border: true,
    };

    let mut times = Vec::with_capacity(args.repeat);
    let mut last = None;
    for iter in 0..args.repeat.max(1) {
        let t0 = Instant::now();
        let scan = scan_poisson(&background, &events, &config).expect("scan should succeed");
        let ms = t0.elapsed().as_secs_f64() * 1000.0;
        times.push(ms);
        if args.repeat > 1 {
            println!("  Iteration {}/{}: {:.1}ms", iter + 1, args.repeat, ms);
        }
        last = Some(scan);
    }
    let scan = last.unwrap();

    let total = args.background + args.events;
    let avg = times.iter().sum::<f64>() / times.len() as f64;
    println!("\nResults:");
    println!("  Scan time:   {:>8.1}ms (avg)", avg);
    println!("  Throughput:  {:>8}", format_rate(total, avg));
    println!("  Clusters:    {:>8}", scan.clusters.len());
    println!(
        "  Clustered:   {:>8}",
        scan.labels.iter().filter(|&&l| l > 0).count()
    );

    let report = validate_labels(&scan.labels);
    if report.is_clean() {
        println!("  Labels:      clean ({})", report);
    } else {
        eprintln!("WARNING: label validation failed: {}", report);
    }

    println!("\nBenchmark complete.");
}
