//! Significance-tested spatial cluster detection for 2D point patterns.
//!
//! Given one or two labeled point sets over the plane, this crate
//! partitions one set into disjoint clusters whose local statistics
//! deviate from an expected baseline. Three interchangeable policies share
//! one region-growing engine:
//!
//! - **Poisson** ([`scan_poisson`]): event intensity tested against a
//!   background point set's local rate.
//! - **Bernoulli** ([`scan_bernoulli`]): case/control ratio tested against
//!   the overall case probability.
//! - **Density** ([`scan_density`]): a plain neighbor-count threshold
//!   (DBSCAN-style), single population.
//!
//! Points are bucketed into a uniform grid with cell side equal to the
//! search radius, so all neighborhood work touches only 3×3 cell windows.
//!
//! # Example
//!
//! ```
//! use spatial_scan::{scan_density, DensityConfig};
//!
//! // A packed group of five points and one far outlier.
//! let points = vec![
//!     [0.0, 0.0],
//!     [0.2, 0.0],
//!     [0.4, 0.0],
//!     [0.2, 0.2],
//!     [0.0, 0.2],
//!     [5.0, 5.0],
//! ];
//!
//! let config = DensityConfig {
//!     radius: 1.0,
//!     min_pts: 3,
//!     min_core: 1,
//!     include_border: false,
//! };
//! let scan = scan_density(&points, &config).expect("scan should succeed");
//!
//! assert_eq!(scan.num_clusters, 1);
//! assert_eq!(scan.labels.iter().filter(|&&l| l == 1).count(), 5);
//! assert_eq!(scan.labels.iter().filter(|&&l| l == -1).count(), 1);
//! ```
//!
//! Output vectors are aligned to the grid's reordered point order; each
//! scan output carries the reordered coordinates plus the permutation back
//! to the caller's input order.

pub mod grid;
pub mod io;
pub mod stats;
pub mod validation;

mod cluster;
mod error;
mod types;

pub use cluster::{BernoulliCluster, PoissonCluster, NOISE};
pub use error::ScanError;
pub use types::{BoundingBox, Point2, Point2Like};

use grid::{count_within, count_within_other, FlatGrid, GridSpec};
use std::io::Write;

/// Configuration for the Poisson (event vs. background) scan.
#[derive(Debug, Clone)]
pub struct PoissonConfig {
    /// Search radius; also the grid cell side.
    pub radius: f64,
    /// Significance level for the per-point Poisson test.
    pub significance: f64,
    /// Scale factor on the expected background rate.
    pub baseline_ratio: f64,
    /// Clusters with core count <= min_core are discarded.
    pub min_core: u32,
    /// Include non-core (border) points in clusters.
    pub include_border: bool,
}

impl PoissonConfig {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            significance: 0.05,
            baseline_ratio: 1.0,
            min_core: 0,
            include_border: false,
        }
    }
}

/// Configuration for the Bernoulli (case vs. control) scan.
#[derive(Debug, Clone)]
pub struct BernoulliConfig {
    pub radius: f64,
    pub significance: f64,
    pub baseline_ratio: f64,
    pub min_core: u32,
    pub include_border: bool,
}

impl BernoulliConfig {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            significance: 0.05,
            baseline_ratio: 1.0,
            min_core: 0,
            include_border: false,
        }
    }
}

/// Configuration for the density (DBSCAN-style) scan.
#[derive(Debug, Clone)]
pub struct DensityConfig {
    pub radius: f64,
    /// Minimum same-set neighbor count (self included) for a core point.
    pub min_pts: u32,
    pub min_core: u32,
    pub include_border: bool,
}

impl DensityConfig {
    pub fn new(radius: f64, min_pts: u32) -> Self {
        Self {
            radius,
            min_pts,
            min_core: 0,
            include_border: false,
        }
    }
}

/// Output of a Poisson scan. All vectors are aligned to the event grid's
/// reordered point order.
#[derive(Debug, Clone)]
pub struct PoissonScan {
    /// Event coordinates in grid order.
    pub events: Vec<Point2>,
    /// Grid order -> original input index.
    pub source_index: Vec<u32>,
    /// Cluster label per event: -1 noise or a 1-based dense cluster id.
    pub labels: Vec<i32>,
    /// Retained clusters in ascending id order.
    pub clusters: Vec<PoissonCluster>,
}

impl PoissonScan {
    /// Write the per-cluster summary stream: a header line followed by one
    /// line per retained cluster in ascending id order.
    pub fn write_report<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "ClusterID,Events,expEvents,LL")?;
        for c in &self.clusters {
            writeln!(
                w,
                "{},{},{:.6},{:.6}",
                c.id, c.events, c.expected_events, c.ll
            )?;
        }
        Ok(())
    }

    /// Write one `x,y,clusterId` record per event point, in grid order.
    pub fn write_records<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for (p, label) in self.events.iter().zip(&self.labels) {
            writeln!(w, "{:.6},{:.6},{}", p.x, p.y, label)?;
        }
        Ok(())
    }
}

/// Output of a Bernoulli scan. `labels` covers cases then controls.
#[derive(Debug, Clone)]
pub struct BernoulliScan {
    /// Case coordinates in grid order.
    pub cases: Vec<Point2>,
    /// Grid order -> original case input index.
    pub case_index: Vec<u32>,
    /// Control coordinates in grid order.
    pub controls: Vec<Point2>,
    /// Grid order -> original control input index.
    pub control_index: Vec<u32>,
    /// Labels for cases (first `cases.len()` entries) then controls.
    pub labels: Vec<i32>,
    /// Retained clusters in ascending id order.
    pub clusters: Vec<BernoulliCluster>,
    /// Whether border points were included (controls are only emitted by
    /// `write_records` when they were).
    pub border_included: bool,
}

impl BernoulliScan {
    /// Write the per-cluster summary stream.
    pub fn write_report<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        writeln!(w, "ClusterID,nCas,nCon,LL")?;
        for c in &self.clusters {
            writeln!(w, "{},{},{},{:.6}", c.id, c.cases, c.controls, c.ll)?;
        }
        Ok(())
    }

    /// Write one `x,y,caseFlag,clusterId` record per point: all cases, and
    /// the controls only when border inclusion was on.
    pub fn write_records<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for (p, label) in self.cases.iter().zip(&self.labels) {
            writeln!(w, "{:.6},{:.6},1,{}", p.x, p.y, label)?;
        }
        if self.border_included {
            let control_labels = &self.labels[self.cases.len()..];
            for (p, label) in self.controls.iter().zip(control_labels) {
                writeln!(w, "{:.6},{:.6},0,{}", p.x, p.y, label)?;
            }
        }
        Ok(())
    }
}

/// Output of a density scan.
#[derive(Debug, Clone)]
pub struct DensityScan {
    /// Coordinates in grid order.
    pub points: Vec<Point2>,
    /// Grid order -> original input index.
    pub source_index: Vec<u32>,
    /// Cluster label per point.
    pub labels: Vec<i32>,
    /// Final (dense) cluster count.
    pub num_clusters: i32,
}

impl DensityScan {
    /// Write one `x,y,clusterId` record per point, in grid order.
    pub fn write_records<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for (p, label) in self.points.iter().zip(&self.labels) {
            writeln!(w, "{:.6},{:.6},{}", p.x, p.y, label)?;
        }
        Ok(())
    }
}

fn check_significance(significance: f64) -> Result<(), ScanError> {
    if !(significance > 0.0 && significance < 1.0) {
        return Err(ScanError::InvalidSignificance(significance));
    }
    Ok(())
}

fn check_baseline(baseline_ratio: f64) -> Result<(), ScanError> {
    if !(baseline_ratio > 0.0) || !baseline_ratio.is_finite() {
        return Err(ScanError::InvalidBaseline(baseline_ratio));
    }
    Ok(())
}

fn check_nonempty<P>(points: &[P], which: &'static str) -> Result<(), ScanError> {
    if points.is_empty() {
        return Err(ScanError::EmptyPointSet(which));
    }
    Ok(())
}

/// Run a Poisson scan: cluster `events` where their local intensity
/// exceeds the rate implied by `background`.
pub fn scan_poisson<P: Point2Like>(
    background: &[P],
    events: &[P],
    config: &PoissonConfig,
) -> Result<PoissonScan, ScanError> {
    check_nonempty(background, "background")?;
    check_nonempty(events, "events")?;
    check_significance(config.significance)?;
    check_baseline(config.baseline_ratio)?;

    let bounds = BoundingBox::from_points(background).union(BoundingBox::from_points(events));
    let spec = GridSpec::new(bounds, config.radius)?;
    let bg = FlatGrid::build(&spec, background);
    let ev = FlatGrid::build(&spec, events);

    let event_counts = count_within(&ev);
    let background_counts = count_within_other(&ev, &bg);

    // Expected local event count under the background rate.
    let scale = events.len() as f64 * config.baseline_ratio / background.len() as f64;
    let lambda: Vec<f64> = background_counts.iter().map(|&c| c as f64 * scale).collect();

    let (labels, clusters) = cluster::poisson::cluster_poisson(
        &ev,
        &bg,
        &event_counts,
        &lambda,
        config.significance,
        config.min_core,
        config.include_border,
    );

    Ok(PoissonScan {
        events: ev.points_vec(),
        source_index: ev.point_order().to_vec(),
        labels,
        clusters,
    })
}

/// Run a Bernoulli scan: cluster `cases` where the local case/control
/// ratio exceeds the overall case probability.
pub fn scan_bernoulli<P: Point2Like>(
    cases: &[P],
    controls: &[P],
    config: &BernoulliConfig,
) -> Result<BernoulliScan, ScanError> {
    check_nonempty(cases, "cases")?;
    check_nonempty(controls, "controls")?;
    check_significance(config.significance)?;
    check_baseline(config.baseline_ratio)?;

    let bounds = BoundingBox::from_points(cases).union(BoundingBox::from_points(controls));
    let spec = GridSpec::new(bounds, config.radius)?;
    let gcas = FlatGrid::build(&spec, cases);
    let gcon = FlatGrid::build(&spec, controls);

    let case_counts = count_within(&gcas);
    let control_counts = count_within_other(&gcas, &gcon);

    let p = config.baseline_ratio * cases.len() as f64 / (cases.len() + controls.len()) as f64;

    let (labels, clusters) = cluster::bernoulli::cluster_bernoulli(
        &gcas,
        &gcon,
        &case_counts,
        &control_counts,
        p,
        config.significance,
        config.min_core,
        config.include_border,
    );

    Ok(BernoulliScan {
        cases: gcas.points_vec(),
        case_index: gcas.point_order().to_vec(),
        controls: gcon.points_vec(),
        control_index: gcon.point_order().to_vec(),
        labels,
        clusters,
        border_included: config.include_border,
    })
}

/// Run a density scan: cluster `points` where the local neighbor count
/// reaches `min_pts`.
pub fn scan_density<P: Point2Like>(
    points: &[P],
    config: &DensityConfig,
) -> Result<DensityScan, ScanError> {
    check_nonempty(points, "points")?;

    let bounds = BoundingBox::from_points(points);
    let spec = GridSpec::new(bounds, config.radius)?;
    let grid = FlatGrid::build(&spec, points);

    let counts = count_within(&grid);
    let (labels, num_clusters) = cluster::density::cluster_density(
        &grid,
        &counts,
        config.min_pts,
        config.min_core,
        config.include_border,
    );

    Ok(DensityScan {
        points: grid.points_vec(),
        source_index: grid.point_order().to_vec(),
        labels,
        num_clusters,
    })
}
