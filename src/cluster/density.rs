//! Density policy: plain DBSCAN-style threshold, single population.

use super::{grow_clusters, NoSecondary, ELIGIBLE, NOISE};
use crate::grid::FlatGrid;

/// Cluster a single point set by local density.
///
/// A point is core-eligible when its same-set neighbor count (self
/// included) reaches `min_pts`. Returns the label vector and the final
/// cluster count; this policy reports no per-cluster statistics.
pub(crate) fn cluster_density(
    points: &FlatGrid,
    counts: &[u32],
    min_pts: u32,
    min_core: u32,
    include_border: bool,
) -> (Vec<i32>, i32) {
    debug_assert_eq!(counts.len(), points.len());

    let mut labels: Vec<i32> = counts
        .iter()
        .map(|&c| if c >= min_pts { ELIGIBLE } else { NOISE })
        .collect();

    let num_clusters = grow_clusters(
        points,
        &mut labels,
        include_border,
        min_core,
        &mut NoSecondary,
        |_, _| {},
    );

    (labels, num_clusters)
}
