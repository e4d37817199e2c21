//! Poisson policy: event intensity against a background rate.

use super::{grow_clusters, SecondaryGrid, ELIGIBLE, NOISE};
use crate::grid::FlatGrid;
use crate::stats::poisson_tail;

/// Summary of one retained cluster under the Poisson policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonCluster {
    /// 1-based cluster id.
    pub id: i32,
    /// Event points within radius of the cluster's core.
    pub events: u32,
    /// Events expected in the cluster under the background rate.
    pub expected_events: f64,
    /// Log-likelihood ratio of the observed split.
    pub ll: f64,
}

/// Cluster the event set. `event_counts` and `lambda` are aligned to the
/// event grid's slot order; `lambda[i]` is the expected local event count
/// already scaled by the baseline ratio.
///
/// Returns the label vector (event slots only; background points are
/// tallied but never labeled) and the retained clusters in id order.
pub(crate) fn cluster_poisson(
    events: &FlatGrid,
    background: &FlatGrid,
    event_counts: &[u32],
    lambda: &[f64],
    significance: f64,
    min_core: u32,
    include_border: bool,
) -> (Vec<i32>, Vec<PoissonCluster>) {
    let n = events.len();
    let n_background = background.len();
    debug_assert_eq!(event_counts.len(), n);
    debug_assert_eq!(lambda.len(), n);

    let mut labels: Vec<i32> = (0..n)
        .map(|i| {
            if poisson_tail(event_counts[i], lambda[i]) < significance {
                ELIGIBLE
            } else {
                NOISE
            }
        })
        .collect();

    let mut clusters = Vec::new();
    let mut secondary = SecondaryGrid::new(background, None);

    grow_clusters(
        events,
        &mut labels,
        include_border,
        min_core,
        &mut secondary,
        |cid, stats| {
            // Every core member is tallied as in-cluster.
            debug_assert!(stats.core <= stats.primary_in);
            let total = n as f64;
            let n_in = stats.primary_in as f64;
            let expected = stats.secondary_in as f64 / n_background as f64 * total;

            let mut ll = n_in * (n_in / expected).ln();
            if stats.primary_in < n as u32 {
                ll += (total - n_in) * ((total - n_in) / (total - expected)).ln();
            }

            clusters.push(PoissonCluster {
                id: cid,
                events: stats.primary_in,
                expected_events: expected,
                ll,
            });
        },
    );

    (labels, clusters)
}
