//! Bernoulli policy: case/control ratio.

use super::{grow_clusters, SecondaryGrid, ELIGIBLE, NOISE};
use crate::grid::FlatGrid;
use crate::stats::binomial_tail;

/// Summary of one retained cluster under the Bernoulli policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliCluster {
    /// 1-based cluster id.
    pub id: i32,
    /// Case points within radius of the cluster's core.
    pub cases: u32,
    /// Control points within radius of the cluster's core.
    pub controls: u32,
    /// Log-likelihood ratio of the observed case/control split.
    pub ll: f64,
}

/// Cluster the case set against the control set.
///
/// `case_counts` and `control_counts` are aligned to the case grid's slot
/// order; `p` is the baseline case probability. Returns the label vector
/// covering cases then controls (`cases.len() + controls.len()` entries)
/// and the retained clusters in id order.
///
/// Controls never seed or expand clusters. When border inclusion is on, an
/// in-radius control adopts the cluster id set-once (its label is only
/// written while `< 1`), so it keeps the first retained cluster that
/// reaches it. Controls never reached by any retained cluster end at noise.
pub(crate) fn cluster_bernoulli(
    cases: &FlatGrid,
    controls: &FlatGrid,
    case_counts: &[u32],
    control_counts: &[u32],
    p: f64,
    significance: f64,
    min_core: u32,
    include_border: bool,
) -> (Vec<i32>, Vec<BernoulliCluster>) {
    let n_cases = cases.len();
    let n_controls = controls.len();
    debug_assert_eq!(case_counts.len(), n_cases);
    debug_assert_eq!(control_counts.len(), n_cases);

    let mut labels: Vec<i32> = Vec::with_capacity(n_cases + n_controls);
    for i in 0..n_cases {
        if binomial_tail(case_counts[i], control_counts[i], p) < significance {
            labels.push(ELIGIBLE);
        } else {
            labels.push(NOISE);
        }
    }
    // Control labels start at the unassigned sentinel and are normalized
    // below; only SecondaryGrid writes them during growth.
    labels.resize(n_cases + n_controls, ELIGIBLE);

    let mut clusters = Vec::new();
    let mut secondary = SecondaryGrid::new(controls, Some(n_cases));

    grow_clusters(
        cases,
        &mut labels,
        include_border,
        min_core,
        &mut secondary,
        |cid, stats| {
            // Every core member is tallied as in-cluster.
            debug_assert!(stats.core <= stats.primary_in);
            let total = (n_cases + n_controls) as f64;
            let cases_in = stats.primary_in as f64;
            let controls_in = stats.secondary_in as f64;
            let total_in = cases_in + controls_in;

            let mut ll = cases_in * (cases_in / total_in).ln();
            if stats.secondary_in > 0 {
                ll += controls_in * (controls_in / total_in).ln();
            }
            if n_cases as u32 > stats.primary_in {
                let cases_out = n_cases as f64 - cases_in;
                ll += cases_out * (cases_out / (total - total_in)).ln();
            }
            if n_controls as u32 > stats.secondary_in {
                let controls_out = n_controls as f64 - controls_in;
                ll += controls_out * (controls_out / (total - total_in)).ln();
            }

            clusters.push(BernoulliCluster {
                id: cid,
                cases: stats.primary_in,
                controls: stats.secondary_in,
                ll,
            });
        },
    );

    // Controls never claimed by a retained cluster become noise.
    for label in &mut labels[n_cases..] {
        if *label == ELIGIBLE {
            *label = NOISE;
        }
    }

    (labels, clusters)
}
