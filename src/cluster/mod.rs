//! Region-growing cluster engine.
//!
//! The three policies (Poisson, Bernoulli, density) share one flood-fill
//! skeleton. A policy decides per-point seed eligibility up front by
//! initializing the label vector, and plugs in a [`SecondaryScan`] strategy
//! for the population that is tallied but never drives expansion.
//!
//! Label values: `0` eligible but unvisited, `-1` noise (or pruned), `> 0`
//! a 1-based cluster id. Ids are dense: a pruned cluster releases its id to
//! the next cluster.

pub(crate) mod bernoulli;
pub(crate) mod density;
pub(crate) mod poisson;

pub use bernoulli::BernoulliCluster;
pub use poisson::PoissonCluster;

use crate::grid::FlatGrid;
use crate::types::Point2;

/// Label for points outside every retained cluster.
pub const NOISE: i32 = -1;
/// Initial label for seed-eligible points.
pub(crate) const ELIGIBLE: i32 = 0;

/// Per-cluster totals handed to the policy when a cluster is retained.
pub(crate) struct GrowthStats {
    /// Points that met the eligibility predicate and expanded the frontier.
    pub core: u32,
    /// Primary-population points within radius of any core member,
    /// counted once per cluster (includes border-ineligible points even
    /// when border inclusion is off).
    pub primary_in: u32,
    /// Secondary-population points within radius of any core member.
    pub secondary_in: u32,
}

/// Strategy for the secondary population of a scan.
///
/// Called once per popped frontier point; implementations tally their own
/// points within radius of the frontier point, deduplicated per cluster.
pub(crate) trait SecondaryScan {
    fn begin(&mut self, cid: i32);
    fn scan(&mut self, labels: &mut [i32], cid: i32, center: Point2, include_border: bool);
    fn in_cluster(&self) -> u32;
}

/// Single-population policies (density) have nothing to tally.
pub(crate) struct NoSecondary;

impl SecondaryScan for NoSecondary {
    fn begin(&mut self, _cid: i32) {}
    fn scan(&mut self, _labels: &mut [i32], _cid: i32, _center: Point2, _include_border: bool) {}
    fn in_cluster(&self) -> u32 {
        0
    }
}

/// Secondary population held in its own grid (background or controls).
///
/// A stamp array marks slots already tallied for the active cluster, so
/// overlapping 3×3 windows of adjacent frontier points never double count.
/// When `label_base` is set (Bernoulli controls), an in-radius slot is also
/// labeled — set-once: only labels `< 1` are overwritten, so a control
/// keeps its first retained cluster. Pruning resets released labels to
/// noise, which re-opens them for later clusters.
pub(crate) struct SecondaryGrid<'a> {
    grid: &'a FlatGrid,
    stamp: Vec<i32>,
    tally: u32,
    label_base: Option<usize>,
}

impl<'a> SecondaryGrid<'a> {
    pub fn new(grid: &'a FlatGrid, label_base: Option<usize>) -> Self {
        Self {
            grid,
            stamp: vec![NOISE; grid.len()],
            tally: 0,
            label_base,
        }
    }
}

impl SecondaryScan for SecondaryGrid<'_> {
    fn begin(&mut self, _cid: i32) {
        self.tally = 0;
    }

    fn scan(&mut self, labels: &mut [i32], cid: i32, center: Point2, include_border: bool) {
        let r = self.grid.spec().radius;
        let r2 = r * r;
        let window = self.grid.window_at(center);

        for wrow in window.row_min..=window.row_max {
            let (start, end) = self.grid.row_run(wrow, window.col_min, window.col_max);
            for slot in start..end {
                if self.stamp[slot] == cid {
                    continue;
                }
                if self.grid.point(slot).distance_squared(center) <= r2 {
                    if let Some(base) = self.label_base {
                        if include_border && labels[base + slot] < 1 {
                            labels[base + slot] = cid;
                        }
                    }
                    self.stamp[slot] = cid;
                    self.tally += 1;
                }
            }
        }
    }

    fn in_cluster(&self) -> u32 {
        self.tally
    }
}

/// Flood-fill over the primary grid.
///
/// `labels` must be pre-initialized by the policy: `ELIGIBLE`/`NOISE` for
/// the first `primary.len()` entries; any trailing entries belong to the
/// secondary population and are only touched through `secondary` and
/// pruning. Returns the final (dense) cluster count.
///
/// Iterates slots in grid order; each unvisited eligible slot opens a
/// cluster and expands it depth-first. An eligible in-radius neighbor
/// becomes core (labeled and pushed); an ineligible one becomes border
/// (labeled, not pushed) only when `include_border` is set. After the
/// frontier empties, a cluster with core count `<= min_core` is erased and
/// its id reused. `on_retained` runs for every surviving cluster, in id
/// order.
pub(crate) fn grow_clusters<S: SecondaryScan>(
    primary: &FlatGrid,
    labels: &mut [i32],
    include_border: bool,
    min_core: u32,
    secondary: &mut S,
    mut on_retained: impl FnMut(i32, &GrowthStats),
) -> i32 {
    let n = primary.len();
    debug_assert!(labels.len() >= n);
    let r = primary.spec().radius;
    let r2 = r * r;

    // Scratch owned by this run; nothing persists across calls.
    let mut stack: Vec<u32> = Vec::new();
    let mut stamp: Vec<i32> = vec![NOISE; n];
    let mut cid = 0i32;

    for seed in 0..n {
        if labels[seed] != ELIGIBLE {
            continue;
        }
        cid += 1;
        labels[seed] = cid;
        stack.clear();
        stack.push(seed as u32);

        let mut core = 1u32;
        stamp[seed] = cid;
        let mut primary_in = 1u32;
        secondary.begin(cid);

        while let Some(slot) = stack.pop() {
            let center = primary.point(slot as usize);
            let window = primary.window_of_slot(slot as usize);

            for wrow in window.row_min..=window.row_max {
                let (start, end) = primary.row_run(wrow, window.col_min, window.col_max);
                for nb in start..end {
                    if stamp[nb] == cid {
                        continue;
                    }
                    if primary.point(nb).distance_squared(center) <= r2 {
                        match labels[nb] {
                            ELIGIBLE => {
                                labels[nb] = cid;
                                stack.push(nb as u32);
                                core += 1;
                            }
                            NOISE if include_border => labels[nb] = cid,
                            _ => {}
                        }
                        stamp[nb] = cid;
                        primary_in += 1;
                    }
                }
            }

            secondary.scan(labels, cid, center, include_border);
        }

        if core <= min_core {
            // Erase the cluster across both populations and release its id.
            for label in labels.iter_mut() {
                if *label == cid {
                    *label = NOISE;
                }
            }
            cid -= 1;
        } else {
            on_retained(
                cid,
                &GrowthStats {
                    core,
                    primary_in,
                    secondary_in: secondary.in_cluster(),
                },
            );
        }
    }

    cid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridSpec;
    use crate::types::BoundingBox;

    fn grid_of(points: &[[f64; 2]], radius: f64) -> FlatGrid {
        let bounds = BoundingBox::from_points(points);
        let spec = GridSpec::new(bounds, radius).unwrap();
        FlatGrid::build(&spec, points)
    }

    #[test]
    fn test_single_cluster_grows_through_chain() {
        // A chain of points each within radius of the next.
        let points: Vec<[f64; 2]> = (0..5).map(|i| [i as f64 * 0.9, 0.0]).collect();
        let grid = grid_of(&points, 1.0);
        let mut labels = vec![ELIGIBLE; grid.len()];

        let count = grow_clusters(&grid, &mut labels, false, 0, &mut NoSecondary, |_, _| {});
        assert_eq!(count, 1);
        assert!(labels.iter().all(|&l| l == 1));
    }

    #[test]
    fn test_two_separated_clusters() {
        let mut points: Vec<[f64; 2]> = (0..4).map(|i| [i as f64 * 0.5, 0.0]).collect();
        points.extend((0..4).map(|i| [10.0 + i as f64 * 0.5, 0.0]));
        let grid = grid_of(&points, 1.0);
        let mut labels = vec![ELIGIBLE; grid.len()];

        let count = grow_clusters(&grid, &mut labels, false, 0, &mut NoSecondary, |_, _| {});
        assert_eq!(count, 2);
        assert!(labels.iter().all(|&l| l == 1 || l == 2));
    }

    #[test]
    fn test_border_point_joins_without_expanding() {
        // Eligible pair at x = 0, 0.5; ineligible point at 1.2 is within
        // radius of the second, and another eligible point at 2.0 is within
        // radius of the ineligible one only.
        let points: Vec<[f64; 2]> = vec![[0.0, 0.0], [0.5, 0.0], [1.2, 0.0], [2.0, 0.0]];
        let grid = grid_of(&points, 1.0);
        let slot_of = |orig: u32| {
            grid.point_order()
                .iter()
                .position(|&o| o == orig)
                .unwrap()
        };

        let mut labels = vec![ELIGIBLE; grid.len()];
        labels[slot_of(2)] = NOISE;

        let mut retained = Vec::new();
        grow_clusters(&grid, &mut labels, true, 0, &mut NoSecondary, |cid, s| {
            retained.push((cid, s.core));
        });

        // The border point adopts a cluster id but never bridges to the
        // point at 2.0, which seeds its own cluster.
        assert!(labels[slot_of(2)] > 0);
        assert_ne!(labels[slot_of(3)], labels[slot_of(0)]);
        assert_eq!(retained.len(), 2);
        // Border membership never counts as core.
        let (_, core) = retained
            .iter()
            .find(|(cid, _)| *cid == labels[slot_of(0)])
            .unwrap()
            .clone();
        assert_eq!(core, 2);
    }

    #[test]
    fn test_pruned_cluster_releases_id() {
        // A lone eligible point seeds first (low cell id) and is pruned by
        // min_core = 1; the real cluster then takes id 1.
        let points: Vec<[f64; 2]> = vec![
            [0.0, 0.0],
            [5.0, 5.0],
            [5.4, 5.0],
            [5.2, 5.3],
        ];
        let grid = grid_of(&points, 1.0);
        let mut labels = vec![ELIGIBLE; grid.len()];

        let mut retained = Vec::new();
        let count = grow_clusters(&grid, &mut labels, false, 1, &mut NoSecondary, |cid, s| {
            retained.push((cid, s.core));
        });

        assert_eq!(count, 1);
        assert_eq!(retained, vec![(1, 3)]);
        let slot0 = grid.point_order().iter().position(|&o| o == 0).unwrap();
        assert_eq!(labels[slot0], NOISE);
        assert_eq!(labels.iter().filter(|&&l| l == 1).count(), 3);
    }

    #[test]
    fn test_primary_in_deduplicates_across_windows() {
        // A tight clump: every member sees every other member from its own
        // window, but each must be tallied once.
        let points: Vec<[f64; 2]> = (0..6)
            .map(|i| [5.0 + (i % 3) as f64 * 0.1, 5.0 + (i / 3) as f64 * 0.1])
            .collect();
        let grid = grid_of(&points, 1.0);
        let mut labels = vec![ELIGIBLE; grid.len()];

        let mut primary_in = 0;
        let mut core = 0;
        grow_clusters(&grid, &mut labels, false, 0, &mut NoSecondary, |_, s| {
            primary_in = s.primary_in;
            core = s.core;
        });
        assert_eq!(primary_in, 6);
        assert_eq!(core, 6);
        assert!(core <= primary_in);
    }
}
