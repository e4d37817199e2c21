//! Invariant checks over cluster label vectors.
//!
//! Used by tests and the benchmark driver to verify scan output without
//! reimplementing the engine: labels must be `-1` or a dense run of ids
//! `1..=max`, with no point left at the unvisited sentinel.

use std::fmt;

/// Result of checking a label vector.
#[derive(Debug, Clone, Default)]
pub struct LabelReport {
    /// Highest cluster id present (0 when everything is noise).
    pub num_clusters: i32,
    /// Ids in `1..=num_clusters` with no member.
    pub missing_ids: Vec<i32>,
    /// Labels outside `{-1} ∪ {1..=num_clusters}` (e.g. a leftover 0).
    pub invalid_labels: usize,
    /// Points labeled noise.
    pub noise: usize,
    /// Points carrying a positive cluster id.
    pub clustered: usize,
}

impl LabelReport {
    pub fn is_clean(&self) -> bool {
        self.missing_ids.is_empty() && self.invalid_labels == 0
    }
}

impl fmt::Display for LabelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} clusters, {} clustered, {} noise, {} invalid labels, {} missing ids",
            self.num_clusters,
            self.clustered,
            self.noise,
            self.invalid_labels,
            self.missing_ids.len()
        )
    }
}

/// Check a label vector for density and sentinel hygiene.
pub fn validate_labels(labels: &[i32]) -> LabelReport {
    let mut report = LabelReport::default();
    report.num_clusters = labels.iter().copied().max().unwrap_or(0).max(0);

    let mut seen = vec![false; report.num_clusters as usize];
    for &label in labels {
        if label == -1 {
            report.noise += 1;
        } else if label >= 1 && label <= report.num_clusters {
            report.clustered += 1;
            seen[(label - 1) as usize] = true;
        } else {
            report.invalid_labels += 1;
        }
    }
    for (i, &present) in seen.iter().enumerate() {
        if !present {
            report.missing_ids.push(i as i32 + 1);
        }
    }
    report
}
