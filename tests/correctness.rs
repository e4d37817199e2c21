//! Randomized correctness tests for the grid index and counting layer.

mod support;

use spatial_scan::grid::{count_within, count_within_other, FlatGrid, GridSpec};
use spatial_scan::validation::validate_labels;
use spatial_scan::{scan_density, scan_poisson, BoundingBox, DensityConfig, Point2, PoissonConfig};
use support::points::{packed_points, uniform_points};

#[test]
fn test_grid_build_invariants_random() {
    for seed in 0..5u64 {
        let points = uniform_points(500, 20.0, seed);
        let bounds = BoundingBox::from_points(&points);
        let spec = GridSpec::new(bounds, 1.5).unwrap();
        let grid = FlatGrid::build(&spec, &points);

        let offsets = grid.cell_offsets();
        assert_eq!(offsets.len(), spec.num_cells() + 1);
        assert_eq!(offsets[0], 0);
        assert_eq!(*offsets.last().unwrap() as usize, points.len());
        assert!(offsets.windows(2).all(|w| w[0] <= w[1]));

        // Every slot sits inside the cell that claims its slot range, and
        // its coordinates match the original point it maps back to.
        let mut seen = vec![false; points.len()];
        for slot in 0..grid.len() {
            let cell = grid.point_cells()[slot] as usize;
            assert!(offsets[cell] as usize <= slot && slot < offsets[cell + 1] as usize);

            let p = grid.point(slot);
            let (col, row) = spec.cell_of(p.x, p.y);
            assert_eq!(spec.cell_id(col, row), cell);

            let orig = grid.point_order()[slot] as usize;
            assert!(!seen[orig]);
            seen[orig] = true;
            assert_eq!(p.x, points[orig][0]);
            assert_eq!(p.y, points[orig][1]);
        }
        assert!(seen.iter().all(|&s| s));
    }
}

#[test]
fn test_counts_match_brute_force_random() {
    let radius = 1.2;
    let r2 = radius * radius;
    for seed in 0..3u64 {
        let points = uniform_points(300, 15.0, seed * 7 + 1);
        let bounds = BoundingBox::from_points(&points);
        let spec = GridSpec::new(bounds, radius).unwrap();
        let grid = FlatGrid::build(&spec, &points);

        let counts = count_within(&grid);
        for slot in 0..grid.len() {
            let p = grid.point(slot);
            let brute = points
                .iter()
                .filter(|q| Point2::new(q[0], q[1]).distance_squared(p) <= r2)
                .count() as u32;
            assert_eq!(counts[slot], brute, "seed {} slot {}", seed, slot);
        }
    }
}

#[test]
fn test_cross_counts_match_brute_force_random() {
    let radius = 0.9;
    let r2 = radius * radius;
    let a = uniform_points(200, 12.0, 31);
    let b = uniform_points(350, 12.0, 32);

    let bounds = BoundingBox::from_points(&a).union(BoundingBox::from_points(&b));
    let spec = GridSpec::new(bounds, radius).unwrap();
    let ga = FlatGrid::build(&spec, &a);
    let gb = FlatGrid::build(&spec, &b);

    let counts = count_within_other(&ga, &gb);
    for slot in 0..ga.len() {
        let p = ga.point(slot);
        let brute = b
            .iter()
            .filter(|q| Point2::new(q[0], q[1]).distance_squared(p) <= r2)
            .count() as u32;
        assert_eq!(counts[slot], brute, "slot {}", slot);
    }
}

#[test]
fn test_density_labels_always_valid() {
    for seed in 0..4u64 {
        let mut points = uniform_points(400, 25.0, seed + 100);
        points.extend(packed_points(30, [12.0, 12.0], 0.5, seed + 200));

        let config = DensityConfig {
            radius: 1.0,
            min_pts: 5,
            min_core: 2,
            include_border: seed % 2 == 0,
        };
        let scan = scan_density(&points, &config).unwrap();

        let report = validate_labels(&scan.labels);
        assert!(report.is_clean(), "seed {}: {}", seed, report);
        assert_eq!(report.num_clusters, scan.num_clusters);
        assert_eq!(report.noise + report.clustered, scan.labels.len());
    }
}

#[test]
fn test_scan_is_deterministic() {
    let points = uniform_points(300, 10.0, 77);
    let config = DensityConfig::new(1.0, 4);

    let a = scan_density(&points, &config).unwrap();
    let b = scan_density(&points, &config).unwrap();
    assert_eq!(a.labels, b.labels);
    assert_eq!(a.source_index, b.source_index);
    assert_eq!(a.num_clusters, b.num_clusters);
}

#[test]
fn test_poisson_recovers_planted_hotspot() {
    // Uniform background, uniform events at the background rate, plus one
    // planted hotspot well above it.
    let background = uniform_points(2000, 50.0, 9);
    let mut events = uniform_points(40, 50.0, 10);
    let hotspot = packed_points(25, [25.0, 25.0], 1.0, 11);
    events.extend_from_slice(&hotspot);

    let config = PoissonConfig {
        radius: 2.0,
        significance: 0.01,
        baseline_ratio: 1.0,
        min_core: 3,
        include_border: false,
    };
    let scan = scan_poisson(&background, &events, &config).unwrap();

    assert!(!scan.clusters.is_empty());
    // The hotspot events all end up in one cluster.
    let hotspot_labels: Vec<i32> = scan
        .source_index
        .iter()
        .zip(&scan.labels)
        .filter(|(&orig, _)| orig as usize >= 40)
        .map(|(_, &l)| l)
        .collect();
    assert_eq!(hotspot_labels.len(), 25);
    assert!(hotspot_labels.iter().all(|&l| l == hotspot_labels[0]));
    assert!(hotspot_labels[0] > 0);

    let report = validate_labels(&scan.labels);
    assert!(report.is_clean(), "{}", report);
}
