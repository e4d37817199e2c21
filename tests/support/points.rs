#![allow(dead_code)]

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Uniform lattice of `w * h` points at integer coordinates.
pub fn lattice_points(w: usize, h: usize) -> Vec<[f64; 2]> {
    (0..w)
        .flat_map(|i| (0..h).map(move |j| [i as f64, j as f64]))
        .collect()
}

/// Uniform random points over a square extent.
pub fn uniform_points(n: usize, extent: f64, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| [rng.gen_range(0.0..extent), rng.gen_range(0.0..extent)])
        .collect()
}

/// Tightly packed points around a center, all pairwise within `spread`.
pub fn packed_points(n: usize, center: [f64; 2], spread: f64, seed: u64) -> Vec<[f64; 2]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            [
                center[0] + rng.gen_range(-spread / 2.0..spread / 2.0),
                center[1] + rng.gen_range(-spread / 2.0..spread / 2.0),
            ]
        })
        .collect()
}
