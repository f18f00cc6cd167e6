#![allow(dead_code)]

use knnthree::{Point, distance_sq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn random_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
        .collect()
}

/// Points packed into a few tight clusters, with many exact duplicates.
pub fn clustered_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    let centers: Vec<Point> = (0..4)
        .map(|_| [rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)])
        .collect();
    (0..n)
        .map(|i| {
            let c = centers[i % centers.len()];
            if i % 3 == 0 {
                c
            } else {
                [
                    c[0] + rng.gen_range(-1e-3..1e-3),
                    c[1] + rng.gen_range(-1e-3..1e-3),
                    c[2] + rng.gen_range(-1e-3..1e-3),
                ]
            }
        })
        .collect()
}

/// Squared distances of the `k` nearest points, ascending, by linear scan.
pub fn brute_force_k_nearest(points: &[Point], query: Point, k: usize) -> Vec<f64> {
    let mut d: Vec<f64> = points.iter().map(|p| distance_sq(p, &query)).collect();
    d.sort_by(|a, b| a.partial_cmp(b).unwrap());
    d.truncate(k);
    d
}

pub fn brute_force_range(points: &[Point], query: Point, radius: f64) -> Vec<usize> {
    (0..points.len())
        .filter(|&i| distance_sq(&points[i], &query) <= radius * radius)
        .collect()
}

/// Squared distances of `indices` to `query`, ascending.
pub fn sorted_distances(points: &[Point], query: Point, indices: &[usize]) -> Vec<f64> {
    let mut d: Vec<f64> = indices.iter().map(|&i| distance_sq(&points[i], &query)).collect();
    d.sort_by(|a, b| a.partial_cmp(b).unwrap());
    d
}

pub fn sorted(indices: &[usize]) -> Vec<usize> {
    let mut v = indices.to_vec();
    v.sort_unstable();
    v
}
