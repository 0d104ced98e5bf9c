//! Seeded synthetic point sets for the demos.

use std::f64::consts::TAU;

use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution as _, Normal};

/// Shape of a generated point cloud.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Distribution {
    Uniform,
    /// Five gaussian blobs.
    Clusters,
    /// A noisy band along `y = x`.
    Diagonal,
    Circle,
    /// Single gaussian around the center.
    Gaussian,
    /// Regular lattice, full of exactly aligned coordinates.
    Grid,
    /// Outline of the box plus both of its diagonals.
    SquareWithDiagonals,
}

impl Distribution {
    pub const ALL: [Distribution; 7] = [
        Distribution::Uniform,
        Distribution::Clusters,
        Distribution::Diagonal,
        Distribution::Circle,
        Distribution::Gaussian,
        Distribution::Grid,
        Distribution::SquareWithDiagonals,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Distribution::Uniform => "uniform",
            Distribution::Clusters => "clusters",
            Distribution::Diagonal => "diagonal",
            Distribution::Circle => "circle",
            Distribution::Gaussian => "gaussian",
            Distribution::Grid => "grid",
            Distribution::SquareWithDiagonals => "square + diagonals",
        }
    }

    fn seed(self) -> u64 {
        match self {
            Distribution::Uniform => 101,
            Distribution::Clusters => 102,
            Distribution::Diagonal => 103,
            Distribution::Circle => 104,
            Distribution::Gaussian => 201,
            Distribution::Grid => 0,
            Distribution::SquareWithDiagonals => 202,
        }
    }
}

/// Generates about `n` points inside `[lo, hi]^2`.
///
/// Each distribution has a fixed seed, so the same call always returns the
/// same points. Distributions that overshoot the box drop the outliers and
/// may return fewer than `n`.
pub fn generate(distribution: Distribution, n: usize, lo: f64, hi: f64) -> Vec<Point2<f64>> {
    let mut sampler = Sampler::new(distribution.seed());
    let points = match distribution {
        Distribution::Uniform => (0..n)
            .map(|_| Point2::new(sampler.uniform(lo, hi), sampler.uniform(lo, hi)))
            .collect(),
        Distribution::Clusters => {
            let clusters = 5;
            let mut points = Vec::with_capacity(n);
            for _ in 0..clusters {
                let center = Point2::new(
                    sampler.uniform(lo + 100.0, hi - 100.0),
                    sampler.uniform(lo + 100.0, hi - 100.0),
                );
                for _ in 0..n / clusters {
                    points.push(Point2::new(
                        sampler.normal(center.x, 40.0),
                        sampler.normal(center.y, 40.0),
                    ));
                }
            }
            points
        }
        Distribution::Diagonal => (0..n)
            .map(|_| {
                let x = sampler.uniform(lo, hi);
                Point2::new(x, x + sampler.uniform(-20.0, 20.0))
            })
            .collect(),
        Distribution::Circle => {
            let center = (lo + hi) / 2.0;
            let radius = (hi - lo) / 3.0;
            (0..n)
                .map(|_| {
                    let angle = sampler.uniform(0.0, TAU);
                    Point2::new(center + radius * angle.cos(), center + radius * angle.sin())
                })
                .collect()
        }
        Distribution::Gaussian => {
            let center = (lo + hi) / 2.0;
            let spread = (hi - lo) / 6.0;
            (0..n)
                .map(|_| {
                    Point2::new(sampler.normal(center, spread), sampler.normal(center, spread))
                })
                .collect()
        }
        Distribution::Grid => {
            let side = (n as f64).sqrt() as usize;
            let step = if side > 1 { (hi - lo) / (side - 1) as f64 } else { 0.0 };
            (0..side * side)
                .map(|i| Point2::new(lo + (i % side) as f64 * step, lo + (i / side) as f64 * step))
                .collect()
        }
        Distribution::SquareWithDiagonals => {
            let (n_side, n_diag) = (n / 6, n / 3);
            let mut points = Vec::with_capacity(4 * n_side + 2 * n_diag);

            // Opposite edges share their random offsets.
            let ys: Vec<f64> = (0..n_side).map(|_| sampler.uniform(lo, hi)).collect();
            points.extend(ys.iter().map(|&y| Point2::new(lo, y)));
            points.extend(ys.iter().map(|&y| Point2::new(hi, y)));

            let xs: Vec<f64> = (0..n_side).map(|_| sampler.uniform(lo, hi)).collect();
            points.extend(xs.iter().map(|&x| Point2::new(x, lo)));
            points.extend(xs.iter().map(|&x| Point2::new(x, hi)));

            let diag: Vec<f64> = (0..n_diag).map(|_| sampler.uniform(lo, hi)).collect();
            points.extend(diag.iter().map(|&x| Point2::new(x, x)));
            points.extend(diag.iter().map(|&x| Point2::new(x, hi - (x - lo))));
            points
        }
    };

    let inside = |p: &Point2<f64>| (lo..=hi).contains(&p.x) && (lo..=hi).contains(&p.y);
    points.into_iter().filter(inside).collect()
}

struct Sampler {
    rng: StdRng,
}

impl Sampler {
    fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.rng.random::<f64>() * (hi - lo)
    }

    /// Falls back to `mean` if `std_dev` is not a finite non-negative number.
    fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        Normal::new(mean, std_dev).map_or(mean, |normal| normal.sample(&mut self.rng))
    }
}
