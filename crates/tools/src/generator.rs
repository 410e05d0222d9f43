//! Seeded synthetic point sets for demos and benchmarks.

use quadtree::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::debug;

/// Accumulates uniform and normal point clouds from a single seeded RNG.
#[derive(Debug)]
pub struct RandomPointGenerator {
    rng: StdRng,
    points: Vec<Point>,
}

impl RandomPointGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            points: Vec::new(),
        }
    }

    /// Append `count` points uniform in the unit-radius square around `center`.
    pub fn add_uniform_points(&mut self, count: usize, center: Point) -> &mut Self {
        self.points.reserve(count);
        for _ in 0..count {
            let x = self.rng.random_range(-1.0..1.0);
            let y = self.rng.random_range(-1.0..1.0);
            self.points.push(center + Point::new(x, y));
        }
        debug!(count, ?center, "Added uniform points");
        self
    }

    /// Append `count` points with a standard normal offset from `center`.
    pub fn add_normal_points(&mut self, count: usize, center: Point) -> &mut Self {
        self.points.reserve(count);
        for _ in 0..count {
            let x: f64 = self.rng.sample(StandardNormal);
            let y: f64 = self.rng.sample(StandardNormal);
            self.points.push(center + Point::new(x, y));
        }
        debug!(count, ?center, "Added normal points");
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Hand over the generated points, leaving the generator empty.
    pub fn take_points(&mut self) -> Vec<Point> {
        std::mem::take(&mut self.points)
    }
}
