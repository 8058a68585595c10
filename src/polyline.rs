//! Samples ordered by x, joined into a piecewise-linear curve.

use std::cmp::Ordering;

use kurbo::{Line, Point};

use crate::error::ProfileError;

/// Samples sorted by ascending x. Equal x keep their input order.
#[derive(Debug, Clone)]
pub struct Polyline {
    points: Vec<Point>,
}

impl Polyline {
    /// Validate and sort samples. Needs at least two finite points.
    pub fn new(samples: &[Point]) -> Result<Self, ProfileError> {
        if samples.is_empty() {
            return Err(ProfileError::InvalidInput("no samples".into()));
        }
        if samples.len() < 2 {
            return Err(ProfileError::InvalidInput(format!(
                "need at least 2 samples, got {}",
                samples.len()
            )));
        }
        if let Some(i) = samples.iter().position(|p| !p.is_finite()) {
            return Err(ProfileError::InvalidInput(format!(
                "sample {} has a missing coordinate ({}, {})",
                i, samples[i].x, samples[i].y
            )));
        }

        let mut points = samples.to_vec();
        // Stable, so ties in x keep input order.
        points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    // At least two points, so no `is_empty`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Consecutive sample pairs.
    pub fn segments(&self) -> impl Iterator<Item = Line> + '_ {
        self.points.windows(2).map(|w| Line::new(w[0], w[1]))
    }

    /// (min y, max y) over all samples.
    pub fn y_bounds(&self) -> (f64, f64) {
        self.points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            })
    }

    /// X positions where the curve meets `level`, left to right.
    ///
    /// Flat segments never cross. A sample lying exactly on the level is
    /// reported once at its own x, even though both adjoining segments
    /// touch it.
    pub fn crossings(&self, level: f64) -> Vec<f64> {
        let mut xs = Vec::new();
        let mut last_vertex: Option<usize> = None;

        for (i, seg) in self.segments().enumerate() {
            let (a, b) = (seg.p0, seg.p1);
            if a.y == b.y || (a.y - level) * (b.y - level) > 0.0 {
                continue;
            }

            let (x, vertex) = if a.y == level {
                (a.x, Some(i))
            } else if b.y == level {
                (b.x, Some(i + 1))
            } else {
                (a.x + (level - a.y) * (b.x - a.x) / (b.y - a.y), None)
            };

            if vertex.is_some() {
                if vertex == last_vertex {
                    continue;
                }
                last_vertex = vertex;
            }
            xs.push(x);
        }
        xs
    }

    /// Distance between the outermost crossings, if there are at least two.
    pub fn width_at(&self, level: f64) -> Option<f64> {
        let xs = self.crossings(level);
        if xs.len() < 2 {
            return None;
        }
        let (lo, hi) = xs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        Some(hi - lo)
    }
}
