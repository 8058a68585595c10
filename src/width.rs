//! Width of a sampled curve at evenly spaced y-levels.
//!
//! Per call:
//! 1. Sort samples by x into a polyline
//! 2. Snap the y range outward to whole level steps
//! 3. At each level, collect crossings and take outermost distance

use kurbo::Point;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProfileConfig;
use crate::error::ProfileError;
use crate::levels::{round_to, LevelGrid};
use crate::polyline::Polyline;

/// Width measured at one level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelResult {
    /// Level, rounded to `ProfileConfig::decimals`.
    pub y_level: f64,
    /// `None` when the curve crosses the level fewer than twice.
    pub width: Option<f64>,
}

/// Levels finished so far, reported after each level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// Completed share in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

/// Compute one `LevelResult` per level, ascending.
pub fn compute(samples: &[Point], config: &ProfileConfig) -> Result<Vec<LevelResult>, ProfileError> {
    compute_with_progress(samples, config, |_| {})
}

/// Like [`compute`], calling `on_level` once after each level.
pub fn compute_with_progress<F>(
    samples: &[Point],
    config: &ProfileConfig,
    on_level: F,
) -> Result<Vec<LevelResult>, ProfileError>
where
    F: FnMut(Progress),
{
    compute_on_grid(samples, config, on_level).map(|(_, results)| results)
}

/// Compute levels and return them with the grid they were measured on.
pub(crate) fn compute_on_grid<F>(
    samples: &[Point],
    config: &ProfileConfig,
    mut on_level: F,
) -> Result<(LevelGrid, Vec<LevelResult>), ProfileError>
where
    F: FnMut(Progress),
{
    config.validate()?;
    let polyline = Polyline::new(samples)?;
    let (y_lo, y_hi) = polyline.y_bounds();
    let grid = LevelGrid::spanning(y_lo, y_hi, config.step)?;
    debug!(
        samples = polyline.len(),
        levels = grid.len(),
        "levels {} .. {} step {}",
        grid.first(),
        grid.last(),
        grid.step()
    );

    let total = grid.len();
    let mut results = Vec::with_capacity(total);
    for (i, level) in grid.iter().enumerate() {
        results.push(LevelResult {
            y_level: round_to(level, config.decimals),
            width: polyline.width_at(level),
        });
        on_level(Progress { done: i + 1, total });
    }
    Ok((grid, results))
}
