//! The evenly spaced y-levels a profile is measured at.
//!
//! Levels live on an integer grid: level `k` is `k * step`, computed as
//! `k / (1 / step)` when that inverse is whole. The grid spans
//! the sample y range snapped outward to whole steps, so both ends are
//! always included and the level count never depends on accumulated
//! floating-point error.

use crate::error::ProfileError;

/// Relative tolerance for treating `value / step` as a whole number.
const SNAP_TOLERANCE: f64 = 1e-9;

/// Largest grid index that converts to and from `f64` exactly (2^53).
const MAX_INDEX: f64 = 9_007_199_254_740_992.0;

/// Upper bound on levels in one grid.
pub const MAX_LEVELS: usize = 1_000_000;

/// `q` rounded to the nearest integer, if it is within tolerance of one.
pub(crate) fn whole(q: f64) -> Option<f64> {
    let n = q.round();
    ((q - n).abs() <= SNAP_TOLERANCE * n.abs().max(1.0)).then_some(n)
}

fn grid_index(q: f64) -> Option<i64> {
    (q.is_finite() && q.abs() <= MAX_INDEX).then_some(q as i64)
}

/// Grid index of the largest multiple of `step` not above `value`.
///
/// `None` when the index is not representable.
pub fn snap_down(value: f64, step: f64) -> Option<i64> {
    let q = value / step;
    grid_index(whole(q).unwrap_or_else(|| q.floor()))
}

/// Grid index of the smallest multiple of `step` not below `value`.
///
/// `None` when the index is not representable.
pub fn snap_up(value: f64, step: f64) -> Option<i64> {
    let q = value / step;
    grid_index(whole(q).unwrap_or_else(|| q.ceil()))
}

/// Round half away from zero to `decimals` places. Never returns `-0.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Inclusive run of levels `lo * step ..= (lo + len - 1) * step`. Never empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelGrid {
    lo: i64,
    len: usize,
    step: f64,
    /// `1 / step` when that is a whole number. Dividing by it lands level
    /// `k` on the same double as the decimal literal (`-3 / 10 == -0.3`),
    /// where `k * step` can be off by one ulp.
    per_unit: Option<f64>,
}

impl LevelGrid {
    /// Smallest grid covering `[min, max]`.
    ///
    /// Fails with `InvalidConfig` when the step is too fine for the range.
    pub fn spanning(min: f64, max: f64, step: f64) -> Result<Self, ProfileError> {
        let too_fine = || {
            ProfileError::InvalidConfig(format!(
                "level step {} is too fine for y range {} .. {} (at most {} levels)",
                step, min, max, MAX_LEVELS
            ))
        };

        let lo = snap_down(min, step).ok_or_else(too_fine)?;
        let hi = snap_up(max, step).ok_or_else(too_fine)?.max(lo);
        let len = hi
            .checked_sub(lo)
            .and_then(|d| usize::try_from(d).ok())
            .and_then(|d| d.checked_add(1))
            .filter(|&n| n <= MAX_LEVELS)
            .ok_or_else(too_fine)?;

        let per_unit = whole(1.0 / step).filter(|&n| n >= 1.0 && n <= MAX_INDEX);
        Ok(Self {
            lo,
            len,
            step,
            per_unit,
        })
    }

    // Never empty, so no `is_empty`.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// The `i`-th level value.
    pub fn level(&self, i: usize) -> f64 {
        let k = (self.lo + i as i64) as f64;
        match self.per_unit {
            Some(n) => k / n,
            None => k * self.step,
        }
    }

    pub fn first(&self) -> f64 {
        self.level(0)
    }

    pub fn last(&self) -> f64 {
        self.level(self.len - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|i| self.level(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapping_ignores_binary_noise() {
        // 0.3 / 0.1 == 2.9999999999999996
        assert_eq!(snap_down(0.3, 0.1), Some(3));
        assert_eq!(snap_up(0.3, 0.1), Some(3));
        // 0.7 / 0.1 == 6.999999999999999
        assert_eq!(snap_up(0.7, 0.1), Some(7));
        assert_eq!(snap_down(0.7, 0.1), Some(7));
    }

    #[test]
    fn snapping_goes_outward() {
        assert_eq!(snap_down(0.05, 0.1), Some(0));
        assert_eq!(snap_up(0.05, 0.1), Some(1));
        assert_eq!(snap_down(-0.05, 0.1), Some(-1));
        assert_eq!(snap_up(-0.05, 0.1), Some(0));
        assert_eq!(snap_down(1.26, 0.1), Some(12));
        assert_eq!(snap_up(1.26, 0.1), Some(13));
    }

    #[test]
    fn snapping_out_of_range_is_none() {
        assert_eq!(snap_down(-1.0, 1e-300), None);
        assert_eq!(snap_up(1.0, 1e-300), None);
        assert_eq!(snap_up(1.0, 1e-320), None);
    }

    #[test]
    fn unit_range_has_eleven_levels() {
        let grid = LevelGrid::spanning(0.0, 1.0, 0.1).unwrap();
        assert_eq!(grid.len(), 11);
        assert_eq!(grid.first(), 0.0);
        assert_eq!(grid.last(), 1.0);
    }

    #[test]
    fn levels_step_evenly() {
        let grid = LevelGrid::spanning(-0.37, 2.41, 0.1).unwrap();
        assert_eq!(grid.len(), 30);
        assert_eq!(grid.first(), -0.4);
        assert_eq!(grid.last(), 2.5);
        let levels: Vec<f64> = grid.iter().collect();
        for pair in levels.windows(2) {
            assert!((pair[1] - pair[0] - 0.1).abs() < 1e-9);
        }
    }

    #[test]
    fn levels_hit_decimal_literals() {
        // -3 * 0.1 == -0.30000000000000004, but the level must be -0.3.
        let grid = LevelGrid::spanning(-5.0, 5.0, 0.1).unwrap();
        assert_eq!(grid.len(), 101);
        for (i, level) in grid.iter().enumerate() {
            let literal: f64 = format!("{:.1}", -5.0 + i as f64 * 0.1).parse().unwrap();
            assert_eq!(level, literal, "level {}", i);
        }

        let grid = LevelGrid::spanning(-1.0, 1.0, 0.25).unwrap();
        let levels: Vec<f64> = grid.iter().collect();
        assert_eq!(levels, vec![-1.0, -0.75, -0.5, -0.25, 0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn step_without_whole_inverse() {
        let grid = LevelGrid::spanning(0.0, 0.9, 0.3).unwrap();
        assert_eq!(grid.len(), 4);
        assert!((grid.last() - 0.9).abs() < 1e-12);
    }

    #[test]
    fn degenerate_range_is_one_level() {
        let grid = LevelGrid::spanning(0.2, 0.2, 0.1).unwrap();
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.first(), 0.2);
    }

    #[test]
    fn too_fine_step_is_rejected() {
        for (min, max, step) in [(-1.0, 1.0, 1e-300), (0.0, 1e3, 1e-9), (0.0, 1.0, 1e-320)] {
            let err = LevelGrid::spanning(min, max, step).unwrap_err();
            assert!(matches!(err, ProfileError::InvalidConfig(_)), "step {}", step);
        }
        assert_eq!(LevelGrid::spanning(0.0, 999_999.0, 1.0).unwrap().len(), MAX_LEVELS);
        assert!(LevelGrid::spanning(0.0, 1_000_000.0, 1.0).is_err());
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(0.30000000000000004, 1), 0.3);
        assert_eq!(round_to(0.25, 1), 0.3);
        assert_eq!(round_to(-0.25, 1), -0.3);
        assert_eq!(round_to(-0.04, 1), 0.0);
        assert!(round_to(-0.04, 1).is_sign_positive());
        assert_eq!(round_to(1.234, 2), 1.23);
    }
}
