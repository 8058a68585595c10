//! levelwidth: horizontal width of a sampled profile at evenly spaced y-levels.
//!
//! Samples are joined left to right into a polyline. At every level on a
//! fixed grid the curve's crossings are located by linear interpolation and
//! the distance between the outermost two is reported.
//!
//! # Example
//!
//! ```
//! use levelwidth::{compute, kurbo::Point, ProfileConfig};
//!
//! let samples = [Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 0.0)];
//! let levels = compute(&samples, &ProfileConfig::default())?;
//! assert_eq!(levels.len(), 11);
//! assert_eq!(levels[5].width, Some(1.0));
//! assert_eq!(levels[10].width, None);
//! # Ok::<(), levelwidth::ProfileError>(())
//! ```

#![forbid(unsafe_code)]

mod config;
mod levels;
mod polyline;
mod width;

pub mod error;
pub mod table;

// Re-export kurbo so callers build samples with the same `Point`.
pub use kurbo;

pub use config::ProfileConfig;
pub use error::ProfileError;
pub use levels::LevelGrid;
pub use polyline::Polyline;
pub use width::{compute, compute_with_progress, LevelResult, Progress};

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDateTime;
use kurbo::Point;
use tracing::{info, trace};

/// Width profile of one input, with what is needed to summarize it.
#[derive(Debug, Clone, PartialEq)]
pub struct WidthProfile {
    /// One entry per level, ascending.
    pub levels: Vec<LevelResult>,
    /// Number of samples the profile was computed from.
    pub sample_count: usize,
    /// Lowest and highest level: the sample y range snapped outward to
    /// whole steps.
    pub y_range: (f64, f64),
}

impl WidthProfile {
    /// Levels that have a width.
    pub fn measured(&self) -> usize {
        self.levels.iter().filter(|l| l.width.is_some()).count()
    }

    /// The level with the largest width. Ties go to the lowest level.
    pub fn widest(&self) -> Option<LevelResult> {
        self.levels
            .iter()
            .filter(|l| l.width.is_some())
            .fold(None, |best: Option<LevelResult>, l| match best {
                Some(b) if b.width >= l.width => Some(b),
                _ => Some(*l),
            })
    }
}

/// Compute a profile, tracing per-level progress.
pub fn profile(samples: &[Point], config: &ProfileConfig) -> Result<WidthProfile, ProfileError> {
    let (grid, levels) = width::compute_on_grid(samples, config, |p| {
        trace!("level {}/{} ({:.0}%)", p.done, p.total, p.fraction() * 100.0);
    })?;
    Ok(WidthProfile {
        levels,
        sample_count: samples.len(),
        y_range: (grid.first(), grid.last()),
    })
}

/// Full pipeline: `x,y` CSV → width profile → `y_level,width` CSV.
pub fn profile_file(
    input: &Path,
    output: &Path,
    config: &ProfileConfig,
) -> Result<WidthProfile, ProfileError> {
    let t_start = Instant::now();

    // ── Load ──────────────────────────────────────────────
    let samples = table::load_samples(input)?;
    info!("  Load        {} samples from {}", samples.len(), input.display());

    // ── Compute ───────────────────────────────────────────
    let result = profile(&samples, config)?;
    info!(
        "  Levels      {} levels ({} .. {}, step {}) \u{00b7} {} with width",
        result.levels.len(),
        result.y_range.0,
        result.y_range.1,
        config.step,
        result.measured()
    );
    if let Some(widest) = result.widest() {
        info!(
            "  Widest      {} at y={}",
            widest.width.unwrap_or_default(),
            widest.y_level
        );
    }

    // ── Write ─────────────────────────────────────────────
    table::save_levels(output, &result.levels)?;
    info!(
        "  Write       {}  ({}ms)",
        output.display(),
        t_start.elapsed().as_millis()
    );

    Ok(result)
}

/// Timestamped output file name, e.g. `width_vs_y_20240131_154500.csv`.
pub fn default_output_name(now: NaiveDateTime) -> String {
    now.format("width_vs_y_%Y%m%d_%H%M%S.csv").to_string()
}

/// Where to write output.
///
/// An existing directory gets a timestamped file inside it. No path means
/// a timestamped file in the working directory. Anything else is used as is.
pub fn resolve_output(output: Option<&Path>, now: NaiveDateTime) -> PathBuf {
    match output {
        Some(dir) if dir.is_dir() => dir.join(default_output_name(now)),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_output_name(now)),
    }
}
