//! Two-column CSV tables: `x,y` samples in, `y_level,width` rows out.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use kurbo::Point;
use serde::Deserialize;

use crate::error::ProfileError;
use crate::width::LevelResult;

/// One input row. Columns are matched by header name.
#[derive(Debug, Deserialize)]
struct SampleRow {
    x: Option<f64>,
    y: Option<f64>,
}

/// Read samples from CSV with a header row containing `x` and `y`.
///
/// Other columns are ignored. A blank `x` or `y` cell is an error naming
/// the data row (1-based, header excluded).
pub fn read_samples<R: Read>(reader: R) -> Result<Vec<Point>, ProfileError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for column in ["x", "y"] {
        if !headers.iter().any(|h| h == column) {
            return Err(ProfileError::MissingColumn(column));
        }
    }

    let mut samples = Vec::new();
    for (i, row) in rdr.deserialize::<SampleRow>().enumerate() {
        match row? {
            SampleRow { x: Some(x), y: Some(y) } => samples.push(Point::new(x, y)),
            SampleRow { x, .. } => {
                let column = if x.is_none() { "x" } else { "y" };
                return Err(ProfileError::InvalidInput(format!(
                    "row {}: missing '{}' value",
                    i + 1,
                    column
                )));
            }
        }
    }
    Ok(samples)
}

/// Read samples from a CSV file.
pub fn load_samples(path: &Path) -> Result<Vec<Point>, ProfileError> {
    read_samples(File::open(path)?)
}

/// Write `y_level,width` rows. An absent width is an empty cell.
pub fn write_levels<W: Write>(writer: W, levels: &[LevelResult]) -> Result<(), ProfileError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    // Explicit header so an empty table still has one.
    wtr.write_record(["y_level", "width"])?;
    for level in levels {
        wtr.serialize(level)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write `y_level,width` rows to a new file, replacing any existing one.
pub fn save_levels(path: &Path, levels: &[LevelResult]) -> Result<(), ProfileError> {
    write_levels(File::create(path)?, levels)
}
