//! CSV point reader.
//!
//! One point per line as `x,y`. Extra columns are ignored, blank lines and
//! `#` comments are skipped, and a non-numeric first row is taken as a header.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use quadtree::Point;
use tracing::{debug, info};

use crate::error::ToolError;

/// Read every point from the CSV file at `path`.
pub fn read_csv_points(path: impl AsRef<Path>) -> Result<Vec<Point>, ToolError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ToolError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let points = parse_csv_points(BufReader::new(file))?;
    info!("Read {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Parse points from any buffered CSV source.
pub fn parse_csv_points(reader: impl BufRead) -> Result<Vec<Point>, ToolError> {
    let mut points = Vec::new();
    let mut seen_row = false;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let row = line.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }

        match parse_row(row) {
            Ok(point) => points.push(point),
            Err(_) if !seen_row => debug!("Skipping CSV header: {}", row),
            Err(message) => return Err(ToolError::Parse { line: index + 1, message }),
        }
        seen_row = true;
    }

    Ok(points)
}

fn parse_row(row: &str) -> Result<Point, String> {
    let mut fields = row.split(',').map(str::trim);
    let mut next = |axis: &str| -> Result<f64, String> {
        let field = fields
            .next()
            .ok_or_else(|| format!("missing {axis} coordinate"))?;
        field
            .parse::<f64>()
            .map_err(|e| format!("invalid {axis} coordinate {field:?}: {e}"))
    };

    let x = next("x")?;
    let y = next("y")?;
    Ok(Point::new(x, y))
}
