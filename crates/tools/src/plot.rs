//! Matplotlib script export.
//!
//! The writer emits a standalone Python script that draws leaf rectangles,
//! point groups and optionally a highlighted search area with its hits.
//! Run it with `python3 <file>` to see the tree.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use quadtree::{Point, Rectangle};
use tracing::info;

use crate::error::ToolError;

const GROUP_COLORS: [&str; 6] = ["tab:blue", "tab:orange", "tab:green", "tab:purple", "tab:brown", "tab:cyan"];
const HIGHLIGHT: &str = "red";

/// Streams plot commands to `W`. Call [`MplWriter::finish`] to close the script.
pub struct MplWriter<W: Write> {
    out: W,
    groups: usize,
}

impl MplWriter<BufWriter<File>> {
    /// Create the script file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ToolError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| ToolError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Writing plot script to {}", path.display());
        Ok(Self::new(BufWriter::new(file))?)
    }
}

impl<W: Write> MplWriter<W> {
    /// Wrap `out` and write the script header.
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "import matplotlib.pyplot as plt")?;
        writeln!(out, "from matplotlib.patches import Rectangle")?;
        writeln!(out)?;
        writeln!(out, "fig, ax = plt.subplots()")?;
        Ok(Self { out, groups: 0 })
    }

    /// Outline a rectangle.
    pub fn rectangle(&mut self, rect: &Rectangle) -> io::Result<()> {
        self.patch(rect, "black", 0.5)
    }

    /// Scatter one group of points. Successive groups cycle colours.
    pub fn points(&mut self, points: &[Point]) -> io::Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let color = GROUP_COLORS[self.groups % GROUP_COLORS.len()];
        self.groups += 1;
        self.scatter(points, color, 2.0)
    }

    /// Outline the search area in the highlight colour.
    pub fn search_area(&mut self, rect: &Rectangle) -> io::Result<()> {
        self.patch(rect, HIGHLIGHT, 1.5)
    }

    /// Scatter query hits in the highlight colour, above everything else.
    pub fn found_points(&mut self, points: &[Point]) -> io::Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        self.scatter(points, HIGHLIGHT, 4.0)
    }

    /// Write the footer, flush, and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        writeln!(self.out)?;
        writeln!(self.out, "ax.set_aspect('equal')")?;
        writeln!(self.out, "ax.autoscale_view()")?;
        writeln!(self.out, "plt.show()")?;
        self.out.flush()?;
        Ok(self.out)
    }

    fn patch(&mut self, rect: &Rectangle, color: &str, width: f64) -> io::Result<()> {
        writeln!(
            self.out,
            "ax.add_patch(Rectangle(({}, {}), {}, {}, fill=False, edgecolor='{}', linewidth={}))",
            PyFloat(rect.bottom_left.x),
            PyFloat(rect.bottom_left.y),
            PyFloat(rect.width()),
            PyFloat(rect.height()),
            color,
            width,
        )
    }

    fn scatter(&mut self, points: &[Point], color: &str, size: f64) -> io::Result<()> {
        write!(self.out, "ax.scatter([")?;
        write_coords(&mut self.out, points.iter().map(|p| p.x))?;
        write!(self.out, "], [")?;
        write_coords(&mut self.out, points.iter().map(|p| p.y))?;
        writeln!(self.out, "], s={}, color='{}')", size, color)
    }
}

fn write_coords(out: &mut impl Write, coords: impl Iterator<Item = f64>) -> io::Result<()> {
    for (i, c) in coords.enumerate() {
        if i > 0 {
            write!(out, ", ")?;
        }
        write!(out, "{}", PyFloat(c))?;
    }
    Ok(())
}

/// An `f64` as a Python float expression, with `inf` and `NaN` as `float(...)` calls.
struct PyFloat(f64);

impl fmt::Display for PyFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            v if v.is_nan() => f.write_str("float('nan')"),
            v if v == f64::INFINITY => f.write_str("float('inf')"),
            v if v == f64::NEG_INFINITY => f.write_str("float('-inf')"),
            v => write!(f, "{}", v),
        }
    }
}
