//! Tooling around the quadtree: everything that reads, makes or shows points.

pub mod config;
pub mod generator;
pub mod plot;
pub mod points;
pub mod timer;

mod error;

pub use config::Config;
pub use error::ToolError;
pub use generator::RandomPointGenerator;
pub use plot::MplWriter;
pub use points::{parse_csv_points, read_csv_points};
pub use timer::Timer;
