//! Demo configuration.

use std::path::{Path, PathBuf};

use quadtree::{Point, Rectangle};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "quadtree.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub random: RandomConfig,
    #[serde(default)]
    pub benchmark: BenchmarkConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from `quadtree.toml` or use defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            Self::load_from(path)
        } else {
            info!("No {} found, creating default config", CONFIG_FILE);
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            Ok(default_config)
        }
    }

    /// Load configuration from an explicit path. The file must exist.
    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }
}

/// An axis-aligned area as it appears in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AreaConfig {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl AreaConfig {
    pub fn to_rectangle(self) -> Rectangle {
        Rectangle::new(Point::from(self.min), Point::from(self.max))
    }
}

/// CSV data set to index and plot.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    /// CSV file with one `x,y` point per line.
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
    /// Bucket capacity of the tree built over the file.
    #[serde(default = "default_dataset_capacity")]
    pub capacity: usize,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            capacity: default_dataset_capacity(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("test_data/swe.csv")
}
fn default_dataset_capacity() -> usize {
    64
}

/// Random cloud queried once and plotted with its hits.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RandomConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Uniform points around (1, 1).
    #[serde(default = "default_random_count")]
    pub uniform: usize,
    /// Normal points around (1, 1).
    #[serde(default = "default_random_count")]
    pub normal: usize,
    #[serde(default = "default_random_capacity")]
    pub capacity: usize,
    #[serde(default = "default_random_area")]
    pub search_area: AreaConfig,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            uniform: default_random_count(),
            normal: default_random_count(),
            capacity: default_random_capacity(),
            search_area: default_random_area(),
        }
    }
}

fn default_seed() -> u64 {
    2565
}
fn default_random_count() -> usize {
    1000
}
fn default_random_capacity() -> usize {
    10
}
fn default_random_area() -> AreaConfig {
    AreaConfig { min: [-0.6, -1.6], max: [0.7, 0.4] }
}

/// Tree build and query timed against a brute-force scan.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BenchmarkConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Normal points around the origin.
    #[serde(default = "default_benchmark_count")]
    pub normal: usize,
    #[serde(default = "default_benchmark_capacity")]
    pub capacity: usize,
    #[serde(default = "default_benchmark_area")]
    pub search_area: AreaConfig,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            normal: default_benchmark_count(),
            capacity: default_benchmark_capacity(),
            search_area: default_benchmark_area(),
        }
    }
}

fn default_benchmark_count() -> usize {
    1_000_000
}
fn default_benchmark_capacity() -> usize {
    128
}
fn default_benchmark_area() -> AreaConfig {
    AreaConfig { min: [-0.6, -0.6], max: [-0.4, -0.4] }
}

/// Where plot scripts are written.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}
