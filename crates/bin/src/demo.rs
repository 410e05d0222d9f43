//! Quadtree demo - build, query, plot and time point-region quadtrees.
//!
//! Usage: `quadtree-demo [config.toml]`

use std::path::Path;

use quadtree::{Point, QuadTree, Rectangle};
use tools::{Config, MplWriter, RandomPointGenerator, Timer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Quadtree demo v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match std::env::args().nth(1) {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    info!("Loaded configuration");
    info!("  Dataset: {}", config.dataset.path.display());
    info!("  Output: {}", config.output.directory.display());

    std::fs::create_dir_all(&config.output.directory)?;

    plot_dataset(&config)?;
    query_random_points(&config)?;
    benchmark(&config);

    Ok(())
}

/// Index the CSV data set and plot its leaves.
fn plot_dataset(config: &Config) -> anyhow::Result<()> {
    let points = match tools::read_csv_points(&config.dataset.path) {
        Ok(points) => points,
        Err(e) => {
            warn!("Skipping data set: {}", e);
            return Ok(());
        }
    };

    let tree = match QuadTree::new(&points, config.dataset.capacity) {
        Ok(tree) => tree,
        Err(e) => {
            error!("Error in QuadTree creation: {}", e);
            return Ok(());
        }
    };
    info!(
        "Data set tree: {} points, {} leaves, depth {}",
        tree.len(),
        tree.leaf_count(),
        tree.depth()
    );

    let path = config.output.directory.join("plotQuadTree.py");
    write_plot(&path, &tree, None)
}

/// Query a mixed uniform/normal cloud and plot the hits over the tree.
fn query_random_points(config: &Config) -> anyhow::Result<()> {
    let random = &config.random;
    let mut generator = RandomPointGenerator::new(random.seed);
    generator
        .add_uniform_points(random.uniform, Point::ONE)
        .add_normal_points(random.normal, Point::ONE);
    let points = generator.take_points();

    let tree = match QuadTree::new(&points, random.capacity) {
        Ok(tree) => tree,
        Err(e) => {
            error!("Error in QuadTree creation: {}", e);
            return Ok(());
        }
    };

    let area = random.search_area.to_rectangle();
    let found = tree.query(&area);
    info!("Random tree: {} of {} points in search area", found.len(), points.len());

    let path = config.output.directory.join("plotRandomPoints.py");
    write_plot(&path, &tree, Some((&area, found.as_slice())))
}

/// Compare build and query time with a brute-force scan.
fn benchmark(config: &Config) {
    let bench = &config.benchmark;
    info!("Performance: {} normal points, capacity {}", bench.normal, bench.capacity);

    let mut generator = RandomPointGenerator::new(bench.seed);
    generator.add_normal_points(bench.normal, Point::ZERO);
    let points = generator.take_points();
    let area = bench.search_area.to_rectangle();

    let mut timer = Timer::new("Generating QuadTree");
    let (tree, _) = timer.measure(|| QuadTree::new(&points, bench.capacity));
    let tree = match tree {
        Ok(tree) => tree,
        Err(e) => {
            error!("Error in QuadTree creation: {}", e);
            return;
        }
    };

    timer.set_label("Searching using query");
    let (found, query_time) = timer.measure(|| tree.query(&area));

    timer.set_label("Searching using brute force");
    let (brute, brute_time) = timer.measure(|| {
        points
            .iter()
            .filter(|p| area.contains(p))
            .count()
    });

    if found.len() != brute {
        warn!("Query found {} points, brute force found {}", found.len(), brute);
    }
    info!(
        "Found {:.4} % of all points, query {:.1}x faster than brute force",
        found.len() as f64 / points.len() as f64 * 100.0,
        brute_time.as_secs_f64() / query_time.as_secs_f64().max(f64::EPSILON)
    );
}

fn write_plot(
    path: &Path,
    tree: &QuadTree,
    search: Option<(&Rectangle, &[Point])>,
) -> anyhow::Result<()> {
    let mut writer = MplWriter::create(path)?;
    for rect in tree.rectangles() {
        writer.rectangle(&rect)?;
    }
    for group in tree.point_groups() {
        writer.points(&group)?;
    }
    if let Some((area, found)) = search {
        writer.search_area(area)?;
        writer.found_points(found)?;
    }
    writer.finish()?;
    Ok(())
}
