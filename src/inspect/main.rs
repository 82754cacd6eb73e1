//! Dataset inspection tool.
//!
//! Loads a boundary dataset through the same path as the server, prints one
//! line per region in scan order, and optionally resolves a single point
//! from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use geo_types::Coord;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use buckeye::RegionIndex;

#[derive(Parser, Debug)]
#[command(name = "inspect")]
#[command(about = "Inspect a region boundary dataset")]
struct Args {
    /// Boundary dataset (newline-delimited JSON records)
    #[arg(short, long)]
    dataset: PathBuf,

    /// Resolve a single "lon,lat" point after loading
    #[arg(long)]
    point: Option<String>,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let index = RegionIndex::load(&args.dataset)
        .with_context(|| format!("failed to load dataset {}", args.dataset.display()))?;
    info!(
        "Loaded {} regions from {}",
        index.len(),
        args.dataset.display()
    );

    for region in index.regions() {
        match region.bbox() {
            Some((min_x, min_y, max_x, max_y)) => println!(
                "{}: {} points, bbox [{}, {}] .. [{}, {}]",
                region.name,
                region.boundary.0.len(),
                min_x,
                min_y,
                max_x,
                max_y
            ),
            None => println!("{}: empty boundary", region.name),
        }
    }

    if let Some(raw) = &args.point {
        let point = parse_point(raw).context("point must be \"lon,lat\"")?;
        match index.locate(point) {
            Some(name) => println!("[{}, {}] is located in {}", point.x, point.y, name),
            None => println!("[{}, {}] is not located in any region", point.x, point.y),
        }
    }

    Ok(())
}

/// Parse a point string "lon,lat"
fn parse_point(raw: &str) -> Option<Coord<f64>> {
    let parts: Vec<f64> = raw.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    if parts.len() == 2 {
        Some(Coord {
            x: parts[0],
            y: parts[1],
        })
    } else {
        None
    }
}
