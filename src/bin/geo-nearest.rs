//! Compare k-d tree and linear nearest-neighbor search over a file of county records.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use geo_nearest::{
    build_index, load_file, nearest_linear, GeoNearestError, KDTreeIndex, Neighbor, Point,
};
use log::{info, warn};

/// Find the counties nearest to a location, with a k-d tree and with a linear scan.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the whitespace-delimited records.
    #[arg(short('d'), long, default_value = "./data.txt")]
    data: PathBuf,

    /// The number of nearest neighbors to report.
    #[arg(short('k'), long, default_value = "1")]
    k: usize,

    /// The number of interactive rounds when no `--query` is given.
    #[arg(short('r'), long, default_value = "3")]
    rounds: usize,

    /// A query location as `latitude,longitude`. May be repeated; disables the prompt.
    #[arg(short('q'), long = "query", value_parser = parse_query, allow_hyphen_values = true)]
    queries: Vec<(f64, f64)>,
}

fn parse_query(s: &str) -> Result<(f64, f64), String> {
    let mut parts = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected `latitude,longitude`, got {s:?}"));
    };
    let lat: f64 = lat.parse().map_err(|e| format!("invalid latitude {lat:?}: {e}"))?;
    let lon: f64 = lon.parse().map_err(|e| format!("invalid longitude {lon:?}: {e}"))?;
    Ok((lat, lon))
}

fn main() -> Result<(), GeoNearestError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.k == 0 {
        return Err(GeoNearestError::InvalidArgument(
            "k must be at least 1".to_string(),
        ));
    }

    let points: Vec<Point> = load_file(&args.data)?;
    info!("Loaded {} points from {:?}", points.len(), args.data);

    let start = Instant::now();
    let tree = build_index(points.clone());
    let construction = start.elapsed();
    println!("K={}", args.k);
    println!("Construction time: {}", seconds(construction));

    if !args.queries.is_empty() {
        for &(lat, lon) in &args.queries {
            compare(&tree, &points, &Point::at(lat, lon), args.k)?;
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut round = 0;
    while round < args.rounds {
        print!("Please enter the latitude and longitude: ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        match parse_query(line?.trim()) {
            Ok((lat, lon)) => {
                compare(&tree, &points, &Point::at(lat, lon), args.k)?;
                round += 1;
            }
            Err(e) => warn!("{e}"),
        }
    }

    Ok(())
}

fn compare(
    tree: &impl KDTreeIndex<f64>,
    points: &[Point],
    query: &Point,
    k: usize,
) -> Result<(), GeoNearestError> {
    let start = Instant::now();
    let from_tree = tree.neighbors(query, k)?;
    let tree_time = start.elapsed();

    println!("K-D Tree:");
    println!("Elapsed time: {}", seconds(tree_time));
    print_neighbors(&from_tree);

    let start = Instant::now();
    let from_scan = nearest_linear(points, query, k)?;
    let scan_time = start.elapsed();

    println!("Brute Force:");
    println!("Elapsed time: {}", seconds(scan_time));
    print_neighbors(&from_scan);

    let tree_ids = from_tree.iter().map(|n| n.index);
    let scan_ids = from_scan.iter().map(|n| n.index);
    if !tree_ids.eq(scan_ids) {
        warn!(
            "k-d tree and linear scan disagree for ({}, {})",
            query.latitude(),
            query.longitude()
        );
    }
    Ok(())
}

fn print_neighbors(neighbors: &[Neighbor<'_>]) {
    let line: Vec<String> = neighbors
        .iter()
        .map(|n| format!("({}, {})", n.point.state(), n.point.county()))
        .collect();
    println!("{}", line.join("  "));
}

fn seconds(duration: Duration) -> String {
    format!("{:.9} seconds", duration.as_secs_f64())
}
