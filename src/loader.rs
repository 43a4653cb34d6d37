//! Reading point records from whitespace-delimited text.
//!
//! Each line holds `<state> <county tokens...> <latitude> <longitude>`. The county may span any
//! number of tokens; they are joined back together with single spaces.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use num_traits::NumCast;

use crate::error::{GeoNearestError, Result};
use crate::point::Point;
use crate::r#type::CoordNum;

/// Parse one record. `line` is the 1-based line number used in error messages.
pub fn parse_record<N: CoordNum>(record: &str, line: usize) -> Result<Point<N>> {
    let malformed = |reason: String| GeoNearestError::MalformedRecord { line, reason };

    let tokens: Vec<&str> = record.split_whitespace().collect();
    if tokens.len() < 4 {
        return Err(malformed(format!(
            "expected at least 4 fields, found {}",
            tokens.len()
        )));
    }

    let n = tokens.len();
    let latitude = parse_coord(tokens[n - 2], "latitude", 90.0).map_err(malformed)?;
    let longitude = parse_coord(tokens[n - 1], "longitude", 180.0).map_err(malformed)?;
    let county = tokens[1..n - 2].join(" ");

    Ok(Point::new(tokens[0], county, latitude, longitude))
}

fn parse_coord<N: CoordNum>(
    token: &str,
    name: &str,
    limit: f64,
) -> std::result::Result<N, String> {
    let value: f64 = token
        .parse()
        .map_err(|e| format!("invalid {name} {token:?}: {e}"))?;
    if !value.is_finite() || value.abs() > limit {
        return Err(format!("{name} {value} outside [-{limit}, {limit}]"));
    }
    <N as NumCast>::from(value).ok_or_else(|| format!("{name} {value} not representable"))
}

/// Read every record from `reader`, skipping blank lines.
///
/// Stops at the first malformed record rather than returning a partial collection.
pub fn read_records<N: CoordNum>(reader: impl BufRead) -> Result<Vec<Point<N>>> {
    let mut points = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        points.push(parse_record(&line, i + 1)?);
    }
    Ok(points)
}

/// Read every record from the file at `path`.
pub fn load_file<N: CoordNum>(path: impl AsRef<Path>) -> Result<Vec<Point<N>>> {
    let path = path.as_ref();
    let points = read_records(BufReader::new(File::open(path)?))?;
    debug!("loaded {} points from {}", points.len(), path.display());
    Ok(points)
}
