//! Brute-force k-nearest search, the baseline the k-d tree is checked against.

use crate::distance::{DistanceMetric, PlanarDistance};
use crate::error::Result;
use crate::heap::{Candidate, CandidateHeap, Neighbor};
use crate::point::Point;
use crate::r#type::CoordNum;

/// Find the `k` points closest to `query` by comparing against every point.
///
/// Results are ordered nearest-first. Equidistant points are ordered by their position in
/// `points`. Fails with [`InvalidArgument`][crate::GeoNearestError::InvalidArgument] if `k`
/// is zero.
///
/// ```
/// use geo_nearest::{nearest_linear, Point};
///
/// let points = vec![
///     Point::new("ME", "Aroostook", 46.66, -68.60),
///     Point::new("FL", "Monroe", 25.14, -81.21),
/// ];
/// let result = nearest_linear(&points, &Point::at(44.0, -70.0), 1).unwrap();
/// assert_eq!(result[0].point.county(), "Aroostook");
/// ```
pub fn nearest_linear<'a, N: CoordNum>(
    points: &'a [Point<N>],
    query: &Point<N>,
    k: usize,
) -> Result<Vec<Neighbor<'a, N>>> {
    nearest_linear_with_metric(points, query, k, &PlanarDistance::default())
}

/// [`nearest_linear`] with a custom distance metric.
pub fn nearest_linear_with_metric<'a, N: CoordNum>(
    points: &'a [Point<N>],
    query: &Point<N>,
    k: usize,
    metric: &impl DistanceMetric<N>,
) -> Result<Vec<Neighbor<'a, N>>> {
    let mut heap = CandidateHeap::try_new(k)?;
    for (i, point) in points.iter().enumerate() {
        heap.offer(Candidate {
            dist: metric.distance(query, point),
            id: i,
            slot: i,
        });
    }
    Ok(heap.into_neighbors(points))
}
