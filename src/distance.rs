//! Distance metrics for nearest-neighbor queries.
//!
//! The default metric, [`PlanarDistance`], projects latitude/longitude onto a plane scaled by the
//! cosine of the mean latitude. It is an approximation of great-circle distance that is good
//! enough to rank neighbors at sub-continental scale, but it should not be used to report
//! absolute distances.

use crate::point::{Axis, Point};
use crate::r#type::CoordNum;

/// A trait for calculating distances between points and bounding them across a splitting plane.
pub trait DistanceMetric<N: CoordNum> {
    /// Distance between two points. Must be symmetric and non-negative.
    fn distance(&self, a: &Point<N>, b: &Point<N>) -> N;

    /// A value that never exceeds `self.distance(query, p)` for any point `p` on the other side
    /// of `split` along `axis` from `query`.
    ///
    /// `max_abs_latitude` is the largest absolute latitude of any point that can be on that
    /// other side.
    fn axis_lower_bound(
        &self,
        query: &Point<N>,
        split: &Point<N>,
        axis: Axis,
        max_abs_latitude: N,
    ) -> N;
}

/// Planar-projection distance in kilometres.
///
/// Coordinates are taken in degrees and converted to radians before any trigonometry.
///
/// The longitude delta is scaled by the cosine of the mean latitude to account for meridian
/// convergence, combined with the latitude delta via the Euclidean norm, and multiplied by the
/// Earth's radius.
#[derive(Debug, Clone, Copy)]
pub struct PlanarDistance<N: CoordNum = f64> {
    /// Earth's radius in kilometres
    pub earth_radius: N,
}

impl<N: CoordNum> Default for PlanarDistance<N> {
    fn default() -> Self {
        Self {
            earth_radius: N::EARTH_RADIUS_KM,
        }
    }
}

impl<N: CoordNum> PlanarDistance<N> {
    /// Create a new planar distance metric with custom Earth radius.
    pub fn with_radius(earth_radius: N) -> Self {
        Self { earth_radius }
    }
}

impl<N: CoordNum> DistanceMetric<N> for PlanarDistance<N> {
    #[inline]
    fn distance(&self, a: &Point<N>, b: &Point<N>) -> N {
        let two = N::one() + N::one();
        let mean_latitude = ((a.latitude() + b.latitude()) / two).to_radians();
        let x = (b.longitude() - a.longitude()).to_radians() * mean_latitude.cos();
        let y = (b.latitude() - a.latitude()).to_radians();
        (x * x + y * y).sqrt() * self.earth_radius
    }

    fn axis_lower_bound(
        &self,
        query: &Point<N>,
        split: &Point<N>,
        axis: Axis,
        max_abs_latitude: N,
    ) -> N {
        let delta = (split.coord(axis) - query.coord(axis)).to_radians().abs();
        let scale = match axis {
            Axis::Latitude => N::one(),
            Axis::Longitude => {
                // The mean latitude of the query and any far point is at most this far from the
                // equator, and cos is decreasing on [0°, 90°]. Past 90° (latitudes outside the
                // valid range) it no longer bounds anything.
                let two = N::one() + N::one();
                let widest = ((query.latitude().abs() + max_abs_latitude) / two).to_radians();
                if widest.is_finite() && widest < N::FRAC_PI_2() {
                    widest.cos()
                } else {
                    N::zero()
                }
            }
        };
        delta * scale * self.earth_radius * N::BOUND_SLACK
    }
}

/// Euclidean distance measured directly in degrees.
///
/// Useful when the coordinates are not geographic, or for tests with hand-computed answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanDistance;

impl<N: CoordNum> DistanceMetric<N> for EuclideanDistance {
    #[inline]
    fn distance(&self, a: &Point<N>, b: &Point<N>) -> N {
        let dx = b.longitude() - a.longitude();
        let dy = b.latitude() - a.latitude();
        (dx * dx + dy * dy).sqrt()
    }

    fn axis_lower_bound(
        &self,
        query: &Point<N>,
        split: &Point<N>,
        axis: Axis,
        _max_abs_latitude: N,
    ) -> N {
        (split.coord(axis) - query.coord(axis)).abs() * N::BOUND_SLACK
    }
}

/// Distance between two points using [`PlanarDistance`] with the default Earth radius.
pub fn distance<N: CoordNum>(a: &Point<N>, b: &Point<N>) -> N {
    PlanarDistance::default().distance(a, b)
}
