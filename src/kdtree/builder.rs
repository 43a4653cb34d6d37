use std::cmp;

use log::debug;

use crate::kdtree::{middle, KDTree};
use crate::point::{Axis, Point};
use crate::r#type::CoordNum;

/// A builder to create a [`KDTree`].
///
/// The builder owns the points. [`finish`][Self::finish] reorders them in place into k-d order,
/// so no point is copied while building.
pub struct KDTreeBuilder<N: CoordNum = f64> {
    points: Vec<Point<N>>,
}

impl<N: CoordNum> KDTreeBuilder<N> {
    /// Create a new builder with room for the provided number of items.
    pub fn new(num_items: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_items),
        }
    }

    /// Create a builder that takes ownership of an already loaded collection.
    pub fn from_points(points: Vec<Point<N>>) -> Self {
        Self { points }
    }

    /// Add a point to the index, returning its input index.
    pub fn add(&mut self, point: Point<N>) -> usize {
        let index = self.points.len();
        self.points.push(point);
        index
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(self) -> KDTree<N> {
        let mut points = self.points;
        let num_items = points.len();
        let mut ids: Vec<usize> = (0..num_items).collect();
        let max_abs_latitude = points
            .iter()
            .map(|p| p.latitude().abs())
            .fold(N::zero(), N::max);

        // kd-sort both arrays for efficient search
        sort(&mut points, &mut ids, 0, num_items, Axis::Latitude);

        let tree = KDTree {
            points,
            ids,
            max_abs_latitude,
        };
        debug!(
            "built k-d tree over {} points with height {}",
            num_items,
            tree.height()
        );
        tree
    }
}

/// Recursively arrange `[start, end)` so that its middle element is the median along `axis`,
/// with smaller-or-equal elements before it and greater-or-equal elements after it, then do the
/// same for both halves on the other axis.
fn sort<N: CoordNum>(
    points: &mut [Point<N>],
    ids: &mut [usize],
    start: usize,
    end: usize,
    axis: Axis,
) {
    // empty ranges and single leaves are already sorted
    if end - start <= 1 {
        return;
    }

    let m = middle(start, end);
    select(points, ids, m, start, end - 1, axis);

    sort(points, ids, start, m, axis.next());
    sort(points, ids, m + 1, end, axis.next());
}

/// Floyd-Rivest selection over the inclusive range `[left, right]`: afterwards the k-th item is in
/// its sorted position along `axis`, with no larger item before it and no smaller item after it.
fn select<N: CoordNum>(
    points: &mut [Point<N>],
    ids: &mut [usize],
    k: usize,
    mut left: usize,
    mut right: usize,
    axis: Axis,
) {
    while right > left {
        if right - left > 600 {
            let n = (right - left + 1) as f64;
            let m = (k - left + 1) as f64;
            let z = f64::ln(n);
            let s = 0.5 * f64::exp((2.0 * z) / 3.0);
            let sd = 0.5
                * f64::sqrt((z * s * (n - s)) / n)
                * (if m - n / 2.0 < 0.0 { -1.0 } else { 1.0 });
            let new_left = cmp::max(left, f64::floor(k as f64 - (m * s) / n + sd) as usize);
            let new_right = cmp::min(
                right,
                f64::floor(k as f64 + ((n - m) * s) / n + sd) as usize,
            );
            select(points, ids, k, new_left, new_right, axis);
        }

        let t = points[k].coord(axis);
        let mut i = left;
        let mut j = right;

        swap_item(points, ids, left, k);
        if points[right].coord(axis) > t {
            swap_item(points, ids, left, right);
        }

        while i < j {
            swap_item(points, ids, i, j);
            i += 1;
            j -= 1;
            while points[i].coord(axis) < t {
                i += 1;
            }
            while points[j].coord(axis) > t {
                j -= 1;
            }
        }

        if points[left].coord(axis) == t {
            swap_item(points, ids, left, j);
        } else {
            j += 1;
            swap_item(points, ids, j, right);
        }

        match j.cmp(&k) {
            cmp::Ordering::Equal => return,
            cmp::Ordering::Less => left = j + 1,
            cmp::Ordering::Greater => right = j - 1,
        }
    }
}

#[inline]
fn swap_item<N: CoordNum>(points: &mut [Point<N>], ids: &mut [usize], i: usize, j: usize) {
    points.swap(i, j);
    ids.swap(i, j);
}
