//! An implementation of an immutable, balanced K-D Tree over latitude/longitude.
//!
//! The tree is stored implicitly: points are kd-sorted into a single array, and the node for an
//! index range `[start, end)` is the element at the range's middle. Its left child covers the
//! elements before it, its right child the elements after it.

#![warn(missing_docs)]

mod builder;
mod index;
pub(crate) mod r#trait;
pub mod traversal;

pub use builder::KDTreeBuilder;
pub use index::KDTree;
pub use r#trait::KDTreeIndex;

use crate::error::Result;
use crate::heap::Neighbor;
use crate::point::Point;
use crate::r#type::CoordNum;

/// Index of the node for the non-empty range `[start, end)`.
#[inline]
pub(crate) fn middle(start: usize, end: usize) -> usize {
    debug_assert!(end > start);
    start + (end - start - 1) / 2
}

/// Build a [`KDTree`] over `points`, taking ownership of the collection.
pub fn build_index<N: CoordNum>(points: Vec<Point<N>>) -> KDTree<N> {
    KDTreeBuilder::from_points(points).finish()
}

/// The `k` points of `index` closest to `query`, nearest-first.
///
/// Shorthand for [`KDTreeIndex::neighbors`].
pub fn nearest<'a, N: CoordNum>(
    index: &'a KDTree<N>,
    query: &Point<N>,
    k: usize,
) -> Result<Vec<Neighbor<'a, N>>> {
    index.neighbors(query, k)
}

#[cfg(test)]
mod test;
