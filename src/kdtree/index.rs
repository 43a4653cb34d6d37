use crate::kdtree::{KDTreeBuilder, KDTreeIndex};
use crate::point::Point;
use crate::r#type::CoordNum;

/// An owned, immutable K-D tree.
///
/// Usually this will be created via [`KDTreeBuilder`] or [`build_index`][crate::build_index].
/// Once built, the tree is never mutated, so it can serve any number of concurrent queries.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: CoordNum = f64> {
    /// Points in k-d order.
    pub(crate) points: Vec<Point<N>>,
    /// `ids[i]` is the original input index of `points[i]`.
    pub(crate) ids: Vec<usize>,
    pub(crate) max_abs_latitude: N,
}

impl<N: CoordNum> KDTree<N> {
    /// Build a tree from an owned collection of points.
    pub fn from_points(points: Vec<Point<N>>) -> Self {
        KDTreeBuilder::from_points(points).finish()
    }

    /// The number of levels in the tree; zero for an empty tree.
    pub fn height(&self) -> usize {
        (usize::BITS - self.points.len().leading_zeros()) as usize
    }

    /// Give back the points, restored to their original input order.
    pub fn into_points(self) -> Vec<Point<N>> {
        let mut slots: Vec<Option<Point<N>>> = vec![None; self.points.len()];
        for (point, id) in self.points.into_iter().zip(self.ids) {
            slots[id] = Some(point);
        }
        slots.into_iter().flatten().collect()
    }
}

impl<N: CoordNum> KDTreeIndex<N> for KDTree<N> {
    fn points(&self) -> &[Point<N>] {
        &self.points
    }

    fn ids(&self) -> &[usize] {
        &self.ids
    }

    fn max_abs_latitude(&self) -> N {
        self.max_abs_latitude
    }
}

#[cfg(feature = "rayon")]
mod parallel {
    use rayon::prelude::*;

    use crate::error::Result;
    use crate::heap::Neighbor;
    use crate::kdtree::{KDTree, KDTreeIndex};
    use crate::point::Point;
    use crate::r#type::CoordNum;

    impl<N: CoordNum> KDTree<N> {
        /// Run [`neighbors`][KDTreeIndex::neighbors] for every query in parallel.
        ///
        /// Results are in the same order as `queries`.
        pub fn neighbors_batch(
            &self,
            queries: &[Point<N>],
            k: usize,
        ) -> Result<Vec<Vec<Neighbor<'_, N>>>> {
            queries
                .par_iter()
                .map(|query| self.neighbors(query, k))
                .collect()
        }
    }
}
