use geo_traits::CoordTrait;
use log::trace;

use crate::distance::{DistanceMetric, PlanarDistance};
use crate::error::{GeoNearestError, Result};
use crate::heap::{Candidate, CandidateHeap, Neighbor};
use crate::kdtree::traversal::Node;
use crate::point::Point;
use crate::r#type::CoordNum;

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<N: CoordNum>: Sized {
    /// The points of this tree, in k-d order
    fn points(&self) -> &[Point<N>];

    /// The original input index of each entry of [`points`][Self::points]
    fn ids(&self) -> &[usize];

    /// The largest absolute latitude of any point in the tree
    fn max_abs_latitude(&self) -> N;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.points().len()
    }

    /// Whether the tree holds no points
    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    /// Search the index for the `k` points closest to `query` under [`PlanarDistance`].
    ///
    /// Results are ordered nearest-first; equidistant points are ordered by their original input
    /// index. Returns fewer than `k` results only when the tree holds fewer than `k` points.
    ///
    /// Fails with [`GeoNearestError::InvalidArgument`] if `k` is zero.
    ///
    /// ```
    /// use geo_nearest::{KDTree, KDTreeIndex, Point};
    ///
    /// let tree = KDTree::from_points(vec![
    ///     Point::new("OR", "Multnomah", 45.55, -122.42),
    ///     Point::new("WA", "King", 47.49, -121.83),
    ///     Point::new("CA", "San Francisco", 37.76, -122.44),
    /// ]);
    /// let result = tree.neighbors(&Point::at(47.6, -122.3), 2).unwrap();
    /// assert_eq!(result[0].point.county(), "King");
    /// assert_eq!(result[1].point.county(), "Multnomah");
    /// ```
    fn neighbors(&self, query: &Point<N>, k: usize) -> Result<Vec<Neighbor<'_, N>>> {
        self.neighbors_with_metric(query, k, &PlanarDistance::default())
    }

    /// Search the index for the `k` points closest to `query` under a custom distance metric.
    fn neighbors_with_metric(
        &self,
        query: &Point<N>,
        k: usize,
        metric: &impl DistanceMetric<N>,
    ) -> Result<Vec<Neighbor<'_, N>>> {
        let (heap, visited) = search(self, query, k, metric)?;
        trace!(
            "k-d search found {} of k={} neighbors, visiting {} of {} nodes",
            heap.len(),
            k,
            visited,
            self.num_items()
        );
        Ok(heap.into_neighbors(self.points()))
    }

    /// Search the index for the `k` points closest to a coordinate, where `x` is longitude and
    /// `y` is latitude.
    fn neighbors_coord(
        &self,
        coord: &impl CoordTrait<T = N>,
        k: usize,
    ) -> Result<Vec<Neighbor<'_, N>>> {
        self.neighbors(&Point::at(coord.y(), coord.x()), k)
    }

    /// The single point closest to `query`.
    ///
    /// Unlike [`neighbors`][Self::neighbors], an empty tree is an error here, since there is no
    /// point to return.
    fn nearest_one(&self, query: &Point<N>) -> Result<Neighbor<'_, N>> {
        self.neighbors(query, 1)?.into_iter().next().ok_or_else(|| {
            GeoNearestError::InvalidArgument("cannot search an empty index".to_string())
        })
    }

    /// Access the root node of the KDTree for manual traversal, or `None` for an empty tree.
    fn root(&self) -> Option<Node<'_, N, Self>> {
        Node::from_root(self)
    }
}

/// Run a search and return the filled candidate heap with the number of nodes visited.
pub(crate) fn search<N: CoordNum, T: KDTreeIndex<N>>(
    tree: &T,
    query: &Point<N>,
    k: usize,
    metric: &impl DistanceMetric<N>,
) -> Result<(CandidateHeap<N>, usize)> {
    let mut heap = CandidateHeap::try_new(k)?;
    let mut visited = 0;
    if let Some(root) = tree.root() {
        descend(
            &root,
            query,
            metric,
            tree.max_abs_latitude(),
            &mut heap,
            &mut visited,
        );
    }
    Ok((heap, visited))
}

/// Depth-first descent: visit the node, then the child on the query's side of the splitting
/// plane, then the other child unless the metric proves it cannot hold a better candidate.
fn descend<N: CoordNum, T: KDTreeIndex<N>>(
    node: &Node<'_, N, T>,
    query: &Point<N>,
    metric: &impl DistanceMetric<N>,
    max_abs_latitude: N,
    heap: &mut CandidateHeap<N>,
    visited: &mut usize,
) {
    *visited += 1;
    let point = node.point();
    heap.offer(Candidate {
        dist: metric.distance(query, point),
        id: node.index(),
        slot: node.middle_index(),
    });

    let axis = node.axis();
    let (near, far) = if query.coord(axis) < point.coord(axis) {
        (node.left_child(), node.right_child())
    } else {
        (node.right_child(), node.left_child())
    };

    if let Some(near) = near {
        descend(&near, query, metric, max_abs_latitude, heap, visited);
    }

    if let Some(far) = far {
        // A far point at exactly the bound could still win a tie on input index.
        let prune = heap.bound().is_some_and(|worst| {
            metric.axis_lower_bound(query, point, axis, max_abs_latitude) > worst
        });
        if !prune {
            descend(&far, query, metric, max_abs_latitude, heap, visited);
        }
    }
}
