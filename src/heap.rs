//! The bounded candidate heap shared by the tree search and the linear scan.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{GeoNearestError, Result};
use crate::point::Point;
use crate::r#type::CoordNum;

/// One entry of a query result: a point, its position in the original input, and its distance to
/// the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a, N: CoordNum = f64> {
    pub point: &'a Point<N>,
    /// Position of the point in the collection it was loaded from.
    pub index: usize,
    pub distance: N,
}

/// A candidate in the heap, keyed by distance and then by original input index.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<N: CoordNum> {
    pub(crate) dist: N,
    /// Original input index, used to break distance ties.
    pub(crate) id: usize,
    /// Where the point lives in the slice the search runs over.
    pub(crate) slot: usize,
}

impl<N: CoordNum> PartialEq for Candidate<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: CoordNum> Eq for Candidate<N> {}

impl<N: CoordNum> Ord for Candidate<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // NaN coordinates are rejected when records are loaded.
        self.dist
            .partial_cmp(&other.dist)
            .unwrap_or(Ordering::Equal)
            .then(self.id.cmp(&other.id))
    }
}

impl<N: CoordNum> PartialOrd for Candidate<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A max-heap holding at most `k` of the best candidates seen so far.
#[derive(Debug)]
pub(crate) struct CandidateHeap<N: CoordNum> {
    heap: BinaryHeap<Candidate<N>>,
    k: usize,
}

impl<N: CoordNum> CandidateHeap<N> {
    /// Fails with [`GeoNearestError::InvalidArgument`] when `k` is zero.
    pub(crate) fn try_new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(GeoNearestError::InvalidArgument(
                "k must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            heap: BinaryHeap::new(),
            k,
        })
    }

    /// Offer a candidate. It is kept while the heap has room, or when it is strictly better than
    /// the current worst, which is then evicted.
    #[inline]
    pub(crate) fn offer(&mut self, candidate: Candidate<N>) {
        if self.heap.len() < self.k {
            self.heap.push(candidate);
        } else if let Some(mut worst) = self.heap.peek_mut() {
            if candidate < *worst {
                *worst = candidate;
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    /// The distance of the worst kept candidate, once the heap holds `k` of them.
    ///
    /// Until then every candidate is accepted, so there is nothing to prune against.
    #[inline]
    pub(crate) fn bound(&self) -> Option<N> {
        if self.heap.len() < self.k {
            None
        } else {
            self.heap.peek().map(|worst| worst.dist)
        }
    }

    /// Drain into ascending order and resolve each candidate against the searched slice.
    pub(crate) fn into_neighbors(self, points: &[Point<N>]) -> Vec<Neighbor<'_, N>> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|candidate| Neighbor {
                point: &points[candidate.slot],
                index: candidate.id,
                distance: candidate.dist,
            })
            .collect()
    }
}
