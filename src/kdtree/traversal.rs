//! Utilities to traverse the KDTree structure.

use std::marker::PhantomData;

use crate::kdtree::{middle, KDTreeIndex};
use crate::point::{Axis, Point};
use crate::r#type::CoordNum;

/// A node in the KDTree.
///
/// Each node owns exactly one point. Its children split the remaining points of its subtree on
/// [`axis`][Self::axis]: everything in the left subtree is less than or equal to the node's point
/// on that axis, everything in the right subtree greater than or equal.
pub struct Node<'a, N: CoordNum, T: KDTreeIndex<N>> {
    /// The tree that this node is a reference onto
    tree: &'a T,

    /// Start of the index range covered by this subtree, inclusive
    start: usize,
    /// End of the index range covered by this subtree, exclusive
    end: usize,

    depth: usize,

    phantom: PhantomData<N>,
}

impl<N: CoordNum, T: KDTreeIndex<N>> Clone for Node<'_, N, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N: CoordNum, T: KDTreeIndex<N>> Copy for Node<'_, N, T> {}

impl<'a, N: CoordNum, T: KDTreeIndex<N>> Node<'a, N, T> {
    pub(crate) fn from_root(tree: &'a T) -> Option<Self> {
        Self::new(tree, 0, tree.num_items(), 0)
    }

    fn new(tree: &'a T, start: usize, end: usize, depth: usize) -> Option<Self> {
        if start >= end {
            return None;
        }
        Some(Self {
            tree,
            start,
            end,
            depth,
            phantom: PhantomData,
        })
    }

    /// Note: this is the index into the points array, not the insertion index.
    #[inline]
    pub(crate) fn middle_index(&self) -> usize {
        middle(self.start, self.end)
    }

    /// The point owned by this node.
    #[inline]
    pub fn point(&self) -> &'a Point<N> {
        &self.tree.points()[self.middle_index()]
    }

    /// The original input index of this node's point.
    #[inline]
    pub fn index(&self) -> usize {
        self.tree.ids()[self.middle_index()]
    }

    /// Distance from the root; the root has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The axis that the children of this node are split over.
    #[inline]
    pub fn axis(&self) -> Axis {
        Axis::for_depth(self.depth)
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.end - self.start == 1
    }

    /// The child node holding points less than or equal to this one on [`axis`][Self::axis].
    pub fn left_child(&self) -> Option<Node<'a, N, T>> {
        Self::new(self.tree, self.start, self.middle_index(), self.depth + 1)
    }

    /// The child node holding points greater than or equal to this one on [`axis`][Self::axis].
    pub fn right_child(&self) -> Option<Node<'a, N, T>> {
        Self::new(self.tree, self.middle_index() + 1, self.end, self.depth + 1)
    }

    /// Every point in this subtree, including this node's own, in k-d order.
    pub fn points(&self) -> &'a [Point<N>] {
        &self.tree.points()[self.start..self.end]
    }
}
