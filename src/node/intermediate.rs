//! Intermediate node: two owned subtrees, no values
//!
//! Size is computed from the children on every call so it always reflects
//! the live subtree. Restructuring never holes out a child: splits and
//! collapses build replacement nodes and graft them whole.

use super::Node;

/// Structural node holding exactly two owned subtrees
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intermediate<T> {
    left: Box<Node<T>>,
    right: Box<Node<T>>,
}

impl<T: Copy + Ord> Intermediate<T> {
    /// Join two subtrees under a new intermediate node
    pub fn new(left: Node<T>, right: Node<T>) -> Self {
        Self {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Sum of the children's sizes
    pub fn size(&self) -> usize {
        self.left.size() + self.right.size()
    }

    /// Left subtree
    pub fn left(&self) -> &Node<T> {
        &self.left
    }

    /// Right subtree
    pub fn right(&self) -> &Node<T> {
        &self.right
    }

    /// Left subtree, mutable
    pub fn left_mut(&mut self) -> &mut Node<T> {
        &mut self.left
    }

    /// Right subtree, mutable
    pub fn right_mut(&mut self) -> &mut Node<T> {
        &mut self.right
    }

    /// Take both subtrees out, consuming the node
    pub fn into_children(self) -> (Node<T>, Node<T>) {
        (*self.left, *self.right)
    }

    /// Depth-first left-then-right concatenation of all leaf contents
    ///
    /// Defines the tree's canonical linear order.
    pub fn collect(&self, into: &mut Vec<T>) {
        self.left.collect(into);
        self.right.collect(into);
    }

    /// Maximum over both subtrees
    ///
    /// Meaningful in the order-preserving mode, where it equals the true
    /// subtree maximum; `None` iff the whole subtree is empty.
    pub fn max(&self) -> Option<T> {
        match (self.left.max(), self.right.max()) {
            (Some(l), Some(r)) => Some(l.max(r)),
            (m, None) | (None, m) => m,
        }
    }
}
