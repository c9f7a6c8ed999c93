//! Node variants of the tree
//!
//! A node is either a leaf block holding values or an intermediate node
//! holding exactly two subtrees. The variant set is closed and matched
//! explicitly at every call site; there is no downcasting anywhere.

mod intermediate;
mod leaf;

pub use intermediate::Intermediate;
pub use leaf::LeafBlock;

/// Tree node: leaf block or intermediate pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node<T> {
    /// Capacity-bounded block of values
    Leaf(LeafBlock<T>),
    /// Two owned subtrees, no direct values
    Intermediate(Intermediate<T>),
}

impl<T: Copy + Ord> Node<T> {
    /// Join two subtrees under a fresh intermediate node
    pub fn join(left: Node<T>, right: Node<T>) -> Self {
        Node::Intermediate(Intermediate::new(left, right))
    }

    /// Number of values stored beneath this node
    pub fn size(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.len(),
            Node::Intermediate(inner) => inner.size(),
        }
    }

    /// Maximum value beneath this node, `None` iff the subtree is empty
    pub fn max(&self) -> Option<T> {
        match self {
            Node::Leaf(leaf) => leaf.max(),
            Node::Intermediate(inner) => inner.max(),
        }
    }

    /// Append all values beneath this node in canonical depth-first order
    pub fn collect(&self, into: &mut Vec<T>) {
        match self {
            Node::Leaf(leaf) => into.extend(leaf.to_elements()),
            Node::Intermediate(inner) => inner.collect(into),
        }
    }

    /// Number of leaves beneath this node (empty leaves included)
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 1,
            Node::Intermediate(inner) => inner.left().leaf_count() + inner.right().leaf_count(),
        }
    }
}
