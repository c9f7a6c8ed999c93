//! Order-statistics engine
//!
//! Owns the root node and implements index resolution, the three insert
//! paths, removal with structural collapse, bulk sort with in-place
//! redistribution, and the sortedness state machine:
//!
//! - `Empty` ⇄ `Unordered` ⇄ `Sorted`
//! - `insert`/`insert_by_index` move `Sorted → Unordered`
//! - `sort()` moves `Unordered → Sorted`
//! - `insert_with_order_save` requires `Sorted` and keeps it
//! - `clear()` moves any state to `Empty`
//!
//! Every recursive mutation takes its node by value and returns the
//! replacement subtree (`None` when the subtree vanished); the caller grafts
//! the result into its own slot. Splits and collapses propagate through
//! these return values, never through mutation of a borrowed child.

mod traversal;

pub use traversal::{for_each_leaf, for_each_leaf_mut, render_levels, visit};

use std::fmt;

use tracing::debug;

use crate::node::{LeafBlock, Node};
use crate::{Result, TreeError};

/// Ordered multiset over fixed-capacity leaf blocks
#[derive(Debug, Clone)]
pub struct BlockTree<T> {
    root: Option<Node<T>>,
    capacity: usize,
    is_sorted: bool,
}

impl<T: Copy + Ord> BlockTree<T> {
    /// Create an empty tree whose leaves hold up to `capacity` values
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "leaf capacity must be positive");
        Self {
            root: None,
            capacity,
            is_sorted: false,
        }
    }

    /// Leaf capacity, fixed for the lifetime of the tree
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored values
    pub fn size(&self) -> usize {
        self.root.as_ref().map_or(0, Node::size)
    }

    /// True when no values are stored
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// True when the last bulk sort still holds
    pub fn is_sorted(&self) -> bool {
        self.is_sorted
    }

    /// Number of leaves in the tree (empty leaves included)
    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, Node::leaf_count)
    }

    /// Drop all values and structure
    pub fn clear(&mut self) {
        self.root = None;
        self.is_sorted = false;
    }

    /// Snapshot of all values in canonical depth-first order
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.size());
        if let Some(root) = &self.root {
            root.collect(&mut out);
        }
        out
    }

    /// Insert a value into some leaf, splitting on overflow
    ///
    /// Descends into the smaller child at each intermediate node (ties go
    /// left). Clears the sortedness flag: appending does not preserve order.
    pub fn insert(&mut self, value: T) {
        let root = match self.root.take() {
            None => {
                let mut leaf = LeafBlock::new(self.capacity);
                leaf.add(value);
                Node::Leaf(leaf)
            }
            Some(node) => insert_unordered(node, value, self.capacity),
        };
        self.root = Some(root);
        self.is_sorted = false;
    }

    /// Insert a value so it ends up at position `index`
    ///
    /// Fails with [`TreeError::OutOfRange`] unless `index < size()`. Clears
    /// the sortedness flag.
    pub fn insert_by_index(&mut self, index: usize, value: T) -> Result<()> {
        let size = self.size();
        if index >= size {
            return Err(TreeError::OutOfRange { index, size });
        }
        // size > 0, so the root exists
        let root = self.root.take().ok_or_else(|| {
            TreeError::InvalidState("non-zero size with no root".into())
        })?;
        self.root = Some(insert_positional(root, index, value, self.capacity));
        self.is_sorted = false;
        Ok(())
    }

    /// Insert a value without breaking ascending order
    ///
    /// Requires the tree to be sorted; fails with [`TreeError::NotSorted`]
    /// otherwise and leaves the tree untouched. Descends by comparing the
    /// value against the left subtree's maximum, then inserts at the leaf's
    /// ascending position with the usual split-on-overflow behavior.
    pub fn insert_with_order_save(&mut self, value: T) -> Result<()> {
        if !self.is_sorted {
            return Err(TreeError::NotSorted);
        }
        let root = match self.root.take() {
            None => {
                let mut leaf = LeafBlock::new(self.capacity);
                leaf.add(value);
                Node::Leaf(leaf)
            }
            Some(node) => insert_ordered(node, value, self.capacity),
        };
        self.root = Some(root);
        Ok(())
    }

    /// Value at position `index` under the canonical traversal order
    pub fn get_by_index(&self, index: usize) -> Result<T> {
        let size = self.size();
        if index >= size {
            return Err(TreeError::OutOfRange { index, size });
        }
        let root = self.root.as_ref().ok_or_else(|| {
            TreeError::InvalidState("non-zero size with no root".into())
        })?;
        get_at(root, index)
            .ok_or_else(|| TreeError::InvalidState("index resolution missed its leaf".into()))
    }

    /// Remove and return the value at position `index`
    ///
    /// A leaf emptied by the removal is collapsed out of the structure; the
    /// collapse check repeats at every ancestor on the unwind.
    pub fn remove_by_index(&mut self, index: usize) -> Result<T> {
        let size = self.size();
        if index >= size {
            return Err(TreeError::OutOfRange { index, size });
        }
        let root = self.root.take().ok_or_else(|| {
            TreeError::InvalidState("non-zero size with no root".into())
        })?;
        let (removed, replacement) = remove_at(root, index);
        self.root = replacement;
        removed.ok_or_else(|| TreeError::InvalidState("index resolution missed its leaf".into()))
    }

    /// Remove every occurrence of `value`; returns how many were removed
    ///
    /// Visits every leaf, then collapses any leaf emptied by the sweep.
    /// Removing values from an ascending sequence keeps it ascending, so the
    /// sortedness flag is preserved.
    pub fn remove(&mut self, value: T) -> usize {
        let Some(mut root) = self.root.take() else {
            return 0;
        };
        let mut removed = 0;
        for_each_leaf_mut(&mut root, &mut |leaf| {
            removed += leaf.remove_value(value);
        });
        if removed > 0 {
            debug!(removed, "value sweep complete, pruning empty leaves");
        }
        self.root = prune(root);
        removed
    }

    /// Sort all values ascending, redistributing across the existing leaves
    ///
    /// The tree's shape is unchanged: leaves are wiped in place and refilled
    /// depth-first with `⌈N/k⌉` values each until the pool is exhausted.
    /// Returns `Ok(false)` on an empty tree (nothing to sort, flag stays
    /// down). A non-empty tree with no leaves is a broken invariant and
    /// yields [`TreeError::InvalidState`].
    pub fn sort(&mut self) -> Result<bool> {
        let Some(root) = self.root.as_mut() else {
            self.is_sorted = false;
            return Ok(false);
        };
        let mut values = Vec::with_capacity(root.size());
        root.collect(&mut values);
        if values.is_empty() {
            self.is_sorted = false;
            return Ok(false);
        }
        let leaves = root.leaf_count();
        if leaves == 0 {
            return Err(TreeError::InvalidState(
                "non-empty tree with zero leaves".into(),
            ));
        }
        values.sort();
        let quota = (values.len() + leaves - 1) / leaves;
        debug!(values = values.len(), leaves, quota, "redistributing sorted values");
        let mut pool = values.into_iter();
        for_each_leaf_mut(root, &mut |leaf| {
            leaf.clear();
            leaf.refill(&mut pool, quota);
        });
        self.is_sorted = true;
        Ok(true)
    }

    /// Root node, if any (persistence walks the structure directly)
    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_ref()
    }

    /// Install a freshly loaded root, discarding the current contents
    ///
    /// Loaded trees have unknown history, so the sortedness flag drops.
    pub(crate) fn install_root(&mut self, root: Option<Node<T>>) {
        self.root = root;
        self.is_sorted = false;
    }
}

impl<T: Copy + Ord + fmt::Display> BlockTree<T> {
    /// Human-readable level-by-level layout
    pub fn render_levels(&self) -> String {
        match &self.root {
            None => "Empty Tree\n".to_string(),
            Some(root) => render_levels(root),
        }
    }
}

impl<T: Copy + Ord + fmt::Display> fmt::Display for BlockTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            None => writeln!(f, "Empty Tree"),
            Some(root) => {
                let mut result = Ok(());
                for_each_leaf(root, &mut |leaf| {
                    if result.is_ok() {
                        result = writeln!(f, "LeafBlock(len = {}): {}", leaf.len(), leaf);
                    }
                });
                result
            }
        }
    }
}

/// Split `capacity + 1` values at their midpoint into two fresh leaves
///
/// The incoming value has already been placed at its target position, so
/// each half holds at most `capacity` values for every `capacity >= 1`.
fn split_values<T: Copy + Ord>(capacity: usize, mut values: Vec<T>) -> Node<T> {
    let tail = values.split_off(values.len() / 2);
    debug!(left = values.len(), right = tail.len(), "leaf split");
    Node::join(
        Node::Leaf(LeafBlock::from_values(capacity, values)),
        Node::Leaf(LeafBlock::from_values(capacity, tail)),
    )
}

fn insert_unordered<T: Copy + Ord>(node: Node<T>, value: T, capacity: usize) -> Node<T> {
    match node {
        Node::Leaf(mut leaf) => {
            if leaf.add(value) {
                Node::Leaf(leaf)
            } else {
                let mut values = leaf.take_elements();
                values.push(value);
                split_values(capacity, values)
            }
        }
        Node::Intermediate(inner) => {
            let (left, right) = inner.into_children();
            if left.size() <= right.size() {
                Node::join(insert_unordered(left, value, capacity), right)
            } else {
                Node::join(left, insert_unordered(right, value, capacity))
            }
        }
    }
}

fn insert_positional<T: Copy + Ord>(
    node: Node<T>,
    index: usize,
    value: T,
    capacity: usize,
) -> Node<T> {
    match node {
        Node::Leaf(mut leaf) => {
            if leaf.insert_at(index, value) {
                Node::Leaf(leaf)
            } else {
                let mut values = leaf.take_elements();
                values.insert(index, value);
                split_values(capacity, values)
            }
        }
        Node::Intermediate(inner) => {
            let (left, right) = inner.into_children();
            let left_size = left.size();
            if index < left_size {
                Node::join(insert_positional(left, index, value, capacity), right)
            } else {
                Node::join(
                    left,
                    insert_positional(right, index - left_size, value, capacity),
                )
            }
        }
    }
}

fn insert_ordered<T: Copy + Ord>(node: Node<T>, value: T, capacity: usize) -> Node<T> {
    match node {
        Node::Leaf(mut leaf) => {
            let pos = leaf.ascending_position(value);
            if leaf.insert_at(pos, value) {
                Node::Leaf(leaf)
            } else {
                let mut values = leaf.take_elements();
                values.insert(pos, value);
                split_values(capacity, values)
            }
        }
        Node::Intermediate(inner) => {
            let (left, right) = inner.into_children();
            match left.max() {
                Some(max) if value <= max => {
                    Node::join(insert_ordered(left, value, capacity), right)
                }
                // Left subtree empty, or the value belongs to the right
                _ => Node::join(left, insert_ordered(right, value, capacity)),
            }
        }
    }
}

fn get_at<T: Copy + Ord>(node: &Node<T>, index: usize) -> Option<T> {
    match node {
        Node::Leaf(leaf) => leaf.get_at(index),
        Node::Intermediate(inner) => {
            let left_size = inner.left().size();
            if index < left_size {
                get_at(inner.left(), index)
            } else {
                get_at(inner.right(), index - left_size)
            }
        }
    }
}

/// Remove at a resolved index, collapsing emptied subtrees on the unwind
///
/// Returns the removed value and the replacement subtree; `None` means the
/// subtree is gone and the parent must graft its surviving sibling (or
/// vanish too).
fn remove_at<T: Copy + Ord>(node: Node<T>, index: usize) -> (Option<T>, Option<Node<T>>) {
    match node {
        Node::Leaf(mut leaf) => {
            let removed = leaf.remove_at(index);
            if leaf.is_empty() {
                debug!("leaf emptied by removal, collapsing");
                (removed, None)
            } else {
                (removed, Some(Node::Leaf(leaf)))
            }
        }
        Node::Intermediate(inner) => {
            let (left, right) = inner.into_children();
            let left_size = left.size();
            if index < left_size {
                let (removed, replacement) = remove_at(left, index);
                (removed, graft(replacement, Some(right)))
            } else {
                let (removed, replacement) = remove_at(right, index - left_size);
                (removed, graft(Some(left), replacement))
            }
        }
    }
}

/// Rebuild an intermediate slot after a child mutation
///
/// Both present: rejoin. One gone: the survivor takes the parent's place,
/// unless it carries no values at all (then the whole slot vanishes).
fn graft<T: Copy + Ord>(left: Option<Node<T>>, right: Option<Node<T>>) -> Option<Node<T>> {
    match (left, right) {
        (Some(l), Some(r)) => Some(Node::join(l, r)),
        (Some(survivor), None) | (None, Some(survivor)) => {
            if survivor.size() == 0 {
                None
            } else {
                Some(survivor)
            }
        }
        (None, None) => None,
    }
}

/// Drop empty leaves and promote lone survivors, bottom-up
fn prune<T: Copy + Ord>(node: Node<T>) -> Option<Node<T>> {
    match node {
        Node::Leaf(leaf) => {
            if leaf.is_empty() {
                None
            } else {
                Some(Node::Leaf(leaf))
            }
        }
        Node::Intermediate(inner) => {
            let (left, right) = inner.into_children();
            graft(prune(left), prune(right))
        }
    }
}
