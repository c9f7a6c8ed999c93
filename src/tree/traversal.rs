//! Tree walks
//!
//! One generic pre-order depth-first walk parameterized by a visitor
//! callback carries element snapshots, printing and serialization. A
//! separate queue-based breadth-first walk renders the tree one line per
//! level for human inspection; nothing else depends on it.

use std::collections::VecDeque;
use std::fmt::Display;

use crate::node::Node;

/// Pre-order walk: visit the node, then the left subtree, then the right
pub fn visit<T: Copy + Ord, F: FnMut(&Node<T>)>(node: &Node<T>, f: &mut F) {
    f(node);
    if let Node::Intermediate(inner) = node {
        visit(inner.left(), f);
        visit(inner.right(), f);
    }
}

/// Pre-order walk over leaves only
pub fn for_each_leaf<T: Copy + Ord, F: FnMut(&crate::node::LeafBlock<T>)>(
    node: &Node<T>,
    f: &mut F,
) {
    visit(node, &mut |n| {
        if let Node::Leaf(leaf) = n {
            f(leaf);
        }
    });
}

/// Mutable pre-order walk over leaves only
///
/// Sort redistribution uses this to wipe and refill leaves in place without
/// touching the structure.
pub fn for_each_leaf_mut<T: Copy + Ord, F: FnMut(&mut crate::node::LeafBlock<T>)>(
    node: &mut Node<T>,
    f: &mut F,
) {
    match node {
        Node::Leaf(leaf) => f(leaf),
        Node::Intermediate(inner) => {
            for_each_leaf_mut(inner.left_mut(), f);
            for_each_leaf_mut(inner.right_mut(), f);
        }
    }
}

/// Render the tree level by level, one line per level
///
/// Each leaf prints as its bracketed contents, each intermediate node as a
/// `*` marker with its children enqueued for the next level.
pub fn render_levels<T: Copy + Ord + Display>(root: &Node<T>) -> String {
    let mut out = String::new();
    let mut current: VecDeque<&Node<T>> = VecDeque::new();
    current.push_back(root);

    while !current.is_empty() {
        let mut next: VecDeque<&Node<T>> = VecDeque::new();
        let mut line = String::new();
        while let Some(node) = current.pop_front() {
            if !line.is_empty() {
                line.push(' ');
            }
            match node {
                Node::Leaf(leaf) => line.push_str(&leaf.to_string()),
                Node::Intermediate(inner) => {
                    line.push('*');
                    next.push_back(inner.left());
                    next.push_back(inner.right());
                }
            }
        }
        out.push_str(&line);
        out.push('\n');
        current = next;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::LeafBlock;

    fn sample() -> Node<i64> {
        Node::join(
            Node::Leaf(LeafBlock::from_values(4, vec![1, 2])),
            Node::join(
                Node::Leaf(LeafBlock::from_values(4, vec![3])),
                Node::Leaf(LeafBlock::from_values(4, vec![4, 5])),
            ),
        )
    }

    #[test]
    fn visit_is_preorder() {
        let mut sizes = Vec::new();
        visit(&sample(), &mut |n| sizes.push(n.size()));
        assert_eq!(sizes, vec![5, 2, 3, 1, 2]);
    }

    #[test]
    fn leaf_walk_sees_leaves_left_to_right() {
        let mut leaves = Vec::new();
        for_each_leaf(&sample(), &mut |leaf| leaves.push(leaf.to_elements()));
        assert_eq!(leaves, vec![vec![1, 2], vec![3], vec![4, 5]]);
    }

    #[test]
    fn mutable_walk_preserves_structure() {
        let mut node = sample();
        for_each_leaf_mut(&mut node, &mut |leaf| leaf.clear());
        assert_eq!(node.size(), 0);
        assert_eq!(node.leaf_count(), 3, "clearing leaves must not change shape");
    }

    #[test]
    fn levels_render_one_line_per_level() {
        let rendered = render_levels(&sample());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines, vec!["*", "[1, 2] *", "[3] [4, 5]"]);
    }
}
