//! Tagged pre-order binary format
//!
//! Layout:
//!
//! - 1 byte: presence flag (`0` = empty tree, stream ends; `1` = non-empty)
//! - If present, one record per node in pre-order:
//!   - Leaf: tag `0`, an 8-byte platform-word element count, then that many
//!     fixed-width native-endian value encodings
//!   - Intermediate: tag `1` only; its two children follow, left before right
//!
//! No explicit subtree sizes are stored; the reader reconstructs the shape
//! recursively from the tags. The format carries no capacity field, so the
//! loader validates every leaf record against the receiving tree's capacity.

use std::io::{Read, Write};

use crate::node::{LeafBlock, Node};
use crate::tree::BlockTree;
use crate::value::Scalar;
use crate::{Result, TreeError};

const FLAG_EMPTY: u8 = 0;
const FLAG_PRESENT: u8 = 1;
const TAG_LEAF: u8 = 0;
const TAG_INTERMEDIATE: u8 = 1;

/// Serialize the tree into `writer`
pub fn save<T: Scalar, W: Write>(tree: &BlockTree<T>, writer: &mut W) -> Result<()> {
    match tree.root() {
        None => {
            writer.write_all(&[FLAG_EMPTY])?;
        }
        Some(root) => {
            writer.write_all(&[FLAG_PRESENT])?;
            write_node(root, writer)?;
        }
    }
    Ok(())
}

/// Rebuild the tree from `reader`
///
/// The incoming structure is parsed completely before it replaces the
/// current contents; on any failure the tree is left as it was.
pub fn load<T: Scalar, R: Read>(tree: &mut BlockTree<T>, reader: &mut R) -> Result<()> {
    let mut flag = [0u8; 1];
    reader.read_exact(&mut flag)?;
    let root = match flag[0] {
        FLAG_EMPTY => None,
        FLAG_PRESENT => Some(read_node(reader, tree.capacity())?),
        other => {
            return Err(TreeError::Corrupt(format!(
                "unknown presence flag {other}"
            )))
        }
    };
    tree.install_root(root);
    Ok(())
}

fn write_node<T: Scalar, W: Write>(node: &Node<T>, writer: &mut W) -> Result<()> {
    match node {
        Node::Leaf(leaf) => {
            writer.write_all(&[TAG_LEAF])?;
            writer.write_all(&(leaf.len() as u64).to_ne_bytes())?;
            let mut buf = vec![0u8; T::ENCODED_WIDTH];
            for value in leaf.to_elements() {
                value.encode(&mut buf);
                writer.write_all(&buf)?;
            }
        }
        Node::Intermediate(inner) => {
            writer.write_all(&[TAG_INTERMEDIATE])?;
            write_node(inner.left(), writer)?;
            write_node(inner.right(), writer)?;
        }
    }
    Ok(())
}

fn read_node<T: Scalar, R: Read>(reader: &mut R, capacity: usize) -> Result<Node<T>> {
    let mut tag = [0u8; 1];
    reader.read_exact(&mut tag)?;
    match tag[0] {
        TAG_LEAF => {
            let mut count_bytes = [0u8; 8];
            reader.read_exact(&mut count_bytes)?;
            let count = u64::from_ne_bytes(count_bytes) as usize;
            if count > capacity {
                return Err(TreeError::Corrupt(format!(
                    "leaf record holds {count} values, capacity is {capacity}"
                )));
            }
            let mut buf = vec![0u8; T::ENCODED_WIDTH];
            let mut values = Vec::with_capacity(count);
            for _ in 0..count {
                reader.read_exact(&mut buf)?;
                values.push(T::decode(&buf));
            }
            Ok(Node::Leaf(LeafBlock::from_values(capacity, values)))
        }
        TAG_INTERMEDIATE => {
            let left = read_node(reader, capacity)?;
            let right = read_node(reader, capacity)?;
            Ok(Node::join(left, right))
        }
        other => Err(TreeError::Corrupt(format!("unknown node tag {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::for_each_leaf;

    fn sample_tree() -> BlockTree<i64> {
        let mut tree = BlockTree::new(3);
        for v in [8, 3, 5, 1, 9, 2, 7] {
            tree.insert(v);
        }
        tree
    }

    #[test]
    fn round_trip_preserves_shape_and_order() {
        let tree = sample_tree();
        let mut bytes = Vec::new();
        save(&tree, &mut bytes).unwrap();

        let mut loaded: BlockTree<i64> = BlockTree::new(3);
        load(&mut loaded, &mut bytes.as_slice()).unwrap();

        assert_eq!(loaded.to_vec(), tree.to_vec());
        assert_eq!(loaded.leaf_count(), tree.leaf_count());

        let mut original_leaves = Vec::new();
        for_each_leaf(tree.root().unwrap(), &mut |l| {
            original_leaves.push(l.to_elements());
        });
        let mut loaded_leaves = Vec::new();
        for_each_leaf(loaded.root().unwrap(), &mut |l| {
            loaded_leaves.push(l.to_elements());
        });
        assert_eq!(loaded_leaves, original_leaves, "shape must be restored exactly");
    }

    #[test]
    fn empty_tree_is_one_byte() {
        let tree: BlockTree<i64> = BlockTree::new(4);
        let mut bytes = Vec::new();
        save(&tree, &mut bytes).unwrap();
        assert_eq!(bytes, vec![0]);

        let mut loaded: BlockTree<i64> = BlockTree::new(4);
        loaded.insert(1);
        load(&mut loaded, &mut bytes.as_slice()).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let bytes = vec![1u8, 9u8];
        let mut tree: BlockTree<i64> = BlockTree::new(4);
        assert!(matches!(
            load(&mut tree, &mut bytes.as_slice()),
            Err(TreeError::Corrupt(_))
        ));
    }

    #[test]
    fn overfull_leaf_record_is_rejected() {
        let mut tree = BlockTree::new(8);
        for v in 0i64..6 {
            tree.insert(v);
        }
        let mut bytes = Vec::new();
        save(&tree, &mut bytes).unwrap();

        // Same stream into a tree with a smaller capacity
        let mut small: BlockTree<i64> = BlockTree::new(2);
        assert!(matches!(
            load(&mut small, &mut bytes.as_slice()),
            Err(TreeError::Corrupt(_))
        ));
    }

    #[test]
    fn truncated_stream_leaves_tree_intact() {
        let tree = sample_tree();
        let mut bytes = Vec::new();
        save(&tree, &mut bytes).unwrap();
        bytes.truncate(bytes.len() - 3);

        let mut target: BlockTree<i64> = BlockTree::new(3);
        target.insert(42);
        assert!(load(&mut target, &mut bytes.as_slice()).is_err());
        assert_eq!(target.to_vec(), vec![42], "failed load must not clobber");
    }

    #[test]
    fn loaded_tree_is_marked_unsorted() {
        let mut tree = sample_tree();
        tree.sort().unwrap();
        let mut bytes = Vec::new();
        save(&tree, &mut bytes).unwrap();

        let mut loaded: BlockTree<i64> = BlockTree::new(3);
        load(&mut loaded, &mut bytes.as_slice()).unwrap();
        assert!(!loaded.is_sorted());
    }
}
