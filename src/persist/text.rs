//! Line-per-leaf text format
//!
//! One line per leaf in pre-order: the literal token `LeafNode:` followed by
//! space-separated value tokens in the leaf's stored order. Intermediate
//! nodes produce no output. Loading re-inserts every token, in file order,
//! through the ordinary unordered insert path: the on-disk shape is not
//! restored, only the values and their relative order within each line.

use std::io::{BufRead, Write};

use crate::tree::{for_each_leaf, BlockTree};
use crate::value::Scalar;
use crate::{Result, TreeError};

const LEAF_TOKEN: &str = "LeafNode:";

/// Write one `LeafNode:` line per leaf into `writer`
pub fn save<T: Scalar, W: Write>(tree: &BlockTree<T>, writer: &mut W) -> Result<()> {
    let Some(root) = tree.root() else {
        return Ok(());
    };
    let mut result = Ok(());
    for_each_leaf(root, &mut |leaf| {
        if result.is_err() {
            return;
        }
        result = write_leaf_line(&leaf.to_elements(), writer);
    });
    result
}

fn write_leaf_line<T: Scalar, W: Write>(values: &[T], writer: &mut W) -> Result<()> {
    write!(writer, "{LEAF_TOKEN}")?;
    for value in values {
        write!(writer, " {value}")?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Rebuild the tree from `LeafNode:` lines
///
/// Values go through the ordinary insert path into a temporary tree, which
/// replaces the current contents only once the whole stream parsed.
pub fn load<T: Scalar, R: BufRead>(tree: &mut BlockTree<T>, reader: &mut R) -> Result<()> {
    let mut staged: BlockTree<T> = BlockTree::new(tree.capacity());
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let rest = line.strip_prefix(LEAF_TOKEN).ok_or_else(|| {
            TreeError::Corrupt(format!("line {} does not start with {LEAF_TOKEN}", line_no + 1))
        })?;
        for token in rest.split_whitespace() {
            let value: T = token.parse().map_err(|_| {
                TreeError::Corrupt(format!("invalid value '{token}' on line {}", line_no + 1))
            })?;
            staged.insert(value);
        }
    }
    *tree = staged;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_emits_one_line_per_leaf() {
        let mut tree: BlockTree<i64> = BlockTree::new(2);
        for v in [1, 2, 3] {
            tree.insert(v);
        }
        let mut out = Vec::new();
        save(&tree, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), tree.leaf_count());
        assert!(text.lines().all(|l| l.starts_with("LeafNode:")));
    }

    #[test]
    fn empty_tree_emits_nothing() {
        let tree: BlockTree<i64> = BlockTree::new(2);
        let mut out = Vec::new();
        save(&tree, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn round_trip_preserves_values() {
        let mut tree: BlockTree<i64> = BlockTree::new(3);
        for v in [9, -4, 6, 1, 8] {
            tree.insert(v);
        }
        let mut out = Vec::new();
        save(&tree, &mut out).unwrap();

        let mut loaded: BlockTree<i64> = BlockTree::new(3);
        load(&mut loaded, &mut out.as_slice()).unwrap();

        let mut expected = tree.to_vec();
        let mut actual = loaded.to_vec();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected, "value multiset must survive the trip");
    }

    #[test]
    fn garbage_line_is_rejected_without_clobbering() {
        let mut tree: BlockTree<i64> = BlockTree::new(3);
        tree.insert(7);
        let text = b"LeafNode: 1 2\nnot a leaf line\n";
        assert!(matches!(
            load(&mut tree, &mut text.as_slice()),
            Err(TreeError::Corrupt(_))
        ));
        assert_eq!(tree.to_vec(), vec![7]);
    }

    #[test]
    fn bad_token_is_rejected() {
        let mut tree: BlockTree<i64> = BlockTree::new(3);
        let text = b"LeafNode: 1 banana 3\n";
        assert!(matches!(
            load(&mut tree, &mut text.as_slice()),
            Err(TreeError::Corrupt(_))
        ));
    }
}
