//! # Bounded-fanout order-statistics tree
//!
//! An in-memory ordered multiset stored in fixed-capacity leaf blocks linked
//! through a binary hierarchy of intermediate nodes:
//!
//! 1. **Leaf blocks**: up to `capacity` values per block, no gaps
//! 2. **Intermediate nodes**: exactly two owned children, size = sum of children
//! 3. **Index resolution**: positional access via subtree sizes, O(depth)
//! 4. **Splitting, not rotation**: an over-full leaf is replaced by an
//!    intermediate node over two half-leaves; depth stays practically bounded
//! 5. **Persistence**: a tagged pre-order binary format and a line-per-leaf
//!    text format, both round-tripping through scoped file handles
//!
//! ## Usage Example
//!
//! ```
//! use blocktree::BlockTree;
//!
//! let mut tree: BlockTree<i64> = BlockTree::new(4);
//! for v in [3, 1, 4, 1, 5] {
//!     tree.insert(v);
//! }
//! assert_eq!(tree.size(), 5);
//! tree.sort().unwrap();
//! assert_eq!(tree.get_by_index(0).unwrap(), 1);
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

// Core modules - each implements a key component of the tree
pub mod value; // Fixed-width ordered scalar values
pub mod node; // Leaf and intermediate node variants
pub mod tree; // Order-statistics engine
pub mod persist; // Binary and text persistence
pub mod bench; // Timing harness (collaborator)
pub mod menu; // Interactive dispatch loop (collaborator)

// Re-exports for convenience
pub use node::{Intermediate, LeafBlock, Node};
pub use tree::BlockTree;
pub use value::Scalar;

use thiserror::Error;

/// Errors surfaced by tree operations
///
/// Capacity overflow never appears here: it is an internal signal, always
/// resolved by splitting the affected leaf.
#[derive(Error, Debug)]
pub enum TreeError {
    /// Positional access outside `[0, size)`
    #[error("index {index} out of range for tree of size {size}")]
    OutOfRange {
        /// Requested index
        index: usize,
        /// Tree size at the time of the request
        size: usize,
    },

    /// Order-preserving insert attempted on a tree that is not sorted
    #[error("tree is not sorted; call sort() before order-preserving insert")]
    NotSorted,

    /// Broken structural invariant (should be unreachable)
    #[error("inconsistent tree state: {0}")]
    InvalidState(String),

    /// File could not be opened, read or written
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data does not describe a valid tree
    #[error("malformed tree data: {0}")]
    Corrupt(String),
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, TreeError>;
