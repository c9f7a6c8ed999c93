//! Round-trip persistence
//!
//! Two on-disk representations:
//!
//! - **Binary**: a presence byte, then the structure in tagged pre-order.
//!   Restores the exact tree shape. Values are raw native-endian bytes, so
//!   the format is not portable across differing widths or byte order.
//! - **Text**: one `LeafNode:` line per leaf with space-separated value
//!   tokens. Reloading re-inserts every token through the ordinary insert
//!   path; only the value sequence survives, not the shape.
//!
//! Both loaders build into a temporary root and swap it in only on full
//! success, so a failed read never leaves the tree partially overwritten.
//! The path-level wrappers own the file handle for exactly the duration of
//! the operation.

pub mod binary;
pub mod text;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::tree::BlockTree;
use crate::value::Scalar;
use crate::Result;

/// Write the tree to `path` in the binary format
pub fn save_binary_file<T: Scalar>(tree: &BlockTree<T>, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    binary::save(tree, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), size = tree.size(), "tree saved (binary)");
    Ok(())
}

/// Replace the tree's contents from a binary file
pub fn load_binary_file<T: Scalar>(tree: &mut BlockTree<T>, path: &Path) -> Result<()> {
    let mut reader = BufReader::new(File::open(path)?);
    binary::load(tree, &mut reader)?;
    debug!(path = %path.display(), size = tree.size(), "tree loaded (binary)");
    Ok(())
}

/// Write the tree to `path` in the text format
pub fn save_text_file<T: Scalar>(tree: &BlockTree<T>, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    text::save(tree, &mut writer)?;
    writer.flush()?;
    debug!(path = %path.display(), size = tree.size(), "tree saved (text)");
    Ok(())
}

/// Replace the tree's contents from a text file
pub fn load_text_file<T: Scalar>(tree: &mut BlockTree<T>, path: &Path) -> Result<()> {
    let mut reader = BufReader::new(File::open(path)?);
    text::load(tree, &mut reader)?;
    debug!(path = %path.display(), size = tree.size(), "tree loaded (text)");
    Ok(())
}
