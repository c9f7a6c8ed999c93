//! Fixed-width ordered scalar values
//!
//! The tree stores any totally-ordered scalar that has a raw fixed-width
//! binary encoding. The encoding is the in-memory representation
//! (native-endian) and is deliberately not portable across machines with
//! differing widths or byte order; the binary format documents this.

use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A value the tree can store and persist.
///
/// `ENCODED_WIDTH` bytes of native-endian representation per value. `Display`
/// and `FromStr` carry the text format; `Ord` carries sorting and the
/// order-preserving insert mode.
pub trait Scalar: Copy + Ord + Display + FromStr + Debug {
    /// Fixed encoded width in bytes
    const ENCODED_WIDTH: usize;

    /// Write the native-endian representation into `buf`
    ///
    /// `buf` must be exactly `ENCODED_WIDTH` bytes.
    fn encode(&self, buf: &mut [u8]);

    /// Read a value back from its native-endian representation
    ///
    /// `buf` must be exactly `ENCODED_WIDTH` bytes.
    fn decode(buf: &[u8]) -> Self;
}

macro_rules! impl_scalar_for_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const ENCODED_WIDTH: usize = std::mem::size_of::<$ty>();

                fn encode(&self, buf: &mut [u8]) {
                    buf.copy_from_slice(&self.to_ne_bytes());
                }

                fn decode(buf: &[u8]) -> Self {
                    let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                    bytes.copy_from_slice(buf);
                    <$ty>::from_ne_bytes(bytes)
                }
            }
        )*
    };
}

impl_scalar_for_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_is_identity() {
        let mut buf = [0u8; 8];
        for v in [i64::MIN, -1, 0, 1, 42, i64::MAX] {
            v.encode(&mut buf);
            assert_eq!(i64::decode(&buf), v);
        }
    }

    #[test]
    fn width_matches_type_size() {
        assert_eq!(<i32 as Scalar>::ENCODED_WIDTH, 4);
        assert_eq!(<u64 as Scalar>::ENCODED_WIDTH, 8);
        assert_eq!(<i128 as Scalar>::ENCODED_WIDTH, 16);
    }
}
