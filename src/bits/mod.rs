//! Fixed-length bit vectors and integer/text conversions.
//!
//! # Addressing
//!
//! Logical index 0 is the least-significant bit. Text renderings are
//! big-endian: the first character is bit `n - 1`, the last is bit 0.
//! Indexed access ([`BitVector::get_bit`], [`BitVector::set_bit`]) uses the
//! logical, little-endian index.
//!
//! ```
//! use u_bitga::bits::BitVector;
//!
//! let v: BitVector = "100".parse().unwrap();
//! assert_eq!(v.get_bit(2).unwrap(), 1);
//! assert_eq!(v.get_bit(0).unwrap(), 0);
//! assert_eq!(v.to_string(), "100");
//! ```

mod convert;
mod vector;

pub use convert::{
    bin_text_to_dec, count_bits, dec_to_bin_text, dec_to_bin_text_padded, random_bit_text,
};
pub use vector::BitVector;
