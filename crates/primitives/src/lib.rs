//! Fixed-size work inputs, hashing helpers, and hex codecs.

pub mod hash;
pub mod hex;
pub mod work;

pub use hash::sha256;
pub use hex::{bytes_to_hex, hex_to_array, hex_to_bytes, HexError};
pub use work::{header_from_slice, nonce_from_slice, Header, Nonce, ShapeError};
