//! Packed difficulty decoding and target comparison.
//!
//! A packed difficulty holds an 8-bit order above a 24-bit mantissa with an implicit
//! leading bit, so the raw difficulty is `(2^24 | mantissa) << order`. A digest `h` reaches
//! raw difficulty `D` when `h * D < 2^280`, which is the same as `h <= (2^280 - 1) / D`.

use beamhash_consensus::constants::{
    DIFFICULTY_INFINITE, DIFFICULTY_MANTISSA_BITS, DIFFICULTY_MAX_ORDER,
    TARGET_NORMALIZATION_BITS,
};
use beamhash_consensus::Hash256;
use primitive_types::{U256, U512};

const MANTISSA_LEADING_BIT: u32 = 1 << DIFFICULTY_MANTISSA_BITS;
const MANTISSA_MASK: u32 = MANTISSA_LEADING_BIT - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyError {
    Malformed { packed: u32 },
}

impl std::fmt::Display for DifficultyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifficultyError::Malformed { packed } => {
                write!(f, "packed difficulty {packed:#010x} overflows 256 bits")
            }
        }
    }
}

impl std::error::Error for DifficultyError {}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Difficulty(pub u32);

impl Difficulty {
    /// Difficulty 1: every digest reaches it.
    pub const EASIEST: Difficulty = Difficulty(0);
    /// No digest reaches it.
    pub const INFINITE: Difficulty = Difficulty(DIFFICULTY_INFINITE);

    /// `(order, mantissa)` with the leading bit restored, or `None` when the order is out of
    /// range.
    pub fn unpack(self) -> Option<(u32, u32)> {
        let order = self.0 >> DIFFICULTY_MANTISSA_BITS;
        if order > DIFFICULTY_MAX_ORDER {
            return None;
        }
        Some((order, MANTISSA_LEADING_BIT | (self.0 & MANTISSA_MASK)))
    }

    pub fn raw(self) -> Option<U256> {
        let (order, mantissa) = self.unpack()?;
        Some(U256::from(mantissa) << order)
    }

    pub fn target(self) -> U256 {
        decode_target(self.0)
    }

    pub fn is_target_reached(self, digest: &Hash256) -> bool {
        target_reached(digest, &self.target())
    }

    /// Packs a raw difficulty, rounding the mantissa down. Values below 2^24 pack to
    /// [`Difficulty::EASIEST`].
    pub fn from_raw(raw: U256) -> Self {
        let bits = raw.bits() as u32;
        if bits <= DIFFICULTY_MANTISSA_BITS {
            return Self::EASIEST;
        }
        let order = bits - DIFFICULTY_MANTISSA_BITS - 1;
        let mantissa = (raw >> order).low_u32() & MANTISSA_MASK;
        Self((order << DIFFICULTY_MANTISSA_BITS) | mantissa)
    }

    /// Difficulty as a float, relative to [`Difficulty::EASIEST`] being 1.0.
    pub fn to_f64(self) -> f64 {
        match self.unpack() {
            Some((order, mantissa)) => {
                f64::from(mantissa) * 2f64.powi(order as i32 - DIFFICULTY_MANTISSA_BITS as i32)
            }
            None => f64::INFINITY,
        }
    }
}

impl From<u32> for Difficulty {
    fn from(packed: u32) -> Self {
        Self(packed)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x} ({})", self.0, self.to_f64())
    }
}

pub fn try_decode_target(packed: u32) -> Result<U256, DifficultyError> {
    let raw = Difficulty(packed)
        .raw()
        .ok_or(DifficultyError::Malformed { packed })?;

    let limit = (U512::one() << TARGET_NORMALIZATION_BITS) - U512::one();
    let target = limit / U512::from(raw);
    let bytes = target.to_big_endian();
    Ok(U256::from_big_endian(&bytes[32..]))
}

/// Decodes a packed difficulty into the largest digest that still reaches it. Malformed
/// encodings decode to zero, which [`target_reached`] never accepts.
pub fn decode_target(packed: u32) -> U256 {
    try_decode_target(packed).unwrap_or_else(|_| U256::zero())
}

/// `digest` is read as a big-endian integer.
pub fn target_reached(digest: &Hash256, target: &U256) -> bool {
    if target.is_zero() {
        return false;
    }
    U256::from_big_endian(digest) <= *target
}
