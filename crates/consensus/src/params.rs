//! Equihash parameter sets and the BeamHash variants built on them.

use crate::constants::{
    BEAM_HASH_II_ROUNDS, BEAM_HASH_I_ROUNDS, BEAM_K, BEAM_N, PERSONALIZATION_PREFIX,
};

/// BLAKE2b output is at most 64 bytes; every index slice is cut from one output.
const HASH_OUTPUT_BITS: u32 = 512;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct EquihashParams {
    pub n: u32,
    pub k: u32,
}

/// The (150, 5) parameter set shared by both BeamHash variants.
pub const BEAM_PARAMS: EquihashParams = EquihashParams {
    n: BEAM_N,
    k: BEAM_K,
};

impl EquihashParams {
    /// Returns `None` for parameter sets the verifier cannot represent: windows narrower
    /// than a byte, indices wider than 32 bits, or a solution that is not a whole number
    /// of bytes.
    pub fn new(n: u32, k: u32) -> Option<Self> {
        if k == 0 || n == 0 || n > HASH_OUTPUT_BITS || !n.is_multiple_of(k + 1) {
            return None;
        }
        let params = Self { n, k };
        if params.collision_bit_length() < 8 || params.index_bit_length() > 32 {
            return None;
        }
        if !((params.solution_indices() * params.index_bit_length()).is_multiple_of(8)) {
            return None;
        }
        Some(params)
    }

    /// Bits per collision window.
    pub fn collision_bit_length(&self) -> usize {
        (self.n / (self.k + 1)) as usize
    }

    pub fn collision_byte_length(&self) -> usize {
        self.collision_bit_length().div_ceil(8)
    }

    /// Bits per packed index in the minimal encoding.
    pub fn index_bit_length(&self) -> usize {
        self.collision_bit_length() + 1
    }

    /// Number of indices in a solution, `2^k`.
    pub fn solution_indices(&self) -> usize {
        1usize << self.k
    }

    /// Size of the minimal solution encoding, in bytes.
    pub fn solution_size(&self) -> usize {
        self.solution_indices() * self.index_bit_length() / 8
    }

    /// Exclusive upper bound for index values.
    pub fn index_limit(&self) -> u64 {
        1u64 << self.index_bit_length()
    }

    /// Bytes of BLAKE2b output consumed per index.
    pub fn hash_byte_length(&self) -> usize {
        self.n.div_ceil(8) as usize
    }

    pub fn indices_per_hash_output(&self) -> u32 {
        HASH_OUTPUT_BITS / self.n
    }

    /// Digest length the personalized BLAKE2b state is configured with.
    pub fn hash_output(&self) -> usize {
        self.indices_per_hash_output() as usize * self.hash_byte_length()
    }

    /// Length of a leaf value once every window is widened to whole bytes.
    pub fn expanded_hash_length(&self) -> usize {
        (self.k as usize + 1) * self.collision_byte_length()
    }
}

/// The two supported personalizations of Equihash (150, 5).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Variant {
    BeamHashI,
    BeamHashII,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::BeamHashI, Variant::BeamHashII];

    /// Maps an `(n, k, r)` triple to its variant. Every other combination is unsupported.
    pub fn from_params(n: u32, k: u32, r: u32) -> Option<Self> {
        if n != BEAM_N || k != BEAM_K {
            return None;
        }
        Self::from_rounds(r)
    }

    pub fn from_rounds(r: u32) -> Option<Self> {
        match r {
            BEAM_HASH_I_ROUNDS => Some(Self::BeamHashI),
            BEAM_HASH_II_ROUNDS => Some(Self::BeamHashII),
            _ => None,
        }
    }

    pub const fn rounds(self) -> u32 {
        match self {
            Self::BeamHashI => BEAM_HASH_I_ROUNDS,
            Self::BeamHashII => BEAM_HASH_II_ROUNDS,
        }
    }

    pub const fn params(self) -> EquihashParams {
        BEAM_PARAMS
    }

    pub fn personalization(self) -> [u8; 16] {
        personalization(self.params(), self.rounds())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BeamHashI => "BeamHashI",
            Self::BeamHashII => "BeamHashII",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds the 16-byte BLAKE2b personalization: `Beam-PoW`, little-endian `n`, little-endian
/// `k`, with the rounds selector stored in the final byte.
pub fn personalization(params: EquihashParams, rounds: u32) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(PERSONALIZATION_PREFIX);
    out[8..12].copy_from_slice(&params.n.to_le_bytes());
    out[12..16].copy_from_slice(&params.k.to_le_bytes());
    out[15] ^= rounds as u8;
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BEAM_SOLUTION_SIZE;

    #[test]
    fn beam_params_layout() {
        let params = BEAM_PARAMS;
        assert_eq!(EquihashParams::new(150, 5), Some(params));
        assert_eq!(params.collision_bit_length(), 25);
        assert_eq!(params.collision_byte_length(), 4);
        assert_eq!(params.index_bit_length(), 26);
        assert_eq!(params.solution_indices(), 32);
        assert_eq!(params.solution_size(), BEAM_SOLUTION_SIZE);
        assert_eq!(params.hash_byte_length(), 19);
        assert_eq!(params.indices_per_hash_output(), 3);
        assert_eq!(params.hash_output(), 57);
        assert_eq!(params.expanded_hash_length(), 24);
        assert_eq!(params.index_limit(), 1 << 26);
    }

    #[test]
    fn rejects_unrepresentable_params() {
        assert_eq!(EquihashParams::new(150, 0), None);
        assert_eq!(EquihashParams::new(151, 5), None);
        assert_eq!(EquihashParams::new(24, 5), None);
        assert_eq!(EquihashParams::new(200, 3), None);
        assert!(EquihashParams::new(200, 9).is_some());
        assert!(EquihashParams::new(60, 5).is_some());
    }

    #[test]
    fn variant_dispatch_is_closed() {
        assert_eq!(Variant::from_params(150, 5, 0), Some(Variant::BeamHashI));
        assert_eq!(Variant::from_params(150, 5, 3), Some(Variant::BeamHashII));
        assert_eq!(Variant::from_params(150, 5, 1), None);
        assert_eq!(Variant::from_params(144, 5, 0), None);
        assert_eq!(Variant::from_params(150, 4, 3), None);
        for variant in Variant::ALL {
            assert_eq!(Variant::from_rounds(variant.rounds()), Some(variant));
        }
    }

    #[test]
    fn personalization_separates_variants() {
        let first = Variant::BeamHashI.personalization();
        let second = Variant::BeamHashII.personalization();
        assert_eq!(&first[..8], b"Beam-PoW");
        assert_eq!(&first[8..12], &150u32.to_le_bytes());
        assert_eq!(&first[12..16], &5u32.to_le_bytes());
        assert_eq!(&second[..15], &first[..15]);
        assert_eq!(second[15], 3);
        assert_ne!(first, second);
    }
}
