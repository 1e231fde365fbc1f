//! Wire sizes and algorithm constants shared across verification.

/// Size of the work-unit header digest, in bytes.
pub const HEADER_SIZE: usize = 32;
/// Size of the prover nonce, in bytes.
pub const NONCE_SIZE: usize = 8;

pub const BEAM_N: u32 = 150;
pub const BEAM_K: u32 = 5;
/// Domain-separation selector for BeamHash I.
pub const BEAM_HASH_I_ROUNDS: u32 = 0;
/// Domain-separation selector for BeamHash II.
pub const BEAM_HASH_II_ROUNDS: u32 = 3;
/// Minimal encoding of 32 indices of 26 bits each.
pub const BEAM_SOLUTION_SIZE: usize = 104;

/// First eight bytes of every BLAKE2b personalization tag.
pub const PERSONALIZATION_PREFIX: &[u8; 8] = b"Beam-PoW";

/// Width of the packed difficulty mantissa; an implicit leading bit sits above it.
pub const DIFFICULTY_MANTISSA_BITS: u32 = 24;
/// Largest order whose raw difficulty still fits in 256 bits.
pub const DIFFICULTY_MAX_ORDER: u32 = 256 - DIFFICULTY_MANTISSA_BITS - 1;
/// Packed marker for infinite difficulty. Anything at or above it never reaches a target.
pub const DIFFICULTY_INFINITE: u32 = (DIFFICULTY_MAX_ORDER + 1) << DIFFICULTY_MANTISSA_BITS;
/// A digest reaches a difficulty when `digest * raw_difficulty` fits in this many bits.
pub const TARGET_NORMALIZATION_BITS: u32 = 256 + DIFFICULTY_MANTISSA_BITS;
