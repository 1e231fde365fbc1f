//! Minimal (bit-packed) solution encoding.

use beamhash_consensus::EquihashParams;
use beamhash_primitives::ShapeError;

const INDEX_BYTES: usize = std::mem::size_of::<u32>();

/// An index list that cannot be a solution for the parameter set, whether it is being
/// packed or validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexError {
    IndexCount { expected: usize, got: usize },
    IndexOutOfRange(u32),
}

impl std::fmt::Display for IndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexError::IndexCount { expected, got } => {
                write!(f, "solution needs {expected} indices, got {got}")
            }
            IndexError::IndexOutOfRange(index) => {
                write!(f, "index {index} does not fit the packed width")
            }
        }
    }
}

impl std::error::Error for IndexError {}

/// Count and range checks shared by the encoder and the validator.
pub(crate) fn check_indices(params: EquihashParams, indices: &[u32]) -> Result<(), IndexError> {
    let expected = params.solution_indices();
    if indices.len() != expected {
        return Err(IndexError::IndexCount {
            expected,
            got: indices.len(),
        });
    }
    match indices
        .iter()
        .find(|index| u64::from(**index) >= params.index_limit())
    {
        Some(index) => Err(IndexError::IndexOutOfRange(*index)),
        None => Ok(()),
    }
}

/// Splits `vin` into consecutive big-endian `bit_len`-bit words and writes each one
/// right-aligned into `bit_len.div_ceil(8) + byte_pad` output bytes. Trailing bits that do
/// not fill a whole word are dropped. `bit_len` must be in `8..=32`.
pub(crate) fn expand_array(vin: &[u8], bit_len: usize, byte_pad: usize) -> Vec<u8> {
    let out_width = bit_len.div_ceil(8) + byte_pad;
    let words = vin.len() * 8 / bit_len;
    if out_width * 8 == bit_len {
        return vin[..words * out_width].to_vec();
    }

    let mask: u64 = (1 << bit_len) - 1;
    let mut out = vec![0u8; words * out_width];
    let mut acc_bits = 0;
    let mut acc_value: u64 = 0;
    let mut j = 0;

    for byte in vin {
        acc_value = (acc_value << 8) | u64::from(*byte);
        acc_bits += 8;

        if acc_bits >= bit_len {
            acc_bits -= bit_len;
            let word = (acc_value >> acc_bits) & mask;
            for x in byte_pad..out_width {
                out[j + x] = (word >> (8 * (out_width - x - 1))) as u8;
            }
            j += out_width;
        }
    }

    out
}

/// Inverse of [`expand_array`]: packs right-aligned words back into a contiguous bit
/// string. The total bit count must be a multiple of eight.
pub(crate) fn compress_array(vin: &[u8], bit_len: usize, byte_pad: usize) -> Vec<u8> {
    let in_width = bit_len.div_ceil(8) + byte_pad;
    let out_len = (vin.len() / in_width) * bit_len / 8;
    let mask: u64 = (1 << bit_len) - 1;
    let mut out = vec![0u8; out_len];
    let mut acc_bits = 0;
    let mut acc_value: u64 = 0;
    let mut j = 0;

    for slot in out.iter_mut() {
        if acc_bits < 8 {
            let word = vin[j + byte_pad..j + in_width]
                .iter()
                .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte));
            acc_value = (acc_value << bit_len) | (word & mask);
            acc_bits += bit_len;
            j += in_width;
        }
        acc_bits -= 8;
        *slot = (acc_value >> acc_bits) as u8;
    }

    out
}

pub fn indices_from_minimal(
    params: EquihashParams,
    minimal: &[u8],
) -> Result<Vec<u32>, ShapeError> {
    let expected = params.solution_size();
    if minimal.len() != expected {
        return Err(ShapeError::SolutionSize {
            expected,
            got: minimal.len(),
        });
    }

    let bit_len = params.index_bit_length();
    let byte_pad = INDEX_BYTES - bit_len.div_ceil(8);
    let expanded = expand_array(minimal, bit_len, byte_pad);
    Ok(expanded
        .chunks_exact(INDEX_BYTES)
        .map(|word| u32::from_be_bytes([word[0], word[1], word[2], word[3]]))
        .collect())
}

pub fn minimal_from_indices(
    params: EquihashParams,
    indices: &[u32],
) -> Result<Vec<u8>, IndexError> {
    check_indices(params, indices)?;

    let bit_len = params.index_bit_length();
    let byte_pad = INDEX_BYTES - bit_len.div_ceil(8);
    let words: Vec<u8> = indices.iter().flat_map(|index| index.to_be_bytes()).collect();
    Ok(compress_array(&words, bit_len, byte_pad))
}
