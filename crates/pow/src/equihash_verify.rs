use crate::minimal::{check_indices, expand_array, IndexError};
use crate::seed::SeedState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyError {
    Indices(IndexError),
    Collision { level: u32 },
    OutOfOrder { level: u32 },
    DuplicateIndices { level: u32 },
    NonZeroRoot,
}

impl std::fmt::Display for VerifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyError::Indices(err) => write!(f, "{err}"),
            VerifyError::Collision { level } => {
                write!(f, "subtrees do not collide at level {level}")
            }
            VerifyError::OutOfOrder { level } => {
                write!(f, "index tree incorrectly ordered at level {level}")
            }
            VerifyError::DuplicateIndices { level } => {
                write!(f, "duplicate indices at level {level}")
            }
            VerifyError::NonZeroRoot => write!(f, "root hash of tree is non-zero"),
        }
    }
}

impl std::error::Error for VerifyError {}

impl From<IndexError> for VerifyError {
    fn from(err: IndexError) -> Self {
        VerifyError::Indices(err)
    }
}

/// The slice of seed output owned by `index`, widened to one right-aligned word per
/// collision window.
pub(crate) fn leaf_value(seed: &SeedState, index: u32) -> Vec<u8> {
    let params = seed.params();
    let per_output = params.indices_per_hash_output();

    let mut state = seed.state().clone();
    state.update(&(index / per_output).to_le_bytes());
    let hash = state.finalize();

    let byte_len = params.hash_byte_length();
    let start = (index % per_output) as usize * byte_len;
    expand_array(
        &hash.as_bytes()[start..start + byte_len],
        params.collision_bit_length(),
        0,
    )
}

pub(crate) fn xor_trimmed(left: &[u8], right: &[u8], trim: usize) -> Vec<u8> {
    left.iter()
        .zip(right.iter())
        .skip(trim)
        .map(|(a, b)| a ^ b)
        .collect()
}

fn validate_subtrees(
    left: &[u8],
    right: &[u8],
    left_indices: &[u32],
    right_indices: &[u32],
    trim: usize,
    level: u32,
) -> Result<(), VerifyError> {
    if left[..trim] != right[..trim] {
        Err(VerifyError::Collision { level })
    } else if left_indices >= right_indices {
        Err(VerifyError::OutOfOrder { level })
    } else if left_indices
        .iter()
        .any(|index| right_indices.contains(index))
    {
        Err(VerifyError::DuplicateIndices { level })
    } else {
        Ok(())
    }
}

/// Checks the collision tree bottom-up. A node at level `L` covers the contiguous run of
/// `2^L` indices starting at `pair * 2^L`, so each level needs only the previous level's
/// values and offsets into `indices`.
pub(crate) fn validate_tree(seed: &SeedState, indices: &[u32]) -> Result<(), VerifyError> {
    let params = seed.params();
    check_indices(params, indices)?;

    let trim = params.collision_byte_length();
    let mut values: Vec<Vec<u8>> = indices
        .iter()
        .map(|index| leaf_value(seed, *index))
        .collect();
    let mut width = 1;
    let mut level = 1;

    while values.len() > 1 {
        let mut next: Vec<Vec<u8>> = Vec::with_capacity(values.len() / 2);
        for (pair, children) in values.chunks_exact(2).enumerate() {
            let start = pair * 2 * width;
            let left_indices = &indices[start..start + width];
            let right_indices = &indices[start + width..start + 2 * width];
            validate_subtrees(
                &children[0],
                &children[1],
                left_indices,
                right_indices,
                trim,
                level,
            )?;
            next.push(xor_trimmed(&children[0], &children[1], trim));
        }
        values = next;
        width *= 2;
        level += 1;
    }

    if values[0].iter().all(|byte| *byte == 0) {
        Ok(())
    } else {
        Err(VerifyError::NonZeroRoot)
    }
}
