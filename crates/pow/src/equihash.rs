//! Equihash solution verification for the BeamHash variants.

use beamhash_log::log_debug;
use beamhash_primitives::ShapeError;

use crate::equihash_verify::validate_tree;
use crate::minimal::indices_from_minimal;
use crate::seed::SeedState;

pub use crate::equihash_verify::VerifyError;

/// Runs the full collision-tree check and reports the first rule that fails.
pub fn check_solution(seed: &SeedState, indices: &[u32]) -> Result<(), VerifyError> {
    validate_tree(seed, indices)
}

pub fn is_valid(seed: &SeedState, indices: &[u32]) -> bool {
    match check_solution(seed, indices) {
        Ok(()) => true,
        Err(err) => {
            log_debug!("rejecting {} solution: {err}", seed_label(seed));
            false
        }
    }
}

/// Unpacks a minimal-encoded solution and verifies it. A buffer of the wrong size is a
/// shape error rather than an invalid solution.
pub fn is_valid_minimal(seed: &SeedState, solution: &[u8]) -> Result<bool, ShapeError> {
    let indices = indices_from_minimal(seed.params(), solution)?;
    Ok(is_valid(seed, &indices))
}

fn seed_label(seed: &SeedState) -> &'static str {
    seed.variant().map_or("equihash", |variant| variant.as_str())
}
