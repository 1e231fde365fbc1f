//! BeamHash proof-of-work verification and share classification.

pub mod difficulty;
pub mod equihash;
mod equihash_verify;
pub mod minimal;
pub mod seed;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use difficulty::{decode_target, Difficulty, DifficultyError};
pub use equihash::{check_solution, is_valid, is_valid_minimal, VerifyError};
pub use minimal::IndexError;
pub use seed::{build_seed, SeedState, UnsupportedParameters};
pub use validation::{
    classify, classify_batch, solution_digest, target_reached, verify, PowError,
    ShareSubmission, Verdict,
};
