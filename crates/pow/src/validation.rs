//! Share classification: solution validity first, then the block and share targets.

use beamhash_consensus::constants::{BEAM_HASH_I_ROUNDS, BEAM_K, BEAM_N};
use beamhash_consensus::Hash256;
use beamhash_log::{log_debug, log_trace};
use beamhash_primitives::{header_from_slice, nonce_from_slice, sha256, ShapeError};
use rayon::prelude::*;

use crate::difficulty::{decode_target, target_reached as digest_reaches_target};
use crate::equihash;
use crate::seed::{build_seed, SeedState, UnsupportedParameters};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum Verdict {
    Invalid = 0,
    LowDifficulty = 1,
    ValidShare = 2,
    ValidBlock = 3,
}

impl Verdict {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Invalid),
            1 => Some(Self::LowDifficulty),
            2 => Some(Self::ValidShare),
            3 => Some(Self::ValidBlock),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::LowDifficulty => "low-difficulty",
            Self::ValidShare => "valid-share",
            Self::ValidBlock => "valid-block",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowError {
    Shape(ShapeError),
    UnsupportedParameters(UnsupportedParameters),
}

impl std::fmt::Display for PowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowError::Shape(err) => write!(f, "{err}"),
            PowError::UnsupportedParameters(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PowError {}

impl From<ShapeError> for PowError {
    fn from(err: ShapeError) -> Self {
        PowError::Shape(err)
    }
}

impl From<UnsupportedParameters> for PowError {
    fn from(err: UnsupportedParameters) -> Self {
        PowError::UnsupportedParameters(err)
    }
}

/// Classifies a submitted solution.
///
/// A header that is not 32 bytes is `Invalid` without running the validator. A nonce that
/// is not 8 bytes, a solution buffer of the wrong size, and an `r` other than 0 or 3 are
/// errors rather than verdicts.
pub fn classify(
    header: &[u8],
    nonce: &[u8],
    solution: &[u8],
    net_difficulty: u32,
    share_difficulty: u32,
    rounds: u32,
) -> Result<Verdict, PowError> {
    let Ok(header) = header_from_slice(header) else {
        log_debug!("rejecting share with {}-byte header", header.len());
        return Ok(Verdict::Invalid);
    };
    let nonce = nonce_from_slice(nonce)?;
    let seed = build_seed(&header, &nonce, BEAM_N, BEAM_K, rounds)?;
    classify_seeded(&seed, solution, net_difficulty, share_difficulty)
}

/// Same as [`classify`] for a seed that is already built.
pub fn classify_seeded(
    seed: &SeedState,
    solution: &[u8],
    net_difficulty: u32,
    share_difficulty: u32,
) -> Result<Verdict, PowError> {
    if !equihash::is_valid_minimal(seed, solution)? {
        return Ok(Verdict::Invalid);
    }

    let digest = solution_digest(solution);
    let verdict = if digest_reaches_target(&digest, &decode_target(net_difficulty)) {
        Verdict::ValidBlock
    } else if digest_reaches_target(&digest, &decode_target(share_difficulty)) {
        Verdict::ValidShare
    } else {
        Verdict::LowDifficulty
    };
    log_trace!(
        "classified solution net={net_difficulty:#010x} share={share_difficulty:#010x}: {verdict}"
    );
    Ok(verdict)
}

/// Numeric form of [`classify`]: 0 invalid, 1 low difficulty, 2 share, 3 block.
pub fn verify(
    header: &[u8],
    nonce: &[u8],
    solution: &[u8],
    net_difficulty: u32,
    share_difficulty: u32,
    rounds: u32,
) -> Result<u8, PowError> {
    classify(
        header,
        nonce,
        solution,
        net_difficulty,
        share_difficulty,
        rounds,
    )
    .map(Verdict::code)
}

/// Difficulty check alone, for solutions that are already known to be valid.
pub fn target_reached(solution: &[u8], difficulty: u32) -> bool {
    digest_reaches_target(&solution_digest(solution), &decode_target(difficulty))
}

/// Shares and blocks are scored on the SHA-256 of the packed solution.
pub fn solution_digest(solution: &[u8]) -> Hash256 {
    sha256(solution)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareSubmission {
    pub header: Vec<u8>,
    pub nonce: Vec<u8>,
    pub solution: Vec<u8>,
    pub net_difficulty: u32,
    pub share_difficulty: u32,
    pub rounds: u32,
}

impl ShareSubmission {
    /// A BeamHash I submission.
    pub fn new(
        header: Vec<u8>,
        nonce: Vec<u8>,
        solution: Vec<u8>,
        net_difficulty: u32,
        share_difficulty: u32,
    ) -> Self {
        Self {
            header,
            nonce,
            solution,
            net_difficulty,
            share_difficulty,
            rounds: BEAM_HASH_I_ROUNDS,
        }
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn classify(&self) -> Result<Verdict, PowError> {
        classify(
            &self.header,
            &self.nonce,
            &self.solution,
            self.net_difficulty,
            self.share_difficulty,
            self.rounds,
        )
    }
}

/// Classifies every submission on the rayon pool. Results keep the input order.
pub fn classify_batch(submissions: &[ShareSubmission]) -> Vec<Result<Verdict, PowError>> {
    submissions.par_iter().map(ShareSubmission::classify).collect()
}
