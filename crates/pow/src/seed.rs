//! Personalized BLAKE2b seed state for a header and nonce.

use beamhash_consensus::{personalization, EquihashParams, Variant};
use beamhash_log::log_warn;
use beamhash_primitives::{Header, Nonce};
use blake2b_simd::{Params as Blake2bParams, State as Blake2bState};

/// `(n, k, r)` does not name a supported BeamHash variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedParameters {
    pub n: u32,
    pub k: u32,
    pub r: u32,
}

impl std::fmt::Display for UnsupportedParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported equihash parameters n={} k={} r={}",
            self.n, self.k, self.r
        )
    }
}

impl std::error::Error for UnsupportedParameters {}

/// Hash state after absorbing the header and nonce. Every leaf hash of a solution is
/// derived from a clone of it.
#[derive(Clone)]
pub struct SeedState {
    state: Blake2bState,
    params: EquihashParams,
    rounds: u32,
}

impl SeedState {
    pub(crate) fn with_params(
        params: EquihashParams,
        rounds: u32,
        header: &[u8],
        nonce: &[u8],
    ) -> Self {
        let mut state = Blake2bParams::new()
            .hash_length(params.hash_output())
            .personal(&personalization(params, rounds))
            .to_state();
        state.update(header);
        state.update(nonce);
        Self {
            state,
            params,
            rounds,
        }
    }

    pub fn for_variant(variant: Variant, header: &Header, nonce: &Nonce) -> Self {
        Self::with_params(variant.params(), variant.rounds(), header, nonce)
    }

    pub fn params(&self) -> EquihashParams {
        self.params
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn variant(&self) -> Option<Variant> {
        Variant::from_params(self.params.n, self.params.k, self.rounds)
    }

    pub(crate) fn state(&self) -> &Blake2bState {
        &self.state
    }
}

impl std::fmt::Debug for SeedState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedState")
            .field("n", &self.params.n)
            .field("k", &self.params.k)
            .field("rounds", &self.rounds)
            .finish_non_exhaustive()
    }
}

pub fn build_seed(
    header: &Header,
    nonce: &Nonce,
    n: u32,
    k: u32,
    r: u32,
) -> Result<SeedState, UnsupportedParameters> {
    let Some(variant) = Variant::from_params(n, k, r) else {
        let err = UnsupportedParameters { n, k, r };
        log_warn!("{err}");
        return Err(err);
    };
    Ok(SeedState::for_variant(variant, header, nonce))
}
