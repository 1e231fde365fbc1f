//! Algorithm parameters, BeamHash variants, and wire-size constants.

pub mod constants;
pub mod params;

pub use params::{personalization, EquihashParams, Variant, BEAM_PARAMS};

pub type Hash256 = [u8; 32];
