//! Work-unit inputs and the shape checks applied at the verification boundary.

use beamhash_consensus::constants::{HEADER_SIZE, NONCE_SIZE};

pub type Header = [u8; HEADER_SIZE];
pub type Nonce = [u8; NONCE_SIZE];

/// A buffer handed to the verifier has the wrong size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    HeaderSize { got: usize },
    NonceSize { got: usize },
    SolutionSize { expected: usize, got: usize },
}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeError::HeaderSize { got } => {
                write!(f, "header must be {HEADER_SIZE} bytes, got {got}")
            }
            ShapeError::NonceSize { got } => {
                write!(f, "nonce must be {NONCE_SIZE} bytes, got {got}")
            }
            ShapeError::SolutionSize { expected, got } => {
                write!(f, "solution must be {expected} bytes, got {got}")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

pub fn header_from_slice(bytes: &[u8]) -> Result<Header, ShapeError> {
    bytes
        .try_into()
        .map_err(|_| ShapeError::HeaderSize { got: bytes.len() })
}

pub fn nonce_from_slice(bytes: &[u8]) -> Result<Nonce, ShapeError> {
    bytes
        .try_into()
        .map_err(|_| ShapeError::NonceSize { got: bytes.len() })
}
