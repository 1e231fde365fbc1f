//! Hex encoding for the byte buffers passed on the command line and in fixtures.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    OddLength,
    InvalidHex,
    InvalidLength { expected: usize, got: usize },
}

impl std::fmt::Display for HexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HexError::OddLength => write!(f, "hex string has an odd number of digits"),
            HexError::InvalidHex => write!(f, "invalid hex digit"),
            HexError::InvalidLength { expected, got } => {
                write!(f, "expected {expected} bytes of hex, got {got}")
            }
        }
    }
}

impl std::error::Error for HexError {}

pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use std::fmt::Write;
        let _ = write!(&mut out, "{:02x}", byte);
    }
    out
}

/// Decodes a hex string in byte order. A leading `0x` and surrounding whitespace are ignored.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>, HexError> {
    let mut hex = input.trim();
    if let Some(stripped) = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X")) {
        hex = stripped;
    }
    if hex.len() % 2 == 1 {
        return Err(HexError::OddLength);
    }
    if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(HexError::InvalidHex);
    }

    let mut out = Vec::with_capacity(hex.len() / 2);
    for start in (0..hex.len()).step_by(2) {
        let byte =
            u8::from_str_radix(&hex[start..start + 2], 16).map_err(|_| HexError::InvalidHex)?;
        out.push(byte);
    }
    Ok(out)
}

pub fn hex_to_array<const N: usize>(input: &str) -> Result<[u8; N], HexError> {
    let bytes = hex_to_bytes(input)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| HexError::InvalidLength {
        expected: N,
        got: bytes.len(),
    })
}
