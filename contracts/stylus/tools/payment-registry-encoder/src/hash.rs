use alloy_primitives::B256;
use sha3::{Digest, Keccak256};

/// Errors parsing a hex-encoded 32-byte hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashParseError {
    InvalidHex,
    WrongLength(usize),
}

/// Content address used for `senderHash`, `recipientHash`, `metadataHash`, `receiptUriHash` etc.
pub fn content_hash(content: &[u8]) -> B256 {
    let digest: [u8; 32] = Keccak256::digest(content).into();
    B256::from(digest)
}

/// Hash of a textual reference (provider reference, external correlation id, URI).
pub fn reference_hash(reference: &str) -> B256 {
    content_hash(reference.as_bytes())
}

/// Parse `0x`-prefixed (or bare) hex into a 32-byte hash.
pub fn parse_hash(s: &str) -> Result<B256, HashParseError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    if digits.len() != 64 {
        return Err(HashParseError::WrongLength(digits.len() / 2));
    }
    let mut buf = [0u8; 32];
    hex::decode_to_slice(digits, &mut buf).map_err(|_| HashParseError::InvalidHex)?;
    Ok(B256::from(buf))
}
