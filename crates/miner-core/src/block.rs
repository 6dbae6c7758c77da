//! Block header bytes fed to the proof-of-work hash.

use crate::error::{MinerError, MinerResult};

/// Header used by the simulator when none is supplied.
pub const DEFAULT_HEADER: &[u8] = b"Aequitas_Genesis_Block_Header_Simulation";

/// An opaque, non-empty block header. Fixed for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    bytes: Vec<u8>,
}

impl BlockHeader {
    /// Create a header from raw bytes. Empty input is rejected.
    pub fn new(bytes: impl Into<Vec<u8>>) -> MinerResult<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(MinerError::EmptyHeader);
        }
        Ok(BlockHeader { bytes })
    }

    /// Parse a header from a hex string (an optional `0x` prefix is allowed).
    pub fn from_hex(hex_str: &str) -> MinerResult<Self> {
        let bytes = hex::decode(hex_str.trim().trim_start_matches("0x"))
            .map_err(|e| MinerError::InvalidConfig(format!("header is not valid hex: {}", e)))?;
        Self::new(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for a constructed header.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for BlockHeader {
    fn default() -> Self {
        BlockHeader {
            bytes: DEFAULT_HEADER.to_vec(),
        }
    }
}

impl AsRef<[u8]> for BlockHeader {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_header_rejected() {
        assert!(matches!(BlockHeader::new(Vec::new()), Err(MinerError::EmptyHeader)));
    }

    #[test]
    fn test_default_header() {
        let header = BlockHeader::default();
        assert_eq!(header.as_bytes(), DEFAULT_HEADER);
        assert_eq!(header.len(), 40);
    }

    #[test]
    fn test_from_hex() {
        let header = BlockHeader::from_hex("0xdeadbeef").unwrap();
        assert_eq!(header.as_bytes(), &[0xde, 0xad, 0xbe, 0xef]);

        assert!(BlockHeader::from_hex("zz").is_err());
        assert!(matches!(BlockHeader::from_hex(""), Err(MinerError::EmptyHeader)));
    }
}
