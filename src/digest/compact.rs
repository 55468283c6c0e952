//! Compact 64-bit digest using FNV-1a

use super::{tags, Accumulator};
use serde::{Deserialize, Serialize};
use std::fmt;

const FNV1A_64_INIT: u64 = 0xcbf2_9ce4_8422_2325;
const FNV1A_64_PRIME: u64 = 0x0000_0100_0000_01b3;

/// An 8-byte structural fingerprint
///
/// Not collision resistant: equal shapes always agree, different shapes
/// almost always differ.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompactDigest(u64);

impl CompactDigest {
    pub fn from_u64(value: u64) -> Self {
        CompactDigest(value)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Convert to a 16 digit hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.to_be_bytes())
    }

    /// Parse from hex string
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 8] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(CompactDigest(u64::from_be_bytes(arr)))
    }
}

impl fmt::Display for CompactDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for CompactDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompactDigest({})", self.to_hex())
    }
}

#[derive(Debug)]
pub struct Fnv1aAccumulator {
    state: u64,
    bytes: u64,
}

impl Default for Fnv1aAccumulator {
    fn default() -> Self {
        Fnv1aAccumulator {
            state: FNV1A_64_INIT,
            bytes: 0,
        }
    }
}

impl Fnv1aAccumulator {
    fn update(&mut self, data: &[u8]) {
        for &b in data {
            self.state = (self.state ^ u64::from(b)).wrapping_mul(FNV1A_64_PRIME);
        }
        self.bytes += data.len() as u64;
    }
}

impl Accumulator for Fnv1aAccumulator {
    type Digest = CompactDigest;

    fn append_vertex(&mut self, label: &str) {
        self.update(&[tags::VERTEX]);
        // NUL-terminated so "ab" + "c" differs from "a" + "bc"
        self.update(label.as_bytes());
        self.update(&[0]);
    }

    fn append_backref(&mut self, distance: usize) {
        self.update(&[tags::BACKREF]);
        self.update(&(distance as u64).to_le_bytes());
    }

    fn append_child(&mut self, digest: &CompactDigest) {
        self.update(&[tags::CHILD]);
        self.update(&digest.0.to_le_bytes());
    }

    fn append_terminator(&mut self) {
        self.update(&[tags::TERMINATOR]);
    }

    fn bytes_processed(&self) -> u64 {
        self.bytes
    }

    fn finalize(self) -> CompactDigest {
        CompactDigest(self.state)
    }
}
