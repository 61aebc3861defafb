//! Mining jobs and solutions
//!
//! A job is the external description of one work item:
//!
//! ```json
//! {
//!   "header": "<160 hex chars, 80 bytes in wire order>",
//!   "target": "<64 hex chars, 256-bit big-endian>",
//!   "first_nonce": 0,
//!   "max_nonce": 4294967295
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::algorithm::{DIGEST_SIZE, HEADER_SIZE, Header, Target, Work};
use crate::error::{Error, Result};

/// Decode an 80-byte header from hex
pub fn parse_header(hex_str: &str) -> Result<Header> {
    decode_fixed::<HEADER_SIZE>("header", hex_str)
}

/// Decode a 256-bit big-endian target from hex
pub fn parse_target(hex_str: &str) -> Result<Target> {
    decode_fixed::<32>("target", hex_str).map(Target::from_be_bytes)
}

fn decode_fixed<const N: usize>(field: &'static str, hex_str: &str) -> Result<[u8; N]> {
    let trimmed = hex_str.trim();
    let trimmed = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(trimmed).map_err(|e| Error::hex(field, e))?;

    let actual = bytes.len();
    bytes.try_into().map_err(|_| Error::Length {
        field,
        expected: N,
        actual,
    })
}

fn default_target() -> String {
    hex::encode(Target::MAX.to_be_bytes())
}

fn default_max_nonce() -> u32 {
    u32::MAX
}

/// Work item as read from a job file or the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub header: String,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default)]
    pub first_nonce: u32,
    #[serde(default = "default_max_nonce")]
    pub max_nonce: u32,
}

impl Job {
    /// Load a job from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse into a work item positioned at `first_nonce`
    pub fn to_work(&self) -> Result<Work> {
        if self.first_nonce >= self.max_nonce {
            return Err(Error::range(format!(
                "first_nonce {} is not below max_nonce {}",
                self.first_nonce, self.max_nonce
            )));
        }

        let header = parse_header(&self.header)?;
        let target = parse_target(&self.target)?;

        let mut work = Work::from_header(&header, target);
        work.set_nonce(self.first_nonce);
        Ok(work)
    }
}

/// A solved work item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub nonce: u32,
    /// Header with the winning nonce, wire order
    pub header: String,
    /// Digest bytes as produced by the hash
    pub digest: String,
    /// Hashes attempted since the start of the job
    pub hashes: u64,
}

impl Solution {
    pub fn new(work: &Work, digest: &[u8; DIGEST_SIZE], hashes: u64) -> Self {
        Self {
            nonce: work.nonce(),
            header: hex::encode(work.header()),
            digest: hex::encode(digest),
            hashes,
        }
    }
}
