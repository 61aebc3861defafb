//! Balloon hash over an 80-byte block header
//!
//! The construction runs in three phases over a buffer of `S_COST` blocks:
//! - Expand: fill the buffer sequentially from header and salt
//! - Mix: `T_COST` rounds of neighbour mixing plus `DELTA` pseudorandom
//!   cross-block mixes per block
//! - Finalize: truncate the last block to 32 bytes
//!
//! Every wide-hash call is tagged with a counter that is unique within one
//! invocation (see [`CountedHasher`]).

use groestl::Groestl512;

use crate::params::*;
use crate::primitives::{Block, CountedHasher, WideHash};

/// 80-byte block header in wire order
pub type Header = [u8; HEADER_SIZE];

/// Salt taken from the header's previous-block hash
pub type Salt = [u8; SALT_SIZE];

/// Extract the salt, header bytes `[4, 36)`
#[inline(always)]
pub fn extract_salt(header: &Header) -> Salt {
    let mut salt = [0u8; SALT_SIZE];
    salt.copy_from_slice(&header[SALT_OFFSET..SALT_OFFSET + SALT_SIZE]);
    salt
}

/// Index of the block mixed in before block `m`, wrapping 0 to `S_COST - 1`
#[inline(always)]
pub const fn previous_block(m: usize) -> usize {
    (m + S_COST - 1) % S_COST
}

/// Pick the pseudorandom mixing partner from an index block.
///
/// The first 8 bytes are read little-endian. This is independent of the
/// header's big-endian words and must stay little-endian.
#[inline(always)]
fn partner_block(index: &Block) -> usize {
    let mut word = [0u8; 8];
    word.copy_from_slice(&index[..8]);
    (u64::from_le_bytes(word) % S_COST as u64) as usize
}

/// Balloon hasher
///
/// Holds the block buffer and the counter-tagged wide hash. It can be
/// reused across headers; every call to [`hash`](BalloonHash::hash) starts
/// from a zeroed buffer and a zero counter.
pub struct BalloonHash<H = Groestl512> {
    blocks: [Block; S_COST],
    hasher: CountedHasher<H>,
}

impl BalloonHash {
    /// Create a hasher backed by Groestl-512
    pub fn new() -> Self {
        Self::with_hasher(Groestl512::default())
    }
}

impl Default for BalloonHash {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: WideHash> BalloonHash<H> {
    /// Create a hasher over any wide hash
    pub fn with_hasher(inner: H) -> Self {
        Self {
            blocks: [[0u8; BLOCK_SIZE]; S_COST],
            hasher: CountedHasher::new(inner),
        }
    }

    /// Compute the 32-byte balloon digest of a header
    pub fn hash(&mut self, header: &Header) -> [u8; DIGEST_SIZE] {
        let salt = extract_salt(header);

        self.blocks = [[0u8; BLOCK_SIZE]; S_COST];
        self.hasher.reset();

        self.expand(header, &salt);
        self.mix(&salt);
        self.finalize()
    }

    /// Step 1: sequentially fill the buffer
    fn expand(&mut self, header: &Header, salt: &Salt) {
        self.blocks[0] = self.hasher.absorb(&[&header[..], &salt[..]]);

        for m in 1..S_COST {
            self.blocks[m] = self.hasher.absorb(&[&self.blocks[m - 1][..]]);
        }
    }

    /// Step 2: neighbour and pseudorandom mixing
    fn mix(&mut self, salt: &Salt) {
        for t in 0..T_COST {
            for m in 0..S_COST {
                let prev = previous_block(m);
                self.blocks[m] = self
                    .hasher
                    .absorb(&[&self.blocks[prev][..], &self.blocks[m][..]]);

                for i in 0..DELTA {
                    let index = self.hasher.absorb(&[
                        &t.to_le_bytes()[..],
                        &(m as u64).to_le_bytes()[..],
                        &i.to_le_bytes()[..],
                        &salt[..],
                    ]);
                    let other = partner_block(&index);

                    self.blocks[m] = self
                        .hasher
                        .absorb(&[&self.blocks[m][..], &self.blocks[other][..]]);
                }
            }
        }
    }

    /// Step 3: truncate the last block
    fn finalize(&self) -> [u8; DIGEST_SIZE] {
        let mut output = [0u8; DIGEST_SIZE];
        output.copy_from_slice(&self.blocks[S_COST - 1][..DIGEST_SIZE]);
        output
    }

    /// Counter value after the last invocation (equals `HASH_CALLS`)
    pub fn counter(&self) -> u64 {
        self.hasher.counter()
    }

    /// The underlying wide hash
    pub fn hasher(&self) -> &H {
        self.hasher.inner()
    }
}

/// Convenience function for single-shot hashing
pub fn hash(header: &Header) -> [u8; DIGEST_SIZE] {
    BalloonHash::new().hash(header)
}
