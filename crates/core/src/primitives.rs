//! Underlying wide hash for the balloon construction
//!
//! Every step of the construction is one independent evaluation of a
//! 512-bit hash. The [`WideHash`] trait is the seam between the balloon
//! schedule and the actual primitive (Groestl-512).

use groestl::{Digest, Groestl512};

use crate::params::BLOCK_SIZE;

/// One buffer block, exactly one wide-hash output
pub type Block = [u8; BLOCK_SIZE];

/// Streaming 512-bit hash with a resetting finalize
pub trait WideHash {
    /// Absorb more message bytes
    fn update(&mut self, data: &[u8]);

    /// Finish the current message, returning its 64-byte digest, and
    /// reset so the next `update` starts a fresh message
    fn finalize_block(&mut self) -> Block;
}

impl WideHash for Groestl512 {
    #[inline(always)]
    fn update(&mut self, data: &[u8]) {
        Digest::update(self, data);
    }

    #[inline(always)]
    fn finalize_block(&mut self) -> Block {
        let output = self.finalize_reset();
        let mut block = [0u8; BLOCK_SIZE];
        block.copy_from_slice(&output);
        block
    }
}

/// Wide hash paired with the domain-separation counter of one invocation
///
/// Each [`absorb`](CountedHasher::absorb) prefixes the message with the
/// current counter (8 bytes, little-endian) and bumps the counter after
/// finalizing, so no two calls within an invocation share a counter value.
pub struct CountedHasher<H> {
    inner: H,
    counter: u64,
}

impl<H: WideHash> CountedHasher<H> {
    pub fn new(inner: H) -> Self {
        Self { inner, counter: 0 }
    }

    /// Hash `counter || parts[0] || parts[1] || ...` into one block
    #[inline(always)]
    pub fn absorb(&mut self, parts: &[&[u8]]) -> Block {
        self.inner.update(&self.counter.to_le_bytes());
        for part in parts {
            self.inner.update(part);
        }
        let block = self.inner.finalize_block();
        self.counter += 1;
        block
    }

    /// Start a new invocation
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Counter value the next `absorb` will use
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}
