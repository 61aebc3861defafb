//! Nonce scan loop
//!
//! Tries nonces in strictly increasing order from the work item's current
//! nonce until a digest meets the target, the range is exhausted, or the
//! caller's cancellation flag is raised. Cancellation is polled once per
//! nonce, so the worst-case latency is one hash invocation.

use core::sync::atomic::{AtomicBool, Ordering};

use groestl::Groestl512;
use tracing::debug;

use crate::balloon::{BalloonHash, Header};
use crate::params::*;
use crate::primitives::WideHash;

/// 256-bit target as little-endian ordered words (word 7 is most significant)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target(pub [u32; TARGET_WORDS]);

impl Target {
    /// Easiest possible target, met by every digest
    pub const MAX: Target = Target([u32::MAX; TARGET_WORDS]);

    pub const fn from_words(words: [u32; TARGET_WORDS]) -> Self {
        Self(words)
    }

    /// Build from the 256-bit big-endian display form
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        let mut words = [0u32; TARGET_WORDS];
        for (i, chunk) in bytes.chunks_exact(4).enumerate() {
            let mut word = [0u8; 4];
            word.copy_from_slice(chunk);
            words[TARGET_WORDS - 1 - i] = u32::from_be_bytes(word);
        }
        Self(words)
    }

    /// 256-bit big-endian display form
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for (i, chunk) in bytes.chunks_exact_mut(4).enumerate() {
            chunk.copy_from_slice(&self.0[TARGET_WORDS - 1 - i].to_be_bytes());
        }
        bytes
    }

    /// Word checked first as a fast reject
    #[inline(always)]
    pub fn most_significant_word(&self) -> u32 {
        self.0[TARGET_WORDS - 1]
    }

    /// Full ordered compare: digest <= target, most significant word first
    #[inline(always)]
    pub fn is_met_by_words(&self, hash: &[u32; TARGET_WORDS]) -> bool {
        for i in (0..TARGET_WORDS).rev() {
            if hash[i] > self.0[i] {
                return false;
            }
            if hash[i] < self.0[i] {
                return true;
            }
        }
        true
    }

    /// Check a 32-byte digest against this target
    pub fn is_met_by(&self, digest: &[u8; DIGEST_SIZE]) -> bool {
        self.is_met_by_words(&digest_words(digest))
    }
}

impl Default for Target {
    fn default() -> Self {
        Self::MAX
    }
}

/// View a digest as 8 little-endian words
#[inline(always)]
pub fn digest_words(digest: &[u8; DIGEST_SIZE]) -> [u32; TARGET_WORDS] {
    let mut words = [0u32; TARGET_WORDS];
    for (word, chunk) in words.iter_mut().zip(digest.chunks_exact(4)) {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(chunk);
        *word = u32::from_le_bytes(bytes);
    }
    words
}

/// Write a header word in big-endian wire order
#[inline(always)]
fn encode_word(header: &mut Header, index: usize, word: u32) {
    header[index * 4..index * 4 + 4].copy_from_slice(&word.to_be_bytes());
}

/// Work item: header words plus target
///
/// Only the nonce word is touched by the scan loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    pub data: [u32; HEADER_WORDS],
    pub target: Target,
}

impl Work {
    pub fn new(data: [u32; HEADER_WORDS], target: Target) -> Self {
        Self { data, target }
    }

    /// Decode a wire-order header into words
    pub fn from_header(header: &Header, target: Target) -> Self {
        let mut data = [0u32; HEADER_WORDS];
        for (word, chunk) in data.iter_mut().zip(header.chunks_exact(4)) {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(chunk);
            *word = u32::from_be_bytes(bytes);
        }
        Self { data, target }
    }

    /// Encode all words in wire order
    pub fn header(&self) -> Header {
        let mut header = [0u8; HEADER_SIZE];
        for (i, word) in self.data.iter().enumerate() {
            encode_word(&mut header, i, *word);
        }
        header
    }

    pub fn nonce(&self) -> u32 {
        self.data[NONCE_WORD]
    }

    pub fn set_nonce(&mut self, nonce: u32) {
        self.data[NONCE_WORD] = nonce;
    }
}

/// Cooperative cancellation flag, polled once per nonce
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

impl Cancellation for AtomicBool {
    #[inline(always)]
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: Cancellation + ?Sized> Cancellation for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// `None` never cancels
impl<T: Cancellation> Cancellation for Option<T> {
    fn is_cancelled(&self) -> bool {
        self.as_ref().is_some_and(|c| c.is_cancelled())
    }
}

#[cfg(feature = "std")]
impl<T: Cancellation + ?Sized> Cancellation for std::sync::Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// How a scan ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Found,
    Exhausted,
    Cancelled,
}

/// Result of one scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    /// Hashes attempted, using the miner accounting: `nonce - first_nonce`
    /// on success, `next_nonce - first_nonce + 1` otherwise
    pub hashes_done: u64,
    /// Nonce written back to the work item
    pub nonce: u32,
    /// Winning digest, if any
    pub digest: Option<[u8; DIGEST_SIZE]>,
}

impl ScanReport {
    pub fn found(&self) -> bool {
        self.outcome == ScanOutcome::Found
    }
}

/// Single-threaded nonce scanner
///
/// Owns one reusable balloon hasher. Run one scanner per worker thread,
/// each over its own nonce sub-range.
pub struct Scanner<H = Groestl512> {
    thread_id: usize,
    hasher: BalloonHash<H>,
}

impl Scanner {
    pub fn new(thread_id: usize) -> Self {
        Self::with_hasher(thread_id, BalloonHash::new())
    }
}

impl<H: WideHash> Scanner<H> {
    pub fn with_hasher(thread_id: usize, hasher: BalloonHash<H>) -> Self {
        Self { thread_id, hasher }
    }

    pub fn thread_id(&self) -> usize {
        self.thread_id
    }

    /// Scan from `work`'s nonce up to (excluding) `max_nonce`
    pub fn scan<C>(&mut self, work: &mut Work, max_nonce: u32, cancel: &C) -> ScanReport
    where
        C: Cancellation + ?Sized,
    {
        self.scan_with(work, max_nonce, cancel, |_, _| {})
    }

    /// Like [`scan`](Scanner::scan), calling `on_solution` with the updated
    /// work item and winning digest before returning success
    pub fn scan_with<C, F>(
        &mut self,
        work: &mut Work,
        max_nonce: u32,
        cancel: &C,
        mut on_solution: F,
    ) -> ScanReport
    where
        C: Cancellation + ?Sized,
        F: FnMut(&Work, &[u8; DIGEST_SIZE]),
    {
        let target = work.target;
        let htarg = target.most_significant_word();
        let first_nonce = work.nonce();
        let max_nonce = u64::from(max_nonce);

        // Words 0..19 are encoded once; only the nonce changes per iteration
        let mut header = work.header();
        let mut nonce = u64::from(first_nonce);

        let outcome = loop {
            encode_word(&mut header, NONCE_WORD, nonce as u32);
            let digest = self.hasher.hash(&header);
            let words = digest_words(&digest);

            if words[TARGET_WORDS - 1] <= htarg && target.is_met_by_words(&words) {
                let found = nonce as u32;
                work.set_nonce(found);
                on_solution(work, &digest);

                let hashes_done = nonce - u64::from(first_nonce);
                debug!(thread = self.thread_id, nonce = found, hashes_done, "share found");
                return ScanReport {
                    outcome: ScanOutcome::Found,
                    hashes_done,
                    nonce: found,
                    digest: Some(digest),
                };
            }

            nonce += 1;
            if nonce >= max_nonce {
                break ScanOutcome::Exhausted;
            }
            if cancel.is_cancelled() {
                break ScanOutcome::Cancelled;
            }
        };

        let next = u32::try_from(nonce).unwrap_or(u32::MAX);
        work.set_nonce(next);
        let hashes_done = nonce - u64::from(first_nonce) + 1;

        debug!(
            thread = self.thread_id,
            next_nonce = next,
            hashes_done,
            ?outcome,
            "scan stopped"
        );

        ScanReport {
            outcome,
            hashes_done,
            nonce: next,
            digest: None,
        }
    }
}

/// Convenience function: scan with a fresh scanner
pub fn scan<C>(thread_id: usize, work: &mut Work, max_nonce: u32, cancel: &C) -> ScanReport
where
    C: Cancellation + ?Sized,
{
    Scanner::new(thread_id).scan(work, max_nonce, cancel)
}
