//! # Balloon Proof-of-Work Core
//!
//! A memory-hard proof-of-work hash over 80-byte block headers, built from
//! the Balloon construction with Groestl-512 as the wide hash, plus the
//! nonce scan loop that searches for a digest below a target.
//!
//! ## Algorithm Parameters
//!
//! - 16 blocks of 64 bytes (1 KB working buffer)
//! - 2 mixing rounds
//! - 3 pseudorandom cross-block mixes per block per round
//! - Salt = header bytes `[4, 36)` (the previous block hash)
//!
//! ## Input Format
//!
//! ```text
//! header = 20 big-endian u32 words (80 bytes)
//!          word 19 is the nonce
//! ```
//!
//! ## Example
//!
//! ```rust
//! use core::sync::atomic::AtomicBool;
//! use balloon_core::{BalloonHash, Scanner, Target, Work, hash};
//!
//! // Single-shot hashing
//! let digest = hash(&[0u8; 80]);
//! assert_eq!(digest.len(), 32);
//!
//! // Reusable hasher (keeps its 1 KB buffer)
//! let mut hasher = BalloonHash::new();
//! assert_eq!(hasher.hash(&[0u8; 80]), digest);
//!
//! // Scan for a nonce meeting the target
//! let mut work = Work::new([0u32; 20], Target::MAX);
//! let report = Scanner::new(0).scan(&mut work, 100, &AtomicBool::new(false));
//! assert!(report.found());
//! ```
//!
//! ## no_std Support
//!
//! The crate needs no allocator:
//!
//! ```toml
//! [dependencies]
//! balloon-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod balloon;
mod params;
mod primitives;
mod scan;

#[cfg(feature = "std")]
mod ffi;

pub use balloon::{BalloonHash, Header, Salt, extract_salt, hash, previous_block};
pub use params::*;
pub use primitives::{Block, CountedHasher, WideHash};
pub use scan::{
    Cancellation, ScanOutcome, ScanReport, Scanner, Target, Work, digest_words, scan,
};

#[cfg(test)]
mod tests;
