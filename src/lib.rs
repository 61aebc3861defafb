//! Balloon Prover Library
//!
//! Runs the Balloon proof-of-work nonce search over block headers.
//!
//! # Overview
//!
//! The hash and scan loop live in `balloon-core`. This crate adds job
//! files, a chunked mining driver, logging and error types around them.
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::AtomicBool;
//! use balloon::job::Job;
//! use balloon::miner::{MineResult, mine};
//!
//! let job = Job {
//!     header: "00".repeat(80),
//!     target: "ff".repeat(32),
//!     first_nonce: 0,
//!     max_nonce: 10,
//! };
//!
//! let result = mine(&job, 4, 0, &AtomicBool::new(false)).unwrap();
//! assert!(matches!(result, MineResult::Found(_)));
//! ```

// Re-export the core algorithm
pub use balloon_core as algorithm;

pub mod error;
pub mod job;
pub mod logging;
pub mod miner;

// Convenience re-exports
pub use algorithm::{BalloonHash, Scanner, Target, Work, hash};
pub use error::{Error, Result};
