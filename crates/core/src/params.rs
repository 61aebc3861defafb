//! Balloon algorithm parameters
//!
//! These are part of the algorithm's identity. Changing any of them
//! produces a different hash function.

/// Number of blocks in the working buffer
pub const S_COST: usize = 16;

/// Number of mixing rounds over the buffer
pub const T_COST: u64 = 2;

/// Pseudorandom cross-block mixes per block per round
pub const DELTA: u64 = 3;

/// Block size in bytes (one Groestl-512 output)
pub const BLOCK_SIZE: usize = 64;

/// Total working memory per invocation (1 KB)
pub const BUFFER_SIZE: usize = S_COST * BLOCK_SIZE;

/// Block header size in bytes
pub const HEADER_SIZE: usize = 80;

/// Number of 32-bit words in a header
pub const HEADER_WORDS: usize = HEADER_SIZE / 4;

/// Index of the nonce word in the header
pub const NONCE_WORD: usize = 19;

/// Offset of the salt (previous block hash) inside the header
pub const SALT_OFFSET: usize = 4;

/// Salt size in bytes
pub const SALT_SIZE: usize = 32;

/// Output digest size in bytes
pub const DIGEST_SIZE: usize = 32;

/// Number of 32-bit words in a target
pub const TARGET_WORDS: usize = 8;

/// Finalize calls performed by one hash invocation:
/// one per expanded block, then per mixed block one neighbour mix
/// plus `DELTA` (index, mix) pairs.
pub const HASH_CALLS: u64 = S_COST as u64 + S_COST as u64 * T_COST * (1 + 2 * DELTA);
