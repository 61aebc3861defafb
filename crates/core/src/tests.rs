//! Tests for the balloon hash

use groestl::Groestl512;

use crate::params::*;
use crate::{BalloonHash, Block, Header, WideHash, extract_salt, hash, previous_block};

fn header_from_hex(hex_str: &str) -> Header {
    let bytes = hex::decode(hex_str).unwrap();
    bytes.try_into().unwrap()
}

/// Groestl-512 that records every finalized message and its output
#[derive(Default)]
struct RecordingHash {
    inner: Groestl512,
    pending: Vec<u8>,
    calls: Vec<(Vec<u8>, Block)>,
}

impl WideHash for RecordingHash {
    fn update(&mut self, data: &[u8]) {
        self.pending.extend_from_slice(data);
        WideHash::update(&mut self.inner, data);
    }

    fn finalize_block(&mut self) -> Block {
        let output = self.inner.finalize_block();
        self.calls.push((std::mem::take(&mut self.pending), output));
        output
    }
}

fn recorded(header: &Header) -> (Vec<(Vec<u8>, Block)>, [u8; DIGEST_SIZE]) {
    let mut hasher = BalloonHash::with_hasher(RecordingHash::default());
    let digest = hasher.hash(header);
    (hasher.hasher().calls.clone(), digest)
}

fn counter_of(message: &[u8]) -> u64 {
    u64::from_le_bytes(message[..8].try_into().unwrap())
}

#[test]
fn test_basic_hash() {
    let header = [0x5Au8; HEADER_SIZE];
    let result = hash(&header);

    assert_eq!(result.len(), DIGEST_SIZE);
    assert_eq!(result, hash(&header));
}

#[test]
fn test_known_vectors() {
    // Reference digests for fixed headers; update only if the algorithm
    // is changed on purpose.
    let vectors = [
        (
            "00".repeat(HEADER_SIZE),
            "b993ea6c8e3b5387046faaab36e65c0f4e5a1360c2ae036da084a2b39a2dacc5",
        ),
        (
            // Bitcoin genesis block header
            "0100000000000000000000000000000000000000000000000000000000000000\
             000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa\
             4b1e5e4a29ab5f49ffff001d1dac2b7c"
                .to_string(),
            "71a79dcf1a0cfe2962591027513e2a4fd4cc6b631fc3c5054d6a26bec6210b12",
        ),
        (
            // Bitcoin block 1 header (non-zero salt)
            "010000006fe28c0ab6f1b372c1a6a246ae63f74f931e8365e15a089c68d61900\
             00000000982051fd1e4ba744bbbe680e1fee14677ba1a3c3540bf7b1cdb606e8\
             57233e0e61bc6649ffff001d01e36299"
                .to_string(),
            "d4b01b3f080de6f98cc764f9f41bdd2893b9e5a42edc271fabafbf245fde2390",
        ),
        (
            (0u8..80).map(|b| format!("{:02x}", b)).collect::<String>(),
            "213c772a0c4086b8b6be82dac32b394348e6c41c0b9b17a0ce90d8fa69da2a08",
        ),
    ];

    for (header_hex, expected) in vectors.iter() {
        let header = header_from_hex(header_hex);
        assert_eq!(
            hex::encode(hash(&header)),
            *expected,
            "digest mismatch for header {}",
            header_hex
        );
    }
}

#[test]
fn test_hasher_reusability() {
    let mut hasher = BalloonHash::new();
    let first = [1u8; HEADER_SIZE];
    let second = [2u8; HEADER_SIZE];

    let hash1 = hasher.hash(&first);
    let hash2 = hasher.hash(&second);
    assert_ne!(hash1, hash2);

    // No state leaks from the previous header
    assert_eq!(hasher.hash(&first), hash1);
    assert_eq!(hash1, hash(&first));
}

#[test]
fn test_salt_independence() {
    let mut base = [0u8; HEADER_SIZE];
    for (i, byte) in base.iter_mut().enumerate() {
        *byte = (i * 7 + 3) as u8;
    }
    let base_salt = extract_salt(&base);
    let base_hash = hash(&base);

    // Bytes outside [4, 36) keep the salt but still change the digest
    for &pos in &[0usize, 3, 36, 50, 76, 79] {
        let mut header = base;
        header[pos] ^= 0x01;
        assert_eq!(extract_salt(&header), base_salt, "salt changed at {}", pos);
        assert_ne!(hash(&header), base_hash, "digest unchanged at {}", pos);
    }

    // Bytes inside the salt range change both
    for &pos in &[4usize, 20, 35] {
        let mut header = base;
        header[pos] ^= 0x01;
        assert_ne!(extract_salt(&header), base_salt);
        assert_ne!(hash(&header), base_hash);
    }
}

#[test]
fn test_avalanche_effect() {
    let input1 = [0u8; HEADER_SIZE];
    let mut input2 = input1;
    input2[HEADER_SIZE - 1] ^= 1;

    let hash1 = hash(&input1);
    let hash2 = hash(&input2);

    let diff_bits: u32 = hash1
        .iter()
        .zip(hash2.iter())
        .map(|(a, b)| (a ^ b).count_ones())
        .sum();

    assert!(
        (90..=166).contains(&diff_bits),
        "Avalanche effect: {} bits differ (expected ~128)",
        diff_bits
    );
}

#[test]
fn test_counter_monotonicity() {
    let (calls, _) = recorded(&[0x11u8; HEADER_SIZE]);

    assert_eq!(calls.len() as u64, HASH_CALLS);
    for (expected, (message, _)) in calls.iter().enumerate() {
        assert_eq!(counter_of(message), expected as u64);
    }
}

#[test]
fn test_message_layout() {
    let header = header_from_hex(&(0u8..80).map(|b| format!("{:02x}", b)).collect::<String>());
    let salt = extract_salt(&header);
    let (calls, digest) = recorded(&header);

    // Expansion: counter || header || salt, then counter || previous block
    let (first, block0) = &calls[0];
    assert_eq!(first.len(), 8 + HEADER_SIZE + SALT_SIZE);
    assert_eq!(&first[8..8 + HEADER_SIZE], &header[..]);
    assert_eq!(&first[8 + HEADER_SIZE..], &salt[..]);

    let (second, _) = &calls[1];
    assert_eq!(&second[8..], &block0[..]);

    // Index call for t = 1, m = 2, i = 1: counter || t || m || i || salt
    let index_call = S_COST + 112 + 2 * 7 + 1 + 2;
    let (message, _) = &calls[index_call];
    assert_eq!(message.len(), 8 + 24 + SALT_SIZE);
    assert_eq!(&message[8..16], &1u64.to_le_bytes());
    assert_eq!(&message[16..24], &2u64.to_le_bytes());
    assert_eq!(&message[24..32], &1u64.to_le_bytes());
    assert_eq!(&message[32..], &salt[..]);

    // Digest is the first half of the final write to the last block
    let (_, last) = calls.last().unwrap();
    assert_eq!(&last[..DIGEST_SIZE], &digest[..]);
}

/// Replays the recorded schedule against a shadow buffer and checks every
/// mixing input: the wrapped neighbour for m = 0 and the little-endian
/// partner index.
#[test]
fn test_mixing_schedule() {
    let (calls, digest) = recorded(&[0xC3u8; HEADER_SIZE]);
    let mut calls = calls.into_iter();
    let mut blocks = [[0u8; BLOCK_SIZE]; S_COST];

    for block in blocks.iter_mut() {
        *block = calls.next().unwrap().1;
    }

    let mut partners = [0usize; S_COST];
    for t in 0..T_COST {
        for m in 0..S_COST {
            let prev = previous_block(m);
            if m == 0 {
                assert_eq!(prev, S_COST - 1, "t = {}", t);
            }

            let (message, output) = calls.next().unwrap();
            assert_eq!(&message[8..72], &blocks[prev][..], "neighbour t={} m={}", t, m);
            assert_eq!(&message[72..], &blocks[m][..]);
            blocks[m] = output;

            for _ in 0..DELTA {
                let (_, index) = calls.next().unwrap();
                let other = (u64::from_le_bytes(index[..8].try_into().unwrap())
                    % S_COST as u64) as usize;
                partners[other] += 1;

                let (message, output) = calls.next().unwrap();
                assert_eq!(&message[8..72], &blocks[m][..]);
                assert_eq!(&message[72..], &blocks[other][..], "partner t={} m={}", t, m);
                blocks[m] = output;
            }
        }
    }

    assert!(calls.next().is_none());
    assert_eq!(&blocks[S_COST - 1][..DIGEST_SIZE], &digest[..]);
    assert!(partners.iter().filter(|&&n| n > 0).count() > 1);
}

#[test]
fn test_nonce_changes_digest() {
    let mut header = [0u8; HEADER_SIZE];
    let hash1 = hash(&header);

    header[HEADER_SIZE - 4..].copy_from_slice(&1u32.to_be_bytes());
    let hash2 = hash(&header);

    assert_ne!(hash1, hash2, "Different nonces must produce different hashes");
}
