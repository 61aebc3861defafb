//! C FFI bindings for embedding in native miners

use core::slice;
use core::sync::atomic::AtomicBool;

use crate::params::{DIGEST_SIZE, HEADER_SIZE, HEADER_WORDS, TARGET_WORDS};
use crate::{BalloonHash, Scanner, Target, Work};

/// Compute the balloon digest of an 80-byte header
/// - output: pointer to 32-byte buffer for result
/// - input: pointer to 80 header bytes in wire order
#[unsafe(no_mangle)]
pub extern "C" fn balloon_hash(output: *mut u8, input: *const u8) {
    if output.is_null() || input.is_null() {
        return;
    }

    unsafe {
        let mut header = [0u8; HEADER_SIZE];
        header.copy_from_slice(slice::from_raw_parts(input, HEADER_SIZE));

        let result = BalloonHash::new().hash(&header);
        slice::from_raw_parts_mut(output, DIGEST_SIZE).copy_from_slice(&result);
    }
}

/// Scan nonces from `data[19]` up to `max_nonce`
/// - data: 20 header words; the nonce word is updated in place
/// - target: 8 target words, word 7 most significant
/// - hashes_done: receives the number of hashes attempted
/// - restart: cancellation flag polled once per nonce (may be null)
///
/// Returns 1 if a solution was found, 0 otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn balloon_scanhash(
    thr_id: u32,
    data: *mut u32,
    target: *const u32,
    max_nonce: u32,
    hashes_done: *mut u64,
    restart: *const AtomicBool,
) -> i32 {
    if data.is_null() || target.is_null() {
        return 0;
    }

    unsafe {
        let data = slice::from_raw_parts_mut(data, HEADER_WORDS);
        let mut words = [0u32; HEADER_WORDS];
        words.copy_from_slice(data);

        let mut target_words = [0u32; TARGET_WORDS];
        target_words.copy_from_slice(slice::from_raw_parts(target, TARGET_WORDS));

        let restart = if restart.is_null() {
            None
        } else {
            Some(&*restart)
        };

        let mut work = Work::new(words, Target(target_words));
        let report = Scanner::new(thr_id as usize).scan(&mut work, max_nonce, &restart);

        data.copy_from_slice(&work.data);
        if !hashes_done.is_null() {
            *hashes_done = report.hashes_done;
        }

        i32::from(report.found())
    }
}

/// Benchmark: compute N hashes and return total microseconds
#[unsafe(no_mangle)]
pub extern "C" fn balloon_benchmark(iterations: u32) -> u64 {
    use std::time::Instant;

    let mut hasher = BalloonHash::new();
    let mut work = Work::new([0u32; HEADER_WORDS], Target::MAX);

    let start = Instant::now();
    for i in 0..iterations {
        work.set_nonce(i);
        let _ = hasher.hash(&work.header());
    }
    let elapsed = start.elapsed();

    elapsed.as_micros() as u64
}

/// Get hash rate (hashes per second) from a benchmark run
#[unsafe(no_mangle)]
pub extern "C" fn balloon_hashrate(iterations: u32, microseconds: u64) -> f64 {
    if microseconds == 0 {
        return 0.0;
    }
    (iterations as f64) / (microseconds as f64 / 1_000_000.0)
}
