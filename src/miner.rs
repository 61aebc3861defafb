//! Chunked mining driver
//!
//! Splits a job's nonce range into chunks and runs the core scan loop over
//! each one on the calling thread, logging hashrate between chunks.

use std::time::Instant;

use tracing::{debug, info};

use crate::algorithm::{Cancellation, ScanOutcome, Scanner, Work};
use crate::error::{Error, Result};
use crate::job::{Job, Solution};

/// Default nonces per chunk
pub const DEFAULT_CHUNK: u32 = 4096;

/// How a mining run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MineResult {
    Found(Solution),
    Exhausted { hashes: u64 },
    Cancelled { hashes: u64, next_nonce: u32 },
}

/// Scan `job` from `first_nonce` to `max_nonce` in chunks of `chunk` nonces
pub fn mine<C>(job: &Job, chunk: u32, thread_id: usize, cancel: &C) -> Result<MineResult>
where
    C: Cancellation + ?Sized,
{
    if chunk == 0 {
        return Err(Error::range("chunk size must be positive"));
    }

    let mut work = job.to_work()?;
    let mut scanner = Scanner::new(thread_id);
    let start = Instant::now();

    info!(
        first_nonce = job.first_nonce,
        max_nonce = job.max_nonce,
        chunk,
        "mining started"
    );

    loop {
        let chunk_start = work.nonce();
        let chunk_end = chunk_start.saturating_add(chunk).min(job.max_nonce);
        let report = scanner.scan(&mut work, chunk_end, cancel);
        let hashes = attempted(job, &work, report.outcome);

        let elapsed = start.elapsed().as_secs_f64();
        let hashrate = if elapsed > 0.0 {
            hashes as f64 / elapsed
        } else {
            0.0
        };
        debug!(chunk_start, chunk_end, outcome = ?report.outcome, "chunk done");

        match report.outcome {
            ScanOutcome::Found => {
                let digest = report.digest.unwrap_or_default();
                info!(nonce = report.nonce, hashes, hashrate, "solution found");
                return Ok(MineResult::Found(Solution::new(&work, &digest, hashes)));
            }
            ScanOutcome::Cancelled => {
                info!(next_nonce = report.nonce, hashes, "mining cancelled");
                return Ok(MineResult::Cancelled {
                    hashes,
                    next_nonce: report.nonce,
                });
            }
            ScanOutcome::Exhausted if chunk_end >= job.max_nonce => {
                info!(hashes, hashrate, "nonce range exhausted");
                return Ok(MineResult::Exhausted { hashes });
            }
            ScanOutcome::Exhausted => {
                info!(nonce = chunk_end, hashes, hashrate, "progress");
                if cancel.is_cancelled() {
                    return Ok(MineResult::Cancelled {
                        hashes,
                        next_nonce: chunk_end,
                    });
                }
            }
        }
    }
}

/// Real number of nonces hashed since the start of the job
fn attempted(job: &Job, work: &Work, outcome: ScanOutcome) -> u64 {
    let tried_up_to = match outcome {
        ScanOutcome::Found => u64::from(work.nonce()) + 1,
        ScanOutcome::Exhausted | ScanOutcome::Cancelled => u64::from(work.nonce()),
    };
    tried_up_to - u64::from(job.first_nonce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;

    use crate::algorithm::{HEADER_WORDS, NONCE_WORD, Target};

    // Header words k * 0x01010101: with target word 7 at 0x0FFFFFFF the
    // solving nonces from 0 are 5, 9, 16, 19.
    fn sample_job(first_nonce: u32, max_nonce: u32) -> Job {
        let mut data = [0u32; HEADER_WORDS];
        for (k, word) in data.iter_mut().enumerate() {
            *word = (k as u32).wrapping_mul(0x0101_0101);
        }
        data[NONCE_WORD] = 0;

        let mut target = [u32::MAX; 8];
        target[7] = 0x0FFF_FFFF;

        Job {
            header: hex::encode(Work::new(data, Target::MAX).header()),
            target: hex::encode(Target(target).to_be_bytes()),
            first_nonce,
            max_nonce,
        }
    }

    #[test]
    fn test_mine_across_chunks() {
        let result = mine(&sample_job(0, 64), 4, 0, &AtomicBool::new(false)).unwrap();

        match result {
            MineResult::Found(solution) => {
                assert_eq!(solution.nonce, 5);
                assert_eq!(solution.hashes, 6);
                assert!(solution.header.ends_with("00000005"));
            }
            other => panic!("expected solution, got {:?}", other),
        }
    }

    #[test]
    fn test_mine_exhausts_range() {
        let result = mine(&sample_job(10, 16), 3, 0, &AtomicBool::new(false)).unwrap();
        assert_eq!(result, MineResult::Exhausted { hashes: 6 });
    }

    #[test]
    fn test_mine_cancelled() {
        let result = mine(&sample_job(10, 16), 100, 0, &AtomicBool::new(true)).unwrap();
        assert_eq!(
            result,
            MineResult::Cancelled {
                hashes: 1,
                next_nonce: 11
            }
        );
    }

    #[test]
    fn test_mine_rejects_zero_chunk() {
        assert!(matches!(
            mine(&sample_job(0, 4), 0, 0, &AtomicBool::new(false)),
            Err(Error::Range(_))
        ));
    }
}
