//! Balloon Prover CLI
//!
//! A command-line tool for searching Balloon proof-of-work nonces.
//!
//! # Commands
//!
//! - `hash` - Hash a single header
//! - `mine` - Scan a nonce range for a digest below the target
//! - `benchmark` - Run performance benchmark

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use balloon::job::{Job, parse_header};
use balloon::logging::{LogFormat, init_logging};
use balloon::miner::{DEFAULT_CHUNK, MineResult, mine};
use balloon::{BalloonHash, Target};

#[derive(Parser)]
#[command(name = "balloon")]
#[command(author = "Cyberia")]
#[command(version)]
#[command(about = "Balloon proof-of-work nonce scanner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level or filter directive
    #[arg(long, global = true, env = "BALLOON_LOG", default_value = "info")]
    log_level: String,

    /// Log format
    #[arg(long, global = true, env = "BALLOON_LOG_FORMAT", value_enum, default_value = "plain")]
    log_format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Plain,
    Json,
}

impl From<Format> for LogFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Plain => LogFormat::Plain,
            Format::Json => LogFormat::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Hash an 80-byte header
    Hash {
        /// Header as 160 hex characters
        #[arg(long)]
        header: String,
    },

    /// Scan a nonce range
    Mine {
        /// JSON job file (header, target, first_nonce, max_nonce)
        #[arg(long, conflicts_with_all = ["header", "target", "start", "end"])]
        job: Option<PathBuf>,

        /// Header as 160 hex characters
        #[arg(long, required_unless_present = "job")]
        header: Option<String>,

        /// Target as 64 hex characters (256-bit big-endian)
        #[arg(long)]
        target: Option<String>,

        /// First nonce to try
        #[arg(long, default_value_t = 0)]
        start: u32,

        /// Stop before this nonce
        #[arg(long, default_value_t = u32::MAX)]
        end: u32,

        /// Nonces per progress report
        #[arg(long, default_value_t = DEFAULT_CHUNK)]
        chunk: u32,

        /// Print the solution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of hashes to compute
        #[arg(short, long, default_value = "1000")]
        count: u32,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level, cli.log_format.into());

    let result = match cli.command {
        Commands::Hash { header } => cmd_hash(&header),
        Commands::Mine {
            job,
            header,
            target,
            start,
            end,
            chunk,
            json,
        } => load_job(job, header, target, start, end).and_then(|job| cmd_mine(job, chunk, json)),
        Commands::Benchmark { count } => cmd_benchmark(count),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_job(
    path: Option<PathBuf>,
    header: Option<String>,
    target: Option<String>,
    start: u32,
    end: u32,
) -> anyhow::Result<Job> {
    if let Some(path) = path {
        return Ok(Job::load(&path)?);
    }

    let header = header.ok_or_else(|| anyhow::anyhow!("either --job or --header is required"))?;
    Ok(Job {
        header,
        target: target.unwrap_or_else(|| hex::encode(Target::MAX.to_be_bytes())),
        first_nonce: start,
        max_nonce: end,
    })
}

fn cmd_hash(header_hex: &str) -> anyhow::Result<()> {
    let header = parse_header(header_hex)?;
    let digest = BalloonHash::new().hash(&header);
    println!("{}", hex::encode(digest));
    Ok(())
}

fn cmd_mine(job: Job, chunk: u32, json: bool) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()?;

    let result = runtime.block_on(async move {
        let cancel = Arc::new(AtomicBool::new(false));
        let scan_cancel = cancel.clone();
        let mut scan = tokio::task::spawn_blocking(move || mine(&job, chunk, 0, &scan_cancel));

        tokio::select! {
            result = &mut scan => result,
            _ = tokio::signal::ctrl_c() => {
                warn!("interrupt received, stopping after current hash");
                cancel.store(true, Ordering::Relaxed);
                scan.await
            }
        }
    })??;

    match result {
        MineResult::Found(solution) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&solution)?);
            } else {
                println!("Found valid hash!");
                println!("Nonce: {}", solution.nonce);
                println!("Digest: {}", solution.digest);
                println!("Header: {}", solution.header);
                println!("Hashes computed: {}", solution.hashes);
            }
        }
        MineResult::Exhausted { hashes } => {
            println!("No solution in range ({} hashes)", hashes);
        }
        MineResult::Cancelled { hashes, next_nonce } => {
            println!(
                "Cancelled after {} hashes; resume with --start {}",
                hashes, next_nonce
            );
        }
    }

    Ok(())
}

fn cmd_benchmark(count: u32) -> anyhow::Result<()> {
    info!(count, "running benchmark");

    let mut hasher = BalloonHash::new();
    let mut header = [0u8; balloon::algorithm::HEADER_SIZE];

    let start = Instant::now();

    for i in 0..count {
        header[76..].copy_from_slice(&i.to_be_bytes());
        let _ = hasher.hash(&header);
    }

    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Total hashes: {}", count);
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s", hashrate);

    println!("\nAlgorithm parameters:");
    println!("  Blocks: {}", balloon::algorithm::S_COST);
    println!("  Memory: {} bytes", balloon::algorithm::BUFFER_SIZE);
    println!("  Rounds: {}", balloon::algorithm::T_COST);
    println!("  Delta: {}", balloon::algorithm::DELTA);
    println!("  Hash calls per digest: {}", balloon::algorithm::HASH_CALLS);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_job_excludes_nonce_range_flags() {
        let job_only = Cli::try_parse_from(["balloon", "mine", "--job", "job.json"]);
        assert!(job_only.is_ok());

        for flag in ["--start", "--end"] {
            let result = Cli::try_parse_from(["balloon", "mine", "--job", "job.json", flag, "500"]);
            assert!(result.is_err(), "{} accepted alongside --job", flag);
        }
    }

    #[test]
    fn test_header_mine_keeps_nonce_range() {
        let cli = Cli::try_parse_from([
            "balloon", "mine", "--header", "00", "--start", "500", "--end", "900",
        ])
        .unwrap();

        match cli.command {
            Commands::Mine { start, end, .. } => {
                assert_eq!((start, end), (500, 900));
            }
            _ => panic!("expected mine"),
        }
    }
}
