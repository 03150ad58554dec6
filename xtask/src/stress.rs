//! Concurrent stress runner
//!
//! This module provides the `stress` subcommand, which drives a shared
//! `ConcurrentHashSet` from many threads according to a scenario file and
//! verifies the final membership against the net effect of the workload.

use anyhow::{Context, Result, bail, ensure};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Instant;
use syncset::set::ConcurrentHashSet;

use crate::project_root;

const DEFAULT_THREADS: usize = 8;
const DEFAULT_KEYS_PER_THREAD: usize = 10_000;
const DEFAULT_SHARED_KEYS: usize = 1_000;
const DEFAULT_ROUNDS: usize = 3;

/// Arguments for the stress subcommand
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Scenario YAML file path
    #[arg(long, short = 's')]
    pub scenario: Option<PathBuf>,

    /// Override number of worker threads
    #[arg(long)]
    pub threads: Option<usize>,

    /// Override number of keys owned by each thread
    #[arg(long)]
    pub keys_per_thread: Option<usize>,

    /// Override number of keys every thread contends on
    #[arg(long)]
    pub shared_keys: Option<usize>,

    /// Override number of rounds
    #[arg(long)]
    pub rounds: Option<usize>,
}

/// Scenario configuration from YAML
#[derive(Debug, Default, Deserialize)]
struct ScenarioConfig {
    name: Option<String>,
    threads: Option<usize>,
    keys_per_thread: Option<usize>,
    shared_keys: Option<usize>,
    rounds: Option<usize>,
}

/// Resolved workload parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct StressConfig {
    name: String,
    threads: usize,
    keys_per_thread: usize,
    shared_keys: usize,
    rounds: usize,
}

impl StressConfig {
    /// Priority: CLI > Environment > Scenario YAML > Default
    fn from_args_and_scenario(args: &StressArgs, scenario: &ScenarioConfig) -> Result<Self> {
        let threads = resolve(args.threads, "STRESS_THREADS", scenario.threads, DEFAULT_THREADS)?;
        let keys_per_thread = resolve(
            args.keys_per_thread,
            "STRESS_KEYS_PER_THREAD",
            scenario.keys_per_thread,
            DEFAULT_KEYS_PER_THREAD,
        )?;
        let shared_keys = resolve(
            args.shared_keys,
            "STRESS_SHARED_KEYS",
            scenario.shared_keys,
            DEFAULT_SHARED_KEYS,
        )?;
        let rounds = resolve(args.rounds, "STRESS_ROUNDS", scenario.rounds, DEFAULT_ROUNDS)?;

        ensure!(threads > 0, "threads must be at least 1");
        ensure!(rounds > 0, "rounds must be at least 1");

        Ok(Self {
            name: scenario.name.clone().unwrap_or_else(|| "default".to_string()),
            threads,
            keys_per_thread,
            shared_keys,
            rounds,
        })
    }
}

fn resolve(
    cli: Option<usize>,
    variable: &str,
    scenario: Option<usize>,
    default: usize,
) -> Result<usize> {
    if let Some(value) = cli {
        return Ok(value);
    }
    if let Ok(raw) = env::var(variable) {
        return raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {variable}: {raw}"));
    }
    Ok(scenario.unwrap_or(default))
}

/// Outcome of one stress round
#[derive(Debug, Serialize)]
struct RoundReport {
    round: usize,
    contended_inserts_won: usize,
    contended_removes_won: usize,
    final_len: usize,
    elapsed_ms: u128,
}

/// Full run report printed as JSON
#[derive(Debug, Serialize)]
struct StressReport {
    config: StressConfig,
    rounds: Vec<RoundReport>,
}

fn load_scenario(path: &Path) -> Result<ScenarioConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
    serde_yaml::from_str(&content).context("Failed to parse scenario YAML")
}

/// Run one round of the workload and verify its outcome.
///
/// Each thread owns a disjoint key range: it inserts every key and then
/// removes the even ones. All threads also race to insert and then remove a
/// shared key range, which must produce exactly one winner per key.
fn run_round(config: &StressConfig, round: usize) -> Result<RoundReport> {
    let owned_base = config.shared_keys;
    let set = Arc::new(ConcurrentHashSet::with_capacity(
        owned_base + config.threads * config.keys_per_thread,
    ));
    let inserts_won = Arc::new(AtomicUsize::new(0));
    let removes_won = Arc::new(AtomicUsize::new(0));
    let barrier = Arc::new(Barrier::new(config.threads));

    let started = Instant::now();
    let handles: Vec<_> = (0..config.threads)
        .map(|worker| {
            let set = Arc::clone(&set);
            let inserts_won = Arc::clone(&inserts_won);
            let removes_won = Arc::clone(&removes_won);
            let barrier = Arc::clone(&barrier);
            let keys_per_thread = config.keys_per_thread;
            let shared_keys = config.shared_keys;
            thread::spawn(move || {
                let base = owned_base + worker * keys_per_thread;
                barrier.wait();
                for key in 0..shared_keys {
                    if set.insert(key) {
                        inserts_won.fetch_add(1, Ordering::Relaxed);
                    }
                }
                for key in base..base + keys_per_thread {
                    set.insert(key);
                }
                barrier.wait();
                for key in 0..shared_keys {
                    if set.remove(&key) {
                        removes_won.fetch_add(1, Ordering::Relaxed);
                    }
                }
                for key in (base..base + keys_per_thread).filter(|key| key % 2 == 0) {
                    set.remove(&key);
                }
            })
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            bail!("Worker thread panicked in round {round}");
        }
    }
    let elapsed = started.elapsed();

    let contended_inserts_won = inserts_won.load(Ordering::SeqCst);
    let contended_removes_won = removes_won.load(Ordering::SeqCst);
    ensure!(
        contended_inserts_won == config.shared_keys,
        "round {round}: {contended_inserts_won} contended inserts reported success, expected {}",
        config.shared_keys
    );
    ensure!(
        contended_removes_won == config.shared_keys,
        "round {round}: {contended_removes_won} contended removes reported success, expected {}",
        config.shared_keys
    );

    let owned_end = owned_base + config.threads * config.keys_per_thread;
    let expected: HashSet<usize> = (owned_base..owned_end)
        .filter(|key| key % 2 == 1)
        .collect();
    let actual: HashSet<usize> = set.snapshot().into_iter().collect();
    if actual != expected {
        let missing = expected.difference(&actual).count();
        let unexpected = actual.difference(&expected).count();
        bail!(
            "round {round}: final membership diverged \
             ({missing} missing, {unexpected} unexpected)"
        );
    }

    tracing::info!(round, final_len = actual.len(), ?elapsed, "round verified");

    Ok(RoundReport {
        round,
        contended_inserts_won,
        contended_removes_won,
        final_len: actual.len(),
        elapsed_ms: elapsed.as_millis(),
    })
}

/// Main entry point for stress command
pub fn run(args: StressArgs) -> Result<()> {
    let scenario = match &args.scenario {
        Some(path) => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                project_root()?.join(path)
            };
            load_scenario(&path)?
        }
        None => ScenarioConfig::default(),
    };

    let config = StressConfig::from_args_and_scenario(&args, &scenario)?;
    tracing::info!(?config, "starting stress run");

    let rounds = (1..=config.rounds)
        .map(|round| run_round(&config, round))
        .collect::<Result<Vec<_>>>()?;

    let report = StressReport { config, rounds };
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to render report")?
    );

    Ok(())
}
