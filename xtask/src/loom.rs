//! Loom model-checking runner
//!
//! This module provides the `loom` subcommand, which runs the loom test
//! suite with the `loom` feature enabled and in release mode, the way loom
//! expects to be driven.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::env;
use std::process::Command;

use crate::project_root;

const LOOM_TEST_TARGET: &str = "concurrent_hash_set_loom_tests";

/// Arguments for the loom subcommand
#[derive(Args, Debug)]
pub struct LoomArgs {
    /// Maximum number of preemptions explored per execution (LOOM_MAX_PREEMPTIONS)
    #[arg(long)]
    pub max_preemptions: Option<u32>,

    /// Only run tests whose name contains this filter
    #[arg(long)]
    pub filter: Option<String>,
}

/// Main entry point for loom command
pub fn run(args: LoomArgs) -> Result<()> {
    let root = project_root()?;
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());

    let mut command = Command::new(cargo);
    command.current_dir(&root).args([
        "test",
        "--release",
        "--features",
        "loom",
        "--test",
        LOOM_TEST_TARGET,
    ]);
    if let Some(max_preemptions) = args.max_preemptions {
        command.env("LOOM_MAX_PREEMPTIONS", max_preemptions.to_string());
    }
    if let Some(filter) = &args.filter {
        command.arg("--").arg(filter);
    }

    tracing::info!(root = %root.display(), "running loom suite");
    let status = command.status().context("Failed to run cargo test")?;

    if !status.success() {
        bail!("Loom suite failed: {status}");
    }

    tracing::info!("loom suite passed");
    Ok(())
}
