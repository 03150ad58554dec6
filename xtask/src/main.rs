//! xtask - Development task runner for syncset
//!
//! Usage:
//!   cargo run -p xtask -- stress --scenario <yaml> [options]
//!   cargo run -p xtask -- loom

mod loom;
mod stress;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development task runner for syncset")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a concurrent stress scenario against ConcurrentHashSet
    Stress(stress::StressArgs),
    /// Run the loom model-checking suite
    Loom(loom::LoomArgs),
}

/// Get the project root directory
pub fn project_root() -> Result<PathBuf> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));

    // xtask is in project_root/xtask, so go up one level
    let root = if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(PathBuf::from)
            .context("xtask manifest directory has no parent")?
    } else {
        manifest_dir
    };

    Ok(root)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("xtask=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stress(args) => stress::run(args),
        Commands::Loom(args) => loom::run(args),
    }
}
