//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `domain_cname` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Optional end-of-run statistics on stderr
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use domain_cname::initialization::init_logger_with;
use domain_cname::{print_lookup_statistics, run_resolve, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let show_stats = config.show_stats;

    match run_resolve(config).await {
        Ok(report) => {
            if show_stats {
                print_lookup_statistics(&report);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("domain_cname error: {:#}", e);
            process::exit(1);
        }
    }
}
