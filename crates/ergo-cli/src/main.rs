//! Ergonomic Analysis - Main Entry Point

use anyhow::Context;
use clap::Parser;
use ergo_cli::{init_logging, render, run, Args};
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.json_logs)?;

    info!("=== Ergonomic Analysis v{} ===", env!("CARGO_PKG_VERSION"));

    let report = run(&args).with_context(|| format!("analysis of {} failed", args.input.display()))?;
    for finding in report.finding_messages() {
        info!("{}", finding);
    }

    println!("{}", render(&report, args.pretty)?);
    Ok(())
}
