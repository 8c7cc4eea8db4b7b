use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use ls8_core::{loader, Cpu};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Run an LS-8 program image.
#[derive(Debug, Parser)]
struct Args {
    /// Path to a text-encoded .ls8 program, one base-2 byte per line.
    program: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_format = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_format)
        .init();

    tracing::info!("loading LS-8 program '{}'", args.program.display());
    let image = loader::load(&args.program)?;
    let mut cpu = Cpu::new();
    cpu.load(&image)?;
    cpu.run()?;
    Ok(())
}
