//! Write a square of uniform 16-bit gray noise to `noise.png`.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tessel::synth::DEFAULT_SIZE;

#[derive(Parser, Debug)]
#[command(version, about = "Write uniform 16-bit gray noise to noise.png")]
struct Args {
    /// Side length in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: u32,

    /// Seed for a reproducible image
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tessel::commands::noise(Path::new("."), args.size, args.seed)?;
    Ok(())
}
