//! Write a hue-wheel icon to `hue.png`.

use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tessel::synth::DEFAULT_SIZE;

#[derive(Parser, Debug)]
#[command(version, about = "Write a horizontal hue sweep to hue.png")]
struct Args {
    /// Side length in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tessel::commands::hue(Path::new("."), args.size)?;
    Ok(())
}
