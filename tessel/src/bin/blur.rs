//! Blur `noise.png` with a square window mean into `blur/blur{r}.png`.

use anyhow::Result;
use clap::Parser;
use std::io;
use std::num::NonZeroUsize;
use std::path::Path;
use tessel::filter::{FilterOptions, PartitionStrategy};

#[derive(Parser, Debug)]
#[command(version, about = "Blur noise.png into blur/blur{radius}.png")]
struct Args {
    /// Window radius in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(0..1024))]
    radius: u32,

    /// Partitioning: sequential, quadrants or bands:N
    #[arg(long, default_value = "sequential")]
    strategy: PartitionStrategy,

    /// Worker threads (defaults to the global pool)
    #[arg(long)]
    threads: Option<NonZeroUsize>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let options = FilterOptions {
        strategy: args.strategy,
        threads: args.threads,
    };
    tessel::commands::blur(Path::new("."), args.radius, options, io::stdout())?;
    Ok(())
}
