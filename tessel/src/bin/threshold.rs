//! Threshold a PNG into a black and white `threshold.png`.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tessel::filter::{DEFAULT_THRESHOLD, FilterOptions, PartitionStrategy};

#[derive(Parser, Debug)]
#[command(version, about = "Threshold an image into threshold.png")]
struct Args {
    /// Image to threshold
    input: PathBuf,

    /// Intensities at or below this level become black
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    level: u16,

    /// Partitioning: sequential, quadrants or bands:N
    #[arg(long, default_value = "quadrants")]
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
    let result =
        tessel::commands::threshold(&args.input, Path::new("."), args.level, options, io::stdout());
    if let Err(err) = &result
        && let Some(open) = err.downcast_ref::<tessel::commands::OpenError>()
    {
        eprintln!("{open}");
        eprintln!("{}", Args::command().render_usage());
        std::process::exit(1);
    }
    result.map(|_| ())
}
