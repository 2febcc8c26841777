//! The command-line programs as library functions
//!
//! Each function takes the directory it works in, so the programs can be
//! driven from tests. The binaries pass the current directory.

use anyhow::{Context, Result, bail};
use std::fs::{self, File};
use std::io::{self, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tessel_core::synth;
use tessel_filter::{AggregateFunction, FilterEngine, FilterOptions};
use thiserror::Error;

/// Noise image written by `noise` and read by `blur`
pub const NOISE_FILE: &str = "noise.png";
/// Hue wheel written by `hue`
pub const HUE_FILE: &str = "hue.png";
/// Directory receiving the `blur` output
pub const BLUR_DIR: &str = "blur";
/// Output of `threshold`
pub const THRESHOLD_FILE: &str = "threshold.png";

/// An input file named on the command line could not be opened
///
/// The binaries answer it with the usage text, like a bad argument.
#[derive(Debug, Error)]
#[error("error opening {}", path.display())]
pub struct OpenError {
    pub path: PathBuf,
    #[source]
    source: io::Error,
}

/// Path of the blur output for `radius` under `dir`.
pub fn blur_path(dir: &Path, radius: u32) -> PathBuf {
    dir.join(BLUR_DIR).join(format!("blur{radius}.png"))
}

/// Create `path` as a directory. An existing entry counts as success.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    match fs::create_dir(path) {
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        other => other,
    }
}

/// Write `size x size` gray16 noise to `dir/noise.png`.
///
/// A fixed `seed` makes the image reproducible.
pub fn noise(dir: &Path, size: u32, seed: Option<u64>) -> Result<PathBuf> {
    let grid = match seed {
        Some(seed) => synth::noise_seeded(size, size, seed),
        None => synth::noise_from_entropy(size, size),
    }
    .context("failed to generate noise")?;

    let path = dir.join(NOISE_FILE);
    tessel_io::write_gray16_file(&grid, &path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Write a `size x size` hue wheel to `dir/hue.png`.
pub fn hue(dir: &Path, size: u32) -> Result<PathBuf> {
    let grid = synth::hue_wheel(size).context("failed to generate hue wheel")?;

    let path = dir.join(HUE_FILE);
    tessel_io::write_rgba8_file(&grid, &path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Blur `dir/noise.png` with `radius` into `dir/blur/blur{radius}.png`.
///
/// Progress goes to `progress`.
pub fn blur<W: Write + Send>(
    dir: &Path,
    radius: u32,
    options: FilterOptions,
    progress: W,
) -> Result<PathBuf> {
    let aggregate = AggregateFunction::mean(radius)?;

    let source = dir.join(NOISE_FILE);
    if !source.exists() {
        bail!("you must run noise first");
    }
    let input = tessel_io::read_png_file(&source)
        .with_context(|| format!("failed to read {}", source.display()))?;

    let out_dir = dir.join(BLUR_DIR);
    ensure_dir(&out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;

    let engine = FilterEngine::with_options(aggregate, options);
    let (output, _) = engine.run_with_progress(&input, progress)?;

    let path = blur_path(dir, radius);
    tessel_io::write_gray16_file(&output, &path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Threshold `input` at `level` into `dir/threshold.png`.
///
/// Progress goes to `progress`.
pub fn threshold<W: Write + Send>(
    input: &Path,
    dir: &Path,
    level: u16,
    options: FilterOptions,
    progress: W,
) -> Result<PathBuf> {
    let file = File::open(input).map_err(|source| OpenError {
        path: input.to_path_buf(),
        source,
    })?;
    let grid = tessel_io::read_png(BufReader::new(file))
        .with_context(|| format!("failed to read {}", input.display()))?;

    let engine = FilterEngine::with_options(AggregateFunction::threshold(level), options);
    let (output, _) = engine.run_with_progress(&grid, progress)?;

    let path = dir.join(THRESHOLD_FILE);
    tessel_io::write_gray16_file(&output, &path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
