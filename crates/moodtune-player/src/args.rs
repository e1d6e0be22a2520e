//! Command line flags
//!
//! - `--config <path>`: configuration file (default `<config_dir>/moodtune/config.yaml`)
//! - `--catalog <path>`: catalog YAML, overrides `catalog_path` from the config
//! - `--script <path>`: sample script replayed as the camera feed
//! - `--loop`: replay the script forever
//! - `--track-length <secs>`: length of every simulated track

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};

/// Length of a simulated track when `--track-length` is not given
const DEFAULT_TRACK_LENGTH: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub looping: bool,
    pub track_length: Duration,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: None,
            catalog: None,
            script: None,
            looping: false,
            track_length: DEFAULT_TRACK_LENGTH,
        }
    }
}

impl Args {
    /// Parse flags, skipping the program name
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut iter = args.into_iter().skip(1);

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(value(&mut iter, &arg)?.into()),
                "--catalog" => parsed.catalog = Some(value(&mut iter, &arg)?.into()),
                "--script" => parsed.script = Some(value(&mut iter, &arg)?.into()),
                "--loop" => parsed.looping = true,
                "--track-length" => {
                    let raw = value(&mut iter, &arg)?;
                    let secs: u64 = raw
                        .parse()
                        .with_context(|| format!("invalid --track-length {:?}", raw))?;
                    if secs == 0 {
                        bail!("--track-length must be at least 1 second");
                    }
                    parsed.track_length = Duration::from_secs(secs);
                }
                other => bail!("unknown argument {:?}", other),
            }
        }
        Ok(parsed)
    }
}

fn value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    iter.next().ok_or_else(|| anyhow!("{} needs a value", flag))
}
