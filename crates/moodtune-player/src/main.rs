//! moodtune player - music that follows your face
//!
//! Headless driver for the moodtune engine. It:
//! 1. Loads the configuration and the track catalog
//! 2. Replays a sample script in place of the camera and expression model
//! 3. Runs the session service against a simulated media player
//! 4. Reads intents from stdin and logs every session change
//!
//! See [`args`] for the command line flags.

mod args;
mod console;
mod media;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use moodtune_core::catalog::{load_catalog, Catalog};
use moodtune_core::config::{self, MoodConfig};
use moodtune_core::playback::PlaybackController;
use moodtune_core::sampler::{EmotionSampler, ScriptedSampler};
use moodtune_core::services::{SessionHandle, SessionService};
use moodtune_core::stabilizer::EmotionStabilizer;
use tokio::sync::mpsc;

use args::Args;
use media::SimulatedMedia;

/// Time the simulated player needs to fetch a source
const LOAD_LATENCY: Duration = Duration::from_millis(300);

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger - set RUST_LOG=debug for per-tick decisions
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse(std::env::args())?;
    log::info!("moodtune-player starting up");

    let config_path = args.config.clone().unwrap_or_else(config::default_config_path);
    let config: MoodConfig = config::load_config(&config_path);

    let catalog = Arc::new(open_catalog(&args, &config)?);
    catalog.log_summary();

    let sampler = open_sampler(&args)?;

    let (media_tx, mut media_rx) = mpsc::unbounded_channel();
    let media = SimulatedMedia::new(media_tx, LOAD_LATENCY, args.track_length);

    let controller = PlaybackController::new(catalog, media)
        .with_stabilizer(EmotionStabilizer::new(config.detection.reaction_threshold));
    let (service, handle) = SessionService::new(controller, sampler, &config);
    let service = service.spawn();

    // Media substrate -> session service
    let forward = handle.clone();
    tokio::spawn(async move {
        while let Some(event) = media_rx.recv().await {
            if forward.media_event(event).is_err() {
                break;
            }
        }
    });

    tokio::spawn(log_snapshots(handle.clone()));

    println!("moodtune player");
    println!("{}", console::HELP);
    let stdin_handle = handle.clone();
    std::thread::Builder::new()
        .name("moodtune-stdin".to_string())
        .spawn(move || console::read_intents(std::io::stdin().lock(), stdin_handle))
        .context("Failed to spawn stdin reader")?;
    drop(handle);

    service.await.context("Session service panicked")?;
    println!("moodtune player stopped.");
    Ok(())
}

/// `--catalog` wins over `catalog_path`; without either the built-in list is used
fn open_catalog(args: &Args, config: &MoodConfig) -> Result<Catalog> {
    match args.catalog.as_ref().or(config.catalog_path.as_ref()) {
        Some(path) => {
            let catalog = load_catalog(path)
                .with_context(|| format!("Failed to load catalog {:?}", path))?;
            if catalog.is_empty() {
                bail!("Catalog {:?} lists no tracks", path);
            }
            Ok(catalog)
        }
        None => {
            log::info!("Using built-in catalog");
            Ok(Catalog::builtin())
        }
    }
}

fn open_sampler(args: &Args) -> Result<ScriptedSampler> {
    let Some(path) = &args.script else {
        log::warn!("No --script given; emotion detection is unavailable");
        return Ok(ScriptedSampler::default());
    };
    let sampler = ScriptedSampler::load(path)
        .with_context(|| format!("Failed to open sample script {:?}", path))?
        .looping(args.looping);
    if !sampler.is_ready() {
        log::warn!("Sample script {:?} is empty; emotion detection is unavailable", path);
    }
    Ok(sampler)
}

/// Log every published snapshot until the service goes away
async fn log_snapshots(handle: SessionHandle) {
    let mut status = handle.subscribe();
    drop(handle);
    while status.changed().await.is_ok() {
        let line = console::describe(&status.borrow_and_update());
        log::info!("{}", line);
    }
}
