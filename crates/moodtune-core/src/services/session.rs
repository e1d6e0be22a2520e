//! Session service - the single control loop of the player
//!
//! One tokio task owns the [`PlaybackController`], the [`EmotionSampler`],
//! the sampling interval and the autoplay settle timer. Everything that can
//! change the session arrives here and is handled to completion before the
//! next input is looked at:
//!
//! - commands from the Presentation layer ([`SessionHandle`])
//! - media lifecycle signals (also sent through the handle)
//! - sampling ticks, only while detection is active
//! - settle timer expiry for the current load
//!
//! Commands are polled first (`biased`), so a stop is always handled before a
//! tick that became ready at the same time. The interval is dropped in the
//! same step that stops detection; no sample can be taken afterwards.

use std::future::pending;
use std::pin::Pin;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior, Sleep};

use crate::config::MoodConfig;
use crate::playback::{
    LoadId, MediaEvent, MediaOutcome, MediaSink, PlaybackController, PlaybackSession,
    SampleOutcome,
};
use crate::sampler::EmotionSampler;

/// Errors returned by [`SessionHandle`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Session service is no longer running")]
    Closed,
}

/// Inputs to the session loop
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    StartDetection,
    StopDetection,
    PlayPause,
    Skip,
    Media(MediaEvent),
    /// Stop detection and end the loop
    Shutdown,
}

/// Snapshot published to the Presentation layer after every change
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerStatus {
    pub session: PlaybackSession,
    /// `false` disables the start action (camera or model not ready)
    pub sampler_ready: bool,
}

/// Cloneable handle for sending intents and reading status
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionCommand>,
    status: watch::Receiver<PlayerStatus>,
}

impl SessionHandle {
    pub fn send(&self, command: SessionCommand) -> Result<(), ServiceError> {
        self.tx.send(command).map_err(|_| ServiceError::Closed)
    }

    pub fn start_detection(&self) -> Result<(), ServiceError> {
        self.send(SessionCommand::StartDetection)
    }

    pub fn stop_detection(&self) -> Result<(), ServiceError> {
        self.send(SessionCommand::StopDetection)
    }

    pub fn play_pause(&self) -> Result<(), ServiceError> {
        self.send(SessionCommand::PlayPause)
    }

    pub fn skip(&self) -> Result<(), ServiceError> {
        self.send(SessionCommand::Skip)
    }

    /// Forward a lifecycle signal from the media substrate
    pub fn media_event(&self, event: MediaEvent) -> Result<(), ServiceError> {
        self.send(SessionCommand::Media(event))
    }

    pub fn shutdown(&self) -> Result<(), ServiceError> {
        self.send(SessionCommand::Shutdown)
    }

    /// Latest published status
    pub fn status(&self) -> PlayerStatus {
        self.status.borrow().clone()
    }

    /// Receiver that wakes on every status change
    pub fn subscribe(&self) -> watch::Receiver<PlayerStatus> {
        self.status.clone()
    }
}

/// Autoplay waiting for the settle delay of one load
type PendingAutoplay = Option<(LoadId, Pin<Box<Sleep>>)>;

/// Owner of the session loop (see module docs)
pub struct SessionService<M: MediaSink, S> {
    controller: PlaybackController<M>,
    sampler: S,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    status: watch::Sender<PlayerStatus>,
    sample_interval: Duration,
    settle_delay: Duration,
}

impl<M, S> SessionService<M, S>
where
    M: MediaSink + Send + 'static,
    S: EmotionSampler + 'static,
{
    /// Create the service and the handle the Presentation layer talks to
    pub fn new(
        controller: PlaybackController<M>,
        sampler: S,
        config: &MoodConfig,
    ) -> (Self, SessionHandle) {
        let (tx, commands) = mpsc::unbounded_channel();
        let initial = PlayerStatus {
            session: controller.session().clone(),
            sampler_ready: sampler.is_ready(),
        };
        let (status, status_rx) = watch::channel(initial);

        let service = Self {
            controller,
            sampler,
            commands,
            status,
            sample_interval: config.detection.sample_interval(),
            settle_delay: config.playback.settle_delay(),
        };
        (service, SessionHandle { tx, status: status_rx })
    }

    /// Run the loop on the current tokio runtime
    ///
    /// The task resolves to the controller once the loop ends (shutdown or
    /// every handle dropped).
    pub fn spawn(self) -> JoinHandle<PlaybackController<M>> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) -> PlaybackController<M> {
        log::info!(
            "SessionService: started (sample every {:?}, settle {:?})",
            self.sample_interval,
            self.settle_delay
        );

        let mut ticker: Option<Interval> = None;
        let mut autoplay: PendingAutoplay = None;

        loop {
            tokio::select! {
                biased;

                command = self.commands.recv() => {
                    let Some(command) = command else {
                        log::info!("SessionService: all handles dropped");
                        break;
                    };
                    if !self.handle_command(command, &mut ticker, &mut autoplay) {
                        break;
                    }
                }

                _ = next_tick(&mut ticker) => {
                    self.sample_once(&mut autoplay);
                }

                id = settled(&mut autoplay) => {
                    autoplay = None;
                    if let Err(e) = self.controller.autoplay(id) {
                        log::warn!("SessionService: autoplay for {} failed: {}", id, e);
                    }
                }
            }

            self.publish();
        }

        if self.controller.is_detecting() {
            self.controller.stop_detection();
            self.publish();
        }
        log::info!("SessionService: stopped");
        self.controller
    }

    /// Returns `false` when the loop should end
    fn handle_command(
        &mut self,
        command: SessionCommand,
        ticker: &mut Option<Interval>,
        autoplay: &mut PendingAutoplay,
    ) -> bool {
        log::debug!("SessionService: {:?}", command);
        match command {
            SessionCommand::StartDetection => {
                if self.controller.is_detecting() {
                    return true;
                }
                if !self.sampler.is_ready() {
                    log::warn!(
                        "SessionService: cannot start detection, emotion sampler unavailable"
                    );
                    return true;
                }
                self.controller.start_detection();
                *ticker = Some(sampling_interval(self.sample_interval));
                *autoplay = None;
            }
            SessionCommand::StopDetection => {
                *ticker = None;
                *autoplay = None;
                self.controller.stop_detection();
            }
            SessionCommand::PlayPause => {
                if let Err(e) = self.controller.play_pause() {
                    log::warn!("SessionService: play/pause failed: {}", e);
                }
            }
            SessionCommand::Skip => match self.controller.skip() {
                Ok(Some(_)) => *autoplay = None,
                Ok(None) => {}
                Err(e) => log::warn!("SessionService: skip failed: {}", e),
            },
            SessionCommand::Media(event) => match self.controller.handle_media_event(event) {
                Ok(MediaOutcome::AutoplayDue(id)) => {
                    *autoplay = Some((id, Box::pin(tokio::time::sleep(self.settle_delay))));
                }
                Ok(MediaOutcome::Advanced(_)) => *autoplay = None,
                Ok(_) => {}
                Err(e) => log::warn!("SessionService: advancing after track end failed: {}", e),
            },
            SessionCommand::Shutdown => {
                *ticker = None;
                *autoplay = None;
                return false;
            }
        }
        true
    }

    fn sample_once(&mut self, autoplay: &mut PendingAutoplay) {
        match self.sampler.sample() {
            Ok(Some(sample)) => match self.controller.on_sample(sample) {
                Ok(SampleOutcome::Reacted(_)) => *autoplay = None,
                Ok(_) => {}
                Err(e) => log::debug!("SessionService: reaction not applied: {}", e),
            },
            Ok(None) => log::trace!("SessionService: no face in frame"),
            Err(e) => log::warn!("SessionService: {}", e),
        }
    }

    fn publish(&self) {
        let next = PlayerStatus {
            session: self.controller.session().clone(),
            sampler_ready: self.sampler.is_ready(),
        };
        self.status.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

/// Interval whose first tick is one full period after detection starts
fn sampling_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => pending::<()>().await,
    }
}

async fn settled(autoplay: &mut PendingAutoplay) -> LoadId {
    match autoplay {
        Some((id, sleep)) => {
            sleep.as_mut().await;
            *id
        }
        None => pending().await,
    }
}
