//! Playback controller - the emotion-to-playback state machine
//!
//! ```text
//!            start                reaction / skip / ended
//!   Idle ──────────► Idle ───────────────────────────► Loading
//!                                                        │ loaded + settle delay
//!                                                        ▼
//!                              Paused ◄──── play/pause ── Playing
//!                                 └────── play/pause ─────►┘
//!
//!   any ── stop ──► Idle (session cleared, media rewound)
//! ```
//!
//! The controller is driven from a single thread of control: every method
//! runs to completion and there is no internal locking. Timing (sampling
//! cadence, settle delay) belongs to the caller; see
//! [`crate::services::SessionService`].

use std::sync::Arc;

use thiserror::Error;

use super::error::PlaybackError;
use super::media::{LoadId, MediaEvent, MediaSink};
use super::state::{PlaybackSession, PlaybackState};
use crate::catalog::{Catalog, CatalogError};
use crate::selector::TrackSelector;
use crate::stabilizer::EmotionStabilizer;
use crate::types::{EmotionSample, Track};

/// Failure of a single controller action
///
/// None of these end the session: the previous track (if any) keeps its
/// state and the next sample or user intent can recover.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ControllerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// What happened to an incoming emotion sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Detection is not active; the sample was discarded
    Ignored,
    /// Shown to the user, but not significant enough to change track
    Held,
    /// A new track was selected and its load requested
    Reacted(LoadId),
}

/// What happened to an incoming media lifecycle signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaOutcome {
    /// Signal belongs to a superseded load, or does not apply in this state
    Ignored,
    Handled,
    /// The load is ready: call [`PlaybackController::autoplay`] after the settle delay
    AutoplayDue(LoadId),
    /// The track ended and the next one was requested
    Advanced(LoadId),
}

/// Bookkeeping for the load the session currently cares about
#[derive(Debug, Clone, Copy)]
struct ActiveLoad {
    id: LoadId,
    loaded: bool,
    /// State to restore if the substrate rejects a start asynchronously
    restore_on_error: Option<PlaybackState>,
}

/// Owns the [`PlaybackSession`] and turns samples, intents and media
/// signals into media commands
pub struct PlaybackController<M: MediaSink> {
    session: PlaybackSession,
    catalog: Arc<Catalog>,
    selector: TrackSelector,
    stabilizer: EmotionStabilizer,
    media: M,
    /// Last sample that produced a reaction
    anchor: Option<EmotionSample>,
    active_load: Option<ActiveLoad>,
    next_load_id: u64,
}

impl<M: MediaSink> PlaybackController<M> {
    pub fn new(catalog: Arc<Catalog>, media: M) -> Self {
        Self {
            session: PlaybackSession::default(),
            catalog,
            selector: TrackSelector::new(),
            stabilizer: EmotionStabilizer::default(),
            media,
            anchor: None,
            active_load: None,
            next_load_id: 1,
        }
    }

    pub fn with_selector(mut self, selector: TrackSelector) -> Self {
        self.selector = selector;
        self
    }

    pub fn with_stabilizer(mut self, stabilizer: EmotionStabilizer) -> Self {
        self.stabilizer = stabilizer;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn state(&self) -> PlaybackState {
        self.session.state
    }

    pub fn is_detecting(&self) -> bool {
        self.session.detecting
    }

    /// Id of the load whose signals are currently honoured
    pub fn active_load(&self) -> Option<LoadId> {
        self.active_load.map(|l| l.id)
    }

    // =========================================================================
    // Detection lifecycle
    // =========================================================================

    /// Begin a fresh session; no track until the first reaction
    pub fn start_detection(&mut self) {
        if self.session.detecting {
            log::debug!("Controller: detection already active");
            return;
        }
        log::info!("Controller: detection started");
        self.session = PlaybackSession {
            detecting: true,
            ..PlaybackSession::default()
        };
        self.anchor = None;
        self.active_load = None;
    }

    /// Tear the session down: halt and rewind media, clear every field
    pub fn stop_detection(&mut self) {
        log::info!(
            "Controller: detection stopped (was {}, track: {})",
            self.session.state,
            self.session
                .current_track
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        self.media.stop();
        self.session = PlaybackSession::default();
        self.anchor = None;
        self.active_load = None;
    }

    // =========================================================================
    // Emotion samples
    // =========================================================================

    /// Feed one sample from the emotion sampler
    ///
    /// The displayed emotion is always replaced. A new track is requested
    /// only when the stabilizer reacts; a selection or load failure leaves
    /// the current track playing.
    pub fn on_sample(&mut self, sample: EmotionSample) -> Result<SampleOutcome, ControllerError> {
        if !self.session.detecting {
            log::debug!("Controller: dropping sample received while not detecting");
            return Ok(SampleOutcome::Ignored);
        }

        let reaction = self.stabilizer.update(&sample, self.anchor.as_ref());
        log::debug!(
            "Controller: sample {} ({:.2}) react={}",
            sample.label,
            sample.confidence(),
            reaction.should_react
        );
        self.session.current_emotion = Some(sample.clone());

        if !reaction.should_react {
            return Ok(SampleOutcome::Held);
        }

        log::info!(
            "Controller: reacting to {} ({:.0}%)",
            reaction.label,
            sample.confidence() * 100.0
        );
        self.anchor = Some(sample);

        let track = self
            .selector
            .select_for_emotion(reaction.label, &self.catalog)
            .map_err(|e| self.fail(e))?;
        let id = self.begin_load(track)?;
        Ok(SampleOutcome::Reacted(id))
    }

    // =========================================================================
    // User intents
    // =========================================================================

    /// Toggle between Playing and Paused
    ///
    /// In Loading with the source already loaded this starts playback early.
    /// Ignored in Idle and while the source is still loading.
    pub fn play_pause(&mut self) -> Result<(), ControllerError> {
        let state = self.session.state;
        match state {
            PlaybackState::Playing => {
                self.media.pause().map_err(|e| self.fail(e))?;
                self.session.state = PlaybackState::Paused;
                log::info!("Controller: paused");
                Ok(())
            }
            PlaybackState::Paused => self.start_playback(),
            PlaybackState::Loading if self.is_loaded() => self.start_playback(),
            _ => {
                log::debug!("Controller: play/pause ignored in {}", state);
                Ok(())
            }
        }
    }

    /// Switch to a different track of the same emotion
    ///
    /// Returns the new load, or `None` when there is no current track.
    pub fn skip(&mut self) -> Result<Option<LoadId>, ControllerError> {
        if !self.session.detecting || self.session.current_track.is_none() {
            log::debug!("Controller: skip ignored, no current track");
            return Ok(None);
        }
        log::info!("Controller: skip requested");
        self.advance()
    }

    // =========================================================================
    // Media lifecycle
    // =========================================================================

    /// Dispatch a media signal to the matching handler
    pub fn handle_media_event(
        &mut self,
        event: MediaEvent,
    ) -> Result<MediaOutcome, ControllerError> {
        match event {
            MediaEvent::Loaded(id) => Ok(self.on_loaded(id)),
            MediaEvent::Played(id) => Ok(self.on_played(id)),
            MediaEvent::Paused(id) => Ok(self.on_paused(id)),
            MediaEvent::Ended(id) => self.on_ended(id),
            MediaEvent::Error { load, message } => Ok(self.on_error(load, &message)),
        }
    }

    /// The source for `id` finished loading
    pub fn on_loaded(&mut self, id: LoadId) -> MediaOutcome {
        let Some(load) = self.current_load_mut(id) else {
            log::debug!("Controller: ignoring loaded signal for superseded {}", id);
            return MediaOutcome::Ignored;
        };
        load.loaded = true;

        if self.session.state == PlaybackState::Loading {
            log::debug!("Controller: {} loaded, autoplay pending", id);
            MediaOutcome::AutoplayDue(id)
        } else {
            MediaOutcome::Handled
        }
    }

    /// Settle delay for `id` elapsed: start playback if that load is still current
    ///
    /// Returns `Ok(true)` when playback started.
    pub fn autoplay(&mut self, id: LoadId) -> Result<bool, ControllerError> {
        if self.active_load() != Some(id)
            || self.session.state != PlaybackState::Loading
            || !self.is_loaded()
        {
            log::debug!("Controller: autoplay for {} no longer applies", id);
            return Ok(false);
        }
        self.start_playback()?;
        Ok(true)
    }

    /// Substrate reports that playback started
    pub fn on_played(&mut self, id: LoadId) -> MediaOutcome {
        let loaded = match self.current_load_mut(id) {
            Some(load) => {
                load.restore_on_error = None;
                load.loaded
            }
            None => return MediaOutcome::Ignored,
        };

        match self.session.state {
            PlaybackState::Paused => {
                self.session.state = PlaybackState::Playing;
                MediaOutcome::Handled
            }
            PlaybackState::Loading if loaded => {
                self.session.state = PlaybackState::Playing;
                MediaOutcome::Handled
            }
            PlaybackState::Playing => MediaOutcome::Handled,
            _ => MediaOutcome::Ignored,
        }
    }

    /// Substrate reports that playback paused
    pub fn on_paused(&mut self, id: LoadId) -> MediaOutcome {
        if self.active_load() != Some(id) || self.session.state != PlaybackState::Playing {
            return MediaOutcome::Ignored;
        }
        self.session.state = PlaybackState::Paused;
        MediaOutcome::Handled
    }

    /// Track reached its natural end: behaves exactly like a skip
    pub fn on_ended(&mut self, id: LoadId) -> Result<MediaOutcome, ControllerError> {
        if self.active_load() != Some(id) || self.session.state != PlaybackState::Playing {
            log::debug!("Controller: ignoring ended signal for {}", id);
            return Ok(MediaOutcome::Ignored);
        }
        log::info!("Controller: track ended, advancing");
        match self.advance()? {
            Some(next) => Ok(MediaOutcome::Advanced(next)),
            None => Ok(MediaOutcome::Handled),
        }
    }

    /// Substrate reports an asynchronous failure for `id`
    ///
    /// A rejected start rolls the state back to what it was before the
    /// attempt. Nothing is retried.
    pub fn on_error(&mut self, id: LoadId, message: &str) -> MediaOutcome {
        let restore = match self.current_load_mut(id) {
            Some(load) => load.restore_on_error.take(),
            None => {
                log::debug!("Controller: ignoring error for superseded {}: {}", id, message);
                return MediaOutcome::Ignored;
            }
        };

        log::warn!("Controller: media error for {}: {}", id, message);
        self.session.last_error = Some(message.to_string());

        if let Some(prior) = restore {
            if self.session.state == PlaybackState::Playing {
                self.session.state = prior;
            }
        }
        MediaOutcome::Handled
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn current_load_mut(&mut self, id: LoadId) -> Option<&mut ActiveLoad> {
        self.active_load.as_mut().filter(|l| l.id == id)
    }

    fn is_loaded(&self) -> bool {
        self.active_load.map(|l| l.loaded).unwrap_or(false)
    }

    /// Load a different track of the current track's emotion
    fn advance(&mut self) -> Result<Option<LoadId>, ControllerError> {
        let Some(current) = self.session.current_track.clone() else {
            return Ok(None);
        };
        let next = self
            .selector
            .select_different(&current, current.emotion, &self.catalog)
            .map_err(|e| self.fail(e))?;
        self.begin_load(next).map(Some)
    }

    /// Request a load; supersedes whatever load was active
    fn begin_load(&mut self, track: Track) -> Result<LoadId, ControllerError> {
        let id = LoadId(self.next_load_id);
        self.next_load_id += 1;

        self.media.load(id, &track.source).map_err(|e| self.fail(e))?;

        log::info!("Controller: loading {} [{}] ({})", track, track.emotion, id);
        self.session.current_track = Some(track);
        self.session.state = PlaybackState::Loading;
        self.session.last_error = None;
        self.active_load = Some(ActiveLoad {
            id,
            loaded: false,
            restore_on_error: None,
        });
        Ok(id)
    }

    /// Ask the substrate to play; on refusal the state stays where it was
    fn start_playback(&mut self) -> Result<(), ControllerError> {
        let prior = self.session.state;
        self.media.play().map_err(|e| self.fail(e))?;

        self.session.state = PlaybackState::Playing;
        if let Some(load) = self.active_load.as_mut() {
            load.restore_on_error = Some(prior);
        }
        log::info!("Controller: playing (from {})", prior);
        Ok(())
    }

    /// Log and record a recoverable failure
    fn fail(&mut self, err: impl Into<ControllerError>) -> ControllerError {
        let err = err.into();
        log::warn!("Controller: {}", err);
        self.session.last_error = Some(err.to_string());
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::testing::{MediaCall, RecordingSink};
    use crate::types::{Emotion, EmotionScores};
    use std::collections::BTreeMap;

    fn sample(emotion: Emotion, confidence: f32) -> EmotionSample {
        let mut scores = EmotionScores::new().with(emotion, confidence);
        let other = if emotion == Emotion::Neutral {
            Emotion::Happy
        } else {
            Emotion::Neutral
        };
        scores.set(other, (1.0 - confidence).min(confidence * 0.5));
        EmotionSample::from_scores(scores).unwrap()
    }

    fn catalog_with(counts: &[(Emotion, usize)]) -> Arc<Catalog> {
        let mut entries = BTreeMap::new();
        for (emotion, count) in counts {
            let tracks = (0..*count)
                .map(|i| {
                    Track::new(
                        format!("{} {}", emotion, i),
                        "Test",
                        *emotion,
                        format!("mem://{}/{}", emotion, i),
                    )
                })
                .collect();
            entries.insert(*emotion, tracks);
        }
        Arc::new(Catalog::new(entries))
    }

    fn controller(catalog: Arc<Catalog>) -> (PlaybackController<RecordingSink>, RecordingSink) {
        let sink = RecordingSink::new();
        let controller =
            PlaybackController::new(catalog, sink.clone()).with_selector(TrackSelector::seeded(11));
        (controller, sink)
    }

    /// Drive the current load to Playing
    fn play_through(controller: &mut PlaybackController<RecordingSink>) {
        let id = controller.active_load().unwrap();
        assert_eq!(controller.on_loaded(id), MediaOutcome::AutoplayDue(id));
        assert!(controller.autoplay(id).unwrap());
        assert_eq!(controller.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_idle_until_first_reaction() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Happy, 3)]));
        c.start_detection();
        assert_eq!(c.state(), PlaybackState::Idle);
        assert!(c.is_detecting());
        assert!(sink.loads().is_empty());
    }

    #[test]
    fn test_reacts_on_first_and_changed_label() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Happy, 3), (Emotion::Sad, 3)]));
        c.start_detection();

        assert!(matches!(
            c.on_sample(sample(Emotion::Happy, 0.9)).unwrap(),
            SampleOutcome::Reacted(_)
        ));
        assert_eq!(
            c.on_sample(sample(Emotion::Happy, 0.95)).unwrap(),
            SampleOutcome::Held
        );
        assert!(matches!(
            c.on_sample(sample(Emotion::Sad, 0.7)).unwrap(),
            SampleOutcome::Reacted(_)
        ));

        assert_eq!(sink.loads().len(), 2);
        assert_eq!(c.session().current_track.as_ref().unwrap().emotion, Emotion::Sad);
        assert_eq!(c.state(), PlaybackState::Loading);
    }

    #[test]
    fn test_low_confidence_change_only_updates_display() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Happy, 3), (Emotion::Sad, 3)]));
        c.start_detection();

        c.on_sample(sample(Emotion::Happy, 0.9)).unwrap();
        assert_eq!(
            c.on_sample(sample(Emotion::Sad, 0.4)).unwrap(),
            SampleOutcome::Held
        );

        assert_eq!(sink.loads().len(), 1);
        let session = c.session();
        assert_eq!(session.current_emotion.as_ref().unwrap().label, Emotion::Sad);
        assert_eq!(session.current_track.as_ref().unwrap().emotion, Emotion::Happy);
    }

    #[test]
    fn test_sub_threshold_sample_does_not_move_anchor() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Happy, 3), (Emotion::Sad, 3)]));
        c.start_detection();

        c.on_sample(sample(Emotion::Happy, 0.9)).unwrap();
        c.on_sample(sample(Emotion::Sad, 0.4)).unwrap();
        assert!(matches!(
            c.on_sample(sample(Emotion::Sad, 0.8)).unwrap(),
            SampleOutcome::Reacted(_)
        ));
        assert_eq!(sink.loads().len(), 2);
    }

    #[test]
    fn test_autoplay_after_load() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Neutral, 2)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Neutral, 0.8)).unwrap();

        play_through(&mut c);
        assert_eq!(sink.count(|call| matches!(call, MediaCall::Play)), 1);
    }

    #[test]
    fn test_play_pause_toggles() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Neutral, 2)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Neutral, 0.8)).unwrap();
        play_through(&mut c);

        c.play_pause().unwrap();
        assert_eq!(c.state(), PlaybackState::Paused);
        c.play_pause().unwrap();
        assert_eq!(c.state(), PlaybackState::Playing);

        assert_eq!(sink.count(|call| matches!(call, MediaCall::Pause)), 1);
        assert_eq!(sink.count(|call| matches!(call, MediaCall::Play)), 2);
    }

    #[test]
    fn test_play_pause_ignored_while_idle_or_loading() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Neutral, 2)]));
        c.start_detection();
        c.play_pause().unwrap();
        assert_eq!(c.state(), PlaybackState::Idle);

        c.on_sample(sample(Emotion::Neutral, 0.8)).unwrap();
        c.play_pause().unwrap();
        assert_eq!(c.state(), PlaybackState::Loading);
        assert_eq!(sink.count(|call| matches!(call, MediaCall::Play)), 0);
    }

    #[test]
    fn test_skip_never_repeats_previous_track() {
        let (mut c, _sink) = controller(catalog_with(&[(Emotion::Angry, 3)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Angry, 0.9)).unwrap();
        play_through(&mut c);

        for _ in 0..2 {
            let before = c.session().current_track.clone().unwrap();
            assert!(c.skip().unwrap().is_some());
            let after = c.session().current_track.clone().unwrap();
            assert_ne!(before, after);
            assert_eq!(after.emotion, Emotion::Angry);
            assert_eq!(c.state(), PlaybackState::Loading);
        }
    }

    #[test]
    fn test_skip_single_track_returns_same() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Fearful, 1)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Fearful, 0.9)).unwrap();
        let only = c.session().current_track.clone().unwrap();

        c.skip().unwrap();
        c.skip().unwrap();
        assert_eq!(c.session().current_track.as_ref(), Some(&only));
        assert_eq!(sink.loads().len(), 3);
    }

    #[test]
    fn test_skip_without_track_is_noop() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Happy, 3)]));
        assert_eq!(c.skip().unwrap(), None);
        c.start_detection();
        assert_eq!(c.skip().unwrap(), None);
        assert!(sink.loads().is_empty());
    }

    #[test]
    fn test_natural_end_advances_to_different_track() {
        let (mut c, _sink) = controller(catalog_with(&[(Emotion::Happy, 6)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Happy, 0.9)).unwrap();
        play_through(&mut c);

        let first = c.session().current_track.clone().unwrap();
        let id = c.active_load().unwrap();
        let outcome = c.handle_media_event(MediaEvent::Ended(id)).unwrap();
        assert!(matches!(outcome, MediaOutcome::Advanced(_)));
        assert_eq!(c.state(), PlaybackState::Loading);

        play_through(&mut c);
        let second = c.session().current_track.clone().unwrap();
        assert_ne!(first, second);
        assert_eq!(second.emotion, Emotion::Happy);
    }

    #[test]
    fn test_stale_signals_are_ignored() {
        let (mut c, _sink) = controller(catalog_with(&[(Emotion::Happy, 3), (Emotion::Sad, 3)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Happy, 0.9)).unwrap();
        let stale = c.active_load().unwrap();
        c.on_sample(sample(Emotion::Sad, 0.9)).unwrap();
        let fresh = c.active_load().unwrap();
        assert_ne!(stale, fresh);

        assert_eq!(c.on_loaded(stale), MediaOutcome::Ignored);
        assert!(!c.autoplay(stale).unwrap());
        assert_eq!(c.on_ended(stale).unwrap(), MediaOutcome::Ignored);
        assert_eq!(c.state(), PlaybackState::Loading);

        assert_eq!(c.on_loaded(fresh), MediaOutcome::AutoplayDue(fresh));
    }

    #[test]
    fn test_failed_start_keeps_state() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Neutral, 2)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Neutral, 0.8)).unwrap();
        let id = c.active_load().unwrap();
        c.on_loaded(id);

        sink.set_fail_play(true);
        assert!(matches!(
            c.autoplay(id),
            Err(ControllerError::Playback(PlaybackError::StartFailed(_)))
        ));
        assert_eq!(c.state(), PlaybackState::Loading);
        assert!(c.session().last_error.is_some());

        // Recovery through the user's next intent
        sink.set_fail_play(false);
        c.play_pause().unwrap();
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_async_start_failure_restores_prior_state() {
        let (mut c, _sink) = controller(catalog_with(&[(Emotion::Neutral, 2)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Neutral, 0.8)).unwrap();
        play_through(&mut c);
        let id = c.active_load().unwrap();

        c.play_pause().unwrap();
        c.play_pause().unwrap();
        assert_eq!(c.on_error(id, "decoder gave up"), MediaOutcome::Handled);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.session().last_error.as_deref(), Some("decoder gave up"));
    }

    #[test]
    fn test_failed_load_keeps_previous_track() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Happy, 3), (Emotion::Sad, 3)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Happy, 0.9)).unwrap();
        play_through(&mut c);
        let playing = c.session().current_track.clone();

        sink.set_fail_load(true);
        assert!(c.on_sample(sample(Emotion::Sad, 0.9)).is_err());
        assert_eq!(c.session().current_track, playing);
        assert_eq!(c.state(), PlaybackState::Playing);
    }

    #[test]
    fn test_catalog_error_keeps_previous_track() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Happy, 3)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Happy, 0.9)).unwrap();
        play_through(&mut c);

        let err = c.on_sample(sample(Emotion::Angry, 0.9)).unwrap_err();
        assert_eq!(
            err,
            ControllerError::Catalog(CatalogError::EmptyEntry { emotion: Emotion::Angry })
        );
        assert_eq!(c.state(), PlaybackState::Playing);
        assert_eq!(c.session().current_track.as_ref().unwrap().emotion, Emotion::Happy);
        assert_eq!(sink.loads().len(), 1);
    }

    #[test]
    fn test_stop_from_any_state_resets_session() {
        let catalog = catalog_with(&[(Emotion::Happy, 3)]);
        for target in [
            PlaybackState::Idle,
            PlaybackState::Loading,
            PlaybackState::Playing,
            PlaybackState::Paused,
        ] {
            let (mut c, sink) = controller(catalog.clone());
            c.start_detection();
            if target != PlaybackState::Idle {
                c.on_sample(sample(Emotion::Happy, 0.9)).unwrap();
            }
            if matches!(target, PlaybackState::Playing | PlaybackState::Paused) {
                play_through(&mut c);
            }
            if target == PlaybackState::Paused {
                c.play_pause().unwrap();
            }
            assert_eq!(c.state(), target);

            c.stop_detection();
            assert_eq!(c.session(), &PlaybackSession::default());
            assert_eq!(c.active_load(), None);
            assert_eq!(sink.count(|call| matches!(call, MediaCall::Stop)), 1);
        }
    }

    #[test]
    fn test_samples_after_stop_are_dropped() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Happy, 3)]));
        c.start_detection();
        c.stop_detection();
        assert_eq!(
            c.on_sample(sample(Emotion::Happy, 0.9)).unwrap(),
            SampleOutcome::Ignored
        );
        assert!(c.session().current_track.is_none());
        assert!(sink.loads().is_empty());
    }

    #[test]
    fn test_restart_reacts_again() {
        let (mut c, sink) = controller(catalog_with(&[(Emotion::Happy, 3)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Happy, 0.9)).unwrap();
        c.stop_detection();
        c.start_detection();
        assert!(matches!(
            c.on_sample(sample(Emotion::Happy, 0.9)).unwrap(),
            SampleOutcome::Reacted(_)
        ));
        assert_eq!(sink.loads().len(), 2);
    }

    #[test]
    fn test_external_pause_and_play_signals() {
        let (mut c, _sink) = controller(catalog_with(&[(Emotion::Neutral, 2)]));
        c.start_detection();
        c.on_sample(sample(Emotion::Neutral, 0.8)).unwrap();
        play_through(&mut c);
        let id = c.active_load().unwrap();

        assert_eq!(c.handle_media_event(MediaEvent::Paused(id)).unwrap(), MediaOutcome::Handled);
        assert_eq!(c.state(), PlaybackState::Paused);
        assert_eq!(c.handle_media_event(MediaEvent::Played(id)).unwrap(), MediaOutcome::Handled);
        assert_eq!(c.state(), PlaybackState::Playing);
    }
}
