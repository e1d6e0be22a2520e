//! Simulated media substrate
//!
//! Stands in for a real audio player in the headless build. Loading takes a
//! fixed latency, every track lasts a fixed length, and lifecycle signals are
//! posted back on a channel exactly like a real player would report them.

use std::time::Duration;

use moodtune_core::playback::{LoadId, MediaEvent, MediaSink, PlaybackError, PlaybackResult};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Timer-driven [`MediaSink`] that never produces sound
pub struct SimulatedMedia {
    events: mpsc::UnboundedSender<MediaEvent>,
    load_latency: Duration,
    track_length: Duration,
    current: Option<LoadId>,
    /// Playback left in the current track
    remaining: Duration,
    playing_since: Option<Instant>,
    loading: Option<JoinHandle<()>>,
    ending: Option<JoinHandle<()>>,
}

impl SimulatedMedia {
    pub fn new(
        events: mpsc::UnboundedSender<MediaEvent>,
        load_latency: Duration,
        track_length: Duration,
    ) -> Self {
        Self {
            events,
            load_latency,
            track_length,
            current: None,
            remaining: track_length,
            playing_since: None,
            loading: None,
            ending: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing_since.is_some()
    }

    fn cancel_timers(&mut self) {
        if let Some(task) = self.loading.take() {
            task.abort();
        }
        if let Some(task) = self.ending.take() {
            task.abort();
        }
    }

    fn post_after(&self, delay: Duration, event: MediaEvent) -> JoinHandle<()> {
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(event);
        })
    }
}

impl MediaSink for SimulatedMedia {
    fn load(&mut self, id: LoadId, source: &str) -> PlaybackResult<()> {
        if source.trim().is_empty() {
            return Err(PlaybackError::LoadFailed("empty source".to_string()));
        }
        self.cancel_timers();
        self.current = Some(id);
        self.remaining = self.track_length;
        self.playing_since = None;
        self.loading = Some(self.post_after(self.load_latency, MediaEvent::Loaded(id)));
        log::debug!("SimulatedMedia: loading {} from {}", id, source);
        Ok(())
    }

    fn play(&mut self) -> PlaybackResult<()> {
        let Some(id) = self.current else {
            return Err(PlaybackError::StartFailed("nothing loaded".to_string()));
        };
        if self.is_playing() {
            return Ok(());
        }
        self.playing_since = Some(Instant::now());
        self.ending = Some(self.post_after(self.remaining, MediaEvent::Ended(id)));
        let _ = self.events.send(MediaEvent::Played(id));
        Ok(())
    }

    fn pause(&mut self) -> PlaybackResult<()> {
        let (Some(id), Some(since)) = (self.current, self.playing_since.take()) else {
            return Ok(());
        };
        if let Some(task) = self.ending.take() {
            task.abort();
        }
        self.remaining = self.remaining.saturating_sub(since.elapsed());
        let _ = self.events.send(MediaEvent::Paused(id));
        Ok(())
    }

    fn stop(&mut self) {
        self.cancel_timers();
        self.current = None;
        self.playing_since = None;
        self.remaining = self.track_length;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media() -> (SimulatedMedia, mpsc::UnboundedReceiver<MediaEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let media = SimulatedMedia::new(tx, Duration::from_millis(100), Duration::from_secs(10));
        (media, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_then_play_until_end() {
        let (mut media, mut rx) = media();
        media.load(LoadId(1), "a.mp3").unwrap();
        assert_eq!(rx.recv().await, Some(MediaEvent::Loaded(LoadId(1))));

        media.play().unwrap();
        assert_eq!(rx.recv().await, Some(MediaEvent::Played(LoadId(1))));
        assert_eq!(rx.recv().await, Some(MediaEvent::Ended(LoadId(1))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_load_cancels_pending_signals() {
        let (mut media, mut rx) = media();
        media.load(LoadId(1), "a.mp3").unwrap();
        media.load(LoadId(2), "b.mp3").unwrap();
        assert_eq!(rx.recv().await, Some(MediaEvent::Loaded(LoadId(2))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_keeps_position() {
        let (mut media, mut rx) = media();
        media.load(LoadId(1), "a.mp3").unwrap();
        rx.recv().await;
        media.play().unwrap();
        rx.recv().await;

        tokio::time::sleep(Duration::from_secs(4)).await;
        media.pause().unwrap();
        assert_eq!(rx.recv().await, Some(MediaEvent::Paused(LoadId(1))));

        let resumed = Instant::now();
        media.play().unwrap();
        rx.recv().await;
        assert_eq!(rx.recv().await, Some(MediaEvent::Ended(LoadId(1))));
        let played = resumed.elapsed();
        assert!(played >= Duration::from_secs(6) && played < Duration::from_millis(6_010));
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_without_load_fails() {
        let (mut media, _rx) = media();
        assert!(matches!(media.play(), Err(PlaybackError::StartFailed(_))));
        assert!(matches!(media.load(LoadId(1), " "), Err(PlaybackError::LoadFailed(_))));
    }
}
