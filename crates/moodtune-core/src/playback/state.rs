//! Playback session state

use serde::Serialize;

use crate::types::{EmotionSample, Track};

/// Playback state machine position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No track; waiting for detection or for the first reaction
    #[default]
    Idle,
    /// A track was requested and is loading (or waiting to auto-play)
    Loading,
    Playing,
    /// Suspended with position kept
    Paused,
}

impl PlaybackState {
    pub fn name(&self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Loading => "loading",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the Presentation layer renders
///
/// Created when detection starts and reset to the default when it stops.
/// `current_track` is only ever set while `current_emotion` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlaybackSession {
    /// Latest sample, updated every tick (label, confidence bars)
    pub current_emotion: Option<EmotionSample>,
    pub current_track: Option<Track>,
    pub state: PlaybackState,
    pub detecting: bool,
    /// Most recent recoverable failure, cleared by the next successful load
    pub last_error: Option<String>,
}
