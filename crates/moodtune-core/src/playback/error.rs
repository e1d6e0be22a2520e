//! Playback error types

use thiserror::Error;

/// Errors reported by the media substrate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlaybackError {
    /// The source could not be handed to the substrate
    #[error("Failed to load track source: {0}")]
    LoadFailed(String),

    /// Playback could not be started or resumed
    #[error("Failed to start playback: {0}")]
    StartFailed(String),
}

/// Result type for media operations
pub type PlaybackResult<T> = Result<T, PlaybackError>;
