//! Playback for moodtune
//!
//! The controller owns the [`PlaybackSession`] and is the only place that
//! decides which track is current and what the media substrate should do.
//!
//! # Architecture
//!
//! ```text
//! EmotionSample ─► Stabilizer ─► Selector ─► PlaybackController ─► MediaSink
//!                                                 ▲                   │
//!                  user intents (play/pause/skip) ┤                   │
//!                                                 └── MediaEvent ◄────┘
//! ```
//!
//! Commands go out through [`MediaSink`]; completion and failures come back
//! as [`MediaEvent`]s tagged with the [`LoadId`] they belong to.

mod controller;
mod error;
mod media;
mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{ControllerError, MediaOutcome, PlaybackController, SampleOutcome};
pub use error::{PlaybackError, PlaybackResult};
pub use media::{LoadId, MediaEvent, MediaSink};
pub use state::{PlaybackSession, PlaybackState};
