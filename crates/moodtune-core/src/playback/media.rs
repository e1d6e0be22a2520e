//! Media substrate interface
//!
//! The controller never touches audio handles directly. The Presentation
//! layer owns the actual player and hands the controller something that
//! implements [`MediaSink`]; lifecycle signals flow back as [`MediaEvent`]s.
//!
//! Every load gets a fresh [`LoadId`]. Signals carry the id of the load they
//! belong to so that late signals from a superseded load can be discarded.

use std::fmt;

use super::error::PlaybackResult;

/// Identity of one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadId(pub u64);

impl fmt::Display for LoadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Commands the controller issues to the media substrate
///
/// Calls should return quickly; completion of a load is reported later
/// through [`MediaEvent::Loaded`].
pub trait MediaSink {
    /// Replace the current source with `source`, superseding any load in flight
    fn load(&mut self, id: LoadId, source: &str) -> PlaybackResult<()>;

    /// Start or resume playback of the loaded source
    fn play(&mut self) -> PlaybackResult<()>;

    /// Suspend playback, keeping the position
    fn pause(&mut self) -> PlaybackResult<()>;

    /// Halt playback and rewind to the start
    fn stop(&mut self);
}

impl<M: MediaSink + ?Sized> MediaSink for Box<M> {
    fn load(&mut self, id: LoadId, source: &str) -> PlaybackResult<()> {
        (**self).load(id, source)
    }

    fn play(&mut self) -> PlaybackResult<()> {
        (**self).play()
    }

    fn pause(&mut self) -> PlaybackResult<()> {
        (**self).pause()
    }

    fn stop(&mut self) {
        (**self).stop()
    }
}

/// Lifecycle signals from the media substrate
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The source for this load is ready to play
    Loaded(LoadId),
    /// Playback started (also sent for starts not requested by the controller)
    Played(LoadId),
    /// Playback paused
    Paused(LoadId),
    /// The track reached its natural end
    Ended(LoadId),
    /// Loading or playback failed asynchronously
    Error { load: LoadId, message: String },
}

impl MediaEvent {
    /// Load this signal belongs to
    pub fn load_id(&self) -> LoadId {
        match self {
            MediaEvent::Loaded(id)
            | MediaEvent::Played(id)
            | MediaEvent::Paused(id)
            | MediaEvent::Ended(id) => *id,
            MediaEvent::Error { load, .. } => *load,
        }
    }
}
