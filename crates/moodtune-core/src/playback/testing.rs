//! Test doubles for the media substrate

use std::sync::{Arc, Mutex};

use super::error::{PlaybackError, PlaybackResult};
use super::media::{LoadId, MediaSink};

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Load(LoadId, String),
    Play,
    Pause,
    Stop,
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<MediaCall>,
    fail_load: bool,
    fail_play: bool,
}

/// Records every command; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_load(&self, fail: bool) {
        self.inner.lock().unwrap().fail_load = fail;
    }

    pub fn set_fail_play(&self, fail: bool) {
        self.inner.lock().unwrap().fail_play = fail;
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Successful loads, in order
    pub fn loads(&self) -> Vec<(LoadId, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                MediaCall::Load(id, source) => Some((id, source)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&MediaCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }
}

impl MediaSink for RecordingSink {
    fn load(&mut self, id: LoadId, source: &str) -> PlaybackResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_load {
            return Err(PlaybackError::LoadFailed(source.to_string()));
        }
        inner.calls.push(MediaCall::Load(id, source.to_string()));
        Ok(())
    }

    fn play(&mut self) -> PlaybackResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_play {
            return Err(PlaybackError::StartFailed("source unavailable".to_string()));
        }
        inner.calls.push(MediaCall::Play);
        Ok(())
    }

    fn pause(&mut self) -> PlaybackResult<()> {
        self.inner.lock().unwrap().calls.push(MediaCall::Pause);
        Ok(())
    }

    fn stop(&mut self) {
        self.inner.lock().unwrap().calls.push(MediaCall::Stop);
    }
}
