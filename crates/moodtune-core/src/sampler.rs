//! Emotion sampler interface
//!
//! Face detection and expression classification are external. The session
//! service only needs something that, once per tick, yields zero or one
//! classified face: that is [`EmotionSampler`].
//!
//! [`ScriptedSampler`] replays a recorded script of observations. It backs the
//! headless player and the service tests.

use std::collections::VecDeque;
use std::path::Path;

use thiserror::Error;

use crate::types::{EmotionSample, EmotionScores};

/// Errors raised by an emotion sampler
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SamplerError {
    /// Camera or model not ready; detection cannot start
    #[error("Emotion sampler unavailable: {0}")]
    Unavailable(String),

    /// A single sampling attempt failed
    #[error("Emotion sampling failed: {0}")]
    Failed(String),
}

/// Produces one face observation per call
pub trait EmotionSampler: Send {
    /// Whether detection may start (camera open, model loaded)
    fn is_ready(&self) -> bool {
        true
    }

    /// Classify the current frame
    ///
    /// `Ok(None)` means no face was found; the session keeps its state.
    fn sample(&mut self) -> Result<Option<EmotionSample>, SamplerError>;
}

impl<S: EmotionSampler + ?Sized> EmotionSampler for Box<S> {
    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }

    fn sample(&mut self) -> Result<Option<EmotionSample>, SamplerError> {
        (**self).sample()
    }
}

/// Replays a fixed sequence of observations
///
/// Once the script is exhausted every further tick reports no face, unless
/// the sampler loops.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSampler {
    script: Vec<Option<EmotionScores>>,
    pending: VecDeque<Option<EmotionScores>>,
    looping: bool,
}

impl ScriptedSampler {
    pub fn new(script: Vec<Option<EmotionScores>>) -> Self {
        Self {
            pending: script.iter().cloned().collect(),
            script,
            looping: false,
        }
    }

    /// Start over from the beginning when the script runs out
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Parse a YAML script: a list whose items are `null` (no face) or a map
    /// of emotion name to score
    pub fn from_yaml(contents: &str) -> Result<Self, SamplerError> {
        let script: Vec<Option<EmotionScores>> = serde_yaml::from_str(contents)
            .map_err(|e| SamplerError::Unavailable(format!("invalid sample script: {}", e)))?;
        Ok(Self::new(script))
    }

    /// Load a YAML script from disk
    pub fn load(path: &Path) -> Result<Self, SamplerError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SamplerError::Unavailable(format!("failed to read sample script {:?}: {}", path, e))
        })?;
        let sampler = Self::from_yaml(&contents)?;
        log::info!(
            "ScriptedSampler: loaded {} observations from {:?}",
            sampler.script.len(),
            path
        );
        Ok(sampler)
    }

    /// Observations not yet replayed in the current pass
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl EmotionSampler for ScriptedSampler {
    fn is_ready(&self) -> bool {
        !self.script.is_empty()
    }

    fn sample(&mut self) -> Result<Option<EmotionSample>, SamplerError> {
        if self.pending.is_empty() && self.looping {
            self.pending = self.script.iter().cloned().collect();
        }
        let next = self.pending.pop_front().flatten();
        Ok(next.and_then(EmotionSample::from_scores))
    }
}
