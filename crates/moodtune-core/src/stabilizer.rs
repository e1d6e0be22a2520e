//! Emotion stabilizer
//!
//! Raw per-frame classifications are noisy. The stabilizer decides whether a
//! new sample is significant enough to change the music: only the very first
//! observation, or a label change whose confidence clears the threshold.

use crate::types::{Emotion, EmotionSample, REACTION_THRESHOLD};

/// Outcome of feeding one sample to the stabilizer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaction {
    /// Label of the incoming sample
    pub label: Emotion,
    /// Whether the player should select a new track for `label`
    pub should_react: bool,
}

/// Stateless reaction policy
///
/// The caller owns the reference sample (the last sample that produced a
/// reaction) and passes it back in as `previous`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionStabilizer {
    threshold: f32,
}

impl Default for EmotionStabilizer {
    fn default() -> Self {
        Self {
            threshold: REACTION_THRESHOLD,
        }
    }
}

impl EmotionStabilizer {
    /// Create a stabilizer with a custom confidence threshold (clamped to `[0, 1]`)
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Decide whether `sample` warrants a reaction
    ///
    /// Reacts when there is no previous reaction, or when the label changed
    /// and its confidence is strictly above the threshold.
    pub fn update(&self, sample: &EmotionSample, previous: Option<&EmotionSample>) -> Reaction {
        let should_react = match previous {
            None => true,
            Some(prev) => {
                sample.label != prev.label
                    && sample.distribution.get(sample.label) > self.threshold
            }
        };

        Reaction {
            label: sample.label,
            should_react,
        }
    }
}
