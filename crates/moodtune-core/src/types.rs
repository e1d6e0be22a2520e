//! Common types for moodtune
//!
//! This module contains the fundamental data types shared by the stabilizer,
//! the track selector and the playback controller: the closed emotion set,
//! per-sample score distributions, and catalog tracks.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Number of emotions in the closed emotion set
pub const NUM_EMOTIONS: usize = 7;

/// Confidence a changed label must exceed before the player reacts to it
pub const REACTION_THRESHOLD: f32 = 0.6;

/// Default period between two emotion samples while detection is active
pub const DEFAULT_SAMPLE_INTERVAL: Duration = Duration::from_millis(1000);

/// Default debounce between a completed load and automatic playback
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Emotion identifiers
///
/// Declaration order is the fixed priority order used to break ties when two
/// emotions share the highest score: the earlier variant wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Neutral,
    Surprised,
    Fearful,
    Disgusted,
}

impl Emotion {
    /// All emotions in priority order
    pub const ALL: [Emotion; NUM_EMOTIONS] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Neutral,
        Emotion::Surprised,
        Emotion::Fearful,
        Emotion::Disgusted,
    ];

    /// Get the lowercase name of this emotion
    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Neutral => "neutral",
            Emotion::Surprised => "surprised",
            Emotion::Fearful => "fearful",
            Emotion::Disgusted => "disgusted",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.name() == lower)
            .ok_or_else(|| format!("Unknown emotion: {}", s))
    }
}

/// Score distribution over the emotion set for a single face observation
///
/// Scores are clamped into `[0, 1]` and treated independently; they need not
/// sum to one. Emotions that were never scored read as `0.0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Emotion, f32>")]
pub struct EmotionScores(BTreeMap<Emotion, f32>);

impl From<BTreeMap<Emotion, f32>> for EmotionScores {
    fn from(raw: BTreeMap<Emotion, f32>) -> Self {
        raw.into_iter().collect()
    }
}

impl EmotionScores {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score for one emotion (clamped into `[0, 1]`, NaN becomes 0)
    pub fn set(&mut self, emotion: Emotion, score: f32) {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        self.0.insert(emotion, score);
    }

    /// Builder-style variant of [`EmotionScores::set`]
    pub fn with(mut self, emotion: Emotion, score: f32) -> Self {
        self.set(emotion, score);
        self
    }

    /// Score for an emotion, `0.0` when absent
    pub fn get(&self, emotion: Emotion) -> f32 {
        self.0.get(&emotion).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate scored emotions in priority order
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, f32)> + '_ {
        self.0.iter().map(|(e, s)| (*e, *s))
    }

    /// Highest-scoring emotion
    ///
    /// Ties go to the emotion that comes first in [`Emotion::ALL`]: a later
    /// emotion replaces the current best only with a strictly higher score.
    /// Returns `None` for an empty distribution.
    pub fn dominant(&self) -> Option<Emotion> {
        let mut best: Option<(Emotion, f32)> = None;
        for (emotion, score) in self.iter() {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((emotion, score)),
            }
        }
        best.map(|(emotion, _)| emotion)
    }
}

impl FromIterator<(Emotion, f32)> for EmotionScores {
    fn from_iter<I: IntoIterator<Item = (Emotion, f32)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (emotion, score) in iter {
            scores.set(emotion, score);
        }
        scores
    }
}

/// One classified face observation, produced once per sample tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionSample {
    /// Dominant emotion of `distribution`
    pub label: Emotion,
    /// Full score distribution (shown as confidence bars)
    pub distribution: EmotionScores,
}

impl EmotionSample {
    /// Build a sample, labelling it with the dominant emotion
    ///
    /// Returns `None` when the distribution is empty.
    pub fn from_scores(distribution: EmotionScores) -> Option<Self> {
        let label = distribution.dominant()?;
        Some(Self { label, distribution })
    }

    /// Score of the labelled emotion
    pub fn confidence(&self) -> f32 {
        self.distribution.get(self.label)
    }
}

/// A playable track from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    /// Emotion whose catalog entry owns this track
    pub emotion: Emotion,
    /// Opaque reference handed to the media substrate on load (URL or path)
    pub source: String,
}

impl Track {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        emotion: Emotion,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            emotion,
            source: source.into(),
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}
