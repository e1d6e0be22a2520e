//! Track catalog
//!
//! The catalog maps each emotion to an ordered list of tracks. It is loaded
//! once at startup and never mutated afterwards; the selector and the
//! controller share it behind an `Arc`.
//!
//! Entries may be missing or empty. That is a configuration error, but it is
//! only fatal to the selection attempt that hits it (see [`CatalogError`]).

mod builtin;
mod file;

pub use file::{load_catalog, CatalogEntry, CatalogFile};

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::{Emotion, Track};

/// Errors raised while loading a catalog or selecting from it
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No track is available for the emotion, even after the neutral fallback
    #[error("Catalog has no tracks for emotion '{emotion}'")]
    EmptyEntry { emotion: Emotion },

    /// Catalog file could not be read or parsed
    #[error("Failed to load catalog: {0}")]
    Load(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Static mapping from emotion to its ordered track list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: BTreeMap<Emotion, Vec<Track>>,
}

impl Catalog {
    /// Build a catalog from per-emotion track lists
    ///
    /// Each track's `emotion` is forced to the key it is listed under, so a
    /// track always belongs to exactly one emotion's entry.
    pub fn new(entries: BTreeMap<Emotion, Vec<Track>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(emotion, tracks)| {
                let tracks = tracks
                    .into_iter()
                    .map(|mut track| {
                        track.emotion = emotion;
                        track
                    })
                    .collect();
                (emotion, tracks)
            })
            .collect();
        Self { entries }
    }

    /// The royalty-free track list shipped with the player
    pub fn builtin() -> Self {
        builtin::builtin_catalog()
    }

    /// Tracks listed for an emotion (empty slice when the entry is missing)
    pub fn tracks(&self, emotion: Emotion) -> &[Track] {
        self.entries.get(&emotion).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the emotion has at least one track
    pub fn has_tracks(&self, emotion: Emotion) -> bool {
        !self.tracks(emotion).is_empty()
    }

    /// Emotions without any track, in priority order
    pub fn missing_emotions(&self) -> Vec<Emotion> {
        Emotion::ALL
            .iter()
            .copied()
            .filter(|e| !self.has_tracks(*e))
            .collect()
    }

    /// Total number of tracks across all emotions
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Track list to draw from for `emotion`
    ///
    /// Falls back to the neutral entry when `emotion` has no tracks. Fails
    /// when the fallback is empty as well.
    pub fn candidates(&self, emotion: Emotion) -> CatalogResult<&[Track]> {
        let tracks = self.tracks(emotion);
        if !tracks.is_empty() {
            return Ok(tracks);
        }

        let fallback = self.tracks(Emotion::Neutral);
        if fallback.is_empty() {
            return Err(CatalogError::EmptyEntry { emotion });
        }

        log::warn!(
            "Catalog: no tracks for '{}', falling back to neutral ({} tracks)",
            emotion,
            fallback.len()
        );
        Ok(fallback)
    }

    /// Log a summary of the catalog and any emotion left without tracks
    pub fn log_summary(&self) {
        log::info!(
            "Catalog: {} tracks across {} emotions",
            self.len(),
            self.entries.values().filter(|t| !t.is_empty()).count()
        );
        for emotion in self.missing_emotions() {
            log::warn!("Catalog: emotion '{}' has no tracks configured", emotion);
        }
    }
}
