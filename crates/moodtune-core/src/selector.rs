//! Track selector
//!
//! Maps an emotion to a track drawn uniformly at random from the catalog,
//! with repeat-avoidance for manual skips and natural end-of-track advance.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::catalog::{Catalog, CatalogError, CatalogResult};
use crate::types::{Emotion, Track};

/// Random track picker
///
/// Generic over the random source so tests can use a seeded generator.
#[derive(Debug, Clone)]
pub struct TrackSelector<R = StdRng> {
    rng: R,
}

impl TrackSelector<StdRng> {
    /// Selector seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic selector (for tests and replays)
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for TrackSelector<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> TrackSelector<R> {
    /// Pick a random track for `emotion`
    ///
    /// Falls back to the neutral entry when `emotion` has no tracks.
    pub fn select_for_emotion(
        &mut self,
        emotion: Emotion,
        catalog: &Catalog,
    ) -> CatalogResult<Track> {
        let tracks = catalog.candidates(emotion)?;
        tracks
            .choose(&mut self.rng)
            .cloned()
            .ok_or(CatalogError::EmptyEntry { emotion })
    }

    /// Pick a random track for `emotion` that differs from `current`
    ///
    /// Re-draws while the pick equals `current`, but only if the list holds
    /// some other track. A single-track list (or one whose tracks all equal
    /// `current`) returns that track without looping.
    pub fn select_different(
        &mut self,
        current: &Track,
        emotion: Emotion,
        catalog: &Catalog,
    ) -> CatalogResult<Track> {
        let tracks = catalog.candidates(emotion)?;
        let has_alternative = tracks.iter().any(|t| t != current);

        loop {
            let pick = tracks
                .choose(&mut self.rng)
                .ok_or(CatalogError::EmptyEntry { emotion })?;
            if !has_alternative || pick != current {
                return Ok(pick.clone());
            }
        }
    }
}
