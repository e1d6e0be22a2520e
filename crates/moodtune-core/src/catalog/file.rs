//! Catalog file loading
//!
//! A catalog file is YAML keyed by lowercase emotion name:
//!
//! ```yaml
//! happy:
//!   - title: Summer
//!     artist: Bensound
//!     source: https://www.bensound.com/bensound-music/bensound-summer.mp3
//! sad: []
//! ```
//!
//! A track's emotion comes from the key it is listed under.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Catalog, CatalogError, CatalogResult};
use crate::types::{Emotion, Track};

/// One track as written in a catalog file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub source: String,
}

/// On-disk catalog representation
pub type CatalogFile = BTreeMap<Emotion, Vec<CatalogEntry>>;

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        let entries = file
            .into_iter()
            .map(|(emotion, tracks)| {
                let tracks = tracks
                    .into_iter()
                    .map(|e| Track::new(e.title, e.artist, emotion, e.source))
                    .collect();
                (emotion, tracks)
            })
            .collect();
        Catalog::new(entries)
    }
}

impl Catalog {
    /// Parse a catalog from YAML text
    pub fn from_yaml(contents: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(contents)
            .map_err(|e| CatalogError::Load(format!("invalid catalog YAML: {}", e)))?;
        Ok(file.into())
    }

    /// Convert back to the on-disk representation
    pub fn to_file(&self) -> CatalogFile {
        Emotion::ALL
            .iter()
            .filter(|e| self.has_tracks(**e))
            .map(|emotion| {
                let tracks = self
                    .tracks(*emotion)
                    .iter()
                    .map(|t| CatalogEntry {
                        title: t.title.clone(),
                        artist: t.artist.clone(),
                        source: t.source.clone(),
                    })
                    .collect();
                (*emotion, tracks)
            })
            .collect()
    }
}

/// Load a catalog from a YAML file
///
/// Unlike configuration, a catalog that was explicitly configured but cannot
/// be read is an error: silently playing the wrong music is worse than
/// refusing to start.
pub fn load_catalog(path: &Path) -> CatalogResult<Catalog> {
    log::info!("load_catalog: Loading from {:?}", path);

    let contents = std::fs::read_to_string(path)
        .map_err(|e| CatalogError::Load(format!("failed to read {:?}: {}", path, e)))?;
    let catalog = Catalog::from_yaml(&contents)?;

    log::info!(
        "load_catalog: Loaded {} tracks from {:?}",
        catalog.len(),
        path
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
happy:
  - title: Summer
    artist: Bensound
    source: https://example.com/summer.mp3
  - title: Cute
    source: https://example.com/cute.mp3
neutral:
  - title: Relaxing
    artist: Bensound
    source: /music/relaxing.flac
sad: []
"#;

    #[test]
    fn test_from_yaml() {
        let catalog = Catalog::from_yaml(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.tracks(Emotion::Happy)[1].artist, "");
        assert_eq!(catalog.tracks(Emotion::Neutral)[0].emotion, Emotion::Neutral);
        assert!(catalog.missing_emotions().contains(&Emotion::Sad));
    }

    #[test]
    fn test_unknown_emotion_is_rejected() {
        let err = Catalog::from_yaml("bored:\n  - title: x\n    source: y\n").unwrap_err();
        assert!(matches!(err, CatalogError::Load(_)));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = load_catalog(Path::new("/nonexistent/catalog.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::Load(_)));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.yaml");

        let original = Catalog::builtin();
        let yaml = serde_yaml::to_string(&original.to_file()).unwrap();
        std::fs::write(&path, yaml).unwrap();

        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
