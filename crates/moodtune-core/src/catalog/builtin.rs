//! Built-in catalog of royalty-free Bensound tracks

use std::collections::BTreeMap;

use super::Catalog;
use crate::types::{Emotion, Track};

const BASE_URL: &str = "https://www.bensound.com/bensound-music";
const ARTIST: &str = "Bensound";

/// (emotion, title, file slug)
const BUILTIN_TRACKS: &[(Emotion, &str, &str)] = &[
    (Emotion::Happy, "Acoustic Breeze", "acousticbreeze"),
    (Emotion::Happy, "Summer", "summer"),
    (Emotion::Happy, "Cute", "cute"),
    (Emotion::Happy, "Sunny Day", "sunny"),
    (Emotion::Happy, "Happy Rock", "happyrock"),
    (Emotion::Happy, "Ukulele", "ukulele"),
    (Emotion::Sad, "Sad Day", "sadday"),
    (Emotion::Sad, "Piano Moment", "pianomoment"),
    (Emotion::Sad, "Memories", "memories"),
    (Emotion::Angry, "Punky", "punky"),
    (Emotion::Angry, "Energy", "energy"),
    (Emotion::Angry, "Rock Angel", "rockangel"),
    (Emotion::Neutral, "Relaxing", "relaxing"),
    (Emotion::Neutral, "Slow Motion", "slowmotion"),
    (Emotion::Neutral, "Creative Minds", "creativeminds"),
    (Emotion::Surprised, "Funky Element", "funkyelement"),
    (Emotion::Surprised, "Groovy Hip Hop", "groovyhiphop"),
    (Emotion::Surprised, "Pop Dance", "popdance"),
    (Emotion::Fearful, "Sci-Fi", "scifi"),
    (Emotion::Fearful, "Tenderness", "tenderness"),
    (Emotion::Fearful, "Dreams", "dreams"),
    (Emotion::Disgusted, "Dubstep", "dubstep"),
    (Emotion::Disgusted, "Extreme Action", "extremeaction"),
    (Emotion::Disgusted, "House", "house"),
];

pub(super) fn builtin_catalog() -> Catalog {
    let mut entries: BTreeMap<Emotion, Vec<Track>> = BTreeMap::new();
    for (emotion, title, slug) in BUILTIN_TRACKS {
        let source = format!("{}/bensound-{}.mp3", BASE_URL, slug);
        entries
            .entry(*emotion)
            .or_default()
            .push(Track::new(*title, ARTIST, *emotion, source));
    }
    Catalog::new(entries)
}
