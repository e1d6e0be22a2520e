//! moodtune-core: emotion-driven playback engine
//!
//! - [`stabilizer`]: decides when a new emotion sample warrants a reaction
//! - [`selector`]: picks a random track for an emotion from the [`catalog`]
//! - [`playback`]: the playback state machine driving a media substrate
//! - [`services`]: the async loop tying sampler, timers and controller together

pub mod catalog;
pub mod config;
pub mod playback;
pub mod sampler;
pub mod selector;
pub mod services;
pub mod stabilizer;
pub mod types;

pub use types::*;
