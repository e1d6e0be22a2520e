//! Terminal presentation
//!
//! Reads one intent per line from stdin and renders session snapshots as
//! log lines. This is the whole Presentation layer of the headless player.

use std::io::BufRead;

use moodtune_core::services::{PlayerStatus, SessionHandle};

/// A line typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start,
    Stop,
    PlayPause,
    Skip,
    Status,
    Quit,
}

impl Intent {
    pub fn parse(line: &str) -> Option<Intent> {
        match line.trim().to_ascii_lowercase().as_str() {
            "start" => Some(Intent::Start),
            "stop" => Some(Intent::Stop),
            "play" | "pause" | "p" => Some(Intent::PlayPause),
            "skip" | "next" | "n" => Some(Intent::Skip),
            "status" | "s" => Some(Intent::Status),
            "quit" | "exit" | "q" => Some(Intent::Quit),
            _ => None,
        }
    }
}

pub const HELP: &str = "commands: start | stop | play | skip | status | quit";

/// Blocking stdin loop; run it on its own thread
///
/// Ends on `quit`, end of input, or when the session service is gone. The
/// service is asked to shut down in every case.
pub fn read_intents(input: impl BufRead, handle: SessionHandle) {
    for line in input.lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        let Some(intent) = Intent::parse(&line) else {
            println!("{}", HELP);
            continue;
        };

        let sent = match intent {
            Intent::Start => handle.start_detection(),
            Intent::Stop => handle.stop_detection(),
            Intent::PlayPause => handle.play_pause(),
            Intent::Skip => handle.skip(),
            Intent::Status => {
                println!("{}", describe(&handle.status()));
                Ok(())
            }
            Intent::Quit => break,
        };
        if sent.is_err() {
            return;
        }
    }
    let _ = handle.shutdown();
}

/// One-line rendering of a snapshot
pub fn describe(status: &PlayerStatus) -> String {
    let session = &status.session;
    if !session.detecting {
        return if status.sampler_ready {
            "detection off".to_string()
        } else {
            "detection off (camera unavailable)".to_string()
        };
    }

    let emotion = session
        .current_emotion
        .as_ref()
        .map(|s| format!("{} {:.0}%", s.label, s.confidence() * 100.0))
        .unwrap_or_else(|| "no face yet".to_string());
    let track = session
        .current_track
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut line = format!("[{}] {} | {}", session.state, emotion, track);
    if let Some(error) = &session.last_error {
        line.push_str(&format!(" | error: {}", error));
    }
    line
}
