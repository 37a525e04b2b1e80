pub mod catalog;
pub mod cue;
pub mod driver;
pub mod game;
pub mod llm_client;
pub mod mission;
pub mod prompt;
pub mod session;

use cue::SoundCue;
use session::TurnRequest;
use std::time::Duration;

/// Represents commands that the core logic issues to an external runtime.
///
/// This enum is the primary API for decoupling the game's decision-making
/// from the runtime's execution of side effects. `Speak`, `PlayCue` and
/// `ShowCelebration` go to the presentation layer; the rest are carried out
/// by the [`driver::GameDriver`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Speak the given text. A higher `utterance` supersedes any playback
    /// still running for a lower one.
    Speak { utterance: u64, text: String },
    /// Play a short audio cue.
    PlayCue(SoundCue),
    /// Show the celebration overlay.
    ShowCelebration,
    /// Ask the shopkeeper model for a reply.
    RequestReply(TurnRequest),
    /// Fire the celebration for `generation` after `delay`.
    ScheduleCelebration { generation: u64, delay: Duration },
    /// Drop any reply or timer still pending for the previous session.
    CancelPending,
}
