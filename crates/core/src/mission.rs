//! Mission Tracking
//!
//! A mission is completed when the student uses one of the three target
//! quantifier phrases in a turn that the shopkeeper answered with a sale.
//! The only sale signal available is the shopkeeper's free text: a reply
//! containing "Here you go" or "euros" (case-insensitive) counts as a sale.

use serde::Serialize;
use tracing::info;

/// One of the three target quantifier phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Quantifier {
    #[serde(rename = "a few")]
    AFew,
    #[serde(rename = "a little")]
    ALittle,
    #[serde(rename = "a lot of")]
    ALotOf,
}

impl Quantifier {
    /// All quantifiers in the order they are checked and displayed.
    pub const ALL: [Quantifier; 3] = [Quantifier::AFew, Quantifier::ALittle, Quantifier::ALotOf];

    pub fn phrase(self) -> &'static str {
        match self {
            Quantifier::AFew => "a few",
            Quantifier::ALittle => "a little",
            Quantifier::ALotOf => "a lot of",
        }
    }

    fn index(self) -> usize {
        match self {
            Quantifier::AFew => 0,
            Quantifier::ALittle => 1,
            Quantifier::ALotOf => 2,
        }
    }
}

const SALE_MARKERS: [&str; 2] = ["here you go", "euros"];

/// Returns true if the shopkeeper's reply reads as a completed sale.
pub fn is_sale_confirmed(reply: &str) -> bool {
    let reply = reply.to_lowercase();
    SALE_MARKERS.iter().any(|marker| reply.contains(marker))
}

/// What a single evaluated turn did to the mission board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissionOutcome {
    /// The reply was not a sale; nothing was inspected.
    NoSale,
    /// A sale happened but no new quantifier was demonstrated.
    NoProgress,
    /// At least one flag flipped and some missions remain.
    Progress(Vec<Quantifier>),
    /// The last remaining flags flipped; every mission is done.
    AllComplete(Vec<Quantifier>),
}

/// One row of the mission board, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MissionStatus {
    pub phrase: Quantifier,
    pub completed: bool,
}

/// Per-session "demonstrated" flags, one per quantifier.
///
/// Flags only move from false to true; `reset` is the single way back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissionTracker {
    completed: [bool; 3],
}

impl MissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_completed(&self, quantifier: Quantifier) -> bool {
        self.completed[quantifier.index()]
    }

    pub fn all_completed(&self) -> bool {
        self.completed.iter().all(|done| *done)
    }

    pub fn board(&self) -> Vec<MissionStatus> {
        Quantifier::ALL
            .iter()
            .map(|&phrase| MissionStatus {
                phrase,
                completed: self.is_completed(phrase),
            })
            .collect()
    }

    /// Inspects one finished turn pair and flips any newly demonstrated flags.
    pub fn evaluate(&mut self, user_text: &str, reply: &str) -> MissionOutcome {
        if !is_sale_confirmed(reply) {
            return MissionOutcome::NoSale;
        }

        let user_text = user_text.to_lowercase();
        let mut newly_completed = Vec::new();
        for quantifier in Quantifier::ALL {
            if user_text.contains(quantifier.phrase()) && !self.is_completed(quantifier) {
                self.completed[quantifier.index()] = true;
                newly_completed.push(quantifier);
            }
        }

        if newly_completed.is_empty() {
            return MissionOutcome::NoProgress;
        }

        info!(completed = ?newly_completed, "Mission progress");
        if self.all_completed() {
            MissionOutcome::AllComplete(newly_completed)
        } else {
            MissionOutcome::Progress(newly_completed)
        }
    }

    pub fn reset(&mut self) {
        self.completed = [false; 3];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_markers_are_case_insensitive() {
        assert!(is_sale_confirmed("HERE YOU GO! 🍎"));
        assert!(is_sale_confirmed("That is 2 Euros, please."));
        assert!(!is_sale_confirmed("That looks good! But how much is it? 💰"));
        // Only the word counts, not the symbol.
        assert!(!is_sale_confirmed("That's €2.50."));
    }

    #[test]
    fn test_a_few_flips_only_its_flag() {
        let mut tracker = MissionTracker::new();
        let outcome = tracker.evaluate(
            "I would like a few apples. How much are they?",
            "Great job! That's 0.80 euros. Here you go! 🍎",
        );
        assert_eq!(outcome, MissionOutcome::Progress(vec![Quantifier::AFew]));
        assert!(tracker.is_completed(Quantifier::AFew));
        assert!(!tracker.is_completed(Quantifier::ALittle));
        assert!(!tracker.is_completed(Quantifier::ALotOf));
    }

    #[test]
    fn test_correction_reply_never_advances() {
        let mut tracker = MissionTracker::new();
        let outcome = tracker.evaluate(
            "I want a little milk",
            "That looks good! But how much is it? Say 'a little milk'.",
        );
        assert_eq!(outcome, MissionOutcome::NoSale);
        assert_eq!(tracker, MissionTracker::new());
    }

    #[test]
    fn test_repeat_phrase_is_no_progress() {
        let mut tracker = MissionTracker::new();
        tracker.evaluate("A FEW sweets, how much?", "Here you go!");
        let outcome = tracker.evaluate("a few apples, how much?", "Here you go!");
        assert_eq!(outcome, MissionOutcome::NoProgress);
        assert!(tracker.is_completed(Quantifier::AFew));
    }

    #[test]
    fn test_all_complete_reported_once() {
        let mut tracker = MissionTracker::new();
        tracker.evaluate("a few sweets", "Here you go!");
        tracker.evaluate("a little milk", "Here you go!");
        let outcome = tracker.evaluate("a lot of lemonade", "That is 3 euros.");
        assert_eq!(outcome, MissionOutcome::AllComplete(vec![Quantifier::ALotOf]));
        assert!(tracker.all_completed());

        let again = tracker.evaluate("a lot of apples", "Here you go!");
        assert_eq!(again, MissionOutcome::NoProgress);
    }

    #[test]
    fn test_one_utterance_can_complete_several() {
        let mut tracker = MissionTracker::new();
        let outcome = tracker.evaluate(
            "a few apples and a little milk, how much?",
            "Here you go!",
        );
        assert_eq!(
            outcome,
            MissionOutcome::Progress(vec![Quantifier::AFew, Quantifier::ALittle])
        );
    }

    #[test]
    fn test_flags_are_monotonic_until_reset() {
        let mut tracker = MissionTracker::new();
        let turns = [
            ("a lot of sweets", "Here you go!"),
            ("no quantifier here", "Here you go!"),
            ("a lot of sweets", "Try again please"),
            ("a little apples", "Oh! For apples we say a few."),
        ];
        for (user, reply) in turns {
            tracker.evaluate(user, reply);
            assert!(tracker.is_completed(Quantifier::ALotOf));
        }

        tracker.reset();
        assert!(tracker.board().iter().all(|row| !row.completed));
    }

    #[test]
    fn test_board_order_and_serialization() {
        let tracker = MissionTracker::new();
        let json = serde_json::to_string(&tracker.board()).unwrap();
        assert_eq!(
            json,
            r#"[{"phrase":"a few","completed":false},{"phrase":"a little","completed":false},{"phrase":"a lot of","completed":false}]"#
        );
    }
}
