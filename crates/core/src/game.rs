//! Game State Controller
//!
//! Owns the screen, the celebration overlay, the input buffer and the item
//! selection, and turns every UI action into a list of [`Command`]s.
//!
//! Deferred work (the model reply, the celebration timer) is tagged with the
//! controller's `generation`. "Play again" bumps the generation, so anything
//! scheduled for the previous game is recognised as stale when it arrives.

use crate::Command;
use crate::catalog::{SHOP_ITEMS, ShopItem, find_item};
use crate::cue::SoundCue;
use crate::mission::{MissionOutcome, MissionStatus, MissionTracker};
use crate::session::{ConversationSession, Message};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Pause between the final sale and the celebration overlay, so the last
/// shopkeeper line can be read first.
pub const CELEBRATION_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Welcome,
    Shopping,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Unknown shop item: {0}")]
    UnknownItem(String),
}

/// Actions the presentation layer can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    StartGame,
    /// The input box was edited by typing.
    SetInput(String),
    InsertPhrase(String),
    SelectItem(String),
    Submit,
    PlayAgain,
}

/// Serializable view of everything the UI renders.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub screen: Screen,
    pub messages: Vec<Message>,
    pub missions: Vec<MissionStatus>,
    pub celebration: bool,
    pub input: String,
    pub selected_item: Option<&'static str>,
    /// Extra shortcut offered for the selected item.
    pub selected_item_phrase: Option<String>,
    pub awaiting_reply: bool,
    pub can_submit: bool,
}

/// Appends `phrase` to `buffer`, separated by a single space unless the
/// buffer is empty or already ends in whitespace.
pub fn append_phrase(buffer: &str, phrase: &str) -> String {
    if buffer.is_empty() {
        phrase.to_string()
    } else if buffer.ends_with(char::is_whitespace) {
        format!("{buffer}{phrase}")
    } else {
        format!("{buffer} {phrase}")
    }
}

#[derive(Debug)]
pub struct GameController {
    screen: Screen,
    session: ConversationSession,
    missions: MissionTracker,
    celebration: bool,
    input: String,
    selected_item: Option<&'static ShopItem>,
    catalog: &'static [ShopItem],
    generation: u64,
    next_utterance: u64,
    celebration_delay: Duration,
}

impl GameController {
    /// Creates a controller over the standard shop shelf.
    pub fn new(template: &str) -> Self {
        Self::with_catalog(template, &SHOP_ITEMS)
    }

    pub fn with_catalog(template: &str, catalog: &'static [ShopItem]) -> Self {
        Self {
            screen: Screen::Welcome,
            session: ConversationSession::new(template, catalog),
            missions: MissionTracker::new(),
            celebration: false,
            input: String::new(),
            selected_item: None,
            catalog,
            generation: 0,
            next_utterance: 0,
            celebration_delay: CELEBRATION_DELAY,
        }
    }

    pub fn with_celebration_delay(mut self, delay: Duration) -> Self {
        self.celebration_delay = delay;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn missions(&self) -> &MissionTracker {
        &self.missions
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn selected_item(&self) -> Option<&'static ShopItem> {
        self.selected_item
    }

    pub fn catalog(&self) -> &'static [ShopItem] {
        self.catalog
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The lower-cased name of the selected item, offered as a shortcut.
    pub fn selected_item_phrase(&self) -> Option<String> {
        self.selected_item.map(|item| item.name.to_lowercase())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let awaiting_reply = self.session.is_awaiting_reply();
        GameSnapshot {
            screen: self.screen,
            messages: self.session.messages().to_vec(),
            missions: self.missions.board(),
            celebration: self.celebration,
            input: self.input.clone(),
            selected_item: self.selected_item.map(|item| item.id),
            selected_item_phrase: self.selected_item_phrase(),
            awaiting_reply,
            can_submit: !awaiting_reply && !self.input.trim().is_empty(),
        }
    }

    /// Dispatches one UI action.
    ///
    /// On the welcome screen only starting (or restarting) the game does anything.
    pub fn handle(&mut self, action: UiAction) -> Result<Vec<Command>, GameError> {
        if self.screen == Screen::Welcome
            && !matches!(action, UiAction::StartGame | UiAction::PlayAgain)
        {
            debug!(?action, "Ignoring action on the welcome screen");
            return Ok(Vec::new());
        }

        let commands = match action {
            UiAction::StartGame => self.start_game(),
            UiAction::SetInput(text) => {
                self.input = text;
                Vec::new()
            }
            UiAction::InsertPhrase(phrase) => self.insert_phrase(&phrase),
            UiAction::SelectItem(item_id) => self.select_item(&item_id)?,
            UiAction::Submit => self.submit(),
            UiAction::PlayAgain => self.play_again(),
        };
        Ok(commands)
    }

    /// Leaves the welcome screen and greets the student.
    pub fn start_game(&mut self) -> Vec<Command> {
        if self.screen == Screen::Shopping {
            return Vec::new();
        }
        info!(generation = self.generation, "Game started");
        self.screen = Screen::Shopping;
        let mut commands = vec![Command::PlayCue(SoundCue::Success)];
        let greeting = self.session.start().text.clone();
        commands.push(self.speak(greeting));
        commands
    }

    pub fn insert_phrase(&mut self, phrase: &str) -> Vec<Command> {
        self.input = append_phrase(&self.input, phrase);
        vec![Command::PlayCue(SoundCue::Click)]
    }

    pub fn select_item(&mut self, item_id: &str) -> Result<Vec<Command>, GameError> {
        let item = find_item(self.catalog, item_id)
            .ok_or_else(|| GameError::UnknownItem(item_id.to_string()))?;
        self.selected_item = Some(item);
        Ok(vec![Command::PlayCue(SoundCue::Click)])
    }

    /// Sends the input buffer as the student's next turn.
    pub fn submit(&mut self) -> Vec<Command> {
        let Some(request) = self.session.submit_user_text(&self.input, self.generation) else {
            return Vec::new();
        };
        self.input.clear();
        vec![
            Command::PlayCue(SoundCue::Pop),
            Command::RequestReply(request),
        ]
    }

    /// Applies the model's answer for a turn requested in `generation`.
    pub fn complete_turn(
        &mut self,
        generation: u64,
        result: anyhow::Result<String>,
    ) -> Vec<Command> {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "Discarding reply for a previous game"
            );
            return Vec::new();
        }
        let Some((user_text, message)) = self.session.complete_turn(result) else {
            return Vec::new();
        };
        let reply = message.text.clone();

        let mut commands = vec![self.speak(reply.clone())];
        match self.missions.evaluate(&user_text, &reply) {
            MissionOutcome::Progress(_) => commands.push(Command::PlayCue(SoundCue::Success)),
            MissionOutcome::AllComplete(_) => {
                info!(generation, "All missions complete");
                commands.push(Command::ScheduleCelebration {
                    generation,
                    delay: self.celebration_delay,
                });
            }
            MissionOutcome::NoSale | MissionOutcome::NoProgress => {}
        }
        commands
    }

    /// Fires the deferred celebration; a no-op for a stale generation.
    pub fn fire_celebration(&mut self, generation: u64) -> Vec<Command> {
        if generation != self.generation || self.celebration || !self.missions.all_completed() {
            debug!(generation, "Ignoring stale celebration");
            return Vec::new();
        }
        self.celebration = true;
        vec![Command::ShowCelebration, Command::PlayCue(SoundCue::Win)]
    }

    /// Resets missions, conversation and UI state, then greets again.
    pub fn play_again(&mut self) -> Vec<Command> {
        self.generation += 1;
        info!(generation = self.generation, "Starting a new game");
        self.missions.reset();
        self.celebration = false;
        self.input.clear();
        self.selected_item = None;
        self.screen = Screen::Shopping;

        let mut commands = vec![Command::CancelPending, Command::PlayCue(SoundCue::Success)];
        let greeting = self.session.reset().text.clone();
        commands.push(self.speak(greeting));
        commands
    }

    fn speak(&mut self, text: String) -> Command {
        let utterance = self.next_utterance;
        self.next_utterance += 1;
        Command::Speak { utterance, text }
    }
}
