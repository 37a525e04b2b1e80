//! Conversation Session
//!
//! Holds the two ordered logs of a game: the display log (`Message`) and the
//! context log (`ConversationTurn`) that is sent to the shopkeeper model. Both
//! grow in lock-step; every message has exactly one turn at the same index.

use crate::catalog::ShopItem;
use crate::prompt::render_system_instruction;
use serde::Serialize;
use tracing::{debug, error, warn};

pub const GREETING: &str = "Hello! Welcome to the Magic Shop! 🌟 What would you like to buy?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Shopkeeper,
}

/// One rendered line of the chat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_correction: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

/// One entry of the context sent to the shopkeeper model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Model,
            text: text.into(),
        }
    }
}

/// Everything the shopkeeper model needs to answer one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRequest {
    /// Session generation the request belongs to; replies for an older
    /// generation are discarded.
    pub generation: u64,
    pub system_instruction: String,
    /// Turns strictly before `user_text`.
    pub history: Vec<ConversationTurn>,
    pub user_text: String,
}

#[derive(Debug)]
pub struct ConversationSession {
    system_instruction: String,
    messages: Vec<Message>,
    turns: Vec<ConversationTurn>,
    next_id: u64,
    /// User text of the turn awaiting a reply.
    in_flight: Option<String>,
}

impl ConversationSession {
    /// Builds an empty session, rendering the system instruction against `catalog`.
    pub fn new(template: &str, catalog: &[ShopItem]) -> Self {
        Self {
            system_instruction: render_system_instruction(template, catalog),
            messages: Vec::new(),
            turns: Vec::new(),
            next_id: 0,
            in_flight: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Clears both logs and seeds them with the greeting.
    ///
    /// Returns the greeting so the caller can speak it.
    pub fn start(&mut self) -> &Message {
        self.messages.clear();
        self.turns.clear();
        self.in_flight = None;
        self.push(Sender::Shopkeeper, GREETING.to_string())
    }

    /// Records a user utterance and prepares the request for the model.
    ///
    /// Returns `None` when the text is blank or a reply is still pending.
    pub fn submit_user_text(&mut self, text: &str, generation: u64) -> Option<TurnRequest> {
        if text.trim().is_empty() {
            return None;
        }
        if self.in_flight.is_some() {
            warn!("Ignoring submission while a reply is pending");
            return None;
        }

        let history = self.turns.clone();
        self.push(Sender::User, text.to_string());
        self.in_flight = Some(text.to_string());
        debug!(history_len = history.len(), "User turn recorded");

        Some(TurnRequest {
            generation,
            system_instruction: self.system_instruction.clone(),
            history,
            user_text: text.to_string(),
        })
    }

    /// Finishes the pending turn.
    ///
    /// On success the reply is appended and returned together with the user
    /// text it answers. On failure the error is logged and the pending turn is
    /// dropped without a shopkeeper message.
    pub fn complete_turn(&mut self, result: anyhow::Result<String>) -> Option<(String, &Message)> {
        let user_text = self.in_flight.take()?;
        match result {
            Ok(reply) => {
                let message = self.push(Sender::Shopkeeper, reply);
                Some((user_text, message))
            }
            Err(e) => {
                error!(error = ?e, "Shopkeeper reply failed; dropping turn");
                None
            }
        }
    }

    /// Clears both logs and starts over with a fresh greeting.
    pub fn reset(&mut self) -> &Message {
        self.next_id = 0;
        self.start()
    }

    fn push(&mut self, sender: Sender, text: String) -> &Message {
        let turn = match sender {
            Sender::User => ConversationTurn::user(text.clone()),
            Sender::Shopkeeper => ConversationTurn::model(text.clone()),
        };
        self.turns.push(turn);
        self.messages.push(Message {
            id: self.next_id,
            sender,
            text,
            is_correction: false,
        });
        self.next_id += 1;
        &self.messages[self.messages.len() - 1]
    }
}
