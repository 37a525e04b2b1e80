//! Defines the WebSocket message protocol between the browser client and the API server.

use magic_shop_core::{
    Command,
    cue::{SoundCue, Tone},
    game::{GameSnapshot, UiAction},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from the client (browser) to the server.
#[derive(Deserialize, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Leaves the welcome screen.
    StartGame,
    /// The input box was edited by typing.
    SetInput { text: String },
    /// A phrase shortcut chip was clicked.
    InsertPhrase { phrase: String },
    /// An item on the shelf was clicked.
    SelectItem { item_id: String },
    /// Sends the current input as the next turn.
    Submit,
    /// Resets everything and starts a new game.
    PlayAgain,
}

impl From<ClientMessage> for UiAction {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::StartGame => UiAction::StartGame,
            ClientMessage::SetInput { text } => UiAction::SetInput(text),
            ClientMessage::InsertPhrase { phrase } => UiAction::InsertPhrase(phrase),
            ClientMessage::SelectItem { item_id } => UiAction::SelectItem(item_id),
            ClientMessage::Submit => UiAction::Submit,
            ClientMessage::PlayAgain => UiAction::PlayAgain,
        }
    }
}

/// Messages sent from the server to the client (browser).
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Confirms the connection and names the game session.
    Connected { session_id: Uuid },
    /// The full UI state after any change.
    State { state: GameSnapshot },
    /// Speak `text`, cancelling any utterance with a lower id first.
    Speak { utterance: u64, text: String },
    /// Play a short audio cue.
    PlayCue { cue: SoundCue, tone: Tone },
    /// Show the celebration overlay.
    Celebrate,
    /// A rejected action; the game state is unchanged.
    Error { message: String },
}

impl ServerMessage {
    /// Converts an outward command from the game core into a wire message.
    ///
    /// Internal commands are handled by the driver and never reach here.
    pub fn from_command(command: Command) -> Option<Self> {
        match command {
            Command::Speak { utterance, text } => Some(ServerMessage::Speak { utterance, text }),
            Command::PlayCue(cue) => Some(ServerMessage::PlayCue {
                cue,
                tone: cue.tone(),
            }),
            Command::ShowCelebration => Some(ServerMessage::Celebrate),
            Command::RequestReply(_)
            | Command::ScheduleCelebration { .. }
            | Command::CancelPending => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_message_deserialization() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"insert_phrase","phrase":"a lot of"}"#).unwrap();
        assert_eq!(
            msg,
            ClientMessage::InsertPhrase {
                phrase: "a lot of".to_string()
            }
        );

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"submit"}"#).unwrap();
        assert_eq!(UiAction::from(msg), UiAction::Submit);

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"select_item","item_id":"milk"}"#).unwrap();
        assert_eq!(UiAction::from(msg), UiAction::SelectItem("milk".to_string()));
    }

    #[test]
    fn test_unknown_client_message_is_rejected() {
        let result: Result<ClientMessage, _> = serde_json::from_str(r#"{"type":"buy_everything"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_speak_serialization() {
        let msg = ServerMessage::from_command(Command::Speak {
            utterance: 4,
            text: "Here you go!".to_string(),
        })
        .unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "speak");
        assert_eq!(json["utterance"], 4);
        assert_eq!(json["text"], "Here you go!");
    }

    #[test]
    fn test_cue_carries_its_tone() {
        let msg = ServerMessage::from_command(Command::PlayCue(SoundCue::Pop)).unwrap();
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "play_cue");
        assert_eq!(json["cue"], "pop");
        assert_eq!(json["tone"]["waveform"], "sine");
    }

    #[test]
    fn test_internal_commands_are_not_sent() {
        assert!(ServerMessage::from_command(Command::CancelPending).is_none());
        assert!(
            ServerMessage::from_command(Command::ScheduleCelebration {
                generation: 1,
                delay: Duration::from_secs(1),
            })
            .is_none()
        );
    }
}
