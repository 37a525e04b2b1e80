//! Line-based input parsing and output rendering for the terminal client.

use magic_shop_core::{
    Command,
    catalog::{HINT_PHRASES, SHOPKEEPER_EMOJI, SHOPKEEPER_NAME, ShopItem},
    cue::SoundCue,
    game::{GameController, UiAction, append_phrase},
    mission::MissionTracker,
};
use std::fmt::Write as _;
use tracing::debug;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown command: /{0}. Type /help for the list.")]
    UnknownCommand(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("There is no hint number {0}.")]
    NoSuchHint(usize),
}

/// What one typed line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// Game actions to dispatch in order.
    Actions(Vec<UiAction>),
    Help,
    Shelf,
    Missions,
    Quit,
}

/// The hint chips currently on offer: the fixed phrases plus the selected item.
pub fn hint_phrases(game: &GameController) -> Vec<String> {
    let mut hints: Vec<String> = HINT_PHRASES.iter().map(|p| p.to_string()).collect();
    hints.extend(game.selected_item_phrase());
    hints
}

/// Parses one line typed by the student.
///
/// Plain text is appended to whatever the hints already put in the input
/// box and sent; an empty line sends the box as it is.
pub fn parse_line(line: &str, game: &GameController) -> Result<Input, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix('/') else {
        let text = if line.trim().is_empty() {
            game.input().to_string()
        } else {
            append_phrase(game.input(), line.trim_start())
        };
        return Ok(Input::Actions(vec![
            UiAction::SetInput(text),
            UiAction::Submit,
        ]));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match name {
        "help" => Ok(Input::Help),
        "shelf" => Ok(Input::Shelf),
        "missions" => Ok(Input::Missions),
        "quit" | "exit" => Ok(Input::Quit),
        "again" => Ok(Input::Actions(vec![UiAction::PlayAgain])),
        "select" if !arg.is_empty() => Ok(Input::Actions(vec![UiAction::SelectItem(
            arg.to_string(),
        )])),
        "select" => Err(InputError::Usage("/select <item id>")),
        "hint" => {
            let number: usize = arg
                .parse()
                .map_err(|_| InputError::Usage("/hint <number>"))?;
            let hints = hint_phrases(game);
            let phrase = number
                .checked_sub(1)
                .and_then(|i| hints.get(i))
                .ok_or(InputError::NoSuchHint(number))?;
            Ok(Input::Actions(vec![UiAction::InsertPhrase(phrase.clone())]))
        }
        other => Err(InputError::UnknownCommand(other.to_string())),
    }
}

/// Renders outward commands as terminal lines.
pub fn render_commands(commands: &[Command]) -> Vec<String> {
    let mut lines = Vec::new();
    for command in commands {
        match command {
            Command::Speak { utterance, text } => {
                debug!(utterance, "Speaking");
                lines.push(format!("{} {}: {}", SHOPKEEPER_EMOJI, SHOPKEEPER_NAME, text));
            }
            Command::PlayCue(SoundCue::Success) => lines.push("  ✨".to_string()),
            Command::PlayCue(cue) => debug!(?cue, "Cue"),
            Command::ShowCelebration => {
                lines.push(String::new());
                lines.push("🏆 YOU WIN! 太棒了！你买到了所有东西！".to_string());
                lines.push("Type /again to play again (再玩一次).".to_string());
            }
            Command::RequestReply(_)
            | Command::ScheduleCelebration { .. }
            | Command::CancelPending => {}
        }
    }
    lines
}

pub fn render_missions(missions: &MissionTracker) -> String {
    missions
        .board()
        .iter()
        .map(|row| {
            let mark = if row.completed { "⭐" } else { "⚪" };
            format!("{} {}", mark, row.phrase.phrase())
        })
        .collect::<Vec<_>>()
        .join("   ")
}

pub fn render_shelf(items: &[ShopItem]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "  {} {:<16} {:<8} {:<12} [{}]",
            item.emoji,
            item.name,
            item.price_display(),
            item.item_type.as_str(),
            item.id
        );
    }
    out
}

pub fn render_help(game: &GameController) -> String {
    let mut out = String::from(
        "Type what you want to say and press Enter.\n\
         /hint <n>      add a hint phrase to your sentence\n\
         /select <id>   pick an item from the shelf\n\
         /shelf         show the shelf\n\
         /missions      show your missions\n\
         /again         start a new game\n\
         /quit          leave the shop\n\nHints:\n",
    );
    for (i, hint) in hint_phrases(game).iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, hint);
    }
    out
}
