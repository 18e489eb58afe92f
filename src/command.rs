use thiserror::Error;

use crate::model::{Color, ControlAction};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    MissingArgument { command: &'static str, expected: &'static str },
    #[error("'{0}' is not a vertex number")]
    BadVertex(String),
    #[error("'{0}' is not a color label (A, B, C, ...)")]
    BadColor(String),
    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
}

/// Parses one line of text input into an intent.
///
/// `color <vertex> [<color>]` leaves the color empty when omitted so the
/// front-end can fall back to its selected color.
pub fn parse_command(line: &str) -> Result<ControlAction, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let action = match head.to_ascii_lowercase().as_str() {
        "start" | "new" => ControlAction::StartGame,
        "select" | "s" => {
            let word = words.next().ok_or(CommandError::MissingArgument {
                command: "select",
                expected: "a color label",
            })?;
            ControlAction::SelectColor(parse_color(word)?)
        }
        "color" | "c" => {
            let word = words.next().ok_or(CommandError::MissingArgument {
                command: "color",
                expected: "a vertex number",
            })?;
            let vertex = word
                .parse::<usize>()
                .map_err(|_| CommandError::BadVertex(word.to_string()))?;
            let color = words.next().map(parse_color).transpose()?;
            ControlAction::ColorVertex(vertex, color)
        }
        "undo" | "u" => ControlAction::Undo,
        "next" | "n" => ControlAction::NextLevel,
        "hint" => ControlAction::Hint,
        "solve" => ControlAction::Solve,
        "show" | "board" => ControlAction::Show,
        "help" | "?" => ControlAction::Help,
        "quit" | "exit" | "q" => ControlAction::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    if let Some(extra) = words.next() {
        return Err(CommandError::Trailing(extra.to_string()));
    }
    Ok(action)
}

fn parse_color(word: &str) -> Result<Color, CommandError> {
    Color::new_from_repr(word).ok_or_else(|| CommandError::BadColor(word.to_string()))
}
