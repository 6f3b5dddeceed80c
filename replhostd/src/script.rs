//! # Scripted Console Source
//!
//! Deterministic console input for tests and demos.
//!
//! ## Text Format
//!
//! Line-based, one input per line:
//! - Key names: `Enter`, `Escape`, `Backspace`, `Tab`, `Space`, `Delete`,
//!   `Home`, `End`, `Insert`, `PageUp`, `PageDown`
//! - Arrow keys: `Up`, `Down`, `Left`, `Right`
//! - Modifiers: `Ctrl+c`, `Ctrl+Left`, `Alt+x`, `Shift+a`
//! - Text strings: `"hello"` (expanded to individual character events)
//! - Key releases: `release Up` (for transparency checks)
//! - Non-key noise: `resize`
//! - Explicit closure: `close`
//! - Comments: `# like this`
//!
//! An exhausted script reports console closure, exactly like a real stream
//! ending.
//!
//! ## JSON Format
//!
//! A JSON array of raw key events, deserialized as
//! [`console_types::ConsoleKeyEvent`]. Full-fidelity: any event the OS
//! backend could produce can be injected.

use console_types::{ConsoleKeyEvent, Modifiers, VirtualKey};
use host_hal::{ConsoleRead, ConsoleSource};
use std::collections::VecDeque;
use thiserror::Error;

/// Script errors
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A key name no table in this module knows
    #[error("invalid key name: {0}")]
    InvalidKeyName(String),

    /// A malformed line
    #[error("parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// A script with no inputs at all
    #[error("empty script")]
    EmptyScript,

    /// Malformed JSON event stream
    #[error("invalid event stream: {0}")]
    Json(#[from] serde_json::Error),
}

/// Console source that replays a script
#[derive(Debug, Clone)]
pub struct ScriptedConsole {
    reads: VecDeque<ConsoleRead>,
}

impl ScriptedConsole {
    /// Builds a source over raw reads.
    pub fn from_reads(reads: Vec<ConsoleRead>) -> Self {
        Self {
            reads: reads.into(),
        }
    }

    /// Builds a source over key-down events.
    pub fn from_events(events: Vec<ConsoleKeyEvent>) -> Self {
        Self::from_reads(events.into_iter().map(ConsoleRead::Key).collect())
    }

    /// Parses the text script format.
    pub fn from_text(text: &str) -> Result<Self, ScriptError> {
        let mut reads = Vec::new();

        for (line_num, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            parse_line(line, line_num + 1, &mut reads)?;
        }

        if reads.is_empty() {
            return Err(ScriptError::EmptyScript);
        }

        Ok(Self::from_reads(reads))
    }

    /// Parses a JSON array of raw key events.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let events: Vec<ConsoleKeyEvent> = serde_json::from_str(json)?;
        if events.is_empty() {
            return Err(ScriptError::EmptyScript);
        }
        Ok(Self::from_events(events))
    }

    /// Inputs left to replay.
    pub fn remaining(&self) -> usize {
        self.reads.len()
    }
}

impl ConsoleSource for ScriptedConsole {
    fn read_event(&mut self) -> ConsoleRead {
        match self.reads.pop_front() {
            Some(ConsoleRead::Closed) => {
                // Closure is terminal; drop whatever the script had after it.
                self.reads.clear();
                ConsoleRead::Closed
            }
            Some(read) => read,
            None => ConsoleRead::Closed,
        }
    }
}

fn parse_line(line: &str, line_num: usize, reads: &mut Vec<ConsoleRead>) -> Result<(), ScriptError> {
    if line == "close" {
        reads.push(ConsoleRead::Closed);
        return Ok(());
    }

    if line == "resize" {
        reads.push(ConsoleRead::Other);
        return Ok(());
    }

    if let Some(rest) = line.strip_prefix("release ") {
        let event = parse_key(rest.trim()).map_err(|e| ScriptError::ParseError {
            line: line_num,
            message: e.to_string(),
        })?;
        reads.push(ConsoleRead::Key(ConsoleKeyEvent {
            state: console_types::KeyState::Released,
            ..event
        }));
        return Ok(());
    }

    if line.starts_with('"') {
        if line.len() < 2 || !line.ends_with('"') {
            return Err(ScriptError::ParseError {
                line: line_num,
                message: "unterminated string".to_string(),
            });
        }
        let text = &line[1..line.len() - 1];
        for c in text.chars() {
            reads.push(ConsoleRead::Key(ConsoleKeyEvent::character(c)));
        }
        return Ok(());
    }

    let event = parse_key(line).map_err(|e| ScriptError::ParseError {
        line: line_num,
        message: e.to_string(),
    })?;
    reads.push(ConsoleRead::Key(event));
    Ok(())
}

/// Parses a key, possibly with `Mod+` prefixes.
fn parse_key(input: &str) -> Result<ConsoleKeyEvent, ScriptError> {
    let mut modifiers = Modifiers::none();
    let mut name = input;

    while let Some((prefix, rest)) = name.split_once('+') {
        modifiers = match prefix {
            "Ctrl" => modifiers.with(Modifiers::CTRL),
            "Alt" => modifiers.with(Modifiers::ALT),
            "Shift" => modifiers.with(Modifiers::SHIFT),
            other => return Err(ScriptError::InvalidKeyName(other.to_string())),
        };
        name = rest;
    }

    let (key, ch) = match name {
        "Up" => (VirtualKey::Up, None),
        "Down" => (VirtualKey::Down, None),
        "Left" => (VirtualKey::Left, None),
        "Right" => (VirtualKey::Right, None),
        "Home" => (VirtualKey::Home, None),
        "End" => (VirtualKey::End, None),
        "PageUp" => (VirtualKey::PageUp, None),
        "PageDown" => (VirtualKey::PageDown, None),
        "Insert" => (VirtualKey::Insert, None),
        "Delete" => (VirtualKey::Delete, None),
        "Backspace" => (VirtualKey::Backspace, Some('\u{8}')),
        "Enter" => (VirtualKey::Enter, Some('\r')),
        "Tab" => (VirtualKey::Tab, Some('\t')),
        "Escape" => (VirtualKey::Escape, Some('\u{1B}')),
        "Space" => (VirtualKey::Other, Some(' ')),
        single if single.chars().count() == 1 => {
            let c = single.chars().next().unwrap();
            (VirtualKey::Other, char_payload(c, modifiers))
        }
        other => return Err(ScriptError::InvalidKeyName(other.to_string())),
    };

    let mut event = ConsoleKeyEvent::pressed(key, modifiers);
    event.ch = ch;
    Ok(event)
}

/// Literal payload for a character key, mirroring what a cooked console
/// delivers: control chords over letters carry the control byte.
fn char_payload(c: char, modifiers: Modifiers) -> Option<char> {
    if modifiers.is_ctrl() {
        if c.is_ascii_alphabetic() {
            let byte = (c.to_ascii_uppercase() as u8) & 0x1F;
            Some(byte as char)
        } else {
            None
        }
    } else {
        Some(c)
    }
}
