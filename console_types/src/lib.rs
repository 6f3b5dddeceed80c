#![no_std]

//! # Console Types
//!
//! This crate defines the console input event types for the host port.
//!
//! ## Philosophy
//!
//! - **Events, not bytes**: the OS console produces structured key events;
//!   translation to the line editor's byte protocol happens above this layer
//! - **Transient**: an event is produced and consumed within a single
//!   translation step, never stored
//! - **Testable**: events are serializable and can be injected from scripts
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A terminal emulator or escape-sequence parser (decoding goes the other
//!   direction here: events in, escape bytes out)
//! - A keymap or layout engine
//! - The line editor's own key handling

extern crate alloc;

use core::fmt;
use serde::{Deserialize, Serialize};

/// Escape byte introducing a terminal escape sequence.
pub const ESC: u8 = 0x1B;

/// Interrupt byte surfaced when the console stream closes.
///
/// The line editor treats this as its interrupt character and unwinds.
pub const INTERRUPT: u8 = 0x03;

/// Virtual key identifier
///
/// Logical key positions, not scan codes and not characters. Keys whose
/// meaning is carried entirely by a literal character payload (letters,
/// digits, punctuation) map to [`VirtualKey::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VirtualKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    Backspace,
    Enter,
    Tab,
    Escape,
    /// Any key not listed above; the event's character payload, if present,
    /// carries its meaning.
    Other,
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Modifier keys
///
/// Bitflags representing modifier key states. Only control affects
/// translation; alt and shift are carried for completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    /// No modifiers
    pub const NONE: Self = Self { bits: 0 };
    /// Control key
    pub const CTRL: Self = Self { bits: 1 << 0 };
    /// Alt key
    pub const ALT: Self = Self { bits: 1 << 1 };
    /// Shift key
    pub const SHIFT: Self = Self { bits: 1 << 2 };

    /// Creates a new modifier set with no modifiers
    pub fn none() -> Self {
        Self::NONE
    }

    /// Returns the raw bits
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Adds a modifier
    pub fn with(mut self, other: Modifiers) -> Self {
        self.bits |= other.bits;
        self
    }

    /// Checks if a modifier is present
    pub fn contains(&self, other: Modifiers) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if Ctrl is held
    pub fn is_ctrl(&self) -> bool {
        self.contains(Self::CTRL)
    }

    /// Checks if Alt is held
    pub fn is_alt(&self) -> bool {
        self.contains(Self::ALT)
    }

    /// Checks if Shift is held
    pub fn is_shift(&self) -> bool {
        self.contains(Self::SHIFT)
    }

    /// Returns true if no modifiers are held
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }

        let mut parts = alloc::vec::Vec::new();
        if self.is_ctrl() {
            parts.push("Ctrl");
        }
        if self.is_alt() {
            parts.push("Alt");
        }
        if self.is_shift() {
            parts.push("Shift");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Key state
///
/// Whether a key went down, came up, or is auto-repeating. Auto-repeat is
/// delivered by the OS as additional down events and is translated like a
/// press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyState {
    /// Key was pressed down
    Pressed,
    /// Key was released
    Released,
    /// Key is auto-repeating
    Repeat,
}

impl fmt::Display for KeyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressed => write!(f, "pressed"),
            Self::Released => write!(f, "released"),
            Self::Repeat => write!(f, "repeat"),
        }
    }
}

/// Raw console key event
///
/// One unit from the OS console: a virtual key, the modifiers held, the key
/// state, and an optional literal character payload. Produced by a console
/// source, consumed by the escape translator, never retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleKeyEvent {
    /// The logical key position
    pub key: VirtualKey,
    /// Modifier keys held when the event fired
    pub modifiers: Modifiers,
    /// Down, up, or repeat
    pub state: KeyState,
    /// Literal character carried by the key, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ch: Option<char>,
}

impl ConsoleKeyEvent {
    /// Creates a new key event
    pub fn new(key: VirtualKey, modifiers: Modifiers, state: KeyState) -> Self {
        Self {
            key,
            modifiers,
            state,
            ch: None,
        }
    }

    /// Creates a key-down event
    pub fn pressed(key: VirtualKey, modifiers: Modifiers) -> Self {
        Self::new(key, modifiers, KeyState::Pressed)
    }

    /// Creates a key-up event
    pub fn released(key: VirtualKey, modifiers: Modifiers) -> Self {
        Self::new(key, modifiers, KeyState::Released)
    }

    /// Creates a key-down event carrying a literal character
    pub fn character(ch: char) -> Self {
        Self::pressed(VirtualKey::Other, Modifiers::none()).with_char(ch)
    }

    /// Attaches a literal character payload
    pub fn with_char(mut self, ch: char) -> Self {
        self.ch = Some(ch);
        self
    }

    /// Returns true if this is a down or auto-repeat event
    pub fn is_down(&self) -> bool {
        matches!(self.state, KeyState::Pressed | KeyState::Repeat)
    }

    /// Returns true if this is an up event
    pub fn is_up(&self) -> bool {
        self.state == KeyState::Released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn test_event_pressed() {
        let event = ConsoleKeyEvent::pressed(VirtualKey::Left, Modifiers::CTRL);

        assert!(event.is_down());
        assert!(!event.is_up());
        assert_eq!(event.key, VirtualKey::Left);
        assert!(event.modifiers.is_ctrl());
        assert_eq!(event.ch, None);
    }

    #[test]
    fn test_event_released() {
        let event = ConsoleKeyEvent::released(VirtualKey::Up, Modifiers::none());

        assert!(event.is_up());
        assert!(!event.is_down());
    }

    #[test]
    fn test_event_repeat_counts_as_down() {
        let event = ConsoleKeyEvent::new(VirtualKey::Down, Modifiers::none(), KeyState::Repeat);
        assert!(event.is_down());
    }

    #[test]
    fn test_event_character_payload() {
        let event = ConsoleKeyEvent::character('a');

        assert_eq!(event.key, VirtualKey::Other);
        assert_eq!(event.ch, Some('a'));
        assert!(event.is_down());
    }

    #[test]
    fn test_modifiers_combine() {
        let mods = Modifiers::none().with(Modifiers::CTRL).with(Modifiers::SHIFT);

        assert!(mods.is_ctrl());
        assert!(mods.is_shift());
        assert!(!mods.is_alt());
        assert!(!mods.is_empty());
    }

    #[test]
    fn test_modifiers_display() {
        assert_eq!(Modifiers::none().to_string(), "none");
        assert_eq!(
            Modifiers::CTRL.with(Modifiers::ALT).to_string(),
            "Ctrl+Alt"
        );
    }

    #[test]
    fn test_control_bytes() {
        assert_eq!(ESC, 0x1B);
        assert_eq!(INTERRUPT, 0x03);
    }

    #[test]
    fn test_events_inject_from_json() {
        // Scripted runs feed event streams in over serde; a stream parsed
        // from JSON must reconstruct the exact events.
        let json = r#"[
            {"key": "Left", "modifiers": {"bits": 0}, "state": "Pressed"},
            {"key": "Right", "modifiers": {"bits": 1}, "state": "Pressed"},
            {"key": "Other", "modifiers": {"bits": 0}, "state": "Pressed", "ch": "a"}
        ]"#;

        let events: Vec<ConsoleKeyEvent> = serde_json::from_str(json).unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].key, VirtualKey::Left);
        assert!(events[1].modifiers.is_ctrl());
        assert_eq!(events[2].ch, Some('a'));
    }
}
