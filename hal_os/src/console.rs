//! Crossterm-backed console device
//!
//! Wraps the process console behind [`ConsoleSource`] and [`ConsoleSink`].
//! Raw mode is enabled for the lifetime of the device and restored on
//! drop. Key events are converted to [`ConsoleKeyEvent`]; everything else
//! the terminal delivers (resize, mouse, focus, paste) is surfaced as a
//! transparent non-key read.

use std::io::{self, Write};

use console_types::{ConsoleKeyEvent, KeyState, Modifiers, VirtualKey};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use host_hal::{ConsoleRead, ConsoleSink, ConsoleSource};

/// The process console in raw mode
pub struct OsConsole {
    /// Set once a read fails; the stream is dead from then on
    closed: bool,
}

impl OsConsole {
    /// Puts the console into raw mode and returns the device.
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self { closed: false })
    }
}

impl Drop for OsConsole {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl ConsoleSource for OsConsole {
    fn read_event(&mut self) -> ConsoleRead {
        if self.closed {
            return ConsoleRead::Closed;
        }
        match crossterm::event::read() {
            Ok(Event::Key(key)) => ConsoleRead::Key(convert_key_event(key)),
            Ok(_) => ConsoleRead::Other,
            Err(_) => {
                self.closed = true;
                ConsoleRead::Closed
            }
        }
    }
}

/// Raw writer for the process console
///
/// Separate from [`OsConsole`] because the input side is consumed by the
/// bridge while the output side stays with the runtime's output adapter.
#[derive(Debug, Default)]
pub struct OsConsoleSink;

impl ConsoleSink for OsConsoleSink {
    fn write_bytes(&mut self, buf: &[u8]) -> usize {
        let mut stdout = io::stdout();
        match stdout.write(buf) {
            Ok(written) => {
                let _ = stdout.flush();
                written
            }
            Err(_) => 0,
        }
    }
}

/// Converts a crossterm key event to the port's raw event type.
pub fn convert_key_event(event: KeyEvent) -> ConsoleKeyEvent {
    let state = match event.kind {
        KeyEventKind::Press => KeyState::Pressed,
        KeyEventKind::Release => KeyState::Released,
        KeyEventKind::Repeat => KeyState::Repeat,
    };

    let mut modifiers = Modifiers::none();
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        modifiers = modifiers.with(Modifiers::CTRL);
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        modifiers = modifiers.with(Modifiers::ALT);
    }
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        modifiers = modifiers.with(Modifiers::SHIFT);
    }

    let (key, ch) = match event.code {
        KeyCode::Up => (VirtualKey::Up, None),
        KeyCode::Down => (VirtualKey::Down, None),
        KeyCode::Left => (VirtualKey::Left, None),
        KeyCode::Right => (VirtualKey::Right, None),
        KeyCode::Home => (VirtualKey::Home, None),
        KeyCode::End => (VirtualKey::End, None),
        KeyCode::PageUp => (VirtualKey::PageUp, None),
        KeyCode::PageDown => (VirtualKey::PageDown, None),
        KeyCode::Insert => (VirtualKey::Insert, None),
        KeyCode::Delete => (VirtualKey::Delete, None),
        // The editor protocol's literal bytes for these keys.
        KeyCode::Backspace => (VirtualKey::Backspace, Some('\u{8}')),
        KeyCode::Enter => (VirtualKey::Enter, Some('\r')),
        KeyCode::Tab => (VirtualKey::Tab, Some('\t')),
        KeyCode::Esc => (VirtualKey::Escape, Some('\u{1B}')),
        KeyCode::Char(c) => (VirtualKey::Other, char_payload(c, modifiers)),
        _ => (VirtualKey::Other, None),
    };

    ConsoleKeyEvent {
        key,
        modifiers,
        state,
        ch,
    }
}

/// Resolves the literal payload of a character key.
///
/// With control held, letters carry their control byte (Ctrl+C is 0x03),
/// matching what a cooked console would deliver; other control chords
/// carry nothing and fall through to the discard path.
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_arrow_keys() {
        let event = convert_key_event(press(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(event.key, VirtualKey::Up);
        assert_eq!(event.ch, None);
        assert_eq!(event.state, KeyState::Pressed);
    }

    #[test]
    fn test_convert_plain_character() {
        let event = convert_key_event(press(KeyCode::Char('a'), KeyModifiers::NONE));
        assert_eq!(event.key, VirtualKey::Other);
        assert_eq!(event.ch, Some('a'));
        assert!(event.modifiers.is_empty());
    }

    #[test]
    fn test_convert_ctrl_letter_carries_control_byte() {
        let event = convert_key_event(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(event.modifiers.is_ctrl());
        assert_eq!(event.ch, Some('\u{3}'));
    }

    #[test]
    fn test_convert_ctrl_nonletter_carries_nothing() {
        let event = convert_key_event(press(KeyCode::Char('1'), KeyModifiers::CONTROL));
        assert!(event.modifiers.is_ctrl());
        assert_eq!(event.ch, None);
    }

    #[test]
    fn test_convert_editing_keys_carry_literal_bytes() {
        let enter = convert_key_event(press(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!((enter.key, enter.ch), (VirtualKey::Enter, Some('\r')));

        let backspace = convert_key_event(press(KeyCode::Backspace, KeyModifiers::NONE));
        assert_eq!(
            (backspace.key, backspace.ch),
            (VirtualKey::Backspace, Some('\u{8}'))
        );

        let tab = convert_key_event(press(KeyCode::Tab, KeyModifiers::NONE));
        assert_eq!((tab.key, tab.ch), (VirtualKey::Tab, Some('\t')));

        let esc = convert_key_event(press(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!((esc.key, esc.ch), (VirtualKey::Escape, Some('\u{1B}')));
    }

    #[test]
    fn test_convert_ctrl_modified_navigation() {
        let event = convert_key_event(press(KeyCode::Right, KeyModifiers::CONTROL));
        assert_eq!(event.key, VirtualKey::Right);
        assert!(event.modifiers.is_ctrl());
        assert_eq!(event.ch, None);
    }

    #[test]
    fn test_convert_release_events() {
        let event = convert_key_event(release(KeyCode::Char('x')));
        assert_eq!(event.state, KeyState::Released);
        assert!(event.is_up());
    }

    #[test]
    fn test_convert_function_keys_are_inert() {
        let event = convert_key_event(press(KeyCode::F(5), KeyModifiers::NONE));
        assert_eq!(event.key, VirtualKey::Other);
        assert_eq!(event.ch, None);
    }
}
