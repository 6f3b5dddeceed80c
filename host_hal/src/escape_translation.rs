//! Key event to escape-sequence translation
//!
//! This module translates raw console key events into the byte-oriented
//! escape-sequence protocol the runtime's line editor consumes.
//!
//! ## Philosophy
//!
//! - **Deterministic mapping**: the same (key, control) pair always produces
//!   the same byte sequence
//! - **One sequence in flight**: while a sequence is draining, no new event
//!   is consulted
//! - **Silent fallthrough**: events with no mapping and no character payload
//!   produce nothing
//!
//! ## Tables
//!
//! Two fixed tables associate a (virtual key, control-held) pair with a
//! static byte string. When control is held only the control table is
//! consulted, never the plain table, even on a miss. A match emits
//! [`console_types::ESC`] first; the table bytes drain one per call
//! afterwards.

use console_types::{ConsoleKeyEvent, VirtualKey, ESC};

/// Sequences for keys pressed without control.
pub const PLAIN_SEQUENCES: &[(VirtualKey, &[u8])] = &[
    (VirtualKey::Up, b"[A"),
    (VirtualKey::Down, b"[B"),
    (VirtualKey::Right, b"[C"),
    (VirtualKey::Left, b"[D"),
    (VirtualKey::Home, b"[H"),
    (VirtualKey::End, b"[F"),
    (VirtualKey::Delete, b"[3~"),
];

/// Sequences for keys pressed with control held.
pub const CTRL_SEQUENCES: &[(VirtualKey, &[u8])] = &[
    (VirtualKey::Left, b"b"),
    (VirtualKey::Right, b"f"),
    (VirtualKey::Delete, b"d"),
    (VirtualKey::Backspace, b"\x7F"),
];

/// Looks up the escape sequence for a (virtual key, control-held) pair.
///
/// Control held selects the control table exclusively; a miss there never
/// falls back to the plain table.
pub fn lookup_sequence(key: VirtualKey, ctrl: bool) -> Option<&'static [u8]> {
    let table = if ctrl { CTRL_SEQUENCES } else { PLAIN_SEQUENCES };
    table.iter().find(|(k, _)| *k == key).map(|(_, seq)| *seq)
}

/// Cursor into the sequence currently being drained.
#[derive(Debug, Clone, Copy)]
struct InFlight {
    seq: &'static [u8],
    pos: usize,
}

/// Escape-sequence translator
///
/// The only stateful piece of the input path: an optional cursor into the
/// escape sequence currently draining. Created once at process start and
/// passed by exclusive reference for the process lifetime.
#[derive(Debug, Default)]
pub struct EscapeTranslator {
    in_flight: Option<InFlight>,
}

impl EscapeTranslator {
    /// Creates a translator with no sequence in flight.
    pub fn new() -> Self {
        Self { in_flight: None }
    }

    /// Returns true while a sequence is draining.
    pub fn has_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Pops the next byte of the in-flight sequence, if any.
    ///
    /// Clears the in-flight state when the last byte is taken, so the call
    /// after that one returns `None` and the caller resumes polling.
    pub fn pending_byte(&mut self) -> Option<u8> {
        let cursor = self.in_flight.as_mut()?;
        let byte = cursor.seq[cursor.pos];
        cursor.pos += 1;
        if cursor.pos == cursor.seq.len() {
            self.in_flight = None;
        }
        Some(byte)
    }

    /// Translates one key event into at most one output byte.
    ///
    /// - Table match: the sequence is stored in flight and `ESC` is
    ///   returned; the table bytes follow via [`Self::pending_byte`]. A
    ///   simultaneous character payload is ignored; the table wins.
    /// - No match, ASCII payload: that byte is returned directly.
    /// - No match, no payload: `None`; the event is not a logical input
    ///   unit.
    ///
    /// Callers must drain any in-flight sequence before consulting a new
    /// event.
    pub fn translate(&mut self, event: &ConsoleKeyEvent) -> Option<u8> {
        debug_assert!(
            self.in_flight.is_none(),
            "event consulted while a sequence is in flight"
        );

        if let Some(seq) = lookup_sequence(event.key, event.modifiers.is_ctrl()) {
            self.in_flight = Some(InFlight { seq, pos: 0 });
            return Some(ESC);
        }

        match event.ch {
            Some(c) if c.is_ascii() && c != '\0' => Some(c as u8),
            _ => None,
        }
    }
}
