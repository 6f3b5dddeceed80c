//! Console device abstraction
//!
//! ## Design
//!
//! The console is two independent seams:
//! - [`ConsoleSource`]: a blocking producer of raw key events
//! - [`ConsoleSink`]: a raw byte writer with a cooked-newline helper
//!
//! The source is deliberately dumb: it reports every event the OS delivers,
//! including key-ups and non-key events. Filtering and translation happen
//! above this layer, where they can be tested without a real console.

use console_types::ConsoleKeyEvent;

/// One result of reading the console
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleRead {
    /// A key event (down, up, or repeat)
    Key(ConsoleKeyEvent),
    /// A non-key event (resize, mouse, focus); transparent to translation
    Other,
    /// The stream closed or failed unrecoverably; no further reads will
    /// return events
    Closed,
}

/// Blocking console event source
///
/// ## Implementation Notes
///
/// - **Blocking**: `read_event` parks the calling thread until the OS
///   delivers an event or the stream closes
/// - **Raw**: no filtering; key-ups and non-key events are reported as-is
/// - **Terminal closure**: once `Closed` is returned the source is dead and
///   every later call must return `Closed` again
pub trait ConsoleSource {
    /// Reads the next console event, blocking until one is available.
    fn read_event(&mut self) -> ConsoleRead;
}

/// Raw console byte writer
pub trait ConsoleSink {
    /// Writes a byte buffer to the console as-is.
    ///
    /// Returns the number of bytes accepted.
    fn write_bytes(&mut self, buf: &[u8]) -> usize;

    /// Writes a buffer converting logical newlines to the console's
    /// line-ending convention (`\n` becomes `\r\n`).
    ///
    /// Returns the number of logical bytes consumed from `buf`.
    fn write_cooked(&mut self, buf: &[u8]) -> usize {
        let mut consumed = 0;
        for chunk in buf.split_inclusive(|&b| b == b'\n') {
            if chunk.ends_with(b"\n") {
                let body = &chunk[..chunk.len() - 1];
                if !body.is_empty() {
                    self.write_bytes(body);
                }
                self.write_bytes(b"\r\n");
            } else {
                self.write_bytes(chunk);
            }
            consumed += chunk.len();
        }
        consumed
    }
}
