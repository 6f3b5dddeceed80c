//! # Console Input Bridge
//!
//! This crate bridges a blocking console event source to the byte-oriented
//! input stream the runtime's line editor consumes.
//!
//! ## Philosophy
//!
//! - **One unit at a time**: the line editor pulls single bytes; the bridge
//!   owns the loop that turns events into them
//! - **Transparent noise**: key-ups and non-key events are consumed without
//!   producing output
//! - **The scheduler keeps breathing**: the exclusivity token is released
//!   around the blocking OS read, the port's only suspension point
//!
//! ## Design
//!
//! The bridge owns three things: a [`ConsoleSource`] (the OS seam), an
//! [`EscapeTranslator`] (the only translation state), and a
//! [`SchedulerGate`]. Each `next_input_unit` call drains any in-flight
//! escape sequence first; only when the translator is empty does it poll
//! for a new event. A closed console is surfaced as exactly one interrupt
//! byte and the source is never polled again.

use console_types::INTERRUPT;
use host_hal::{ConsoleRead, ConsoleSource, EscapeTranslator, SchedulerGate};

/// Console input bridge
///
/// Exposes the blocking `next_input_unit` contract. Strictly sequential:
/// the runtime calls it one unit at a time from a single logical thread.
pub struct ConsoleInputBridge {
    /// Blocking console event source
    source: Box<dyn ConsoleSource>,
    /// The one piece of translation state
    translator: EscapeTranslator,
    /// Exclusivity token released around the blocking read
    gate: Box<dyn SchedulerGate>,
    /// Set when the source reports closure; the source is dead afterwards
    closed: bool,
    /// Units delivered (for diagnostics)
    units_delivered: u64,
}

impl ConsoleInputBridge {
    /// Creates a bridge over a console source and scheduler gate.
    pub fn new(source: Box<dyn ConsoleSource>, gate: Box<dyn SchedulerGate>) -> Self {
        Self {
            source,
            translator: EscapeTranslator::new(),
            gate,
            closed: false,
            units_delivered: 0,
        }
    }

    /// Returns the next logical input unit, blocking until one is available.
    ///
    /// Never reports end-of-input; when the console stream closes (or fails
    /// unrecoverably) the interrupt byte is returned and the OS read is not
    /// polled again on this path. The caller treats the interrupt byte as a
    /// signal to unwind.
    pub fn next_input_unit(&mut self) -> u8 {
        if let Some(byte) = self.translator.pending_byte() {
            self.units_delivered += 1;
            return byte;
        }

        if self.closed {
            // Closure was already surfaced; keep answering with the
            // interrupt byte without touching the dead source.
            return INTERRUPT;
        }

        loop {
            self.gate.release();
            let read = self.source.read_event();
            self.gate.reacquire();

            let event = match read {
                ConsoleRead::Key(event) => event,
                ConsoleRead::Other => continue,
                ConsoleRead::Closed => {
                    self.closed = true;
                    return INTERRUPT;
                }
            };

            // Only key-down (and auto-repeat) events carry input.
            if !event.is_down() {
                continue;
            }

            if let Some(byte) = self.translator.translate(&event) {
                self.units_delivered += 1;
                return byte;
            }
        }
    }

    /// Returns true once the console stream has reported closure.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the number of input units delivered so far.
    pub fn units_delivered(&self) -> u64 {
        self.units_delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_types::{ConsoleKeyEvent, Modifiers, VirtualKey, ESC};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Fake console that replays a scripted sequence of reads
    struct FakeConsole {
        reads: Vec<ConsoleRead>,
        index: usize,
        polls: Rc<Cell<u64>>,
    }

    impl FakeConsole {
        fn new(reads: Vec<ConsoleRead>) -> Self {
            Self {
                reads,
                index: 0,
                polls: Rc::new(Cell::new(0)),
            }
        }

        fn poll_counter(&self) -> Rc<Cell<u64>> {
            Rc::clone(&self.polls)
        }
    }

    impl ConsoleSource for FakeConsole {
        fn read_event(&mut self) -> ConsoleRead {
            self.polls.set(self.polls.get() + 1);
            if self.index < self.reads.len() {
                let read = self.reads[self.index];
                self.index += 1;
                read
            } else {
                ConsoleRead::Closed
            }
        }
    }

    /// Gate that checks release/reacquire pairing
    struct PairedGate {
        releases: Rc<Cell<u64>>,
        reacquires: Rc<Cell<u64>>,
    }

    impl SchedulerGate for PairedGate {
        fn release(&mut self) {
            self.releases.set(self.releases.get() + 1);
        }

        fn reacquire(&mut self) {
            assert_eq!(
                self.releases.get(),
                self.reacquires.get() + 1,
                "reacquire without matching release"
            );
            self.reacquires.set(self.reacquires.get() + 1);
        }
    }

    fn key(event: ConsoleKeyEvent) -> ConsoleRead {
        ConsoleRead::Key(event)
    }

    fn bridge_over(reads: Vec<ConsoleRead>) -> (ConsoleInputBridge, Rc<Cell<u64>>) {
        let console = FakeConsole::new(reads);
        let polls = console.poll_counter();
        let bridge = ConsoleInputBridge::new(Box::new(console), Box::new(host_hal::NoOpGate));
        (bridge, polls)
    }

    fn collect(bridge: &mut ConsoleInputBridge, n: usize) -> Vec<u8> {
        (0..n).map(|_| bridge.next_input_unit()).collect()
    }

    #[test]
    fn test_table_key_yields_esc_then_sequence() {
        let (mut bridge, _) = bridge_over(vec![key(ConsoleKeyEvent::pressed(
            VirtualKey::Up,
            Modifiers::none(),
        ))]);

        assert_eq!(collect(&mut bridge, 3), vec![ESC, b'[', b'A']);
        assert_eq!(bridge.units_delivered(), 3);
    }

    #[test]
    fn test_literal_character_yields_single_byte() {
        let (mut bridge, _) = bridge_over(vec![key(ConsoleKeyEvent::character('a'))]);

        assert_eq!(bridge.next_input_unit(), b'a');
        assert_eq!(bridge.units_delivered(), 1);
    }

    #[test]
    fn test_key_up_events_are_transparent() {
        let (mut bridge, _) = bridge_over(vec![
            key(ConsoleKeyEvent::released(VirtualKey::Up, Modifiers::none())),
            key(ConsoleKeyEvent::released(VirtualKey::Other, Modifiers::none()).with_char('x')),
            key(ConsoleKeyEvent::character('y')),
        ]);

        // The key-ups produce nothing; the first unit comes from 'y'.
        assert_eq!(bridge.next_input_unit(), b'y');
    }

    #[test]
    fn test_non_key_events_are_transparent() {
        let (mut bridge, _) = bridge_over(vec![
            ConsoleRead::Other,
            ConsoleRead::Other,
            key(ConsoleKeyEvent::character('z')),
        ]);

        assert_eq!(bridge.next_input_unit(), b'z');
    }

    #[test]
    fn test_no_polling_while_sequence_in_flight() {
        let (mut bridge, polls) = bridge_over(vec![
            key(ConsoleKeyEvent::pressed(VirtualKey::Left, Modifiers::none())),
            key(ConsoleKeyEvent::character('q')),
        ]);

        // First unit consumes one poll and starts the sequence.
        assert_eq!(bridge.next_input_unit(), ESC);
        assert_eq!(polls.get(), 1);

        // Draining the sequence must not poll again.
        assert_eq!(bridge.next_input_unit(), b'[');
        assert_eq!(bridge.next_input_unit(), b'D');
        assert_eq!(polls.get(), 1);

        // The injected second event is observed only after the drain.
        assert_eq!(bridge.next_input_unit(), b'q');
        assert_eq!(polls.get(), 2);
    }

    #[test]
    fn test_mixed_scenario_left_ctrl_right_a() {
        let (mut bridge, _) = bridge_over(vec![
            key(ConsoleKeyEvent::pressed(VirtualKey::Left, Modifiers::none())),
            key(ConsoleKeyEvent::pressed(VirtualKey::Right, Modifiers::CTRL)),
            key(ConsoleKeyEvent::character('a')),
        ]);

        assert_eq!(
            collect(&mut bridge, 6),
            vec![ESC, b'[', b'D', ESC, b'f', b'a']
        );
    }

    #[test]
    fn test_ctrl_miss_does_not_use_plain_table() {
        let (mut bridge, _) = bridge_over(vec![
            // Ctrl+Up: no control entry; must not emit the plain "[A".
            key(ConsoleKeyEvent::pressed(VirtualKey::Up, Modifiers::CTRL)),
            key(ConsoleKeyEvent::character('k')),
        ]);

        assert_eq!(bridge.next_input_unit(), b'k');
    }

    #[test]
    fn test_closure_yields_one_interrupt_and_stops_polling() {
        let (mut bridge, polls) = bridge_over(vec![]);

        assert_eq!(bridge.next_input_unit(), INTERRUPT);
        assert!(bridge.is_closed());
        assert_eq!(polls.get(), 1);

        // Later calls answer without touching the dead source.
        assert_eq!(bridge.next_input_unit(), INTERRUPT);
        assert_eq!(bridge.next_input_unit(), INTERRUPT);
        assert_eq!(polls.get(), 1);
    }

    #[test]
    fn test_in_flight_sequence_drains_before_closure_is_seen() {
        let (mut bridge, polls) = bridge_over(vec![key(ConsoleKeyEvent::pressed(
            VirtualKey::Home,
            Modifiers::none(),
        ))]);

        assert_eq!(collect(&mut bridge, 3), vec![ESC, b'[', b'H']);
        assert_eq!(polls.get(), 1);

        assert_eq!(bridge.next_input_unit(), INTERRUPT);
        assert_eq!(polls.get(), 2);
    }

    #[test]
    fn test_gate_released_around_every_read() {
        let releases = Rc::new(Cell::new(0));
        let reacquires = Rc::new(Cell::new(0));
        let gate = PairedGate {
            releases: Rc::clone(&releases),
            reacquires: Rc::clone(&reacquires),
        };

        let console = FakeConsole::new(vec![
            ConsoleRead::Other,
            key(ConsoleKeyEvent::character('a')),
        ]);
        let mut bridge = ConsoleInputBridge::new(Box::new(console), Box::new(gate));

        assert_eq!(bridge.next_input_unit(), b'a');

        // Two reads (one transparent, one delivering), two balanced pairs.
        assert_eq!(releases.get(), 2);
        assert_eq!(reacquires.get(), 2);
    }

    #[test]
    fn test_gate_not_touched_while_draining() {
        let releases = Rc::new(Cell::new(0));
        let reacquires = Rc::new(Cell::new(0));
        let gate = PairedGate {
            releases: Rc::clone(&releases),
            reacquires: Rc::clone(&reacquires),
        };

        let console = FakeConsole::new(vec![key(ConsoleKeyEvent::pressed(
            VirtualKey::Delete,
            Modifiers::none(),
        ))]);
        let mut bridge = ConsoleInputBridge::new(Box::new(console), Box::new(gate));

        assert_eq!(collect(&mut bridge, 4), vec![ESC, b'[', b'3', b'~']);
        assert_eq!(releases.get(), 1);
    }
}
