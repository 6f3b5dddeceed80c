//! # Host Abstraction Layer
//!
//! This crate defines the traits through which the runtime port reaches the
//! host OS, plus the escape translation layer built on top of them.
//!
//! ## Philosophy
//!
//! - **The OS is a collaborator, not a dependency**: every primitive
//!   (console read, console write, clock, sleep) is a trait the host
//!   implements and tests fake
//! - **Translation above devices**: raw key events come from a device
//!   trait; turning them into the line editor's byte protocol is a
//!   separate, pure layer
//! - **Testable**: every trait has fake implementations in tests

pub mod clock;
pub mod console;
pub mod delay;
pub mod escape_translation;
pub mod gate;
pub mod sleep;

pub use clock::ClockDevice;
pub use console::{ConsoleRead, ConsoleSink, ConsoleSource};
pub use delay::delay_ms;
pub use escape_translation::{lookup_sequence, EscapeTranslator, CTRL_SEQUENCES, PLAIN_SEQUENCES};
pub use gate::{NoOpGate, SchedulerGate};
pub use sleep::SleepDevice;
