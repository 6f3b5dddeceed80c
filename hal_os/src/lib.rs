//! # OS Host Backends
//!
//! Implementations of the `host_hal` traits backed by the real host OS.
//!
//! ## Design
//!
//! - **Thin**: each device wraps one OS primitive; filtering and
//!   translation stay above the HAL boundary where they are testable
//! - **Raw console**: the console runs in raw mode so key events arrive
//!   unbuffered and unechoed; cooked newline conversion happens on the
//!   output side
//! - **Live clock readings**: every time unit comes from its own query of
//!   the monotonic clock

pub mod clock;
pub mod console;
pub mod sleep;

pub use clock::OsClock;
pub use console::{OsConsole, OsConsoleSink};
pub use sleep::OsSleep;
