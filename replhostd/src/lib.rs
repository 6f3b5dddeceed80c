//! # Runtime Host Daemon
//!
//! This crate hosts the embedded scripting runtime on a general-purpose OS.
//!
//! ## Philosophy
//!
//! - **One boot per process**: startup, the read-eval loop, and teardown
//!   run exactly once; there is no restart path
//! - **Deterministic mode is first-class**: a scripted console drives the
//!   same code paths as the real one
//! - **Faults terminate, never recover**: an unrecoverable runtime fault
//!   halts forward progress in place
//!
//! ## Responsibilities
//!
//! The daemon:
//! - Records the stack boundary for conservative root scanning
//! - Registers the heap region and boots the runtime core
//! - Wires the console bridge and output adapter to the runtime
//! - Provides scripted input for tests and demos
//!
//! ## Non-Responsibilities
//!
//! The daemon does NOT:
//! - Implement the interpreter or its reclamation algorithm
//! - Edit lines (the runtime's editor consumes the byte stream)
//! - Persist any state across runs

pub mod demo_core;
pub mod host_io;
pub mod host_log;
pub mod lifecycle;
pub mod script;
pub mod trap;

pub use demo_core::{DemoReclaimer, EchoCore};
pub use host_io::{HostConsole, StdoutSink};
pub use host_log::{HostLogger, LogEntry, LogLevel, LogSink, StderrSink};
pub use lifecycle::{HostConfig, HostPhase, LifecycleController, RootScanTrigger, STACK_GUARD_MARGIN};
pub use script::{ScriptError, ScriptedConsole};
pub use trap::FatalTrap;
