//! # Runtime API
//!
//! This crate defines the boundary between the host port and the embedded
//! runtime core. Both sides compile against these traits; neither links
//! the other directly.
//!
//! ## Philosophy
//!
//! The host provides **mechanisms**, the runtime drives them:
//! - The runtime pulls input units and pushes output bytes through
//!   [`HostIo`]
//! - The reclaimer receives its heap region once and candidate references
//!   on every pass
//! - Module storage is a capability; a host with no backend hands the
//!   runtime an implementation that reports "not available"
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - The interpreter (compiler, evaluator, heap layout)
//! - The line editor (it lives inside the runtime core)
//! - A reclamation algorithm (only the root-supply side is hosted)

use gc_roots::{HeapRegion, RootSink};
use thiserror::Error;

/// How the interactive read-eval loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplOutcome {
    /// The loop returned normally (end of session)
    Finished,
    /// The loop unwound through an internal abort
    Aborted,
}

/// Description of an unrecoverable runtime fault
///
/// Carried to the fatal trap. Never logged: by the time a fault escapes
/// every internal recovery mechanism, no logging facility is assumed to
/// exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeFault {
    message: String,
}

impl RuntimeFault {
    /// Creates a fault description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The fault description.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for RuntimeFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "runtime fault: {}", self.message)
    }
}

/// Byte-level console I/O offered to the runtime
///
/// The runtime's line editor pulls one input unit at a time and writes
/// output buffers back; both calls are strictly sequential on the
/// runtime's single logical thread.
pub trait HostIo {
    /// Blocks until the next logical input unit is available.
    fn next_input_unit(&mut self) -> u8;

    /// Emits a byte buffer to the console.
    ///
    /// Returns the number of logical bytes consumed.
    fn write_bytes(&mut self, buf: &[u8]) -> usize;
}

/// The embedded runtime core, seen from the host
pub trait RuntimeCore {
    /// Installs the stack-depth guard, in bytes of stack budget.
    ///
    /// Called before [`RuntimeCore::init`], with a value strictly below the
    /// physical stack size so the host's own frames survive a stack-limit
    /// violation.
    fn set_stack_limit(&mut self, limit_bytes: usize);

    /// One-time runtime initialization.
    ///
    /// The host hands over the module storage capability here; a host with
    /// no backend passes [`NoStorage`] and imports resolve to "not found"
    /// inside the runtime.
    fn init(&mut self, modules: Box<dyn ModuleStore>) -> Result<(), RuntimeFault>;

    /// Runs the interactive read-eval loop until it returns.
    fn run_repl(&mut self, io: &mut dyn HostIo) -> ReplOutcome;

    /// Unconditional runtime deinitialization.
    ///
    /// Runs whether the loop finished normally or aborted.
    fn deinit(&mut self);
}

/// The runtime's memory reclaimer, seen from the host
///
/// Receives the single heap region once at startup and, on every
/// reclamation pass, every stack word the conservative scan turns up (via
/// the [`RootSink`] supertrait).
pub trait Reclaimer: RootSink {
    /// Registers the heap region. Called exactly once, before the runtime
    /// initializes; the region is owned by the reclaimer from then on.
    fn alloc_region(&mut self, region: HeapRegion);
}

/// Result of a module stat query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStat {
    /// Path names a module file
    File,
    /// Path names a package directory
    Directory,
    /// Path does not exist
    NotFound,
}

/// Errors from module storage
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No storage backend is configured
    #[error("module storage not available")]
    NotAvailable,

    /// The path does not exist in the backend
    #[error("module not found: {0}")]
    NotFound(String),
}

/// Module storage capability
///
/// The runtime resolves imports through this seam. Hosts without a
/// filesystem hand out [`NoStorage`].
pub trait ModuleStore {
    /// Reports whether a path names a module.
    fn stat(&self, path: &str) -> ModuleStat;

    /// Reads a module's source bytes.
    fn read(&self, path: &str) -> Result<Vec<u8>, StoreError>;
}

/// Module storage for hosts with no filesystem
///
/// Every query reports absence; imports fail inside the runtime the same
/// way a missing module would.
#[derive(Debug, Default)]
pub struct NoStorage;

impl ModuleStore for NoStorage {
    fn stat(&self, _path: &str) -> ModuleStat {
        ModuleStat::NotFound
    }

    fn read(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        let _ = path;
        Err(StoreError::NotAvailable)
    }
}
