//! # Runtime Lifecycle
//!
//! One-shot orchestration of the runtime core:
//! `Uninitialized → Running → Terminated`, with `Halted` as the terminal
//! phase a fatal fault diverts into.
//!
//! ## Startup order
//!
//! 1. Record the stack boundary for later conservative scanning
//! 2. Install the runtime's stack-depth guard, leaving a fixed margin
//!    below the physical budget to absorb the host's own frames during a
//!    stack-limit violation
//! 3. Register the heap region with the reclaimer
//! 4. Initialize the runtime core
//! 5. Hand control to the read-eval loop until it returns
//!
//! Deinitialization runs unconditionally once the loop returns, whether it
//! finished normally or unwound through an internal abort.

use crate::host_log::{HostLogger, LogEntry, LogLevel};
use crate::trap::FatalTrap;
use gc_roots::{HeapRegion, RootSink};
use runtime_api::{HostIo, ModuleStore, Reclaimer, ReplOutcome, RuntimeCore, RuntimeFault};

/// Stack kept in reserve below the physical budget when installing the
/// runtime's depth guard.
pub const STACK_GUARD_MARGIN: usize = 512;

/// Default heap region size in bytes.
pub const DEFAULT_HEAP_SIZE: usize = 1024 * 1024;

/// Default stack budget in bytes.
pub const DEFAULT_STACK_BUDGET: usize = 1024 * 1024;

/// Host configuration
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Heap region size in bytes
    pub heap_size: usize,
    /// Stack budget the depth guard is derived from
    pub stack_budget: usize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            heap_size: DEFAULT_HEAP_SIZE,
            stack_budget: DEFAULT_STACK_BUDGET,
        }
    }
}

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPhase {
    /// Process started, runtime not yet booted
    Uninitialized,
    /// Read-eval loop in control
    Running,
    /// Runtime deinitialized; the process exits next
    Terminated,
    /// Fatal fault; forward progress halted
    Halted,
}

/// Handle for the conservative root scan
///
/// Captures the stack boundary recorded at boot. The reclaimer invokes
/// [`RootScanTrigger::collect`] at the start of every reclamation pass;
/// each call takes a fresh marker in its own frame and offers every
/// aligned word between marker and boundary to the sink.
#[derive(Debug, Clone, Copy)]
pub struct RootScanTrigger {
    stack_top: usize,
}

impl RootScanTrigger {
    /// Creates a trigger for a recorded stack boundary.
    pub fn new(stack_top: usize) -> Self {
        Self { stack_top }
    }

    /// The recorded boundary.
    pub fn stack_top(&self) -> usize {
        self.stack_top
    }

    /// Runs one conservative scan of the calling thread's stack.
    #[inline(never)]
    pub fn collect(&self, sink: &mut dyn RootSink) {
        gc_roots::scan_current_stack(self.stack_top, sink);
    }
}

/// One-shot runtime lifecycle controller
pub struct LifecycleController {
    config: HostConfig,
    phase: HostPhase,
    heap: HeapRegion,
    stack_top: usize,
}

impl LifecycleController {
    /// Creates a controller and allocates the heap region.
    ///
    /// The region is a leaked boxed slice: address-stable and alive for
    /// the process lifetime, never resized or relocated.
    pub fn new(config: HostConfig) -> Self {
        let heap: &'static mut [u8] = Box::leak(vec![0u8; config.heap_size].into_boxed_slice());
        Self {
            config,
            phase: HostPhase::Uninitialized,
            heap: HeapRegion::new(heap.as_ptr() as usize, heap.len()),
            stack_top: 0,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> HostPhase {
        self.phase
    }

    /// The heap region handed to the reclaimer.
    pub fn heap_region(&self) -> HeapRegion {
        self.heap
    }

    /// The stack boundary recorded at boot; zero before boot.
    pub fn stack_top(&self) -> usize {
        self.stack_top
    }

    /// Returns the root-scan trigger for the booted thread.
    ///
    /// Meaningful only after [`LifecycleController::run`] has recorded the
    /// boundary.
    pub fn scan_trigger(&self) -> RootScanTrigger {
        RootScanTrigger::new(self.stack_top)
    }

    /// Boots the runtime, runs the read-eval loop, and tears down.
    ///
    /// Runs at most once per process; there is no restart path.
    ///
    /// # Panics
    ///
    /// Panics if called after the lifecycle has left `Uninitialized`.
    pub fn run(
        &mut self,
        core: &mut dyn RuntimeCore,
        reclaimer: &mut dyn Reclaimer,
        modules: Box<dyn ModuleStore>,
        io: &mut dyn HostIo,
        log: &mut HostLogger,
    ) -> Result<ReplOutcome, RuntimeFault> {
        assert_eq!(
            self.phase,
            HostPhase::Uninitialized,
            "lifecycle runs at most once per process"
        );

        self.stack_top = gc_roots::stack_marker();

        let limit = self.config.stack_budget - STACK_GUARD_MARGIN;
        core.set_stack_limit(limit);
        reclaimer.alloc_region(self.heap);

        core.init(modules)?;
        self.phase = HostPhase::Running;
        log.emit(
            LogEntry::new(LogLevel::Info, "runtime running".to_string())
                .with_field("heap_bytes".to_string(), self.heap.len().to_string())
                .with_field("stack_limit".to_string(), limit.to_string()),
        );

        let outcome = core.run_repl(io);

        // Teardown is unconditional, normal return or abort alike.
        core.deinit();
        self.phase = HostPhase::Terminated;
        log.emit(
            LogEntry::new(LogLevel::Info, "runtime terminated".to_string())
                .with_field("outcome".to_string(), format!("{:?}", outcome)),
        );

        Ok(outcome)
    }

    /// Diverts the lifecycle into the terminal `Halted` phase.
    ///
    /// Returns the trap; the caller's only remaining move is
    /// [`FatalTrap::spin`], which never returns. Nothing is logged on this
    /// path.
    pub fn fault(&mut self, fault: RuntimeFault) -> FatalTrap {
        self.phase = HostPhase::Halted;
        FatalTrap::new(fault)
    }
}
