//! # Demo Runtime Core
//!
//! Stand-ins for the external collaborators on the runtime side of the
//! boundary, used by the daemon's demo modes and the integration tests.
//! [`EchoCore`] exercises the whole input → translate → output path;
//! [`DemoReclaimer`] receives the heap region and counts what a scan
//! offers it. Neither is an interpreter or a collector.

use console_types::INTERRUPT;
use gc_roots::{HeapRegion, RootSink};
use runtime_api::{
    HostIo, ModuleStat, ModuleStore, Reclaimer, ReplOutcome, RuntimeCore, RuntimeFault,
};

/// Runtime core that echoes its input stream
///
/// Pulls input units until the interrupt byte arrives and writes them back
/// out, carriage returns as logical newlines. Stands in for the runtime's
/// read-eval loop.
#[derive(Debug, Default)]
pub struct EchoCore {
    stack_limit: Option<usize>,
    boot_module_present: bool,
    initialized: bool,
    units_echoed: u64,
}

impl EchoCore {
    /// Creates an echo core.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stack limit the host installed.
    pub fn stack_limit(&self) -> Option<usize> {
        self.stack_limit
    }

    /// Whether the module store offered a boot module at init.
    pub fn boot_module_present(&self) -> bool {
        self.boot_module_present
    }

    /// Units echoed during the session.
    pub fn units_echoed(&self) -> u64 {
        self.units_echoed
    }
}

impl RuntimeCore for EchoCore {
    fn set_stack_limit(&mut self, limit_bytes: usize) {
        self.stack_limit = Some(limit_bytes);
    }

    fn init(&mut self, modules: Box<dyn ModuleStore>) -> Result<(), RuntimeFault> {
        if self.stack_limit.is_none() {
            return Err(RuntimeFault::new("stack limit not installed"));
        }
        // A real runtime would execute a boot module here if the store
        // offered one; the echo core just records the answer.
        self.boot_module_present = modules.stat("main") == ModuleStat::File;
        self.initialized = true;
        Ok(())
    }

    fn run_repl(&mut self, io: &mut dyn HostIo) -> ReplOutcome {
        debug_assert!(self.initialized, "run_repl before init");
        loop {
            let unit = io.next_input_unit();
            if unit == INTERRUPT {
                return ReplOutcome::Finished;
            }
            if unit == b'\r' {
                io.write_bytes(b"\n");
            } else {
                io.write_bytes(&[unit]);
            }
            self.units_echoed += 1;
        }
    }

    fn deinit(&mut self) {
        self.initialized = false;
    }
}

/// Reclaimer stand-in
///
/// Owns the registered heap region and counts scan candidates, splitting
/// out the ones that point into the region, the judgment a real
/// reclaimer would make per candidate.
#[derive(Debug, Default)]
pub struct DemoReclaimer {
    region: Option<HeapRegion>,
    candidates_seen: u64,
    heap_hits: u64,
}

impl DemoReclaimer {
    /// Creates a reclaimer with no region yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registered region, once the host has called `alloc_region`.
    pub fn region(&self) -> Option<HeapRegion> {
        self.region
    }

    /// Total candidates offered across all passes.
    pub fn candidates_seen(&self) -> u64 {
        self.candidates_seen
    }

    /// Candidates that pointed into the heap region.
    pub fn heap_hits(&self) -> u64 {
        self.heap_hits
    }
}

impl RootSink for DemoReclaimer {
    fn scan_candidate(&mut self, candidate: usize) {
        self.candidates_seen += 1;
        if let Some(region) = &self.region {
            if region.contains(candidate) {
                self.heap_hits += 1;
            }
        }
    }
}

impl Reclaimer for DemoReclaimer {
    fn alloc_region(&mut self, region: HeapRegion) {
        assert!(self.region.is_none(), "heap region registered twice");
        self.region = Some(region);
    }
}
