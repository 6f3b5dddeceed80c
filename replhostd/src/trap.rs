//! # Fatal Trap
//!
//! The terminal state for faults that escape every internal recovery
//! mechanism. There is no supervising process to restart into, so the only
//! safe action is to stop making forward progress: no further work, no
//! call back into a possibly-broken runtime, no logging (no facility is
//! assumed to exist at this point).

use runtime_api::RuntimeFault;

/// Terminal idle trap
///
/// Constructed by [`crate::lifecycle::LifecycleController::fault`] after
/// the lifecycle enters `Halted`. [`FatalTrap::spin`] never returns.
#[derive(Debug)]
pub struct FatalTrap {
    fault: RuntimeFault,
}

impl FatalTrap {
    pub(crate) fn new(fault: RuntimeFault) -> Self {
        Self { fault }
    }

    /// The fault that diverted control here. Retained for a debugger to
    /// find; deliberately never written anywhere.
    pub fn fault(&self) -> &RuntimeFault {
        &self.fault
    }

    /// Idles forever.
    pub fn spin(self) -> ! {
        loop {
            Self::idle_step();
        }
    }

    /// One iteration of the idle loop: a spin hint and nothing else.
    #[inline]
    fn idle_step() {
        core::hint::spin_loop();
    }

    /// Bounded stand-in for [`FatalTrap::spin`], for tests only.
    ///
    /// Runs the same per-iteration body a fixed number of times and
    /// reports how many iterations ran.
    #[cfg(test)]
    fn spin_bounded(&self, iterations: u64) -> u64 {
        let mut ran = 0;
        while ran < iterations {
            Self::idle_step();
            ran += 1;
        }
        ran
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trap_retains_fault() {
        let trap = FatalTrap::new(RuntimeFault::new("escaped exception"));
        assert_eq!(trap.fault().message(), "escaped exception");
    }

    #[test]
    fn test_idle_loop_has_no_observable_effects() {
        let trap = FatalTrap::new(RuntimeFault::new("escaped exception"));

        let ran = trap.spin_bounded(10_000);

        // Every iteration ran, nothing changed: the fault is intact and
        // the trap produced no output of any kind.
        assert_eq!(ran, 10_000);
        assert_eq!(trap.fault().message(), "escaped exception");
    }
}
