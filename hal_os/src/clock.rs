//! Monotonic clock device
//!
//! All three units are measured against one origin recorded when the
//! device is created, and every query performs its own clock reading. No
//! unit is ever derived from a cached value or from anything but a live
//! invocation.

use host_hal::ClockDevice;
use std::time::Instant;

/// Clock backed by the OS monotonic clock
#[derive(Debug)]
pub struct OsClock {
    origin: Instant,
}

impl OsClock {
    /// Creates a clock with its epoch at the moment of the call.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for OsClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockDevice for OsClock {
    fn ticks_us(&mut self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }

    fn ticks_cpu(&mut self) -> u64 {
        // Highest-resolution counter available to the process.
        self.origin.elapsed().as_nanos() as u64
    }

    fn time_ns(&mut self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_are_monotonic() {
        let mut clock = OsClock::new();

        let us1 = clock.ticks_us();
        let us2 = clock.ticks_us();
        assert!(us2 >= us1);

        let ns1 = clock.time_ns();
        let ns2 = clock.time_ns();
        assert!(ns2 >= ns1);

        let cpu1 = clock.ticks_cpu();
        let cpu2 = clock.ticks_cpu();
        assert!(cpu2 >= cpu1);
    }

    #[test]
    fn test_units_share_an_epoch() {
        let mut clock = OsClock::new();

        let us = clock.ticks_us();
        let ns = clock.time_ns();

        // Nanoseconds were read after microseconds, so the scaled values
        // must be ordered.
        assert!(ns >= us * 1_000);
    }
}
