//! Cooperative blocking delay
//!
//! A long delay is decomposed into short sleeps in a loop, re-reading the
//! clock between them, rather than committing to one long uninterruptible
//! OS sleep. This keeps the thread responsive to an external "time
//! elapsed" condition and gives the host scheduler regular chances to run
//! other work.

use crate::clock::ClockDevice;
use crate::sleep::SleepDevice;

/// Blocks for roughly `ms` milliseconds using 1 ms sleep slices.
///
/// The clock is consulted before every slice; the loop exits as soon as the
/// elapsed time reaches the target, so oversleeping is bounded by one
/// slice.
pub fn delay_ms<C, S>(clock: &mut C, sleeper: &mut S, ms: u64)
where
    C: ClockDevice + ?Sized,
    S: SleepDevice + ?Sized,
{
    let start = clock.ticks_us();
    let target_us = ms.saturating_mul(1_000);
    while clock.ticks_us().wrapping_sub(start) < target_us {
        sleeper.sleep_ms(1);
    }
}
