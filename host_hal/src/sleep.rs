//! Sleep device abstraction

/// Short blocking sleep trait
///
/// One primitive: park the calling thread for a small number of
/// milliseconds. Long delays are built above this (see [`crate::delay`])
/// out of repeated short sleeps so the loop can observe an external
/// "time elapsed" condition between them.
pub trait SleepDevice {
    /// Blocks the calling thread for roughly `ms` milliseconds.
    ///
    /// `0` yields the thread without a measurable delay.
    fn sleep_ms(&mut self, ms: u64);
}
