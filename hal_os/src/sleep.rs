//! Thread sleep device

use host_hal::SleepDevice;
use std::thread;
use std::time::Duration;

/// Sleep backed by the OS thread scheduler
#[derive(Debug, Default)]
pub struct OsSleep;

impl SleepDevice for OsSleep {
    fn sleep_ms(&mut self, ms: u64) {
        if ms == 0 {
            thread::yield_now();
        } else {
            thread::sleep(Duration::from_millis(ms));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_zero_returns() {
        let mut sleep = OsSleep;
        sleep.sleep_ms(0);
    }

    #[test]
    fn test_sleep_blocks_roughly_the_requested_time() {
        let mut sleep = OsSleep;
        let start = std::time::Instant::now();
        sleep.sleep_ms(5);
        assert!(start.elapsed() >= Duration::from_millis(5));
    }
}
