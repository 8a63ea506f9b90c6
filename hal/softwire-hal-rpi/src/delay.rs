//! Thread-sleeping wait strategy

use std::thread;
use std::time::Duration;

use softwire_hal::delay::Wait;

/// Wait strategy that sleeps the calling thread for a fixed interval.
///
/// The default no-op strategy is enough on hosts where the cost of a
/// mode switch already dominates the bit time. Inject this one to slow
/// the bus down for long wires or marginal devices.
#[derive(Debug, Clone, Copy)]
pub struct SleepWait {
    interval: Duration,
}

impl SleepWait {
    /// Sleep for `interval` at every wait point.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Sleep for `micros` microseconds at every wait point.
    pub fn from_micros(micros: u64) -> Self {
        Self::new(Duration::from_micros(micros))
    }
}

impl Wait for SleepWait {
    fn wait(&mut self) {
        thread::sleep(self.interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_sleep_wait_blocks_at_least_interval() {
        let mut wait = SleepWait::from_micros(500);

        let before = Instant::now();
        wait.wait();
        wait.wait();
        assert!(before.elapsed() >= Duration::from_micros(1000));
    }
}
