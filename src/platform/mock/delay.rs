//! Mock delay implementation for testing

use crate::platform::traits::DelayInterface;

/// Mock delay provider
///
/// Returns immediately and accumulates the requested wait time, so tests
/// can assert that settling delays and poll backoffs were requested.
#[derive(Debug, Default)]
pub struct MockDelay {
    elapsed_us: u64,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Total microseconds of delay requested so far
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    /// Reset the accumulated delay counter
    pub fn reset(&mut self) {
        self.elapsed_us = 0;
    }
}

impl DelayInterface for MockDelay {
    fn delay_us(&mut self, us: u32) {
        self.elapsed_us += u64::from(us);
    }
}
