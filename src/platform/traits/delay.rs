//! Delay interface trait
//!
//! Chips in this collection need fixed settling waits (soft-reset recovery,
//! power mode transitions) and per-attempt sleeps inside bounded polling
//! loops. The platform provides those waits through this trait; drivers
//! never own a timer.

/// Blocking delay provider
///
/// Delays are infallible: a platform that cannot wait cannot run this
/// collection at all.
pub trait DelayInterface {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }
}
