//! Gravity clock for integration layers.
//!
//! The engine has no notion of wall time; a host feeds elapsed milliseconds
//! into a `GravityClock` and enqueues one `Command::Tick` per tick it reports.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GravityClock {
    accumulated_ms: u32,
}

impl GravityClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `elapsed_ms` and return how many ticks of `interval_ms` became due.
    ///
    /// The remainder carries over to the next call.
    pub fn advance(&mut self, elapsed_ms: u32, interval_ms: u32) -> u32 {
        let interval = interval_ms.max(1);
        self.accumulated_ms = self.accumulated_ms.saturating_add(elapsed_ms);
        let due = self.accumulated_ms / interval;
        self.accumulated_ms %= interval;
        due
    }

    /// Forget any partial interval (after a pause or restart).
    pub fn reset(&mut self) {
        self.accumulated_ms = 0;
    }

    pub fn accumulated_ms(&self) -> u32 {
        self.accumulated_ms
    }
}
