use cl_core::Tick;

/// Minimum tick interval between expensive re-evaluations.
///
/// `trigger_immediate` lets the next `ready` check pass regardless of the
/// interval, once.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    interval:     u64,
    next_allowed: Tick,
    immediate:    bool,
}

impl Cooldown {
    pub fn new(interval: u64) -> Self {
        Self { interval, next_allowed: Tick::ZERO, immediate: false }
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn ready(&self, now: Tick) -> bool {
        self.immediate || now >= self.next_allowed
    }

    /// Start a new interval at `now` and consume any pending override.
    pub fn arm(&mut self, now: Tick) {
        self.next_allowed = now.offset(self.interval);
        self.immediate = false;
    }

    pub fn trigger_immediate(&mut self) {
        self.immediate = true;
    }
}
