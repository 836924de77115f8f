/// A bounded number of actions per in-game day.
///
/// The used counter resets when `refresh` observes a later day than the one
/// it last saw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyQuota {
    limit: u32,
    used:  u32,
    day:   u64,
}

impl DailyQuota {
    pub fn new(limit: u32) -> Self {
        Self { limit, used: 0, day: 0 }
    }

    /// Roll over to `day` if it is newer than the tracked one.
    pub fn refresh(&mut self, day: u64) {
        if day > self.day {
            self.day = day;
            self.used = 0;
        }
    }

    pub fn available(&self) -> bool {
        self.used < self.limit
    }

    pub fn remaining(&self) -> u32 {
        self.limit.saturating_sub(self.used)
    }

    pub fn used(&self) -> u32 {
        self.used
    }

    /// Count one action.  Returns `false` (and counts nothing) when the
    /// quota is already exhausted.
    pub fn consume(&mut self) -> bool {
        if !self.available() {
            return false;
        }
        self.used += 1;
        true
    }
}
