/// Counts consecutive ticks in which the distance to a target failed to
/// strictly decrease.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressTracker {
    best_distance_sq: Option<f32>,
    stalled_ticks:    u32,
}

impl ProgressTracker {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record this tick's distance.  Returns `true` once `limit` consecutive
    /// observations made no progress.  The first observation only sets the
    /// baseline.
    pub fn observe(&mut self, distance_sq: f32, limit: u32) -> bool {
        match self.best_distance_sq {
            Some(best) if distance_sq >= best => self.stalled_ticks += 1,
            _ => {
                self.best_distance_sq = Some(distance_sq);
                self.stalled_ticks = 0;
            }
        }
        self.stalled_ticks >= limit.max(1)
    }

    pub fn stalled_ticks(&self) -> u32 {
        self.stalled_ticks
    }
}
