use std::fmt;

use cl_core::Position;

/// Where a task is in its workflow.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stage {
    /// Not running.  Safe to start.
    #[default]
    Idle,
    /// Heading for `target`; the framework owns arrival and stall checks.
    Traveling { target: Position },
    /// At the target; the task's one-shot operation runs next tick.
    Acting,
    /// Sub-goal abandoned; heading back to `fallback` to undo.
    Returning { fallback: Position },
    /// Finished.  The owning behavior reports `can_continue == false`.
    Done,
}

impl Stage {
    pub fn is_moving(self) -> bool {
        matches!(self, Stage::Traveling { .. } | Stage::Returning { .. })
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::Traveling { .. } => "traveling",
            Stage::Acting => "acting",
            Stage::Returning { .. } => "returning",
            Stage::Done => "done",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
