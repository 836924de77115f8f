use cl_core::Position;

/// Movement request for one agent.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementState {
    /// Where the agent is heading.  `None` = path idle.
    pub target: Option<Position>,
    /// Units per tick.
    pub speed: f32,
}

impl MovementState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.target.is_none()
    }
}
