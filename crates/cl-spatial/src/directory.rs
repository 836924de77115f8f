use cl_core::{AgentId, Position, RoleId, StorageSite};

/// World-model facts discovery needs about candidate recipients.
///
/// Supplied by the world; the core never decides what a job site or a
/// storage block is, only whether they line up.
pub trait WorkplaceDirectory {
    fn position_of_agent(&self, agent: AgentId) -> Option<Position>;

    fn is_alive(&self, agent: AgentId) -> bool;

    fn has_role(&self, agent: AgentId, role: RoleId) -> bool;

    /// The agent's declared job site.
    fn job_site(&self, agent: AgentId) -> Option<Position>;

    /// The storage the agent is associated with, if it still resolves.
    fn storage_of(&self, agent: AgentId) -> Option<StorageSite>;

    /// `true` if `storage` is close enough to `job_site` to count as
    /// belonging to it.
    fn is_adjacent(&self, job_site: Position, storage: Position) -> bool;
}
