//! Spatial recipient discovery.
//!
//! Given a source agent, a role, and a radius, return every other living
//! agent of that role whose storage resolves and sits next to its job site,
//! sorted by ascending squared distance from the source with `AgentId` as
//! the tie-breaker.  The result is a list so callers can fall through to the
//! next candidate without re-querying.

use std::cmp::Ordering;

use tracing::trace;

use cl_core::{AgentId, Position, RoleId, StorageSite};

use crate::{SpatialIndex, WorkplaceDirectory};

/// What kind of recipient to look for, and how far.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipientQuery {
    pub role:   RoleId,
    pub radius: f32,
}

/// One eligible recipient.  Produced fresh per query; never cached.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecipientRecord {
    pub agent:       AgentId,
    pub job_site:    Position,
    pub storage:     StorageSite,
    /// Squared distance from the source agent at query time.
    pub distance_sq: f32,
}

impl RecipientRecord {
    /// Total order used for sorting: distance, then identity.
    fn order(&self, other: &Self) -> Ordering {
        self.distance_sq
            .total_cmp(&other.distance_sq)
            .then_with(|| self.agent.cmp(&other.agent))
    }
}

/// Find every eligible recipient near `source`.
///
/// Returns an empty list if `source` has no position.
pub fn find_eligible<W>(world: &W, source: AgentId, query: &RecipientQuery) -> Vec<RecipientRecord>
where
    W: SpatialIndex + WorkplaceDirectory + ?Sized,
{
    let Some(origin) = world.position_of_agent(source) else {
        return Vec::new();
    };

    let role = query.role;
    let accept = |a: AgentId| a != source && world.is_alive(a) && world.has_role(a, role);
    let mut records: Vec<RecipientRecord> = world
        .entities_in_radius(origin, query.radius, &accept)
        .into_iter()
        .filter_map(|agent| resolve(world, agent, origin))
        .collect();

    records.sort_by(RecipientRecord::order);
    trace!(agent = %source, role = %role, found = records.len(), "recipient discovery");
    records
}

/// Re-check a record right before acting on it: the recipient must still be
/// alive, hold the role, and resolve to the same storage next to its job
/// site.
pub fn still_eligible<W>(world: &W, record: &RecipientRecord, role: RoleId) -> bool
where
    W: WorkplaceDirectory + ?Sized,
{
    let agent = record.agent;
    world.is_alive(agent)
        && world.has_role(agent, role)
        && world.job_site(agent).is_some_and(|site| {
            world.storage_of(agent).is_some_and(|storage| {
                storage.container == record.storage.container
                    && world.is_adjacent(site, storage.position)
            })
        })
}

fn resolve<W>(world: &W, agent: AgentId, origin: Position) -> Option<RecipientRecord>
where
    W: WorkplaceDirectory + ?Sized,
{
    let job_site = world.job_site(agent)?;
    let storage = world.storage_of(agent)?;
    if !world.is_adjacent(job_site, storage.position) {
        return None;
    }
    let pos = world.position_of_agent(agent)?;
    Some(RecipientRecord {
        agent,
        job_site,
        storage,
        distance_sq: origin.distance_squared(pos),
    })
}
