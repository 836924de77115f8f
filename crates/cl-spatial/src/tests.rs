//! Unit tests for cl-spatial.

use cl_core::{AgentId, ContainerId, Position, RoleId, StorageSite};

use crate::{
    find_eligible, still_eligible, AgentIndex, RecipientQuery, SpatialIndex, WorkplaceDirectory,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const FARMER: RoleId = RoleId(1);
const BAKER: RoleId = RoleId(2);

struct Person {
    pos:     Position,
    role:    RoleId,
    alive:   bool,
    site:    Option<Position>,
    storage: Option<StorageSite>,
}

struct Town {
    people: Vec<Person>,
    index:  AgentIndex,
}

impl Town {
    fn new(people: Vec<Person>) -> Self {
        let index = AgentIndex::bulk_load(
            people.iter().enumerate().map(|(i, p)| (AgentId(i as u32), p.pos)),
        );
        Self { people, index }
    }

    fn person(&self, a: AgentId) -> Option<&Person> {
        self.people.get(a.index())
    }
}

impl SpatialIndex for Town {
    fn entities_in_radius(
        &self,
        center: Position,
        radius: f32,
        accept: &dyn Fn(AgentId) -> bool,
    ) -> Vec<AgentId> {
        self.index.entities_in_radius(center, radius, accept)
    }
}

impl WorkplaceDirectory for Town {
    fn position_of_agent(&self, a: AgentId) -> Option<Position> {
        self.person(a).map(|p| p.pos)
    }
    fn is_alive(&self, a: AgentId) -> bool {
        self.person(a).is_some_and(|p| p.alive)
    }
    fn has_role(&self, a: AgentId, role: RoleId) -> bool {
        self.person(a).is_some_and(|p| p.role == role)
    }
    fn job_site(&self, a: AgentId) -> Option<Position> {
        self.person(a).and_then(|p| p.site)
    }
    fn storage_of(&self, a: AgentId) -> Option<StorageSite> {
        self.person(a).and_then(|p| p.storage)
    }
    fn is_adjacent(&self, job_site: Position, storage: Position) -> bool {
        job_site.distance_squared(storage) <= 2.0
    }
}

fn at(x: f32, z: f32) -> Position {
    Position::new(x, 0.0, z)
}

fn baker(x: f32, z: f32, chest: u32) -> Person {
    Person {
        pos:     at(x, z),
        role:    BAKER,
        alive:   true,
        site:    Some(at(x, z + 1.0)),
        storage: Some(StorageSite { container: ContainerId(chest), position: at(x + 1.0, z + 1.0) }),
    }
}

fn farmer() -> Person {
    Person { pos: at(0.0, 0.0), role: FARMER, alive: true, site: None, storage: None }
}

const QUERY: RecipientQuery = RecipientQuery { role: BAKER, radius: 16.0 };

// ── AgentIndex ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use super::*;

    #[test]
    fn radius_is_inclusive_and_filtered() {
        let idx = AgentIndex::bulk_load([
            (AgentId(0), at(0.0, 0.0)),
            (AgentId(1), at(3.0, 4.0)),
            (AgentId(2), at(6.0, 0.0)),
        ]);
        let mut hits = idx.entities_in_radius(at(0.0, 0.0), 5.0, &|_| true);
        hits.sort();
        assert_eq!(hits, vec![AgentId(0), AgentId(1)]);

        let hits = idx.entities_in_radius(at(0.0, 0.0), 5.0, &|a| a != AgentId(0));
        assert_eq!(hits, vec![AgentId(1)]);
        assert_eq!(idx.nearest(at(5.9, 0.0)), Some(AgentId(2)));
    }

    #[test]
    fn empty_index() {
        let idx = AgentIndex::empty();
        assert!(idx.is_empty());
        assert!(idx.entities_in_radius(at(0.0, 0.0), 100.0, &|_| true).is_empty());
        assert_eq!(idx.nearest(at(0.0, 0.0)), None);
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod discovery {
    use super::*;

    #[test]
    fn sorted_by_distance_then_identity() {
        let town = Town::new(vec![
            farmer(),
            baker(6.0, 0.0, 10),
            baker(0.0, 3.0, 11),
            baker(-3.0, 0.0, 12), // ties with agent 2
        ]);
        let found = find_eligible(&town, AgentId(0), &QUERY);
        let ids: Vec<AgentId> = found.iter().map(|r| r.agent).collect();
        assert_eq!(ids, vec![AgentId(2), AgentId(3), AgentId(1)]);
        assert_eq!(found[0].distance_sq, 9.0);
        assert_eq!(found[0].storage.container, ContainerId(11));
    }

    #[test]
    fn excludes_source_dead_wrong_role_and_unresolved() {
        let mut dead = baker(1.0, 0.0, 1);
        dead.alive = false;
        let mut no_storage = baker(2.0, 0.0, 2);
        no_storage.storage = None;
        let mut far_storage = baker(3.0, 0.0, 3);
        far_storage.storage = Some(StorageSite { container: ContainerId(3), position: at(9.0, 9.0) });
        let mut source = baker(0.0, 0.0, 0);
        source.role = BAKER;
        let town = Town::new(vec![source, dead, no_storage, far_storage, farmer(), baker(40.0, 0.0, 5)]);

        assert!(find_eligible(&town, AgentId(0), &QUERY).is_empty());
    }

    #[test]
    fn deterministic_across_calls() {
        let town = Town::new(vec![
            farmer(),
            baker(2.0, 0.0, 1),
            baker(0.0, 2.0, 2),
            baker(-2.0, 0.0, 3),
            baker(0.0, -2.0, 4),
        ]);
        let first = find_eligible(&town, AgentId(0), &QUERY);
        for _ in 0..10 {
            assert_eq!(find_eligible(&town, AgentId(0), &QUERY), first);
        }
        let ids: Vec<u32> = first.iter().map(|r| r.agent.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn revalidation_tracks_changes() {
        let mut town = Town::new(vec![farmer(), baker(2.0, 0.0, 7)]);
        let record = find_eligible(&town, AgentId(0), &QUERY)[0];
        assert!(still_eligible(&town, &record, BAKER));

        town.people[1].storage = Some(StorageSite { container: ContainerId(8), position: at(3.0, 1.0) });
        assert!(!still_eligible(&town, &record, BAKER));

        town.people[1].storage = record.storage.into();
        town.people[1].alive = false;
        assert!(!still_eligible(&town, &record, BAKER));
    }

    #[test]
    fn unknown_source_finds_nothing() {
        let town = Town::new(vec![baker(0.0, 0.0, 1)]);
        assert!(find_eligible(&town, AgentId(42), &QUERY).is_empty());
    }
}
