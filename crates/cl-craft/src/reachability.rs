//! Breadth-first search over reagent transitions.
//!
//! A *state* is whatever the agent is currently working on (a base
//! product); a *reagent* applied to a state either yields a new state, does
//! nothing, or yields the same state (a *modifier*: it alters the product's
//! attributes without changing what it is).  Modifiers never become graph
//! nodes; they are reported per state next to the paths.
//!
//! Each state is recorded with the first path that reaches it.  BFS visits
//! states in order of path length, so that path is a shortest one; among
//! equally short paths the one found first wins, which follows the order
//! of the `reagents` slice.

use std::collections::VecDeque;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use cl_core::{CategoryId, ItemKind, RuleId};

use crate::Catalog;

/// An implicit transition graph.
pub trait TransitionGraph {
    type State: Clone + Eq + Hash;
    type Reagent: Clone + Eq;

    /// Result of applying `reagent` to `state`, if any rule allows it.
    fn apply(&self, state: &Self::State, reagent: &Self::Reagent) -> Option<Self::State>;
}

/// Output of [`reachable_states`].
#[derive(Clone, Debug)]
pub struct Reachability<S, R> {
    /// Every reachable state with a shortest reagent path to it.  The start
    /// state maps to an empty path.
    pub paths:     FxHashMap<S, Vec<R>>,
    /// Reagents that act as modifiers on each reachable state.
    pub modifiers: FxHashMap<S, Vec<R>>,
}

/// What to do next to reach a target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NextStep<R> {
    /// Apply this reagent to the current state.
    Reagent(R),
    /// Already at the target; apply this modifier.
    Modifier(R),
    /// Already at the target and nothing more is wanted.
    Reached,
    /// The target cannot be reached with these reagents.
    Unreachable,
}

impl<S: Eq + Hash, R: Clone + Eq> Reachability<S, R> {
    pub fn path_to(&self, state: &S) -> Option<&[R]> {
        self.paths.get(state).map(Vec::as_slice)
    }

    pub fn is_reachable(&self, state: &S) -> bool {
        self.paths.contains_key(state)
    }

    /// `true` if `modifier` can be applied at `state`.
    pub fn has_modifier(&self, state: &S, modifier: &R) -> bool {
        self.modifiers.get(state).is_some_and(|m| m.contains(modifier))
    }

    /// The first reagent on the path to `target`; at the target, `modifier`
    /// if one is wanted and applicable.
    pub fn next_step(&self, target: &S, modifier: Option<&R>) -> NextStep<R> {
        match self.paths.get(target) {
            None => NextStep::Unreachable,
            Some(path) => match path.first() {
                Some(first) => NextStep::Reagent(first.clone()),
                None => match modifier {
                    Some(m) if self.has_modifier(target, m) => NextStep::Modifier(m.clone()),
                    _ => NextStep::Reached,
                },
            },
        }
    }
}

/// Every state reachable from `start` using `reagents`, each with a
/// shortest path.
pub fn reachable_states<G>(graph: &G, start: G::State, reagents: &[G::Reagent]) -> Reachability<G::State, G::Reagent>
where
    G: TransitionGraph + ?Sized,
{
    let mut paths: FxHashMap<G::State, Vec<G::Reagent>> = FxHashMap::default();
    let mut modifiers: FxHashMap<G::State, Vec<G::Reagent>> = FxHashMap::default();
    let mut queue: VecDeque<G::State> = VecDeque::new();

    paths.insert(start.clone(), Vec::new());
    queue.push_back(start);

    while let Some(state) = queue.pop_front() {
        let here = paths.get(&state).cloned().unwrap_or_default();
        for reagent in reagents {
            let Some(next) = graph.apply(&state, reagent) else { continue };
            if next == state {
                modifiers.entry(state.clone()).or_default().push(reagent.clone());
                continue;
            }
            if paths.contains_key(&next) {
                continue;
            }
            let mut path = here.clone();
            path.push(reagent.clone());
            paths.insert(next.clone(), path);
            queue.push_back(next);
        }
    }

    Reachability { paths, modifiers }
}

// ── Catalog-derived graph ─────────────────────────────────────────────────────

/// Transition graph over item kinds built from a catalog's two-input rules.
///
/// A rule whose inputs are exactly `[base, reagent]`, each naming a single
/// kind, becomes the edge `base --reagent--> output.kind`.  A rule whose
/// output kind equals its base is a modifier.  When several rules share an
/// edge, the first in catalog order wins.
#[derive(Clone, Debug, Default)]
pub struct TransformationGraph {
    edges:    FxHashMap<(ItemKind, ItemKind), (ItemKind, RuleId)>,
    /// Reagent kinds in order of first appearance in the catalog.
    reagents: Vec<ItemKind>,
}

impl TransformationGraph {
    /// Build from every rule, or only those in `category`.
    pub fn from_catalog(catalog: &Catalog, category: Option<CategoryId>) -> Self {
        let mut graph = Self::default();
        let rules = catalog
            .rules()
            .iter()
            .filter(|r| category.is_none_or(|c| r.category == c));
        for rule in rules {
            let [base, reagent] = rule.inputs.as_slice() else { continue };
            let (Some(base), Some(reagent)) = (base.single_kind(), reagent.single_kind()) else {
                continue;
            };
            graph.edges.entry((base, reagent)).or_insert((rule.output.kind, rule.id));
            if !graph.reagents.contains(&reagent) {
                graph.reagents.push(reagent);
            }
        }
        graph
    }

    /// The rule behind `base --reagent-->`.
    pub fn rule_for(&self, base: ItemKind, reagent: ItemKind) -> Option<RuleId> {
        self.edges.get(&(base, reagent)).map(|&(_, rule)| rule)
    }

    /// Reagent kinds in catalog order.
    pub fn reagents(&self) -> &[ItemKind] {
        &self.reagents
    }

    /// `true` if `kind` is the base of any edge or the product of one.
    pub fn is_state(&self, kind: ItemKind) -> bool {
        self.edges.iter().any(|(&(base, _), &(out, _))| base == kind || out == kind)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl TransitionGraph for TransformationGraph {
    type State = ItemKind;
    type Reagent = ItemKind;

    fn apply(&self, state: &ItemKind, reagent: &ItemKind) -> Option<ItemKind> {
        self.edges.get(&(*state, *reagent)).map(|&(out, _)| out)
    }
}
