//! Per-vertex propagation state.
//!
//! Unlike scalar shortest-path distances, the usefulness of a time at a
//! vertex depends on which route delivered it: continuing on the same route
//! costs nothing, switching costs the transfer delay. The label is therefore
//! a map from last-used route to the best step achievable via that route.
//! There is no total order over labels, which is why the engine is
//! label-correcting rather than a priority-queue Dijkstra.

use std::collections::BTreeMap;

use crate::model::{RouteId, Stop, Time};

/// Best continuation recorded for one route at one vertex: board this route
/// here at `time`, ride to `stop`, continue from there on `prev_route`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub stop: Stop,
    pub time: Time,
    pub prev_route: RouteId,
}

/// The label of one vertex: route id to best step. An absent entry means
/// "unreachable via that route"; an empty label is the infinity value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteLabel {
    entries: BTreeMap<RouteId, Step>,
}

impl RouteLabel {
    pub fn seed(route: RouteId, step: Step) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(route, step);
        RouteLabel { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, route: &RouteId) -> Option<&Step> {
        self.entries.get(route)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteId, &Step)> {
        self.entries.iter()
    }

    /// Merges one candidate entry, keeping the later leave time per route.
    /// Returns whether the label changed (a new route appeared or an
    /// existing one improved) — the relaxation signal.
    pub fn improve(&mut self, route: RouteId, step: Step) -> bool {
        match self.entries.entry(route) {
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(step);
                true
            }
            std::collections::btree_map::Entry::Occupied(mut entry) => {
                if step.time > entry.get().time {
                    entry.insert(step);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// The entry with the latest leave time: the route to board first when
    /// extracting a journey from this vertex.
    pub fn best(&self) -> Option<(&RouteId, &Step)> {
        self.entries.iter().max_by_key(|(_, step)| step.time)
    }
}
