//! Label-correcting propagation from a fixed arrival bound.
//!
//! Seeded at the destination vertex with the arrive-by seed, the engine
//! relaxes edges (stored in arrival-bounded direction, see
//! [`graph`](super::graph)) until no label improves. Because labels are
//! route-keyed maps without a total order, vertices can be re-processed
//! after a later relaxation improves one of their entries — a FIFO queue,
//! not a priority queue. Convergence is quick on real transit data; a cap on
//! label improvements guards against data that admits an ever-improving
//! cycle.

use std::collections::VecDeque;

use fixedbitset::FixedBitSet;
use log::trace;
use petgraph::visit::EdgeRef;
use thiserror::Error;

use crate::model::{Day, DifTime, Lines, RouteId, RouteTime, Stop, Time};

use super::graph::{Section, TransitGraph};
use super::label::{RouteLabel, Step};

/// How many label improvements per graph edge are allowed before the search
/// is declared divergent. Re-scans that confirm the fixed point do not count,
/// so the budget tracks actual progress, not network density.
const IMPROVEMENTS_PER_EDGE: usize = 64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("stop is not part of the network: {0}")]
    UnknownStop(String),
    #[error("relaxation limit exceeded; the timetable admits an improvement cycle")]
    LimitExceeded,
    #[error("propagation labels are inconsistent")]
    InconsistentLabels,
}

/// Transfer adjustment charged when reaching a vertex via `prior` and
/// continuing on `next`: zero when staying on the same route or arriving on
/// foot, the configured delay otherwise.
fn adjust(prior: &RouteId, next: &RouteId, delay: DifTime) -> DifTime {
    if prior == next || prior.is_walking() {
        DifTime::ZERO
    } else {
        delay
    }
}

/// Runs the propagation to a fixed point and returns one label per vertex,
/// indexed by `NodeIndex::index`.
///
/// `seed` is the arrive-by instant at `destination` tagged with the route
/// expected to deliver it; its predecessor entry is the empty route id,
/// which terminates extraction.
pub(crate) fn propagate(
    lines: &Lines,
    graph: &TransitGraph,
    day: Day,
    destination: &Stop,
    seed: &RouteTime,
    delay: DifTime,
) -> Result<Vec<RouteLabel>, SearchError> {
    let dest = graph
        .node(destination)
        .ok_or_else(|| SearchError::UnknownStop(destination.clone()))?;

    let mut labels = vec![RouteLabel::default(); graph.node_count()];
    labels[dest.index()] = RouteLabel::seed(
        seed.route.clone(),
        Step {
            stop: destination.clone(),
            time: seed.time,
            prev_route: RouteId::default(),
        },
    );

    let mut queue = VecDeque::new();
    let mut queued = FixedBitSet::with_capacity(graph.node_count());
    queue.push_back(dest);
    queued.insert(dest.index());

    let improvement_cap = graph.edge_count().max(1) * IMPROVEMENTS_PER_EDGE;
    let mut improvements = 0usize;

    while let Some(u) = queue.pop_front() {
        queued.set(u.index(), false);
        // Entries are snapshotted: a parallel edge u -> u cannot occur
        // (adjacent stops differ), but the borrow of labels[u] must end
        // before labels[v] is written.
        let entries: Vec<(RouteId, Step)> = labels[u.index()]
            .iter()
            .map(|(route, step)| (route.clone(), step.clone()))
            .collect();

        for edge in graph.edges(u) {
            let section = edge.weight();
            let v = edge.target();
            let mut changed = false;

            for (prior, step) in &entries {
                let bound = step.time - adjust(prior, &section.route, delay);
                // A miss (no trip, no walking link) contributes nothing; a
                // lookup error here would mean the graph and the timetable
                // disagree, and is skipped the same way.
                let Some(leave) = leave_time(lines, day, section, bound) else {
                    continue;
                };
                let improved = labels[v.index()].improve(
                    section.route.clone(),
                    Step {
                        stop: section.to.clone(),
                        time: leave,
                        prev_route: prior.clone(),
                    },
                );
                if improved {
                    improvements += 1;
                    if improvements > improvement_cap {
                        return Err(SearchError::LimitExceeded);
                    }
                    trace!(
                        "relaxed {} <- {} <- {} at {}",
                        section.to, section.route, section.from, leave
                    );
                }
                changed |= improved;
            }

            if changed && !queued.contains(v.index()) {
                queue.push_back(v);
                queued.insert(v.index());
            }
        }
    }

    Ok(labels)
}

fn leave_time(lines: &Lines, day: Day, section: &Section, arrive: Time) -> Option<Time> {
    lines
        .leave_time(day, &section.route, &section.from, &section.to, arrive)
        .ok()
        .flatten()
}
