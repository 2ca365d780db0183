//! Concrete journeys extracted from converged labels.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::Serialize;

use crate::error::Error;
use crate::model::{Day, Lines, RouteId, Stop, Time};

use super::engine::SearchError;
use super::graph::TransitGraph;
use super::label::RouteLabel;

/// One end of a hop: a stop at a time, with its platform label.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoutePoint {
    pub stop: Stop,
    pub time: Time,
    pub platform: String,
}

/// One hop of an itinerary: board at `from`, alight at `to`, via `route`
/// (the empty route id for the collapsed `ends` presentation).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Node {
    pub from: RoutePoint,
    pub to: RoutePoint,
    pub route: RouteId,
}

pub type NodeList = Vec<Node>;

/// Presentation granularity of an itinerary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Details {
    /// One hop per stop-to-stop segment.
    Steps,
    /// Consecutive same-route hops coalesced; one hop per boarding.
    Transfers,
    /// A single hop from overall origin to overall destination.
    Ends,
}

impl FromStr for Details {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steps" => Ok(Details::Steps),
            "transfers" => Ok(Details::Transfers),
            "ends" => Ok(Details::Ends),
            _ => Err(Error::InvalidDetails(s.to_string())),
        }
    }
}

impl fmt::Display for Details {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Details::Steps => "steps",
            Details::Transfers => "transfers",
            Details::Ends => "ends",
        })
    }
}

/// Renders an itinerary as a JSON array of hops. Serializing these plain
/// derive types cannot fail, so the fallback is unreachable.
pub fn to_json_string(nodes: &NodeList) -> String {
    serde_json::to_string(nodes).unwrap_or_default()
}

/// Walks converged labels from `from` toward `to`, emitting one hop per
/// boarded section. An empty list means no journey exists (or the stops are
/// equal); inconsistent labels are a search error.
pub(crate) fn extract(
    lines: &Lines,
    graph: &TransitGraph,
    labels: &[RouteLabel],
    day: Day,
    from: &Stop,
    to: &Stop,
) -> Result<NodeList, Error> {
    let origin = graph
        .node(from)
        .ok_or_else(|| SearchError::UnknownStop(from.clone()))?;

    let Some((route, _)) = labels[origin.index()].best() else {
        return Ok(NodeList::new());
    };
    let mut route = route.clone();
    let mut stop = from.clone();
    let mut nodes = NodeList::new();

    // A sane label chain visits each (stop, route) entry at most once.
    let hop_cap: usize = labels.iter().map(RouteLabel::len).sum();

    while stop != *to {
        if nodes.len() > hop_cap {
            return Err(SearchError::InconsistentLabels.into());
        }
        let here = graph
            .node(&stop)
            .ok_or_else(|| SearchError::UnknownStop(stop.clone()))?;
        let step = labels[here.index()]
            .get(&route)
            .ok_or(SearchError::InconsistentLabels)?
            .clone();
        let arrive = lines
            .arrive_time(day, &route, &stop, step.time, &step.stop)?
            .ok_or(SearchError::InconsistentLabels)?;
        nodes.push(Node {
            from: RoutePoint {
                stop: stop.clone(),
                time: step.time,
                platform: lines.platform(&route, &stop)?,
            },
            to: RoutePoint {
                stop: step.stop.clone(),
                time: arrive,
                platform: lines.platform(&route, &step.stop)?,
            },
            route: route.clone(),
        });
        stop = step.stop;
        route = step.prev_route;
    }

    Ok(nodes)
}

/// Coalesces consecutive hops sharing a route into one boarding-to-alighting
/// hop.
pub fn to_transfer_list(steps: &NodeList) -> NodeList {
    steps
        .iter()
        .cloned()
        .coalesce(|a, b| {
            if a.route == b.route {
                Ok(Node {
                    from: a.from,
                    to: b.to,
                    route: a.route,
                })
            } else {
                Err((a, b))
            }
        })
        .collect()
}

/// Collapses an itinerary to a single origin-to-destination hop with no
/// route identity.
pub fn to_end_list(steps: &NodeList) -> NodeList {
    match (steps.first(), steps.last()) {
        (Some(first), Some(last)) => vec![Node {
            from: first.from.clone(),
            to: last.to.clone(),
            route: RouteId::default(),
        }],
        _ => NodeList::new(),
    }
}

pub(crate) fn apply_details(steps: NodeList, details: Details) -> NodeList {
    match details {
        Details::Steps => steps,
        Details::Transfers => to_transfer_list(&steps),
        Details::Ends => to_end_list(&steps),
    }
}
