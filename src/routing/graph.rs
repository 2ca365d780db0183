//! The routing multigraph.
//!
//! One vertex per stop, one edge per consecutive stop pair per route, two
//! edges per walking segment. Parallel edges are expected: several routes may
//! connect the same pair of stops.
//!
//! Edges are stored in the **arrival-bounded search direction**: an edge runs
//! from a section's travel-later stop to its travel-earlier stop. Queries
//! seed at the destination and propagate toward the origin, asking at each
//! vertex "how late can I still leave here", which walks edges opposite to
//! travel. `Section::from`/`Section::to` always name the stops in travel
//! order regardless of edge orientation.

use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};

use crate::model::{Lines, RouteId, Stop};

/// One traversable section: a stop pair in travel order plus the route (or
/// the walking pseudo-route) that covers it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub route: RouteId,
    pub from: Stop,
    pub to: Stop,
}

#[derive(Debug)]
pub struct TransitGraph {
    graph: DiGraph<Stop, Section>,
    nodes: HashMap<Stop, NodeIndex>,
}

impl TransitGraph {
    /// Builds the graph from an immutable network snapshot. Called once; the
    /// graph is never mutated afterwards.
    pub fn build(lines: &Lines) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();
        for stop in lines.stop_set() {
            let index = graph.add_node(stop.clone());
            nodes.insert(stop, index);
        }

        for (line_name, line) in lines.iter() {
            for (route_name, route) in line.routes() {
                let id = RouteId::new(line_name.clone(), route_name.clone());
                for (from, to) in route.forward_segments() {
                    graph.add_edge(
                        nodes[&to],
                        nodes[&from],
                        Section {
                            route: id.clone(),
                            from,
                            to,
                        },
                    );
                }
            }
        }

        for pair in lines.walking_times().keys() {
            let (a, b) = pair.ends();
            graph.add_edge(
                nodes[b],
                nodes[a],
                Section {
                    route: RouteId::walking(),
                    from: a.clone(),
                    to: b.clone(),
                },
            );
            graph.add_edge(
                nodes[a],
                nodes[b],
                Section {
                    route: RouteId::walking(),
                    from: b.clone(),
                    to: a.clone(),
                },
            );
        }

        TransitGraph { graph, nodes }
    }

    pub fn node(&self, stop: &Stop) -> Option<NodeIndex> {
        self.nodes.get(stop).copied()
    }

    pub fn stop(&self, node: NodeIndex) -> &Stop {
        &self.graph[node]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub(crate) fn edges(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = EdgeReference<'_, Section>> {
        self.graph.edges(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DifTime;
    use petgraph::visit::EdgeRef;

    fn network() -> Lines {
        let mut lines = Lines::default();
        let route = lines.add_line("1").add_route("up");
        for s in ["a", "b", "c"] {
            route.add_stop(s);
        }
        lines.add_walking("c", "d", DifTime::from_minutes(3));
        lines
    }

    #[test]
    fn transit_edges_run_against_travel() {
        let lines = network();
        let graph = TransitGraph::build(&lines);
        assert_eq!(graph.node_count(), 4);
        // Two route sections (reversed) plus two walking directions.
        assert_eq!(graph.edge_count(), 4);

        let b = graph.node(&"b".to_string()).unwrap();
        let sections: Vec<&Section> = graph.edges(b).map(|e| e.weight()).collect();
        // The only edge out of b leads back to a, covering travel a -> b.
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].from, "a");
        assert_eq!(sections[0].to, "b");
        assert_eq!(
            graph.stop(graph.edges(b).next().unwrap().target()),
            "a"
        );
    }

    #[test]
    fn walking_edges_exist_both_ways() {
        let lines = network();
        let graph = TransitGraph::build(&lines);
        let c = graph.node(&"c".to_string()).unwrap();
        let d = graph.node(&"d".to_string()).unwrap();
        let walking_out_of = |n: NodeIndex| {
            graph
                .edges(n)
                .filter(|e| e.weight().route.is_walking())
                .count()
        };
        assert_eq!(walking_out_of(c), 1);
        assert_eq!(walking_out_of(d), 1);
    }
}
