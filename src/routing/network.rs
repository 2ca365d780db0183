//! The query facade: static network plus routing graph.

use log::debug;
use rayon::prelude::*;

use crate::error::Error;
use crate::model::{Day, DifTime, LineNames, Lines, RouteId, RouteNames, RouteTime, Stop, Time};

use super::engine::propagate;
use super::graph::TransitGraph;
use super::itinerary::{apply_details, extract, Details, NodeList};

/// A full-day itinerary table: one [`NodeList`] per non-dominated journey.
pub type Table = Vec<NodeList>;

/// An immutable transit network ready to answer itinerary queries.
///
/// Construction takes ownership of the [`Lines`] snapshot and builds the
/// routing graph once. All query state is local to each call, so a shared
/// reference can serve any number of concurrent queries.
#[derive(Debug)]
pub struct TransitNetwork {
    lines: Lines,
    graph: TransitGraph,
}

impl TransitNetwork {
    pub fn new(lines: Lines) -> Self {
        let graph = TransitGraph::build(&lines);
        debug!(
            "routing graph built: {} stops, {} sections",
            graph.node_count(),
            graph.edge_count()
        );
        TransitNetwork { lines, graph }
    }

    pub fn lines(&self) -> &Lines {
        &self.lines
    }

    pub fn line_names(&self) -> LineNames {
        self.lines.line_names()
    }

    pub fn route_names(&self, line: &str) -> Result<RouteNames, Error> {
        self.lines.route_names(line)
    }

    pub fn route_description(&self, route: &RouteId) -> Result<String, Error> {
        self.lines.route_description(route)
    }

    fn check_stop(&self, stop: &Stop) -> Result<(), Error> {
        if self.graph.node(stop).is_none() {
            return Err(Error::UnknownStop(stop.clone()));
        }
        Ok(())
    }

    /// The best journey from `from` to `to` arriving no later than `arrive`.
    ///
    /// Candidate seeds are, per route, the latest scheduled arrival at the
    /// destination within the bound; among the per-seed journeys the latest
    /// departure wins, tie-broken by fewer hops. An empty list is the valid
    /// "no connection by that time" answer.
    pub fn plan_from_arrive(
        &self,
        day: Day,
        from: &Stop,
        to: &Stop,
        arrive: Time,
        details: Details,
        delay: DifTime,
    ) -> Result<NodeList, Error> {
        self.check_stop(from)?;
        self.check_stop(to)?;

        let mut best = NodeList::new();
        let mut best_leave = Time::MINUS_INF;
        for seed in self.lines.bound_arrive_times_by_route(day, to, arrive) {
            let journey = self.plan_with_seed(day, from, to, &seed, delay)?;
            let Some(first) = journey.first() else {
                continue;
            };
            let leave = first.from.time;
            if leave > best_leave || (leave == best_leave && journey.len() < best.len()) {
                best = journey;
                best_leave = leave;
            }
        }
        Ok(apply_details(best, details))
    }

    /// Every non-dominated journey to `to` across the whole service day.
    ///
    /// One arrival-bounded query per `(time, route)` at which the destination
    /// is served; the queries are independent over the immutable graph and
    /// run in parallel. Results are sorted by (arrival ascending, departure
    /// descending) and adjacent entries sharing an arrival or a departure are
    /// dominated and dropped, leaving a Pareto frontier over
    /// (departure, arrival).
    pub fn table(
        &self,
        day: Day,
        from: &Stop,
        to: &Stop,
        details: Details,
        delay: DifTime,
    ) -> Result<Table, Error> {
        self.check_stop(from)?;
        self.check_stop(to)?;

        let seeds = self.lines.stop_times_by_route(day, to);
        debug!("table query: {} arrive-by seeds at {to}", seeds.len());

        let journeys: Result<Vec<NodeList>, Error> = seeds
            .par_iter()
            .map(|seed| self.plan_with_seed(day, from, to, seed, delay))
            .collect();

        let mut table: Table = journeys?
            .into_iter()
            .filter(|journey| !journey.is_empty())
            .collect();

        // sort_by is stable: journeys with equal keys keep the seed
        // enumeration order, which the dedup rule below relies on.
        table.sort_by(|a, b| {
            let arrive = a.last().map(|n| n.to.time).cmp(&b.last().map(|n| n.to.time));
            arrive.then_with(|| {
                b.first()
                    .map(|n| n.from.time)
                    .cmp(&a.first().map(|n| n.from.time))
            })
        });
        table.dedup_by(|a, b| {
            a.last().map(|n| n.to.time) == b.last().map(|n| n.to.time)
                || a.first().map(|n| n.from.time) == b.first().map(|n| n.from.time)
        });

        Ok(table
            .into_iter()
            .map(|journey| apply_details(journey, details))
            .collect())
    }

    /// One arrival-bounded query: propagate from the seed, then extract the
    /// hop list at `from`. Always returns step-level hops.
    fn plan_with_seed(
        &self,
        day: Day,
        from: &Stop,
        to: &Stop,
        seed: &RouteTime,
        delay: DifTime,
    ) -> Result<NodeList, Error> {
        let labels = propagate(&self.lines, &self.graph, day, to, seed, delay)?;
        extract(&self.lines, &self.graph, &labels, day, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: i32, m: i32) -> Time {
        Time::from_hm(h, m)
    }

    /// a --R1--> b at 08:00->08:20, a --R2--> b at 08:10->08:25.
    fn parallel_routes() -> TransitNetwork {
        let mut lines = Lines::default();
        let r1 = lines.add_line("R1").add_route("main");
        r1.add_stop("a");
        r1.add_stop("b");
        r1.schedule_mut(Day::Monday).set_stop_count(2);
        r1.schedule_mut(Day::Monday)
            .add_time_line(0, vec![t(8, 0), t(8, 20)])
            .unwrap();
        let r2 = lines.add_line("R2").add_route("main");
        r2.add_stop("a");
        r2.add_stop("b");
        r2.schedule_mut(Day::Monday).set_stop_count(2);
        r2.schedule_mut(Day::Monday)
            .add_time_line(0, vec![t(8, 10), t(8, 25)])
            .unwrap();
        TransitNetwork::new(lines)
    }

    #[test]
    fn latest_departure_wins_within_bound() {
        let network = parallel_routes();
        let journey = network
            .plan_from_arrive(
                Day::Monday,
                &"a".to_string(),
                &"b".to_string(),
                t(8, 30),
                Details::Steps,
                DifTime::from_minutes(5),
            )
            .unwrap();
        assert_eq!(journey.len(), 1);
        assert_eq!(journey[0].route, RouteId::new("R2", "main"));
        assert_eq!(journey[0].from.time, t(8, 10));
        assert_eq!(journey[0].to.time, t(8, 25));
    }

    #[test]
    fn tighter_bound_falls_back_to_earlier_route() {
        let network = parallel_routes();
        let journey = network
            .plan_from_arrive(
                Day::Monday,
                &"a".to_string(),
                &"b".to_string(),
                t(8, 21),
                Details::Steps,
                DifTime::from_minutes(5),
            )
            .unwrap();
        assert_eq!(journey.len(), 1);
        assert_eq!(journey[0].route, RouteId::new("R1", "main"));
    }

    #[test]
    fn unknown_stops_are_rejected_up_front() {
        let network = parallel_routes();
        let err = network
            .plan_from_arrive(
                Day::Monday,
                &"a".to_string(),
                &"nowhere".to_string(),
                t(9, 0),
                Details::Steps,
                DifTime::ZERO,
            )
            .unwrap_err();
        assert!(matches!(err, Error::UnknownStop(_)));
    }

    #[test]
    fn table_lists_both_departures() {
        let network = parallel_routes();
        let table = network
            .table(
                Day::Monday,
                &"a".to_string(),
                &"b".to_string(),
                Details::Ends,
                DifTime::from_minutes(5),
            )
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0][0].to.time, t(8, 20));
        assert_eq!(table[1][0].to.time, t(8, 25));
        assert!(table[0][0].route.is_none());
    }
}
