//! The full static network: named lines plus the walking-segment table.
//!
//! This is the immutable snapshot the routing graph is built from; after
//! construction nothing mutates it, so it is safely shared read-only across
//! concurrent queries.

use std::collections::BTreeMap;

use crate::error::Error;

use super::day::Day;
use super::line::Line;
use super::route_id::{LineName, LineNames, RouteId, RouteNames, RouteTime};
use super::stop::{Stop, StopSet};
use super::time::{DifTime, Time};
use super::timetable::TimeLine;
use super::walking::{walk_arrive_time, walk_leave_time, WalkingPair, WalkingTimes};

#[derive(Clone, Debug, Default)]
pub struct Lines {
    lines: BTreeMap<LineName, Line>,
    walking_times: WalkingTimes,
}

impl Lines {
    pub fn add_line(&mut self, name: impl Into<LineName>) -> &mut Line {
        self.lines.entry(name.into()).or_default()
    }

    pub fn remove_line(&mut self, name: &str) {
        self.lines.remove(name);
    }

    pub fn line(&self, name: &str) -> Result<&Line, Error> {
        self.lines
            .get(name)
            .ok_or_else(|| Error::UnknownLine(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LineName, &Line)> {
        self.lines.iter()
    }

    pub fn add_walking(
        &mut self,
        a: impl Into<Stop>,
        b: impl Into<Stop>,
        duration: DifTime,
    ) {
        self.walking_times.insert(WalkingPair::new(a, b), duration);
    }

    pub fn walking_times(&self) -> &WalkingTimes {
        &self.walking_times
    }

    pub fn line_names(&self) -> LineNames {
        self.lines.keys().cloned().collect()
    }

    pub fn route_names(&self, line: &str) -> Result<RouteNames, Error> {
        Ok(self.line(line)?.route_names())
    }

    /// Every stop of the network: served by a route or the end of a walking
    /// segment.
    pub fn stop_set(&self) -> StopSet {
        let mut stops: StopSet = self
            .lines
            .values()
            .flat_map(|line| line.stop_set())
            .collect();
        for pair in self.walking_times.keys() {
            let (a, b) = pair.ends();
            stops.insert(a.clone());
            stops.insert(b.clone());
        }
        stops
    }

    /// Platform label of `stop` on `route`; the literal `"walking"` for the
    /// pedestrian pseudo-route, empty when no label is configured.
    pub fn platform(&self, route: &RouteId, stop: &Stop) -> Result<String, Error> {
        if route.is_walking() {
            return Ok("walking".to_string());
        }
        Ok(self
            .line(&route.line)?
            .route(&route.route)?
            .platform(stop)
            .unwrap_or_default()
            .to_string())
    }

    pub fn route_description(&self, route: &RouteId) -> Result<String, Error> {
        if route.is_walking() {
            return Ok("(walking)".to_string());
        }
        if route.is_none() {
            return Ok(String::new());
        }
        Ok(self
            .line(&route.line)?
            .route(&route.route)?
            .description()
            .to_string())
    }

    /// Scheduled times of one route at `stop`.
    pub fn stop_times(&self, day: Day, route: &RouteId, stop: &Stop) -> Result<TimeLine, Error> {
        self.line(&route.line)?
            .route(&route.route)?
            .stop_times(day, stop)
    }

    /// Every `(time, route)` at which some route serves `stop`, ascending by
    /// time with the route id as tie-break.
    pub fn stop_times_by_route(&self, day: Day, stop: &Stop) -> Vec<RouteTime> {
        let mut times: Vec<RouteTime> = self
            .lines
            .iter()
            .flat_map(|(line_name, line)| {
                line.stop_times_by_route(day, stop)
                    .into_iter()
                    .map(|(route_name, time)| {
                        RouteTime::new(RouteId::new(line_name.clone(), route_name), time)
                    })
            })
            .collect();
        times.sort();
        times
    }

    /// Arrival at `to` when leaving `from` at `leave` via `route`.
    pub fn arrive_time(
        &self,
        day: Day,
        route: &RouteId,
        from: &Stop,
        leave: Time,
        to: &Stop,
    ) -> Result<Option<Time>, Error> {
        if route.is_walking() {
            return Ok(walk_arrive_time(&self.walking_times, from, leave, to));
        }
        self.line(&route.line)?
            .route(&route.route)?
            .arrive_time(day, from, leave, to)
    }

    /// Latest departure from `from` via `route` reaching `to` by `arrive`.
    pub fn leave_time(
        &self,
        day: Day,
        route: &RouteId,
        from: &Stop,
        to: &Stop,
        arrive: Time,
    ) -> Result<Option<Time>, Error> {
        if route.is_walking() {
            return Ok(walk_leave_time(&self.walking_times, from, to, arrive));
        }
        self.line(&route.line)?
            .route(&route.route)?
            .leave_time(day, from, to, arrive)
    }

    /// Per route, the latest scheduled time at `to` not later than `arrive`:
    /// the candidate arrive-by seeds of a plan query.
    pub fn bound_arrive_times_by_route(
        &self,
        day: Day,
        to: &Stop,
        arrive: Time,
    ) -> Vec<RouteTime> {
        self.lines
            .iter()
            .flat_map(|(line_name, line)| {
                line.bound_arrive_times_by_route(day, to, arrive)
                    .into_iter()
                    .map(|(route_name, time)| {
                        RouteTime::new(RouteId::new(line_name.clone(), route_name), time)
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(m: i32) -> Time {
        Time::from_minutes(m)
    }

    fn sample() -> Lines {
        let mut lines = Lines::default();
        let route = lines.add_line("12").add_route("north");
        for s in ["a", "b"] {
            route.add_stop(s);
        }
        route.add_platform("a", "2").unwrap();
        route.schedule_mut(Day::Friday).set_stop_count(2);
        route
            .schedule_mut(Day::Friday)
            .add_time_line(0, vec![t(100), t(115)])
            .unwrap();
        lines.add_walking("b", "c", DifTime::from_minutes(4));
        lines
    }

    #[test]
    fn stop_set_includes_walking_ends() {
        let lines = sample();
        let stop_set = lines.stop_set();
        let stops: Vec<&str> = stop_set.iter().map(String::as_str).collect();
        assert_eq!(stops, vec!["a", "b", "c"]);
    }

    #[test]
    fn walking_queries_bypass_timetables() {
        let lines = sample();
        let walking = RouteId::walking();
        let (b, c) = ("b".to_string(), "c".to_string());
        assert_eq!(
            lines
                .arrive_time(Day::Friday, &walking, &b, t(0), &c)
                .unwrap(),
            Some(t(4))
        );
        assert_eq!(
            lines
                .leave_time(Day::Friday, &walking, &c, &b, t(10))
                .unwrap(),
            Some(t(6))
        );
        assert_eq!(lines.platform(&walking, &b).unwrap(), "walking");
        assert_eq!(lines.route_description(&walking).unwrap(), "(walking)");
    }

    #[test]
    fn unknown_names_are_signalled() {
        let lines = sample();
        let bogus = RouteId::new("77", "south");
        assert!(matches!(
            lines.stop_times(Day::Friday, &bogus, &"a".to_string()),
            Err(Error::UnknownLine(_))
        ));
        assert!(lines.route_names("77").is_err());
    }

    #[test]
    fn seeds_are_sorted_by_time() {
        let mut lines = sample();
        let route = lines.add_line("03").add_route("east");
        for s in ["a", "b"] {
            route.add_stop(s);
        }
        route.schedule_mut(Day::Friday).set_stop_count(2);
        route
            .schedule_mut(Day::Friday)
            .add_time_line(0, vec![t(90), t(110)])
            .unwrap();

        let seeds = lines.stop_times_by_route(Day::Friday, &"b".to_string());
        let times: Vec<Time> = seeds.iter().map(|s| s.time).collect();
        assert_eq!(times, vec![t(110), t(115)]);
        assert_eq!(seeds[0].route, RouteId::new("03", "east"));
    }
}
