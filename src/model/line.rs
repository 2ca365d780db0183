//! A named collection of routes.

use std::collections::BTreeMap;

use crate::error::Error;

use super::day::Day;
use super::route::Route;
use super::route_id::{RouteName, RouteNames};
use super::stop::{Stop, StopSet};
use super::time::Time;
use super::timetable::TimeLine;

#[derive(Clone, Debug, Default)]
pub struct Line {
    routes: BTreeMap<RouteName, Route>,
}

impl Line {
    pub fn add_route(&mut self, name: impl Into<RouteName>) -> &mut Route {
        self.routes.entry(name.into()).or_default()
    }

    pub fn remove_route(&mut self, name: &str) {
        self.routes.remove(name);
    }

    pub fn route(&self, name: &str) -> Result<&Route, Error> {
        self.routes
            .get(name)
            .ok_or_else(|| Error::UnknownRoute(name.to_string()))
    }

    pub fn route_names(&self) -> RouteNames {
        self.routes.keys().cloned().collect()
    }

    pub fn routes(&self) -> impl Iterator<Item = (&RouteName, &Route)> {
        self.routes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Every stop served by any route of this line.
    pub fn stop_set(&self) -> StopSet {
        self.routes
            .values()
            .flat_map(|route| route.stops().iter().cloned())
            .collect()
    }

    /// All times any route of this line serves `stop`, sorted and
    /// deduplicated. Routes not serving the stop contribute nothing.
    pub fn stop_times(&self, day: Day, stop: &Stop) -> TimeLine {
        let mut times: Vec<Time> = self
            .routes
            .values()
            .filter_map(|route| route.stop_times(day, stop).ok())
            .flatten()
            .collect();
        times.sort_unstable();
        times.dedup();
        times
    }

    /// Times at `stop` tagged with the route that serves them.
    pub fn stop_times_by_route(&self, day: Day, stop: &Stop) -> Vec<(RouteName, Time)> {
        self.routes
            .iter()
            .filter_map(|(name, route)| {
                route
                    .stop_times(day, stop)
                    .ok()
                    .map(|times| (name, times))
            })
            .flat_map(|(name, times)| times.into_iter().map(|t| (name.clone(), t)))
            .collect()
    }

    /// Per route, the latest scheduled time at `to` not later than `arrive`.
    pub fn bound_arrive_times_by_route(
        &self,
        day: Day,
        to: &Stop,
        arrive: Time,
    ) -> Vec<(RouteName, Time)> {
        self.routes
            .iter()
            .filter_map(|(name, route)| {
                route
                    .bound_arrive_time(day, to, arrive)
                    .ok()
                    .flatten()
                    .map(|t| (name.clone(), t))
            })
            .collect()
    }
}
