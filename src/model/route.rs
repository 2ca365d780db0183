//! One concrete stop-ordered path of a line, with its seven schedules.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::error::Error;

use super::day::Day;
use super::schedule::Schedule;
use super::stop::{Stop, Stops};
use super::time::Time;
use super::timetable::TimeLine;

/// A consecutive stop pair in travel order.
pub type Segment = (Stop, Stop);
pub type Segments = Vec<Segment>;

#[derive(Clone, Debug, Default)]
pub struct Route {
    description: String,
    stops: Stops,
    platforms: HashMap<Stop, String>,
    schedules: [Schedule; 7],
}

impl Route {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Appends a stop. Identical adjacent stops are collapsed so the stop
    /// sequence invariant holds by construction.
    pub fn add_stop(&mut self, stop: impl Into<Stop>) {
        let stop = stop.into();
        if self.stops.last() != Some(&stop) {
            self.stops.push(stop);
        }
    }

    pub fn add_platform(
        &mut self,
        stop: impl AsRef<str>,
        platform: impl Into<String>,
    ) -> Result<(), Error> {
        let stop = stop.as_ref();
        if !self.stops.iter().any(|s| s == stop) {
            return Err(Error::UnknownStop(stop.to_string()));
        }
        self.platforms.insert(stop.to_string(), platform.into());
        Ok(())
    }

    pub fn stops(&self) -> &Stops {
        &self.stops
    }

    /// Position of a stop on this route (first occurrence).
    pub fn stop_index(&self, stop: &str) -> Option<usize> {
        self.stops.iter().position(|s| s == stop)
    }

    pub fn platform(&self, stop: &str) -> Option<&str> {
        self.platforms.get(stop).map(String::as_str)
    }

    pub fn schedule(&self, day: Day) -> &Schedule {
        &self.schedules[day.index()]
    }

    pub fn schedule_mut(&mut self, day: Day) -> &mut Schedule {
        &mut self.schedules[day.index()]
    }

    /// Consecutive stop pairs in travel order.
    pub fn forward_segments(&self) -> Segments {
        self.stops
            .iter()
            .cloned()
            .tuple_windows()
            .collect()
    }

    fn index_of(&self, stop: &str) -> Result<usize, Error> {
        self.stop_index(stop)
            .ok_or_else(|| Error::UnknownStop(stop.to_string()))
    }

    pub fn stop_times(&self, day: Day, stop: &str) -> Result<TimeLine, Error> {
        self.schedule(day).stop_times(self.index_of(stop)?)
    }

    pub fn arrive_time(
        &self,
        day: Day,
        from: &str,
        leave: Time,
        to: &str,
    ) -> Result<Option<Time>, Error> {
        self.schedule(day)
            .arrive_time(self.index_of(from)?, leave, self.index_of(to)?)
    }

    pub fn leave_time(
        &self,
        day: Day,
        from: &str,
        to: &str,
        arrive: Time,
    ) -> Result<Option<Time>, Error> {
        self.schedule(day)
            .leave_time(self.index_of(from)?, self.index_of(to)?, arrive)
    }

    pub fn bound_arrive_time(
        &self,
        day: Day,
        to: &str,
        arrive: Time,
    ) -> Result<Option<Time>, Error> {
        self.schedule(day)
            .bound_arrive_time(self.index_of(to)?, arrive)
    }
}
