//! Per-weekday schedule of one route, stored as stopping-pattern fragments.
//!
//! A route's trips need not all cover the same stops (express patterns skip
//! some), so a schedule holds one sorted [`TimeTable`] per
//! `(start index, span)` sub-range of the route. A stop index is covered by a
//! fragment when it falls in `[start, start + span)`; queries scan the
//! covering fragments and reduce.

use std::collections::BTreeMap;

use crate::error::Error;

use super::time::Time;
use super::timetable::{TimeLine, TimeTable};

#[derive(Clone, Debug, Default)]
pub struct Schedule {
    stop_count: usize,
    fragments: BTreeMap<(usize, usize), TimeTable>,
}

impl Schedule {
    pub fn set_stop_count(&mut self, stop_count: usize) {
        self.stop_count = stop_count;
    }

    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.values().all(TimeTable::is_empty)
    }

    /// Adds one trip covering the stops `[from_index, from_index + len)`.
    pub fn add_time_line(&mut self, from_index: usize, line: TimeLine) -> Result<(), Error> {
        let span = line.len();
        if from_index + span > self.stop_count {
            return Err(Error::StopIndexOutOfRange {
                index: from_index + span,
                stop_count: self.stop_count,
            });
        }
        self.fragments
            .entry((from_index, span))
            .or_insert_with(|| TimeTable::new(span))
            .add_time_line(line)
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.stop_count {
            return Err(Error::StopIndexOutOfRange {
                index,
                stop_count: self.stop_count,
            });
        }
        Ok(())
    }

    /// Fragments covering `index`, with the index rebased to the fragment.
    fn covering(&self, index: usize) -> impl Iterator<Item = (&TimeTable, usize)> {
        self.fragments
            .iter()
            .filter(move |((start, span), _)| (*start..start + span).contains(&index))
            .map(move |((start, _), table)| (table, index - start))
    }

    /// All scheduled times at one stop across every covering fragment,
    /// sorted and deduplicated.
    pub fn stop_times(&self, index: usize) -> Result<TimeLine, Error> {
        self.check_index(index)?;
        let mut times: Vec<Time> = self
            .covering(index)
            .flat_map(|(table, local)| table.stop_times(local))
            .collect();
        times.sort_unstable();
        times.dedup();
        Ok(times)
    }

    /// Arrival at `to_index` for the earliest trip leaving `from_index` at or
    /// after `leave`. The smallest candidate across stopping patterns wins;
    /// `None` means no trip matches.
    pub fn arrive_time(
        &self,
        from_index: usize,
        leave: Time,
        to_index: usize,
    ) -> Result<Option<Time>, Error> {
        self.check_index(from_index)?;
        self.check_index(to_index)?;
        Ok(self
            .fragments
            .iter()
            .filter_map(|((start, span), table)| {
                let range = *start..start + span;
                (range.contains(&from_index) && range.contains(&to_index)).then(|| {
                    table
                        .not_less_than(from_index - start, leave)
                        .map(|line| line[to_index - start])
                })?
            })
            .min())
    }

    /// Latest departure from `from_index` of a trip reaching `to_index` no
    /// later than `arrive`. The largest candidate across stopping patterns
    /// wins; `None` means no trip matches.
    pub fn leave_time(
        &self,
        from_index: usize,
        to_index: usize,
        arrive: Time,
    ) -> Result<Option<Time>, Error> {
        self.check_index(from_index)?;
        self.check_index(to_index)?;
        Ok(self
            .fragments
            .iter()
            .filter_map(|((start, span), table)| {
                let range = *start..start + span;
                (range.contains(&from_index) && range.contains(&to_index)).then(|| {
                    table
                        .not_greater_than(to_index - start, arrive)
                        .map(|line| line[from_index - start])
                })?
            })
            .max())
    }

    /// Latest scheduled time at `to_index` that is `<= arrive`.
    pub fn bound_arrive_time(
        &self,
        to_index: usize,
        arrive: Time,
    ) -> Result<Option<Time>, Error> {
        self.check_index(to_index)?;
        Ok(self
            .covering(to_index)
            .filter_map(|(table, local)| {
                table.not_greater_than(local, arrive).map(|line| line[local])
            })
            .max())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(m: i32) -> Time {
        Time::from_minutes(m)
    }

    fn line(ms: &[i32]) -> TimeLine {
        ms.iter().map(|&m| t(m)).collect()
    }

    // Local pattern over all five stops, express pattern over the middle
    // three starting at index 1.
    fn sample() -> Schedule {
        let mut s = Schedule::default();
        s.set_stop_count(5);
        s.add_time_line(0, line(&[0, 10, 20, 30, 40])).unwrap();
        s.add_time_line(0, line(&[60, 70, 80, 90, 100])).unwrap();
        s.add_time_line(1, line(&[15, 18, 21])).unwrap();
        s
    }

    #[test]
    fn rejects_out_of_range() {
        let mut s = Schedule::default();
        s.set_stop_count(3);
        assert!(s.add_time_line(2, line(&[0, 5])).is_err());
        assert!(s.stop_times(3).is_err());
        assert!(s.arrive_time(0, t(0), 3).is_err());
    }

    #[test]
    fn stop_times_union_covering_fragments() {
        let s = sample();
        assert_eq!(s.stop_times(0).unwrap(), line(&[0, 60]));
        assert_eq!(s.stop_times(2).unwrap(), line(&[18, 20, 80]));
        assert_eq!(s.stop_times(4).unwrap(), line(&[40, 100]));
    }

    #[test]
    fn arrive_time_prefers_earliest_pattern() {
        let s = sample();
        // Leaving stop 1 at 12: express arrives stop 3 at 21, local at 90.
        assert_eq!(s.arrive_time(1, t(12), 3).unwrap(), Some(t(21)));
        // Leaving stop 0 excludes the express fragment entirely.
        assert_eq!(s.arrive_time(0, t(5), 4).unwrap(), Some(t(100)));
        assert_eq!(s.arrive_time(0, t(61), 4).unwrap(), None);
    }

    #[test]
    fn leave_time_prefers_latest_pattern() {
        let s = sample();
        // Arriving at stop 3 by 25: the express departing stop 1 at 15 beats
        // the local departing at 10.
        assert_eq!(s.leave_time(1, 3, t(25)).unwrap(), Some(t(15)));
        // From stop 0 only the local pattern applies.
        assert_eq!(s.leave_time(0, 3, t(35)).unwrap(), Some(t(0)));
        assert_eq!(s.leave_time(1, 3, t(5)).unwrap(), None);
    }

    #[test]
    fn bound_arrive_time_is_latest_not_greater() {
        let s = sample();
        assert_eq!(s.bound_arrive_time(3, t(95)).unwrap(), Some(t(90)));
        assert_eq!(s.bound_arrive_time(3, t(30)).unwrap(), Some(t(30)));
        assert_eq!(s.bound_arrive_time(3, t(10)).unwrap(), None);
        // Express times count at covered stops.
        assert_eq!(s.bound_arrive_time(2, t(19)).unwrap(), Some(t(18)));
    }

    #[test]
    fn empty_day_answers_none() {
        let mut s = Schedule::default();
        s.set_stop_count(4);
        assert!(s.is_empty());
        assert_eq!(s.arrive_time(0, t(0), 3).unwrap(), None);
        assert_eq!(s.leave_time(0, 3, t(100)).unwrap(), None);
        assert_eq!(s.bound_arrive_time(3, t(100)).unwrap(), None);
    }
}
