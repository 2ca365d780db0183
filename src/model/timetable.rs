//! Sorted trip timetables with nearest-time lookup.
//!
//! A [`TimeTable`] holds the trips of one stopping pattern as rows of
//! per-stop times. Rows are kept lexicographically sorted at insertion time,
//! which (for non-overtaking trips) keeps every stop column sorted as well,
//! so "nearest scheduled time" queries are a binary search over a column.

use crate::error::Error;

use super::time::Time;

/// One trip instance: scheduled times in stop order, one entry per stop of
/// the covered range. Weakly increasing for a well-formed trip.
pub type TimeLine = Vec<Time>;

#[derive(Clone, Debug, Default)]
pub struct TimeTable {
    time_lines: Vec<TimeLine>,
    stop_count: usize,
}

impl TimeTable {
    pub fn new(stop_count: usize) -> Self {
        TimeTable {
            time_lines: Vec::new(),
            stop_count,
        }
    }

    pub fn stop_count(&self) -> usize {
        self.stop_count
    }

    pub fn time_line_count(&self) -> usize {
        self.time_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time_lines.is_empty()
    }

    pub fn time_lines(&self) -> &[TimeLine] {
        &self.time_lines
    }

    /// Inserts a trip row at its sorted position.
    ///
    /// Fails when the row length does not match the configured stop count;
    /// that is a defect in the data being loaded, never a runtime condition.
    pub fn add_time_line(&mut self, line: TimeLine) -> Result<(), Error> {
        if line.len() != self.stop_count {
            return Err(Error::TimeLineLength {
                expected: self.stop_count,
                got: line.len(),
            });
        }
        let pos = self.time_lines.partition_point(|l| *l <= line);
        self.time_lines.insert(pos, line);
        Ok(())
    }

    /// The trip whose time at `stop_index` is the smallest value `>= time`:
    /// the earliest trip still catchable when ready to leave at `time`.
    ///
    /// # Panics
    ///
    /// Panics if `stop_index` is outside the table's stop range; callers
    /// index through [`Schedule`](super::schedule::Schedule), which validates.
    pub fn not_less_than(&self, stop_index: usize, time: Time) -> Option<&TimeLine> {
        let pos = self
            .time_lines
            .partition_point(|l| l[stop_index] < time);
        self.time_lines.get(pos)
    }

    /// The trip whose time at `stop_index` is the largest value `<= time`:
    /// the latest trip that still makes `time`.
    ///
    /// # Panics
    ///
    /// Panics if `stop_index` is outside the table's stop range.
    pub fn not_greater_than(&self, stop_index: usize, time: Time) -> Option<&TimeLine> {
        let pos = self
            .time_lines
            .partition_point(|l| l[stop_index] <= time);
        pos.checked_sub(1).map(|i| &self.time_lines[i])
    }

    /// The full column of scheduled times at one stop, in trip order.
    pub fn stop_times(&self, stop_index: usize) -> Vec<Time> {
        self.time_lines.iter().map(|l| l[stop_index]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn table(rows: &[&[i32]]) -> TimeTable {
        let mut tt = TimeTable::new(rows[0].len());
        for row in rows {
            tt.add_time_line(row.iter().map(|&m| Time::from_minutes(m)).collect())
                .unwrap();
        }
        tt
    }

    #[test]
    fn rejects_wrong_length() {
        let mut tt = TimeTable::new(3);
        let err = tt
            .add_time_line(vec![Time::from_minutes(0)])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::TimeLineLength {
                expected: 3,
                got: 1
            }
        ));
    }

    #[test]
    fn insertion_keeps_rows_sorted() {
        let tt = table(&[&[30, 50], &[10, 25], &[20, 40]]);
        let firsts: Vec<i32> = tt.stop_times(0).iter().map(|t| t.minutes()).collect();
        assert_eq!(firsts, vec![10, 20, 30]);
    }

    #[test]
    fn nearest_time_bounds() {
        let tt = table(&[&[10, 25], &[20, 40], &[30, 50]]);
        let t = |m| Time::from_minutes(m);

        assert_eq!(tt.not_less_than(0, t(15)).unwrap()[0], t(20));
        assert_eq!(tt.not_less_than(0, t(20)).unwrap()[0], t(20));
        assert!(tt.not_less_than(0, t(31)).is_none());

        assert_eq!(tt.not_greater_than(1, t(45)).unwrap()[1], t(40));
        assert_eq!(tt.not_greater_than(1, t(40)).unwrap()[1], t(40));
        assert!(tt.not_greater_than(1, t(9)).is_none());
    }

    proptest! {
        // Binary search must agree with a brute-force scan of the same rows,
        // at every stop column and at every boundary-adjacent probe value.
        #[test]
        fn lookup_matches_linear_scan(
            starts in prop::collection::vec(0i32..600, 1..20),
            gap in 1i32..60,
            probe in -10i32..700,
        ) {
            let mut tt = TimeTable::new(2);
            for &s in &starts {
                tt.add_time_line(vec![
                    Time::from_minutes(s),
                    Time::from_minutes(s + gap),
                ]).unwrap();
            }
            for stop_index in 0..2 {
                let t = Time::from_minutes(probe);
                let ge = tt
                    .time_lines()
                    .iter()
                    .filter(|l| l[stop_index] >= t)
                    .min_by_key(|l| l[stop_index])
                    .map(|l| l[stop_index]);
                let le = tt
                    .time_lines()
                    .iter()
                    .filter(|l| l[stop_index] <= t)
                    .max_by_key(|l| l[stop_index])
                    .map(|l| l[stop_index]);
                prop_assert_eq!(
                    tt.not_less_than(stop_index, t).map(|l| l[stop_index]),
                    ge
                );
                prop_assert_eq!(
                    tt.not_greater_than(stop_index, t).map(|l| l[stop_index]),
                    le
                );
            }
        }
    }
}
