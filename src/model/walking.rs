//! Fixed-duration pedestrian connections between stops.

use std::collections::BTreeMap;

use super::stop::Stop;
use super::time::{DifTime, Time};

/// An undirected pair of stops, canonicalized with the lexicographically
/// smaller stop first so each connection has exactly one key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WalkingPair {
    a: Stop,
    b: Stop,
}

impl WalkingPair {
    pub fn new(x: impl Into<Stop>, y: impl Into<Stop>) -> Self {
        let (x, y) = (x.into(), y.into());
        if x <= y {
            WalkingPair { a: x, b: y }
        } else {
            WalkingPair { a: y, b: x }
        }
    }

    pub fn ends(&self) -> (&Stop, &Stop) {
        (&self.a, &self.b)
    }
}

/// Walking durations, keyed by canonicalized stop pair.
pub type WalkingTimes = BTreeMap<WalkingPair, DifTime>;

/// Arrival at `to` when leaving `from` on foot at `leave`; `None` when the
/// two stops have no walking connection.
pub fn walk_arrive_time(
    times: &WalkingTimes,
    from: &Stop,
    leave: Time,
    to: &Stop,
) -> Option<Time> {
    times
        .get(&WalkingPair::new(from.clone(), to.clone()))
        .map(|&d| leave + d)
}

/// Latest departure from `from` that reaches `to` on foot by `arrive`.
pub fn walk_leave_time(
    times: &WalkingTimes,
    from: &Stop,
    to: &Stop,
    arrive: Time,
) -> Option<Time> {
    times
        .get(&WalkingPair::new(from.clone(), to.clone()))
        .map(|&d| arrive - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_order_independent() {
        assert_eq!(WalkingPair::new("b", "a"), WalkingPair::new("a", "b"));
    }

    #[test]
    fn walk_times_are_symmetric() {
        let mut times = WalkingTimes::new();
        times.insert(WalkingPair::new("a", "b"), DifTime::from_minutes(7));

        let leave = Time::from_hm(10, 0);
        let a = "a".to_string();
        let b = "b".to_string();
        assert_eq!(
            walk_arrive_time(&times, &a, leave, &b),
            Some(Time::from_hm(10, 7))
        );
        assert_eq!(
            walk_leave_time(&times, &b, &a, Time::from_hm(10, 7)),
            Some(leave)
        );
        let c = "c".to_string();
        assert_eq!(walk_arrive_time(&times, &a, leave, &c), None);
    }
}
