//! Route identification.

use std::fmt;

use serde::Serialize;

use super::time::Time;

pub type LineName = String;
pub type LineNames = Vec<LineName>;
pub type RouteName = String;
pub type RouteNames = Vec<RouteName>;

/// Reserved line name for the pedestrian pseudo-route.
pub(crate) const WALKING_LINE: &str = "__walking__";
pub(crate) const WALKING_ROUTE: &str = "__";

/// Identifies one route of one line.
///
/// Two reserved values exist: [`RouteId::walking`] marks fixed-duration
/// pedestrian segments, and the default (empty) id marks "no route" — the
/// seed predecessor and the collapsed `ends` presentation.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RouteId {
    pub line: LineName,
    pub route: RouteName,
}

impl RouteId {
    pub fn new(line: impl Into<LineName>, route: impl Into<RouteName>) -> Self {
        RouteId {
            line: line.into(),
            route: route.into(),
        }
    }

    /// The pedestrian pseudo-route.
    pub fn walking() -> Self {
        RouteId::new(WALKING_LINE, WALKING_ROUTE)
    }

    pub fn is_walking(&self) -> bool {
        self.line == WALKING_LINE && self.route == WALKING_ROUTE
    }

    /// `true` for the "no route" value.
    pub fn is_none(&self) -> bool {
        self.line.is_empty() && self.route.is_empty()
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.line, self.route)
    }
}

/// A scheduled time paired with the route serving it.
///
/// Orders by time first, route id as tie-break; this is the order in which
/// the table builder enumerates its arrive-by seeds.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RouteTime {
    pub time: Time,
    pub route: RouteId,
}

impl RouteTime {
    pub fn new(route: RouteId, time: Time) -> Self {
        RouteTime { time, route }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_values_are_distinct() {
        let walking = RouteId::walking();
        assert!(walking.is_walking());
        assert!(!walking.is_none());
        assert!(RouteId::default().is_none());
        assert_ne!(walking, RouteId::new("12", "north"));
    }

    #[test]
    fn route_times_order_by_time_then_route() {
        let a = RouteTime::new(RouteId::new("b", "x"), Time::from_hm(8, 0));
        let b = RouteTime::new(RouteId::new("a", "x"), Time::from_hm(9, 0));
        let c = RouteTime::new(RouteId::new("b", "x"), Time::from_hm(9, 0));
        let mut v = vec![c.clone(), a.clone(), b.clone()];
        v.sort();
        assert_eq!(v, vec![a, b, c]);
    }
}
