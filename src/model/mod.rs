//! Static data model of the transit network.
//!
//! Built once by the loader, then read-only for the life of the process.

pub mod day;
pub mod line;
pub mod lines;
pub mod route;
pub mod route_id;
pub mod schedule;
pub mod stop;
pub mod time;
pub mod timetable;
pub mod walking;

pub use day::Day;
pub use line::Line;
pub use lines::Lines;
pub use route::Route;
pub use route_id::{LineName, LineNames, RouteId, RouteName, RouteNames, RouteTime};
pub use schedule::Schedule;
pub use stop::{Stop, StopDescriptions, StopSet, Stops};
pub use time::{DifTime, ParseTimeError, Time};
pub use timetable::{TimeLine, TimeTable};
pub use walking::{WalkingPair, WalkingTimes};
