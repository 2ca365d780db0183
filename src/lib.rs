//! Itinerary planning over multi-line, multi-route transit networks with
//! day-of-week timetables and fixed-duration walking connections.
//!
//! The crate answers "what is the best way from A to B, arriving no later
//! than T" and "list every non-dominated journey to B across the day". The
//! static side ([`model`]) holds lines, routes, and sorted timetable
//! fragments; the dynamic side ([`routing`]) builds a multigraph with edges
//! stored against travel direction and runs a label-correcting search whose
//! per-vertex state is a map of best-time-per-incoming-route, so transfer
//! penalties that depend on the arriving route are modeled exactly.
//!
//! ```
//! use headway::prelude::*;
//!
//! let description = "
//! lines = 12
//! [12]
//! routes = north
//! [12.north]
//! description = Northbound
//! stops = a, b
//! timetables = t, t, t, t, t, t, t
//! [12.north.durations]
//! d = 20
//! [12.north.t]
//! 8:00 = d
//! ";
//! let (lines, _stops) = lines_from_str(description).unwrap();
//! let network = TransitNetwork::new(lines);
//! let journey = network
//!     .plan_from_arrive(
//!         Day::Monday,
//!         &"a".to_string(),
//!         &"b".to_string(),
//!         "8:30".parse().unwrap(),
//!         Details::Steps,
//!         DifTime::from_minutes(5),
//!     )
//!     .unwrap();
//! assert_eq!(journey.len(), 1);
//! assert_eq!(journey[0].to.time.to_string(), "08:20");
//! ```

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use model::{Day, DifTime, Lines, RouteId, RouteTime, Stop, Time};
pub use routing::{Details, Node, NodeList, RoutePoint, SearchError, Table, TransitNetwork};
