//! Arrival-bounded journey search.
//!
//! The graph stores edges against travel direction, the engine corrects
//! route-keyed labels to a fixed point, and the itinerary module turns
//! converged labels into concrete hop lists.

pub mod engine;
pub mod graph;
pub mod itinerary;
pub mod label;
pub mod network;

pub use engine::SearchError;
pub use graph::{Section, TransitGraph};
pub use itinerary::{Details, Node, NodeList, RoutePoint, to_json_string};
pub use label::{RouteLabel, Step};
pub use network::{Table, TransitNetwork};
