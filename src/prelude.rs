//! Convenience re-exports for typical use.

pub use crate::error::Error;
pub use crate::loading::{lines_from_str, load_lines, load_network};
pub use crate::model::{Day, DifTime, Lines, RouteId, Stop, Time};
pub use crate::routing::{Details, Node, NodeList, Table, TransitNetwork};
