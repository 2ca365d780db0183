//! Stop naming.
//!
//! Stops are opaque string identifiers; everything the planner knows about a
//! stop (position on routes, platforms, walking links) lives elsewhere and is
//! keyed by the name.

use std::collections::{BTreeMap, BTreeSet};

pub type Stop = String;
pub type Stops = Vec<Stop>;
pub type StopSet = BTreeSet<Stop>;

/// Free-text descriptions from the `[stops]` section of a network file.
pub type StopDescriptions = BTreeMap<Stop, Vec<String>>;
