//! Loading of network description files.

pub mod builder;
pub mod ini;

pub use builder::{lines_from_str, load_lines, load_network};
pub use ini::IniDoc;
