//! Parsing of probe inputs: target strings and port selections.

pub mod ports;
pub mod range;
pub mod target;
