//! # netprobe-common
//!
//! Types shared by every crate in the workspace: the probe data model, the
//! error taxonomy, runtime configuration and the parsing of targets and port
//! selections.

pub mod config;
pub mod error;
pub mod macros;
pub mod models;
pub mod network;

pub use error::ProbeError;

#[doc(hidden)]
pub use tracing;
