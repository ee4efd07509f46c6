//! # netprobe core
//!
//! The probing engine: target resolution, TCP and HTTP probes, the bounded
//! worker pool, and the port scanner and batch orchestrator built on it.
//! Nothing in here prints; results are plain values from
//! [`netprobe_common::models`].

pub mod batch;
pub mod network;
pub mod pool;
pub mod probe;
pub mod resolver;
pub mod scanner;

#[cfg(test)]
mod testing;

pub use batch::BatchOrchestrator;
pub use probe::ProbeMode;
pub use resolver::TargetResolver;
pub use scanner::PortScanner;
