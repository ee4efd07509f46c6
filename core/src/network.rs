//! Single-connection probes: the raw TCP handshake and the HTTP request.

pub mod http;
pub mod tcp;
