//! End-to-end checks of the engine against real sockets on loopback.
#![cfg(test)]

mod util;

mod batch {
    mod integration;
}
mod probe {
    mod integration;
}
mod scan {
    mod integration;
}
