//! Logging shorthands used across the workspace.
//!
//! They forward to `tracing`; `success!` tags its events with the
//! `netprobe::success` target so the terminal formatter can mark them.

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::tracing::info!($($arg)+)
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::tracing::info!(target: "netprobe::success", $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::tracing::warn!($($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::tracing::error!($($arg)+)
    };
}
