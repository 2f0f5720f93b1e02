//! Feature-gated logging macros.
//!
//! With the `tracing` feature these forward to the `tracing` crate; without
//! it they expand to nothing and their arguments are never evaluated, so only
//! pass values the surrounding code computes anyway.
//!
//! | Macro | Level | Events |
//! |-------|-------|--------|
//! | `trace_log!` | trace | factor cache misses, hold-back swaps |
//! | `debug_log!` | debug | gear fallbacks, shuffler construction |
//! | `warn_log!` | warn | invalid domain or shoe, falling back to 0 |
//!
//! ```bash
//! RUST_LOG=gearshuffle=trace cargo test --features tracing
//! ```

#[cfg(feature = "tracing")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        tracing::warn!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn_log {
    ($($arg:tt)*) => {};
}

pub(crate) use debug_log;
pub(crate) use trace_log;
pub(crate) use warn_log;
