//! Tracing for the innermost loops, for example the simulation of every input
//! symbol, which is too verbose even for the trace log level. Only emits
//! messages when the `refa_debug-trace` feature is enabled.

/// Forwards to [log::trace] when the `refa_debug-trace` feature is enabled,
/// and expands to nothing otherwise.
#[macro_export]
#[cfg(feature = "refa_debug-trace")]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        {
            log::trace!($($arg)*);
        }
    };
}

#[macro_export]
#[cfg(not(feature = "refa_debug-trace"))]
macro_rules! debug_trace {
    ($($arg:tt)*) => {{}};
}
