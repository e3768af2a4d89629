//! Logging shims.
//!
//! Hardware builds log through `defmt` over RTT, emulator builds through
//! `tracing`. Plain library builds (host unit tests) compile the calls away,
//! but still borrow the arguments so nothing is reported as unused.
//!
//! Format strings must stay within the syntax both backends accept: plain
//! `{}` placeholders only.

#![allow(unused_macros)]

macro_rules! log_event {
    ($defmt:ident, $tracing:ident, $($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$defmt!($($arg)*);
        #[cfg(all(not(feature = "defmt"), feature = "emulator"))]
        ::tracing::$tracing!($($arg)*);
        #[cfg(not(any(feature = "defmt", feature = "emulator")))]
        $crate::log::__discard!($($arg)*);
    }};
}

macro_rules! __discard {
    ($fmt:literal $(, $x:expr)* $(,)?) => {{
        let _ = ($(&$x,)*);
    }};
}

macro_rules! trace {
    ($($arg:tt)*) => { $crate::log::log_event!(trace, trace, $($arg)*) };
}

macro_rules! debug {
    ($($arg:tt)*) => { $crate::log::log_event!(debug, debug, $($arg)*) };
}

macro_rules! info {
    ($($arg:tt)*) => { $crate::log::log_event!(info, info, $($arg)*) };
}

macro_rules! warning {
    ($($arg:tt)*) => { $crate::log::log_event!(warn, warn, $($arg)*) };
}

macro_rules! error {
    ($($arg:tt)*) => { $crate::log::log_event!(error, error, $($arg)*) };
}

// `warn` would clash with the built-in lint attribute of the same name.
pub(crate) use {__discard, debug, error, info, log_event, trace, warning as warn};
