//! Logging shims.
//!
//! Hardware builds log through `defmt`, host builds through `tracing`, and a
//! build with neither feature compiles every call away. Format strings must
//! stay within the subset both backends accept: plain `{}` placeholders with
//! integer, `bool` or `&str` arguments.

macro_rules! voice_log {
    ($level:ident, $s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($s $(, $x)*);
        #[cfg(all(feature = "std", not(feature = "defmt")))]
        ::tracing::$level!($s $(, $x)*);
        #[cfg(not(any(feature = "defmt", feature = "std")))]
        {
            let _ = ($(&$x,)*);
        }
    }};
}

macro_rules! voice_trace {
    ($($t:tt)*) => { voice_log!(trace, $($t)*) };
}

macro_rules! voice_debug {
    ($($t:tt)*) => { voice_log!(debug, $($t)*) };
}

macro_rules! voice_info {
    ($($t:tt)*) => { voice_log!(info, $($t)*) };
}

macro_rules! voice_warn {
    ($($t:tt)*) => { voice_log!(warn, $($t)*) };
}
