//! Logging macros used throughout the crate.
//!
//! On the board (`board` feature) everything goes to defmt over RTT, in host tests the
//! messages are printed, otherwise the macros expand to nothing. Only use `{}` with
//! primitives and `&str` in format strings, they have to be valid for defmt and core::fmt.

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "board")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "board"), test))]
        println!("[INFO] {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "board")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "board"), test))]
        println!("[WARN] {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        #[cfg(feature = "board")]
        ::defmt::error!($($arg)*);

        #[cfg(all(not(feature = "board"), test))]
        println!("[ERROR] {}", format!($($arg)*));
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "board")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "board"), test))]
        println!("[DEBUG] {}", format!($($arg)*));
    }};
}
