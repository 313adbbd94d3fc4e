//! Error types of the device boundary.
//!
//! An invalid menu selection is not an error, the controller answers it on the console
//! and keeps going. Pwm and indicator writes are fire-and-forget register updates, so
//! only the serial console can fail.

use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum Error {
    /// the serial console failed to transmit or receive
    Console(ConsoleError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum ConsoleError {
    /// transmission did not complete
    Write,
    /// stop bit missing on a received byte
    Framing,
    /// noise detected on the rx line
    Noise,
    /// a byte arrived before the previous one was read
    Overrun,
    /// parity check failed
    Parity,
    /// any other receive failure reported by the driver
    Read,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Console(e) => write!(f, "console error: {}", e),
        }
    }
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConsoleError::Write => "write failed",
            ConsoleError::Framing => "framing error",
            ConsoleError::Noise => "noise on rx line",
            ConsoleError::Overrun => "rx overrun",
            ConsoleError::Parity => "parity error",
            ConsoleError::Read => "read failed",
        };
        f.write_str(msg)
    }
}

impl From<ConsoleError> for Error {
    fn from(err: ConsoleError) -> Self {
        Error::Console(err)
    }
}
