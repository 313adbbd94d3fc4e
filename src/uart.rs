//! The serial console the menu talks through.
//!
//! Reading a byte is the only point where the controller waits, writes are handed to
//! the driver and complete before the next read.

use crate::error::Result;

pub trait Console {
    /// Sends `text` as is, no framing is added.
    async fn write_text(&mut self, text: &[u8]) -> Result<()>;

    /// Waits until one byte has been received.
    async fn read_char(&mut self) -> Result<u8>;
}

#[cfg(feature = "board")]
pub use self::board::{console_config, UartConsole};

/// Sets up USART3 on the ST-LINK virtual com port of the nucleo board (PD9 rx, PD8 tx).
#[cfg(feature = "board")]
#[macro_export]
macro_rules! setup_usart_developer_console {
    ($p:ident, $irqs:ident, $config:expr) => {
        // setup usart
        embassy_stm32::usart::Uart::new(
            $p.USART3,
            $p.PD9, // rx
            $p.PD8, // tx
            $irqs,
            $p.DMA1_CH4, // tx
            $p.DMA1_CH1, // rx
            $config,
        )
    };
}

#[cfg(feature = "board")]
mod board {
    use embassy_stm32::mode::Async;
    use embassy_stm32::usart::{self, Config, DataBits, Parity, StopBits, Uart};

    use super::Console;
    use crate::config::CONSOLE_BAUDRATE;
    use crate::error::{ConsoleError, Result};

    /// Line settings of the console: 9600 baud, 8N1.
    pub fn console_config() -> Config {
        let mut config = Config::default();
        config.baudrate = CONSOLE_BAUDRATE;
        config.data_bits = DataBits::DataBits8;
        config.stop_bits = StopBits::STOP1;
        config.parity = Parity::ParityNone;
        config
    }

    pub struct UartConsole {
        usart: Uart<'static, Async>,
    }

    impl UartConsole {
        pub fn new(usart: Uart<'static, Async>) -> Self {
            UartConsole { usart }
        }
    }

    impl Console for UartConsole {
        async fn write_text(&mut self, text: &[u8]) -> Result<()> {
            self.usart.write(text).await.map_err(|err| {
                log_error!("USART write failed: {}", err);
                ConsoleError::Write.into()
            })
        }

        async fn read_char(&mut self) -> Result<u8> {
            let mut buf: [u8; 1] = [0; 1];
            match self.usart.read(&mut buf).await {
                Ok(()) => Ok(buf[0]),
                Err(err) => {
                    log_warn!("USART related error, byte dropped: {}", err);
                    Err(map_rx_error(err).into())
                }
            }
        }
    }

    fn map_rx_error(err: usart::Error) -> ConsoleError {
        match err {
            usart::Error::Framing => ConsoleError::Framing,
            usart::Error::Noise => ConsoleError::Noise,
            usart::Error::Overrun => ConsoleError::Overrun,
            usart::Error::Parity => ConsoleError::Parity,
            _ => ConsoleError::Read,
        }
    }
}
