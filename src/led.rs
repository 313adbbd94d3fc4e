//! Indicator output showing the direction of the last duty cycle change.
//!
//! The menu drives it [IndicatorLevel::Active] on an increase and
//! [IndicatorLevel::Inactive] on a decrease. [LedIndicator] maps the levels onto a
//! GPIO of the board.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum IndicatorLevel {
    /// the last change increased the duty cycle
    Active,

    /// the last change decreased the duty cycle, also the state after reset
    #[default]
    Inactive,
}

pub trait Indicator {
    fn set_level(&mut self, level: IndicatorLevel);
}

#[cfg(feature = "board")]
pub use self::board::LedIndicator;

#[cfg(feature = "board")]
mod board {
    use embassy_stm32::gpio::Output;

    use super::{Indicator, IndicatorLevel};

    /// A user led, `active_high` tells which pin level lights it.
    pub struct LedIndicator<'d> {
        led: Output<'d>,
        active_high: bool,
    }

    impl<'d> LedIndicator<'d> {
        pub fn new(led: Output<'d>, active_high: bool) -> Self {
            let mut indicator = LedIndicator { led, active_high };
            indicator.set_level(IndicatorLevel::default());
            indicator
        }
    }

    impl<'d> Indicator for LedIndicator<'d> {
        fn set_level(&mut self, level: IndicatorLevel) {
            let high = (level == IndicatorLevel::Active) == self.active_high;
            if high {
                self.led.set_high();
            } else {
                self.led.set_low();
            }
        }
    }
}
