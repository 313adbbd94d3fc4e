//! Compile time configuration of the generators and the menu knobs.

use crate::pwm::{ChannelConfig, CompareRange, OutputPolarity};
use crate::settings::{DutyCycle, PeriodTicks};

pub const INITIAL_PERIOD: PeriodTicks = PeriodTicks::new(850);
pub const PERIOD_MIN: PeriodTicks = PeriodTicks::new(500);
pub const PERIOD_MAX: PeriodTicks = PeriodTicks::new(1500);
pub const PERIOD_STEP: u16 = 50;

// duty values are given in thousandths
pub const INITIAL_DUTY: DutyCycle = DutyCycle::from_thousandths(500);
pub const DUTY_MIN: DutyCycle = DutyCycle::from_thousandths(1);
pub const DUTY_MAX: DutyCycle = DutyCycle::from_thousandths(900);
pub const DUTY_STEP: u16 = 5;

/// 850 ticks measured as ~56 kHz on the reference board, the readout multiplies with this.
pub const FREQUENCY_READOUT_SCALE: u32 = 66;

/// 8 data bits, one stop bit, no parity
pub const CONSOLE_BAUDRATE: u32 = 9600;

pub const GENERATOR_1: ChannelConfig = ChannelConfig {
    name: "gen1",
    period: 2000,
    compare_a: 50,
    compare_b: 1950,
    range_a: CompareRange { min: 50, max: 1950 },
    range_b: CompareRange { min: 50, max: 1950 },
    polarity_a: OutputPolarity::ActiveHigh,
    polarity_b: OutputPolarity::ActiveHigh,
};

pub const GENERATOR_2: ChannelConfig = ChannelConfig {
    name: "gen2",
    period: 2000,
    compare_a: 50,
    compare_b: 50,
    range_a: CompareRange { min: 50, max: 1950 },
    range_b: CompareRange { min: 50, max: 1950 },
    polarity_a: OutputPolarity::ActiveHigh,
    polarity_b: OutputPolarity::ActiveLow,
};

/// The generator driven by the menu, a complementary pair at 50%.
pub const GENERATOR_MENU: ChannelConfig = ChannelConfig {
    name: "gen-menu",
    period: INITIAL_PERIOD.ticks(),
    compare_a: 425,
    compare_b: 425,
    range_a: CompareRange { min: 425, max: 425 },
    range_b: CompareRange { min: 425, max: 425 },
    polarity_a: OutputPolarity::ActiveHigh,
    polarity_b: OutputPolarity::ActiveLow,
};
