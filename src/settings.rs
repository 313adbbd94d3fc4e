//! The two knobs of the menu-controlled generator and the compare value derived from them.

use crate::config::{
    DUTY_MAX, DUTY_MIN, DUTY_STEP, INITIAL_DUTY, INITIAL_PERIOD, PERIOD_MAX, PERIOD_MIN,
    PERIOD_STEP, FREQUENCY_READOUT_SCALE,
};

/// Fraction of the period the output is active, stored in thousandths.
///
/// Steps of 0.005 are exact in this representation, so the clamps land on their
/// bounds without floating point drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct DutyCycle(u16);

impl DutyCycle {
    pub const fn from_thousandths(thousandths: u16) -> Self {
        DutyCycle(thousandths)
    }

    pub const fn thousandths(&self) -> u16 {
        self.0
    }

    pub fn fraction(&self) -> f32 {
        self.0 as f32 / 1000.0
    }

    /// Adds one step while the current value is below the upper bound.
    ///
    /// The check happens before the step, the last permitted step lands on the bound.
    pub fn increase(&mut self) {
        if self.0 < DUTY_MAX.0 {
            self.0 += DUTY_STEP;
        }
    }

    /// Removes one step if the result stays above the lower bound.
    pub fn decrease(&mut self) {
        if self.0.saturating_sub(DUTY_STEP) > DUTY_MIN.0 {
            self.0 -= DUTY_STEP;
        }
    }
}

/// Length of one pwm cycle in timer ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub struct PeriodTicks(u16);

impl PeriodTicks {
    pub const fn new(ticks: u16) -> Self {
        PeriodTicks(ticks)
    }

    pub const fn ticks(&self) -> u16 {
        self.0
    }

    /// Lengthens the period, lowering the output frequency.
    pub fn lengthen(&mut self) {
        if self.0 < PERIOD_MAX.0 {
            self.0 += PERIOD_STEP;
        }
    }

    /// Shortens the period, raising the output frequency.
    pub fn shorten(&mut self) {
        if self.0 > PERIOD_MIN.0 {
            self.0 -= PERIOD_STEP;
        }
    }

    /// Frequency readout used for logging, calibrated on the reference board.
    pub fn frequency_readout_hz(&self) -> u32 {
        self.0 as u32 * FREQUENCY_READOUT_SCALE
    }
}

/// Persistent state of the menu-controlled generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PwmSettings {
    pub duty: DutyCycle,
    pub period: PeriodTicks,
}

impl Default for PwmSettings {
    fn default() -> Self {
        PwmSettings {
            duty: INITIAL_DUTY,
            period: INITIAL_PERIOD,
        }
    }
}

impl PwmSettings {
    /// `round(period * duty)`, halves round up.
    ///
    /// Always recomputed, never read back from the timer.
    pub fn compare_value(&self) -> u16 {
        let product = self.period.0 as u32 * self.duty.0 as u32;
        ((product + 500) / 1000) as u16
    }
}
