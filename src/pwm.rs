//! The pwm generator as seen by the menu: one timer with a period and two comparators.
//!
//! [PwmChannel] is the whole contract the controller relies on, values are written as
//! timer ticks and take effect without the caller waiting for the hardware. Shadow
//! loading of the registers is the binding's business.
//!
//! With the `board` feature [TimerPwm] implements the contract on STM32 timers, the
//! generators run center-aligned (up/down counting) with two outputs each.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum Comparator {
    /// first output, timer channel 1
    A,
    /// second output, timer channel 2
    B,
}

impl Comparator {
    pub fn index(&self) -> usize {
        match self {
            Comparator::A => 0,
            Comparator::B => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum OutputPolarity {
    /// output is high while the counter is above the compare value
    ActiveHigh,
    /// inverted output, gives a complementary pair with an active high partner
    ActiveLow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompareRange {
    pub min: u16,
    pub max: u16,
}

impl CompareRange {
    pub fn contains(&self, value: u16) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Static description of one generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelConfig {
    pub name: &'static str,
    pub period: u16,
    pub compare_a: u16,
    pub compare_b: u16,
    pub range_a: CompareRange,
    pub range_b: CompareRange,
    pub polarity_a: OutputPolarity,
    pub polarity_b: OutputPolarity,
}

impl ChannelConfig {
    pub fn initial_compare(&self, comparator: Comparator) -> u16 {
        match comparator {
            Comparator::A => self.compare_a,
            Comparator::B => self.compare_b,
        }
    }

    pub fn range(&self, comparator: Comparator) -> CompareRange {
        match comparator {
            Comparator::A => self.range_a,
            Comparator::B => self.range_b,
        }
    }

    pub fn polarity(&self, comparator: Comparator) -> OutputPolarity {
        match comparator {
            Comparator::A => self.polarity_a,
            Comparator::B => self.polarity_b,
        }
    }
}

/// Register level access to one generator. No bounds are enforced here.
pub trait PwmChannel {
    fn set_compare(&mut self, comparator: Comparator, ticks: u16);

    fn set_period(&mut self, ticks: u16);
}

/// Writes period and both compare values of `config`.
pub fn apply_config<P: PwmChannel>(pwm: &mut P, config: &ChannelConfig) {
    pwm.set_period(config.period);
    pwm.set_compare(Comparator::A, config.compare_a);
    pwm.set_compare(Comparator::B, config.compare_b);
}

#[cfg(feature = "board")]
pub use self::board::{start_generators, TimerPwm};

#[cfg(feature = "board")]
mod board {
    use embassy_stm32::pac::timer::TimGp16;
    use embassy_stm32::time::hz;
    use embassy_stm32::timer::low_level::CountingMode;
    use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
    use embassy_stm32::timer::{Ch1, Ch2, GeneralInstance4Channel};
    use embassy_stm32::Peripheral;

    use super::{apply_config, ChannelConfig, Comparator, OutputPolarity, PwmChannel};

    /// A timer driving two outputs, configured from a [ChannelConfig].
    ///
    /// The HAL brings up pins, clocks and the center-aligned counting mode, afterwards
    /// period and compare values are written straight to ARR and CCRx.
    pub struct TimerPwm<'d, T: GeneralInstance4Channel> {
        _pwm: SimplePwm<'d, T>,
        regs: TimGp16,
    }

    impl<'d, T: GeneralInstance4Channel> TimerPwm<'d, T> {
        /// Sets the timer up stopped, [start_generators] lets it run.
        ///
        /// `regs` has to be the register block of the timer `T`.
        pub fn new(
            tim: impl Peripheral<P = T> + 'd,
            out_a: PwmPin<'d, T, Ch1>,
            out_b: PwmPin<'d, T, Ch2>,
            regs: TimGp16,
            config: &ChannelConfig,
        ) -> Self {
            // the frequency is overwritten by the tick based period below
            let mut pwm = SimplePwm::new(
                tim,
                Some(out_a),
                Some(out_b),
                None,
                None,
                hz(1_000),
                CountingMode::CenterAlignedBothInterrupts,
            );
            pwm.ch1().enable();
            pwm.ch2().enable();

            regs.cr1().modify(|w| {
                w.set_cen(false);
                w.set_arpe(true);
            });
            regs.psc().write_value(0);

            for comparator in [Comparator::A, Comparator::B] {
                let idx = comparator.index();
                // shadow load: new compare values are taken over on the next update event
                regs.ccmr_output(0).modify(|w| w.set_ocpe(idx, true));
                regs.ccer().modify(|w| {
                    w.set_ccp(idx, config.polarity(comparator) == OutputPolarity::ActiveLow)
                });

                if !config.range(comparator).contains(config.initial_compare(comparator)) {
                    log_warn!("{}: initial compare outside of its range", config.name);
                }
            }

            let mut timer = TimerPwm { _pwm: pwm, regs };
            apply_config(&mut timer, config);

            // load the preloaded registers before the counter starts
            timer.regs.cnt().write(|w| w.set_cnt(0));
            timer.regs.egr().write(|w| w.set_ug(true));

            log_info!(
                "{}: period {} ticks, cmpa {}, cmpb {}",
                config.name,
                config.period,
                config.compare_a,
                config.compare_b
            );
            timer
        }

        fn start(&mut self) {
            self.regs.cr1().modify(|w| w.set_cen(true));
        }
    }

    impl<'d, T: GeneralInstance4Channel> PwmChannel for TimerPwm<'d, T> {
        fn set_compare(&mut self, comparator: Comparator, ticks: u16) {
            self.regs
                .ccr(comparator.index())
                .modify(|w| w.set_ccr(ticks));
        }

        fn set_period(&mut self, ticks: u16) {
            self.regs.arr().modify(|w| w.set_arr(ticks));
        }
    }

    /// Starts the three generators back to back so their time bases stay aligned.
    pub fn start_generators<'d, A, B, C>(
        first: &mut TimerPwm<'d, A>,
        second: &mut TimerPwm<'d, B>,
        third: &mut TimerPwm<'d, C>,
    ) where
        A: GeneralInstance4Channel,
        B: GeneralInstance4Channel,
        C: GeneralInstance4Channel,
    {
        cortex_m::interrupt::free(|_| {
            first.start();
            second.start();
            third.start();
        });
    }
}
