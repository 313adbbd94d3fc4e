//! The serial menu that adjusts duty cycle and period of one pwm generator.
//!
//! Every [MenuController::step] prints the menu of the current [MenuState], waits for
//! one byte on the console and applies it:
//!
//! | state           | '1'                 | '2'                 | '3'       |
//! |-----------------|---------------------|---------------------|-----------|
//! | `Home`          | `DutyMenu`          | `FrequencyMenu`     | halt      |
//! | `DutyMenu`      | duty + 0.005        | duty - 0.005        | `Home`    |
//! | `FrequencyMenu` | period + 50 ticks   | period - 50 ticks   | `Home`    |
//!
//! Anything else is answered with [INVALID_SELECTION] and the state stays as it is.
//! Duty cycle and period survive leaving a submenu, the compare value pushed to both
//! comparators is always recomputed from them.

use heapless::Vec;

use crate::cmd::{DutyCommand, FrequencyCommand, HomeCommand, Selection};
use crate::error::Result;
use crate::led::{Indicator, IndicatorLevel};
use crate::pwm::{Comparator, PwmChannel};
use crate::settings::PwmSettings;
use crate::uart::Console;

/// Pushes the previous menu out of the terminal window.
pub const CLEAR_SCREEN: &[u8] = b"\r\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n";

pub const HOME_MENU: &[&[u8]] = &[
    b"\r\n\nChoose an option: \n",
    b"\r\n 1. Change duty cycle \n",
    b"\r\n 2. Change frequency \n",
    b"\r\n 3. Power off ",
];

pub const DUTY_MENU: &[&[u8]] = &[
    b"\r\n 1. Increase duty cycle \n",
    b"\r\n 2. Decrease duty cycle \n",
    b"\r\n 3. Go back \n",
];

pub const FREQUENCY_MENU: &[&[u8]] = &[
    b"\r\n 1. Decrease frequency \n",
    b"\r\n 2. Increase frequency \n",
    b"\r\n 3. Go back \n",
];

pub const PROMPT: &[u8] = b"\r\n\nEnter number: ";

pub const INVALID_SELECTION: &[u8] = b"\r\nPlease choose one of the options\n";

/// Large enough for the clear burst and the longest menu.
pub const SCREEN_CAPACITY: usize = 192;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum MenuState {
    #[default]
    Home,
    DutyMenu,
    FrequencyMenu,
}

impl MenuState {
    pub fn options(&self) -> &'static [&'static [u8]] {
        match self {
            MenuState::Home => HOME_MENU,
            MenuState::DutyMenu => DUTY_MENU,
            MenuState::FrequencyMenu => FREQUENCY_MENU,
        }
    }

    /// The complete screen of this state, sent with a single write.
    pub fn render(&self) -> Vec<u8, SCREEN_CAPACITY> {
        let mut screen = Vec::new();
        let parts = core::iter::once(CLEAR_SCREEN)
            .chain(self.options().iter().copied())
            .chain(core::iter::once(PROMPT));
        for part in parts {
            // all parts are constants, SCREEN_CAPACITY covers them
            let _ = screen.extend_from_slice(part);
        }
        screen
    }
}

/// Result of one iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum Outcome {
    /// keep looping in the given state
    Continue(MenuState),

    /// the operator chose to power off, the caller has to halt
    Halt,
}

pub struct MenuController<P, C, I> {
    pwm: P,
    console: C,
    indicator: I,
    state: MenuState,
    settings: PwmSettings,
}

impl<P, C, I> MenuController<P, C, I>
where
    P: PwmChannel,
    C: Console,
    I: Indicator,
{
    /// Starts in [MenuState::Home] with the default settings.
    pub fn new(pwm: P, console: C, indicator: I) -> Self {
        Self::with_settings(pwm, console, indicator, PwmSettings::default())
    }

    pub fn with_settings(pwm: P, console: C, indicator: I, settings: PwmSettings) -> Self {
        MenuController {
            pwm,
            console,
            indicator,
            state: MenuState::Home,
            settings,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn settings(&self) -> &PwmSettings {
        &self.settings
    }

    pub fn pwm(&self) -> &P {
        &self.pwm
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// Loops until the operator powers off.
    ///
    /// A console error ends the loop early, state and settings are kept so calling
    /// `run` again continues where it stopped.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            if let Outcome::Halt = self.step().await? {
                return Ok(());
            }
        }
    }

    /// One iteration: show the menu, wait for a byte, apply it.
    pub async fn step(&mut self) -> Result<Outcome> {
        self.console.write_text(&self.state.render()).await?;

        let selection = Selection::from_byte(self.console.read_char().await?);

        let outcome = match self.state {
            MenuState::Home => match HomeCommand::from(selection) {
                HomeCommand::EditDutyCycle => Outcome::Continue(MenuState::DutyMenu),
                HomeCommand::EditFrequency => Outcome::Continue(MenuState::FrequencyMenu),
                HomeCommand::PowerOff => Outcome::Halt,
                HomeCommand::Invalid => self.reject(selection).await?,
            },
            MenuState::DutyMenu => match DutyCommand::from(selection) {
                DutyCommand::Back => Outcome::Continue(MenuState::Home),
                DutyCommand::Invalid => self.reject(selection).await?,
                cmd => {
                    self.adjust_duty(cmd);
                    Outcome::Continue(MenuState::DutyMenu)
                }
            },
            MenuState::FrequencyMenu => match FrequencyCommand::from(selection) {
                FrequencyCommand::Back => Outcome::Continue(MenuState::Home),
                FrequencyCommand::Invalid => self.reject(selection).await?,
                cmd => {
                    self.adjust_frequency(cmd);
                    Outcome::Continue(MenuState::FrequencyMenu)
                }
            },
        };

        if let Outcome::Continue(next) = outcome {
            self.state = next;
        }
        Ok(outcome)
    }

    async fn reject(&mut self, selection: Selection) -> Result<Outcome> {
        if let Selection::Unknown(byte) = selection {
            log_warn!("Invalid menu selection: byte {}", byte);
        }
        self.console.write_text(INVALID_SELECTION).await?;
        Ok(Outcome::Continue(self.state))
    }

    fn adjust_duty(&mut self, cmd: DutyCommand) {
        match cmd {
            DutyCommand::Increase => {
                self.indicator.set_level(IndicatorLevel::Active);
                self.settings.duty.increase();
            }
            DutyCommand::Decrease => {
                self.indicator.set_level(IndicatorLevel::Inactive);
                self.settings.duty.decrease();
            }
            DutyCommand::Back | DutyCommand::Invalid => return,
        }
        self.push_compare();
    }

    fn adjust_frequency(&mut self, cmd: FrequencyCommand) {
        match cmd {
            FrequencyCommand::Decrease => self.settings.period.lengthen(),
            FrequencyCommand::Increase => self.settings.period.shorten(),
            FrequencyCommand::Back | FrequencyCommand::Invalid => return,
        }
        // compare values first so they never sit above a shortened period for long
        self.push_compare();
        self.pwm.set_period(self.settings.period.ticks());
    }

    fn push_compare(&mut self) {
        let compare = self.settings.compare_value();
        self.pwm.set_compare(Comparator::A, compare);
        self.pwm.set_compare(Comparator::B, compare);

        log_info!(
            "duty {}/1000, period {} ticks (~{} Hz), compare {}",
            self.settings.duty.thousandths(),
            self.settings.period.ticks(),
            self.settings.period.frequency_readout_hz(),
            compare
        );
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::mock::{MockConsole, MockIndicator, MockPwm, PwmWrite};
    use crate::settings::{DutyCycle, PeriodTicks};

    type TestController = MenuController<MockPwm, MockConsole, MockIndicator>;

    fn controller(input: &[u8]) -> TestController {
        MenuController::new(MockPwm::new(), MockConsole::new(input), MockIndicator::new())
    }

    fn controller_with(input: &[u8], thousandths: u16, period: u16) -> TestController {
        let settings = PwmSettings {
            duty: DutyCycle::from_thousandths(thousandths),
            period: PeriodTicks::new(period),
        };
        MenuController::with_settings(
            MockPwm::new(),
            MockConsole::new(input),
            MockIndicator::new(),
            settings,
        )
    }

    fn steps(ctrl: &mut TestController, count: usize) -> Vec<Outcome, 512> {
        let mut outcomes = Vec::new();
        for _ in 0..count {
            outcomes.push(block_on(ctrl.step()).unwrap()).unwrap();
        }
        outcomes
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn home_screen_is_sent_in_one_write() {
        let mut ctrl = controller(b"1");
        steps(&mut ctrl, 1);

        let writes = ctrl.console().writes();
        let expected: &[u8] = b"\r\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\n\
            \r\n\nChoose an option: \n\
            \r\n 1. Change duty cycle \n\
            \r\n 2. Change frequency \n\
            \r\n 3. Power off \
            \r\n\nEnter number: ";
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].as_slice(), expected);
    }

    #[test]
    fn clear_burst_has_seventeen_extra_newlines() {
        assert_eq!(CLEAR_SCREEN.len(), 19);
        assert_eq!(&CLEAR_SCREEN[..2], b"\r\n");
        assert!(CLEAR_SCREEN[2..].iter().all(|b| *b == b'\n'));
    }

    #[test]
    fn every_screen_fits_the_buffer() {
        for state in [MenuState::Home, MenuState::DutyMenu, MenuState::FrequencyMenu] {
            let expected: usize = CLEAR_SCREEN.len()
                + state.options().iter().map(|o| o.len()).sum::<usize>()
                + PROMPT.len();
            assert_eq!(state.render().len(), expected);
        }
    }

    #[test]
    fn submenus_show_their_options() {
        let mut ctrl = controller(b"1323");
        steps(&mut ctrl, 4);

        let writes = ctrl.console().writes();
        assert!(count(&writes[1], b"\r\n 1. Increase duty cycle \n") == 1);
        assert!(count(&writes[1], b"\r\n 2. Decrease duty cycle \n") == 1);
        assert!(count(&writes[1], b"\r\n 3. Go back \n") == 1);
        assert!(count(&writes[3], b"\r\n 1. Decrease frequency \n") == 1);
        assert!(count(&writes[3], b"\r\n 2. Increase frequency \n") == 1);
        assert!(writes[3].ends_with(PROMPT));
    }

    #[test]
    fn invalid_input_keeps_the_state_in_every_menu() {
        // home, duty menu and frequency menu each get an invalid byte
        let mut ctrl = controller(b"x1?32\r");
        let outcomes = steps(&mut ctrl, 6);

        assert_eq!(
            outcomes.as_slice(),
            &[
                Outcome::Continue(MenuState::Home),
                Outcome::Continue(MenuState::DutyMenu),
                Outcome::Continue(MenuState::DutyMenu),
                Outcome::Continue(MenuState::Home),
                Outcome::Continue(MenuState::FrequencyMenu),
                Outcome::Continue(MenuState::FrequencyMenu),
            ]
        );
        assert_eq!(count(&ctrl.console().transcript(), INVALID_SELECTION), 3);
        assert!(ctrl.pwm().writes().is_empty());
        assert_eq!(*ctrl.settings(), PwmSettings::default());
    }

    #[test]
    fn error_text_follows_the_rejected_menu() {
        let mut ctrl = controller(b"0");
        steps(&mut ctrl, 1);

        let writes = ctrl.console().writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1].as_slice(), INVALID_SELECTION);
    }

    #[test]
    fn increase_duty_and_go_back() {
        let mut ctrl = controller(b"113");
        let outcomes = steps(&mut ctrl, 3);

        assert_eq!(outcomes[2], Outcome::Continue(MenuState::Home));
        assert_eq!(ctrl.state(), MenuState::Home);
        assert_eq!(ctrl.settings().duty.thousandths(), 505);

        // round(850 * 0.505) = round(429.25)
        assert_eq!(
            ctrl.pwm().writes(),
            &[
                PwmWrite::Compare(Comparator::A, 429),
                PwmWrite::Compare(Comparator::B, 429),
            ]
        );
        assert_eq!(ctrl.indicator().levels(), &[IndicatorLevel::Active]);
    }

    #[test]
    fn decrease_duty_drives_the_indicator_inactive() {
        let mut ctrl = controller(b"12");
        steps(&mut ctrl, 2);

        assert_eq!(ctrl.settings().duty.thousandths(), 495);
        assert_eq!(ctrl.indicator().levels(), &[IndicatorLevel::Inactive]);
        // round(850 * 0.495) = round(420.75)
        assert_eq!(ctrl.pwm().compare(Comparator::A), Some(421));
        assert_eq!(ctrl.pwm().compare(Comparator::B), Some(421));
    }

    #[test]
    fn lower_frequency_and_go_back() {
        let mut ctrl = controller(b"213");
        let outcomes = steps(&mut ctrl, 3);

        assert_eq!(outcomes[2], Outcome::Continue(MenuState::Home));
        assert_eq!(ctrl.settings().period.ticks(), 900);

        // compare values go out before the new period, round(900 * 0.5)
        assert_eq!(
            ctrl.pwm().writes(),
            &[
                PwmWrite::Compare(Comparator::A, 450),
                PwmWrite::Compare(Comparator::B, 450),
                PwmWrite::Period(900),
            ]
        );
        assert!(ctrl.indicator().levels().is_empty());
    }

    #[test]
    fn raise_frequency_shortens_the_period() {
        let mut ctrl = controller(b"22");
        steps(&mut ctrl, 2);

        assert_eq!(ctrl.settings().period.ticks(), 800);
        assert_eq!(ctrl.pwm().period(), Some(800));
        assert_eq!(ctrl.pwm().compare(Comparator::A), Some(400));
    }

    #[test]
    fn duty_saturates_at_ninety_percent() {
        let input = [b'1'; 120];
        let mut ctrl = controller(&input);
        let outcomes = steps(&mut ctrl, 120);

        assert_eq!(ctrl.settings().duty.thousandths(), 900);
        assert!(outcomes[1..]
            .iter()
            .all(|o| *o == Outcome::Continue(MenuState::DutyMenu)));

        // every command at the bound still pushes the same value, round(850 * 0.9)
        let writes = ctrl.pwm().writes();
        assert_eq!(writes.len(), 2 * 119);
        assert_eq!(writes[writes.len() - 1], PwmWrite::Compare(Comparator::B, 765));
        assert_eq!(writes[writes.len() - 3], PwmWrite::Compare(Comparator::B, 765));
    }

    #[test]
    fn last_increase_lands_on_the_bound() {
        let mut ctrl = controller_with(b"111", 895, 850);
        steps(&mut ctrl, 3);
        assert_eq!(ctrl.settings().duty.thousandths(), 900);
    }

    #[test]
    fn duty_never_drops_to_the_floor() {
        let mut input = [b'2'; 150];
        input[0] = b'1';
        let mut ctrl = controller(&input);
        steps(&mut ctrl, 150);

        let duty = ctrl.settings().duty.thousandths();
        assert!(duty > 1);
        assert_eq!(duty, 5);
        // round(850 * 0.005) = round(4.25)
        assert_eq!(ctrl.pwm().compare(Comparator::A), Some(4));
        assert_eq!(ctrl.state(), MenuState::DutyMenu);
    }

    #[test]
    fn period_saturates_on_both_ends() {
        let mut input = [b'1'; 40];
        input[0] = b'2';
        let mut ctrl = controller(&input);
        steps(&mut ctrl, 40);
        assert_eq!(ctrl.settings().period.ticks(), 1500);
        assert_eq!(ctrl.pwm().period(), Some(1500));
        assert_eq!(ctrl.pwm().compare(Comparator::B), Some(750));

        let input = [b'2'; 40];
        let mut ctrl = controller(&input);
        steps(&mut ctrl, 40);
        assert_eq!(ctrl.settings().period.ticks(), 500);
        assert_eq!(ctrl.pwm().period(), Some(500));
        assert_eq!(ctrl.state(), MenuState::FrequencyMenu);
    }

    #[test]
    fn settings_survive_leaving_a_submenu() {
        // two duty steps up, back, one frequency step down, back, into duty again
        let mut ctrl = controller(b"11132131");
        steps(&mut ctrl, 8);

        assert_eq!(ctrl.state(), MenuState::DutyMenu);
        assert_eq!(ctrl.settings().duty.thousandths(), 510);
        assert_eq!(ctrl.settings().period.ticks(), 900);
        // 900 * 0.51
        assert_eq!(ctrl.pwm().compare(Comparator::A), Some(459));
    }

    #[test]
    fn power_off_only_from_home() {
        let mut ctrl = controller(b"13232");
        let outcomes = steps(&mut ctrl, 5);
        assert!(!outcomes.contains(&Outcome::Halt));

        let mut ctrl = controller(b"3");
        assert_eq!(block_on(ctrl.step()), Ok(Outcome::Halt));
        assert_eq!(ctrl.state(), MenuState::Home);
        // nothing but the home screen was written
        assert_eq!(ctrl.console().writes().len(), 1);
    }

    #[test]
    fn run_returns_on_power_off() {
        let mut ctrl = controller(b"113x3");
        assert_eq!(block_on(ctrl.run()), Ok(()));
        assert!(ctrl.console().is_drained());
        assert_eq!(ctrl.settings().duty.thousandths(), 505);
    }

    #[test]
    fn console_failure_keeps_state_and_settings() {
        let mut ctrl = controller(b"11");
        steps(&mut ctrl, 2);

        // input exhausted, the mock reports a failed read
        assert!(block_on(ctrl.run()).is_err());
        assert_eq!(ctrl.state(), MenuState::DutyMenu);
        assert_eq!(ctrl.settings().duty.thousandths(), 505);

        ctrl.console_mut().feed(b"3");
        assert_eq!(block_on(ctrl.step()), Ok(Outcome::Continue(MenuState::Home)));
    }
}
