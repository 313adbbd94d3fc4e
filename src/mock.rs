//! In-memory devices for testing the menu without hardware.
//!
//! Every double records what it was asked to do, tests check the recording afterwards.
//!
//! # Example
//!
//! ```
//! use pwm_menu::mock::{MockConsole, MockIndicator, MockPwm};
//! use pwm_menu::menu::{MenuController, MenuState, Outcome};
//!
//! let console = MockConsole::new(b"2");
//! let mut ctrl = MenuController::new(MockPwm::new(), console, MockIndicator::new());
//!
//! let outcome = embassy_futures::block_on(ctrl.step()).unwrap();
//! assert_eq!(outcome, Outcome::Continue(MenuState::FrequencyMenu));
//! ```

use std::collections::VecDeque;

use crate::error::{ConsoleError, Result};
use crate::led::{Indicator, IndicatorLevel};
use crate::pwm::{Comparator, PwmChannel};
use crate::uart::Console;

/// A register write seen by [MockPwm].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PwmWrite {
    Compare(Comparator, u16),
    Period(u16),
}

#[derive(Debug, Default)]
pub struct MockPwm {
    writes: Vec<PwmWrite>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes in the order they happened.
    pub fn writes(&self) -> &[PwmWrite] {
        &self.writes
    }

    /// Last value written to `comparator`.
    pub fn compare(&self, comparator: Comparator) -> Option<u16> {
        self.writes.iter().rev().find_map(|write| match write {
            PwmWrite::Compare(c, value) if *c == comparator => Some(*value),
            _ => None,
        })
    }

    /// Last period written.
    pub fn period(&self) -> Option<u16> {
        self.writes.iter().rev().find_map(|write| match write {
            PwmWrite::Period(ticks) => Some(*ticks),
            _ => None,
        })
    }
}

impl PwmChannel for MockPwm {
    fn set_compare(&mut self, comparator: Comparator, ticks: u16) {
        self.writes.push(PwmWrite::Compare(comparator, ticks));
    }

    fn set_period(&mut self, ticks: u16) {
        self.writes.push(PwmWrite::Period(ticks));
    }
}

/// Console fed from a byte script.
///
/// Reading past the end of the script fails with [ConsoleError::Read], which ends a
/// [run](crate::menu::MenuController::run) loop in tests.
#[derive(Debug, Default)]
pub struct MockConsole {
    input: VecDeque<u8>,
    writes: Vec<Vec<u8>>,
}

impl MockConsole {
    pub fn new(input: &[u8]) -> Self {
        MockConsole {
            input: input.iter().copied().collect(),
            writes: Vec::new(),
        }
    }

    /// Appends bytes to the pending input.
    pub fn feed(&mut self, input: &[u8]) {
        self.input.extend(input.iter().copied());
    }

    pub fn is_drained(&self) -> bool {
        self.input.is_empty()
    }

    /// Every `write_text` call, one entry each.
    pub fn writes(&self) -> &[Vec<u8>] {
        &self.writes
    }

    /// All output as the terminal would show it.
    pub fn transcript(&self) -> Vec<u8> {
        self.writes.concat()
    }
}

impl Console for MockConsole {
    async fn write_text(&mut self, text: &[u8]) -> Result<()> {
        self.writes.push(text.to_vec());
        Ok(())
    }

    async fn read_char(&mut self) -> Result<u8> {
        self.input.pop_front().ok_or(ConsoleError::Read.into())
    }
}

#[derive(Debug, Default)]
pub struct MockIndicator {
    levels: Vec<IndicatorLevel>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every level set, oldest first.
    pub fn levels(&self) -> &[IndicatorLevel] {
        &self.levels
    }

    /// What the output shows right now.
    pub fn level(&self) -> IndicatorLevel {
        self.levels.last().copied().unwrap_or_default()
    }
}

impl Indicator for MockIndicator {
    fn set_level(&mut self, level: IndicatorLevel) {
        self.levels.push(level);
    }
}
