//! Command decoding for the serial menu, based upon the [Selection] of a single input byte.
//!
//! The digits '1', '2' and '3' are the only valid inputs, every menu gives them its own
//! meaning via [HomeCommand], [DutyCommand] and [FrequencyCommand]. Any other byte
//! decodes to the `Invalid` variant of the menu.

/// The raw menu option chosen by the operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum Selection {
    First,
    Second,
    Third,
    /// any byte that is not one of the option digits
    Unknown(u8),
}

impl Selection {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            b'1' => Selection::First,
            b'2' => Selection::Second,
            b'3' => Selection::Third,
            other => Selection::Unknown(other),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum HomeCommand {
    /// opens the duty cycle menu
    EditDutyCycle,

    /// opens the frequency menu
    EditFrequency,

    /// halts the controller for good
    PowerOff,

    Invalid,
}

impl From<Selection> for HomeCommand {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::First => HomeCommand::EditDutyCycle,
            Selection::Second => HomeCommand::EditFrequency,
            Selection::Third => HomeCommand::PowerOff,
            Selection::Unknown(_) => HomeCommand::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum DutyCommand {
    Increase,
    Decrease,
    Back,
    Invalid,
}

impl From<Selection> for DutyCommand {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::First => DutyCommand::Increase,
            Selection::Second => DutyCommand::Decrease,
            Selection::Third => DutyCommand::Back,
            Selection::Unknown(_) => DutyCommand::Invalid,
        }
    }
}

/// Frequency commands, named after the frequency: decreasing it lengthens the period.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "board", derive(defmt::Format))]
pub enum FrequencyCommand {
    Decrease,
    Increase,
    Back,
    Invalid,
}

impl From<Selection> for FrequencyCommand {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::First => FrequencyCommand::Decrease,
            Selection::Second => FrequencyCommand::Increase,
            Selection::Third => FrequencyCommand::Back,
            Selection::Unknown(_) => FrequencyCommand::Invalid,
        }
    }
}
