#![cfg_attr(not(any(test, feature = "mock")), no_std)]
#![allow(async_fn_in_trait)]

//! Serial menu control for the PWM generators of a NUCLEO-F767ZI.
//!
//! The [menu::MenuController] reads single digit commands from a [uart::Console] and
//! adjusts duty cycle and period of one [pwm::PwmChannel]. The core is hardware agnostic,
//! the STM32 bindings are compiled with the `board` feature.

#[macro_use]
pub mod logging;

pub mod cmd;
pub mod config;
pub mod error;
pub mod led;
pub mod menu;
pub mod pwm;
pub mod settings;
pub mod uart;

#[cfg(feature = "board")]
pub mod power;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{Error, Result};
