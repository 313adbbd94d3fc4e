//! The power off of the menu: deep sleep with every interrupt masked.
//!
//! Nothing wakes the core up again, only a reset brings the board back.

pub fn halt() -> ! {
    log_info!("Entering halt, reset the board to restart");

    cortex_m::interrupt::disable();

    // SAFETY: interrupts are masked and nothing runs after this point, the system
    // control block is not shared with anyone anymore
    let mut peripherals = unsafe { cortex_m::Peripherals::steal() };
    peripherals.SCB.set_sleepdeep();

    loop {
        cortex_m::asm::wfi();
    }
}
