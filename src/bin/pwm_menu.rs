#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::gpio::{Level, Output, OutputType, Speed};
use embassy_stm32::pac;
use embassy_stm32::pac::timer::TimGp16;
use embassy_stm32::timer::simple_pwm::PwmPin;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use pwm_menu::config::{GENERATOR_1, GENERATOR_2, GENERATOR_MENU};
use pwm_menu::led::LedIndicator;
use pwm_menu::menu::MenuController;
use pwm_menu::pwm::{start_generators, TimerPwm};
use pwm_menu::uart::{console_config, UartConsole};
use pwm_menu::{log_error, log_info, power, setup_usart_developer_console};

bind_interrupts!(struct Irqs {
    USART3 => embassy_stm32::usart::InterruptHandler<embassy_stm32::peripherals::USART3>;
});

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(Default::default());
    log_info!("pwm_menu booting");

    // blue user led LD2
    let indicator = LedIndicator::new(Output::new(p.PB7, Level::Low, Speed::Low), true);

    let usart = setup_usart_developer_console!(p, Irqs, console_config())
        .expect("USART generation failed");
    let console = UartConsole::new(usart);

    // SAFETY: each block belongs to the timer handed over next to it
    let (tim1, tim3, tim4) = unsafe {
        (
            TimGp16::from_ptr(pac::TIM1.as_ptr()),
            TimGp16::from_ptr(pac::TIM3.as_ptr()),
            TimGp16::from_ptr(pac::TIM4.as_ptr()),
        )
    };

    let mut gen1 = TimerPwm::new(
        p.TIM1,
        PwmPin::new_ch1(p.PE9, OutputType::PushPull),
        PwmPin::new_ch2(p.PE11, OutputType::PushPull),
        tim1,
        &GENERATOR_1,
    );
    let mut gen2 = TimerPwm::new(
        p.TIM3,
        PwmPin::new_ch1(p.PC6, OutputType::PushPull),
        PwmPin::new_ch2(p.PC7, OutputType::PushPull),
        tim3,
        &GENERATOR_2,
    );
    let mut gen_menu = TimerPwm::new(
        p.TIM4,
        PwmPin::new_ch1(p.PD12, OutputType::PushPull),
        PwmPin::new_ch2(p.PD13, OutputType::PushPull),
        tim4,
        &GENERATOR_MENU,
    );
    start_generators(&mut gen1, &mut gen2, &mut gen_menu);
    log_info!("generators running");

    let mut controller = MenuController::new(gen_menu, console, indicator);
    loop {
        match controller.run().await {
            Ok(()) => break,
            Err(err) => log_error!("menu interrupted: {}, showing it again", err),
        }
    }

    // let the last defmt frames leave the probe before the core stops
    Timer::after_millis(10).await;
    power::halt();
}
