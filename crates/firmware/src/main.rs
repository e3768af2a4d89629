//! LoadScale Firmware - Main Entry Point
//!
//! Hardware-only entry point for STM32F103C8.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::dma::NoDma;
use embassy_stm32::exti::{Channel, ExtiInput};
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::peripherals::{ADC1, I2C2, PA4, PA5, PA6};
use embassy_stm32::time::Hertz;
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::Delay;
use static_cell::StaticCell;

use firmware::battery::{BatteryMonitor, BatterySampler, BatteryService, NoBattery};
use firmware::boot;
use firmware::dispatch::Dispatcher;
use firmware::hal::{EmbassyAdc, EmbassyClock, HardwareButtons};
use firmware::input::hardware::spawn_edge_task;
use firmware::input::{ButtonEvents, EdgeTriggered, InputBuilder, InputStrategy, PollingInput};
use firmware::{Buzzer, Ssd1306};
use platform::config::pins::OLED_I2C_HZ;
use platform::config::{FirmwareProfile, InputMode, APP_NAME, APP_VERSION};

// Panic handler
use defmt_rtt as _;
use panic_probe as _;

/// Behaviour selected for this build.
const PROFILE: FirmwareProfile = FirmwareProfile::EDGE_WITH_BATTERY;

bind_interrupts!(struct Irqs {
    I2C2_EV => i2c::EventInterruptHandler<peripherals::I2C2>;
    I2C2_ER => i2c::ErrorInterruptHandler<peripherals::I2C2>;
});

type Display = Ssd1306<I2c<'static, I2C2>>;
type Sound = Buzzer<Output<'static, PA4>, Delay>;

/// Pending flags shared with the edge task.
static EVENTS: StaticCell<ButtonEvents> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("{} firmware v{}", APP_NAME, APP_VERSION);
    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // OLED on I2C2: PB10 SCL, PB11 SDA
    let i2c = I2c::new(
        p.I2C2,
        p.PB10,
        p.PB11,
        Irqs,
        NoDma,
        NoDma,
        Hertz(OLED_I2C_HZ),
        i2c::Config::default(),
    );
    let mut display: Display = Ssd1306::new(i2c);

    // Buzzer on PA4
    let mut sound: Sound = match Buzzer::new(Output::new(p.PA4, Level::Low, Speed::Low), Delay) {
        Ok(buzzer) => buzzer,
        Err(e) => {
            defmt::error!("Buzzer setup failed: {}", e);
            boot::halt()
        }
    };

    if let Err(e) = boot::start(&mut display, &mut sound, &mut Delay).await {
        defmt::error!("Boot failed: {}", e);
        boot::halt();
    }

    let builder = InputBuilder::from_profile(&PROFILE);
    let events: &'static ButtonEvents = EVENTS.init(builder.events());
    defmt::info!(
        "Input: {} debounce={=u32}ms battery={=bool}",
        builder.mode(),
        builder.debounce(),
        PROFILE.battery
    );

    // Buttons: OK PA3, NEXT PA2, PREV PA1, CANCEL PA0 (active low, pull-up)
    match builder.mode() {
        InputMode::Polling => {
            let buttons = HardwareButtons::new([
                Input::new(p.PA3, Pull::Up).degrade(),
                Input::new(p.PA2, Pull::Up).degrade(),
                Input::new(p.PA1, Pull::Up).degrade(),
                Input::new(p.PA0, Pull::Up).degrade(),
            ]);
            let input = PollingInput::new(buttons);
            with_battery(input, p.PA6, p.PA5, p.ADC1, display, sound, events).await
        }
        InputMode::EdgeTriggered => {
            let pins = [
                ExtiInput::new(Input::new(p.PA3, Pull::Up).degrade(), p.EXTI3.degrade()),
                ExtiInput::new(Input::new(p.PA2, Pull::Up).degrade(), p.EXTI2.degrade()),
                ExtiInput::new(Input::new(p.PA1, Pull::Up).degrade(), p.EXTI1.degrade()),
                ExtiInput::new(Input::new(p.PA0, Pull::Up).degrade(), p.EXTI0.degrade()),
            ];
            if spawn_edge_task(&spawner, pins, events).is_err() {
                defmt::error!("Edge task spawn failed");
                boot::halt();
            }
            with_battery(EdgeTriggered, p.PA6, p.PA5, p.ADC1, display, sound, events).await
        }
    }
}

/// Attach the battery monitor (VMETER_CTL PA6, VMETER_SIG PA5) when the
/// profile asks for it, then run the dispatch loop.
async fn with_battery<I: InputStrategy>(
    input: I,
    enable_pin: PA6,
    sense_pin: PA5,
    adc: ADC1,
    display: Display,
    sound: Sound,
    events: &'static ButtonEvents,
) -> ! {
    if !PROFILE.battery {
        serve(input, NoBattery, display, sound, events).await
    }

    let enable = Output::new(enable_pin, Level::Low, Speed::Low);
    let adc = EmbassyAdc::new(Adc::new(adc), sense_pin);
    match BatterySampler::new(enable, adc, Delay) {
        Ok(sampler) => serve(input, BatteryMonitor::new(sampler), display, sound, events).await,
        Err(e) => {
            defmt::warn!("Battery monitor disabled: {}", e);
            serve(input, NoBattery, display, sound, events).await
        }
    }
}

async fn serve<I: InputStrategy, B: BatteryService>(
    input: I,
    battery: B,
    display: Display,
    sound: Sound,
    events: &'static ButtonEvents,
) -> ! {
    let mut dispatcher = Dispatcher::new(input, battery, display, sound, EmbassyClock, events);
    dispatcher.run(Delay, PROFILE.idle_ms).await
}
