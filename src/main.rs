//! Firmware entry point for the nRF52840.
//!
//! Thread mode runs the blocking UI tick loop. Input that must not be
//! missed while a frame is being drawn - encoder edges and serial
//! bytes - runs on a software-interrupt executor, which preempts the
//! tick and touches only the shared decoder state and the command
//! channel.

#![no_std]
#![no_main]

use defmt::{info, unwrap};
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::InterruptExecutor;
use embassy_nrf::gpio::{Input, Pin, Pull};
use embassy_nrf::interrupt;
use embassy_nrf::interrupt::{InterruptExt, Priority};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::uarte;
use embassy_nrf::{bind_interrupts, peripherals};

use knobmenu::config::AppConfig;
use knobmenu::display::oled::Oled;
use knobmenu::input::hardware::{encoder_task, serial_task, HardwareInput, COMMANDS};
use knobmenu::menu::MenuTree;
use knobmenu::menus::build_menus;
use knobmenu::platform::EmbassyPlatform;
use knobmenu::ui::UiController;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    UARTE0_UART0 => uarte::InterruptHandler<peripherals::UARTE0>;
});

static INPUT_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI1_EGU1() {
    INPUT_EXECUTOR.on_interrupt()
}

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("knobmenu boot");
    let p = embassy_nrf::init(Default::default());

    // Input side, serviced in interrupt context.
    interrupt::SWI1_EGU1.set_priority(Priority::P6);
    let spawner = INPUT_EXECUTOR.start(interrupt::SWI1_EGU1);

    unwrap!(spawner.spawn(encoder_task(p.P0_11.degrade(), p.P0_12.degrade())));

    let mut uart_config = uarte::Config::default();
    uart_config.baudrate = uarte::Baudrate::BAUD115200;
    let uart = uarte::Uarte::new(p.UARTE0, Irqs, p.P0_08, p.P0_06, uart_config);
    let (_tx, rx) = uart.split();
    unwrap!(spawner.spawn(serial_task(rx, &COMMANDS)));

    // Display on hardware I²C.
    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let display = match Oled::new(i2c) {
        Ok(display) => display,
        Err(error) => defmt::panic!("display init failed: {}", error),
    };
    info!("display up");

    let confirm = Input::new(p.P0_24, Pull::Up);
    let cancel = Input::new(p.P0_25, Pull::Down);
    let input = HardwareInput::new(cancel, confirm, COMMANDS.receiver());

    let mut config = AppConfig::default();
    let mut tree = MenuTree::new();
    let root = unwrap!(build_menus(&mut tree));
    info!("menu tree ready");

    // The tick loop; cancel at the root is a no-op, so this never
    // returns.
    let mut ui = UiController::new(display, input, EmbassyPlatform, &config);
    ui.run(&mut tree, root, &mut config);
    defmt::unreachable!("menu stack emptied");
}
