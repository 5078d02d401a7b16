//! GPIO/UARTE bindings for the input decoder.
//!
//! Edge-sensitive work runs on the high-priority interrupt executor:
//! [`encoder_task`] feeds the shared quadrature decoder on every A/B
//! edge, [`serial_task`] pushes decoded console commands into a
//! channel. The UI tick then polls everything through
//! [`HardwareInput`], which only reads pin levels and drains the
//! channel - it never blocks.

use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_nrf::peripherals::UARTE0;
use embassy_nrf::uarte::UarteRx;
use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver};
use embassy_time::Instant;

use crate::input::buttons::Debounced;
use crate::input::encoder::SharedEncoder;
use crate::input::{serial, Command, Direction, InputSource, LegacyScroll};

/// Pending serial commands, ISR producer to UI consumer.
pub type CommandChannel = Channel<CriticalSectionRawMutex, Command, 4>;

/// Quadrature state shared between the edge watcher and the UI tick.
pub static ENCODER: SharedEncoder = SharedEncoder::new();

/// Serial commands decoded off the console.
pub static COMMANDS: CommandChannel = Channel::new();

/// Watch both encoder pins and feed every edge to the decoder.
///
/// Spawned on the interrupt executor so edges are serviced in interrupt
/// context even while the UI tick is busy drawing.
#[embassy_executor::task]
pub async fn encoder_task(pin_a: AnyPin, pin_b: AnyPin) -> ! {
    let mut a = Input::new(pin_a, Pull::Up);
    let mut b = Input::new(pin_b, Pull::Up);

    ENCODER.prime(a.is_high(), b.is_high());

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
        ENCODER.on_edge(a.is_high(), b.is_high());
    }
}

/// Read console bytes and queue any that decode to a command.
///
/// A full queue drops the byte; the console is advisory input.
#[embassy_executor::task]
pub async fn serial_task(mut rx: UarteRx<'static, UARTE0>, commands: &'static CommandChannel) -> ! {
    let mut buf = [0u8; 1];
    loop {
        if rx.read(&mut buf).await.is_ok() {
            if let Some(command) = serial::decode_command(buf[0]) {
                let _ = commands.try_send(command);
            }
        }
    }
}

/// Legacy scroll-pin pair (the pre-encoder input dialect).
pub struct LegacyPins {
    /// Pull-down strobe; low while the wheel is moving.
    pub is_scrolling: Input<'static>,
    /// Level selects the direction: high scrolls down.
    pub toward: Input<'static>,
}

/// [`InputSource`] over the real pins, the shared encoder, and the
/// serial command channel.
pub struct HardwareInput {
    cancel_pin: Input<'static>,
    confirm_pin: Input<'static>,
    cancel: Debounced,
    confirm: Debounced,
    commands: Receiver<'static, CriticalSectionRawMutex, Command, 4>,
    legacy: Option<LegacyPins>,
}

impl HardwareInput {
    pub fn new(
        cancel_pin: Input<'static>,
        confirm_pin: Input<'static>,
        commands: Receiver<'static, CriticalSectionRawMutex, Command, 4>,
    ) -> Self {
        Self {
            cancel_pin,
            confirm_pin,
            cancel: Debounced::pull_down(),
            confirm: Debounced::pull_up(),
            commands,
            legacy: None,
        }
    }

    /// Wire the optional legacy scroll pins.
    pub fn with_legacy_pins(mut self, pins: LegacyPins) -> Self {
        self.legacy = Some(pins);
        self
    }

    fn now_ms() -> u64 {
        Instant::now().as_millis()
    }
}

impl InputSource for HardwareInput {
    fn cancel_fired(&mut self) -> bool {
        let level = self.cancel_pin.is_high();
        self.cancel.update(level, Self::now_ms())
    }

    fn confirm_fired(&mut self) -> bool {
        let level = self.confirm_pin.is_high();
        self.confirm.update(level, Self::now_ms())
    }

    fn poll_direction(&mut self) -> Direction {
        ENCODER.poll_direction()
    }

    fn poll_command(&mut self) -> Option<Command> {
        self.commands.try_receive().ok()
    }

    fn legacy_scroll(&mut self) -> Option<LegacyScroll> {
        let pins = self.legacy.as_mut()?;
        if pins.is_scrolling.is_low() {
            if pins.toward.is_high() {
                Some(LegacyScroll::Down)
            } else {
                Some(LegacyScroll::Up)
            }
        } else {
            None
        }
    }
}
