//! Input decoding - rotary encoder, push buttons, serial console.
//!
//! The UI consumes discrete events each tick through the
//! [`InputSource`] trait; how those events are produced (GPIO edges,
//! debounced levels, serial bytes) lives behind it. The embedded
//! implementation is in [`hardware`]; host tests script their own.

pub mod buttons;
pub mod encoder;
pub mod serial;

#[cfg(feature = "embedded")]
pub mod hardware;

/// Direction of one full encoder detent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    NoRotation,
    Clockwise,
    CounterClockwise,
}

/// A decoded remote command from the serial console.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    ScrollUp,
    ScrollDown,
    Confirm,
    Cancel,
}

/// Direction reported by the legacy scroll-pin pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LegacyScroll {
    Up,
    Down,
}

/// Polled event source consumed by the UI tick.
///
/// All methods are edge-style: a fired button or a detent is reported
/// exactly once. `poll_direction` yields at most one detent per call so
/// the UI processes one step at a time; callers drain it in a loop.
pub trait InputSource {
    /// The cancel button fired since the last call.
    fn cancel_fired(&mut self) -> bool;

    /// The encoder push button fired since the last call.
    fn confirm_fired(&mut self) -> bool;

    /// Consume one full detent of rotation, if available.
    fn poll_direction(&mut self) -> Direction;

    /// Consume one pending serial command, if available.
    fn poll_command(&mut self) -> Option<Command>;

    /// Sample the legacy scroll-pin pair, if that hardware dialect is
    /// wired. The default (encoder-only builds) reports nothing.
    fn legacy_scroll(&mut self) -> Option<LegacyScroll> {
        None
    }
}
