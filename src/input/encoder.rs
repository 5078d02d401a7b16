//! Quadrature decoding for the rotary encoder.
//!
//! [`QuadratureDecoder`] is the pure state machine: it is fed raw A/B
//! levels on every edge and accumulates pulses until a full detent is
//! reached. On hardware the edge feed runs in interrupt context, so the
//! decoder is shared through [`SharedEncoder`], which brackets every
//! access in a critical section.

use crate::config::PULSES_PER_DETENT;
use crate::input::Direction;

/// Pure quadrature state machine.
///
/// `on_edge` is safe to call from interrupt context: it performs no
/// allocation and no blocking, only field updates.
#[derive(Debug)]
pub struct QuadratureDecoder {
    last_encoded: u8,
    accumulator: i32,
    direction: i32,
    pulses_per_detent: i32,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            last_encoded: 0,
            accumulator: 0,
            direction: 0,
            pulses_per_detent: PULSES_PER_DETENT,
        }
    }

    /// Seed `last_encoded` from the pins' idle levels so the first
    /// physical turn is not miscounted.
    pub fn prime(&mut self, a: bool, b: bool) {
        self.last_encoded = encode(a, b);
    }

    /// Feed one A/B edge. Call on every level change of either pin.
    pub fn on_edge(&mut self, a: bool, b: bool) {
        let encoded = encode(a, b);
        let sum = (self.last_encoded << 2) | encoded;

        let increment = match sum {
            0b1101 | 0b0100 | 0b0010 | 0b1011 => 1,
            0b1110 | 0b0111 | 0b0001 | 0b1000 => -1,
            _ => 0,
        };

        if increment != 0 {
            // A reversal discards leftover pulses from the previous
            // turn so they cannot cancel out the new one.
            if self.direction != 0 && self.direction != increment {
                self.accumulator = 0;
            }
            self.direction = increment;
            self.accumulator += increment;
        }

        self.last_encoded = encoded;
    }

    /// Consume one full detent, if accumulated.
    pub fn poll_direction(&mut self) -> Direction {
        if self.accumulator >= self.pulses_per_detent {
            self.accumulator -= self.pulses_per_detent;
            return Direction::Clockwise;
        }
        if self.accumulator <= -self.pulses_per_detent {
            self.accumulator += self.pulses_per_detent;
            return Direction::CounterClockwise;
        }
        Direction::NoRotation
    }

    #[cfg(test)]
    pub fn accumulator(&self) -> i32 {
        self.accumulator
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn encode(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | (b as u8)
}

#[cfg(feature = "embedded")]
mod shared {
    use core::cell::RefCell;

    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_sync::blocking_mutex::Mutex;

    use super::QuadratureDecoder;
    use crate::input::Direction;

    /// Encoder state shared between the edge ISR context and the UI
    /// tick. Every read-modify-write runs inside a critical section.
    pub struct SharedEncoder {
        inner: Mutex<CriticalSectionRawMutex, RefCell<QuadratureDecoder>>,
    }

    impl SharedEncoder {
        pub const fn new() -> Self {
            Self {
                inner: Mutex::new(RefCell::new(QuadratureDecoder::new())),
            }
        }

        pub fn prime(&self, a: bool, b: bool) {
            self.inner.lock(|d| d.borrow_mut().prime(a, b));
        }

        /// Called from the edge watcher (interrupt executor).
        pub fn on_edge(&self, a: bool, b: bool) {
            self.inner.lock(|d| d.borrow_mut().on_edge(a, b));
        }

        /// Called from the UI tick.
        pub fn poll_direction(&self) -> Direction {
            self.inner.lock(|d| d.borrow_mut().poll_direction())
        }
    }

    impl Default for SharedEncoder {
        fn default() -> Self {
            Self::new()
        }
    }
}

#[cfg(feature = "embedded")]
pub use shared::SharedEncoder;
