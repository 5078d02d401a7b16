//! Timing and system-control seam.
//!
//! The UI core needs three things from the machine it runs on: a
//! millisecond clock, a coarse frame delay, and a way to pull the
//! plug. On the nRF52840 these come from `embassy-time` and the SCB;
//! host tests use [`crate::testing::MockPlatform`].

/// Clock, frame delay, and reboot primitives.
pub trait Platform {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u64;

    /// Block the UI tick for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u64);

    /// Restart the system. Never returns on real hardware; the test
    /// double records the call instead, so the signature stays
    /// mockable.
    fn reboot(&mut self);
}

#[cfg(feature = "embedded")]
mod embassy_platform {
    use embassy_time::{block_for, Duration, Instant};

    use super::Platform;

    /// [`Platform`] backed by embassy-time and the Cortex-M SCB.
    pub struct EmbassyPlatform;

    impl Platform for EmbassyPlatform {
        fn now_ms(&self) -> u64 {
            Instant::now().as_millis()
        }

        fn delay_ms(&mut self, ms: u64) {
            block_for(Duration::from_millis(ms));
        }

        fn reboot(&mut self) {
            cortex_m::peripheral::SCB::sys_reset();
        }
    }
}

#[cfg(feature = "embedded")]
pub use embassy_platform::EmbassyPlatform;
