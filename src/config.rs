//! Application-wide constants and runtime configuration.
//!
//! All display geometry, timing parameters, and hardware pin
//! assignments live here so they can be tuned in one place.

/// OLED width in pixels.
pub const SCREEN_WIDTH: i32 = 128;

/// OLED height in pixels.
pub const SCREEN_HEIGHT: i32 = 32;

// Font metrics for the fixed-width 6x12 menu font.

/// Glyph advance of the menu font (px).
pub const TEXT_WIDTH: i32 = 6;

/// Line height of the menu font (px). One menu row is exactly one line.
pub const TEXT_HEIGHT: i32 = 12;

/// Horizontal/vertical padding around highlighted text (px).
pub const TEXT_MARGIN: i32 = 2;

/// X coordinate where menu rows start.
pub const INIT_CURSOR_X: i32 = 0;

/// Minimum spacing between legacy scroll-pin samples (ms).
pub const INPUT_DELAY_MS: u64 = 150;

/// Frame tick. Every animation advances once per this interval (ms).
pub const ANIMATION_DELAY_MS: u64 = 10;

/// Debounce lockout applied to both push buttons (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Quadrature pulses per physical encoder detent.
pub const PULSES_PER_DETENT: i32 = 4;

/// How long the reboot page accepts CANCEL before restarting (ms).
pub const REBOOT_GRACE_MS: u64 = 3000;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Encoder A       → P0.11  (pull-up, active low)
//   Encoder B       → P0.12  (pull-up, active low)
//   Encoder push    → P0.24  (pull-up, active low)
//   Cancel button   → P0.25  (pull-down, active high)
//   I²C SDA         → P0.26
//   I²C SCL         → P0.27
//   UART RX         → P0.08  (115200 baud serial console)

/// Serial console baud rate.
pub const SERIAL_BAUD: u32 = 115_200;

/// Proportional/integral/derivative coefficients for one controller.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PidGains {
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
}

/// Process-wide configuration, mutated only from the UI tick.
///
/// Lives in RAM only; edits do not survive a reboot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AppConfig {
    /// Gains for the selection/scroll followers.
    pub scroll_pid: PidGains,
    /// Gains for menu transitions and page slides.
    pub anim_pid: PidGains,
    /// When set, bytes on the serial console are consumed as commands.
    pub use_serial_control: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scroll_pid: PidGains {
                kp: 0.2,
                ki: 0.0,
                kd: 0.1,
            },
            anim_pid: PidGains {
                kp: 0.25,
                ki: 0.0,
                kd: 0.15,
            },
            use_serial_control: true,
        }
    }
}

/// Names one editable gain inside [`AppConfig`].
///
/// Edit pages hold a `GainField` instead of a pointer into the config,
/// so the write-back on confirm goes through the owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GainField {
    ScrollKp,
    ScrollKi,
    ScrollKd,
    AnimKp,
    AnimKi,
    AnimKd,
}

impl GainField {
    pub fn get(self, config: &AppConfig) -> f32 {
        match self {
            GainField::ScrollKp => config.scroll_pid.kp,
            GainField::ScrollKi => config.scroll_pid.ki,
            GainField::ScrollKd => config.scroll_pid.kd,
            GainField::AnimKp => config.anim_pid.kp,
            GainField::AnimKi => config.anim_pid.ki,
            GainField::AnimKd => config.anim_pid.kd,
        }
    }

    pub fn set(self, config: &mut AppConfig, value: f32) {
        match self {
            GainField::ScrollKp => config.scroll_pid.kp = value,
            GainField::ScrollKi => config.scroll_pid.ki = value,
            GainField::ScrollKd => config.scroll_pid.kd = value,
            GainField::AnimKp => config.anim_pid.kp = value,
            GainField::AnimKi => config.anim_pid.ki = value,
            GainField::AnimKd => config.anim_pid.kd = value,
        }
    }
}
