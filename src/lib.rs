//! knobmenu - rotary-encoder menu firmware for a 128x32 OLED.
//!
//! The crate is split along a hardware seam: everything that makes the
//! UI tick (menu model, pages, PID animation, input decoding, frame
//! composition) is `no_std` logic testable on the host, while the
//! nRF52840 bindings (SSD1306 wrapper, GPIO/UARTE tasks, Embassy glue)
//! sit behind the `embedded` cargo feature and are only pulled in by
//! the firmware binary.
//!
//! Usage: `cargo test` on the host; `cargo build --features embedded`
//! (with the thumbv7em target) for the device.
//!
//! ## Layout
//!
//! - [`config`] - geometry, timing, pins, and the runtime [`config::AppConfig`]
//! - [`motion`] - PID controller and the settling [`motion::Follower`]
//! - [`input`] - quadrature decoder, debounced buttons, serial commands
//! - [`menu`] - menu arena, items, parent links
//! - [`page`] - page variants and the shared input policy
//! - [`ui`] - the controller: selection loop, transitions, page slides
//! - [`display`] / [`platform`] - traits the hardware implements

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod menu;
pub mod menus;
pub mod motion;
pub mod page;
pub mod platform;
pub mod testing;
pub mod ui;

pub use config::AppConfig;
pub use error::Error;
