//! Unified error type for knobmenu.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A fixed-capacity menu collection is full (too many menus,
    /// too many items in one menu, or the navigation stack overflowed).
    Capacity,

    /// I²C transaction to the display failed during bring-up.
    Display,
}
