//! Timed reboot page.

use crate::config::{REBOOT_GRACE_MS, TEXT_HEIGHT, TEXT_MARGIN};
use crate::display::MenuDisplay;
use crate::page::clear_page_region;
use crate::platform::Platform;

/// Counts down from entry and restarts the system.
///
/// The entry time is stamped on the first frame the page is shown.
/// CANCEL aborts only during the grace window; once it elapses the next
/// draw pulls the trigger and the cancel button goes dead.
pub struct RebootPage {
    entry_ms: Option<u64>,
    fired: bool,
}

impl RebootPage {
    pub const fn new() -> Self {
        Self {
            entry_ms: None,
            fired: false,
        }
    }

    fn elapsed(&self, now_ms: u64) -> u64 {
        match self.entry_ms {
            Some(entry) => now_ms.wrapping_sub(entry),
            None => 0,
        }
    }

    /// Close the page only while the grace window is still open.
    pub fn cancel(&mut self, now_ms: u64) -> bool {
        self.elapsed(now_ms) < REBOOT_GRACE_MS
    }

    pub fn draw<D: MenuDisplay, P: Platform>(
        &mut self,
        display: &mut D,
        platform: &mut P,
        y_offset: i32,
    ) {
        let now = platform.now_ms();
        let entry = *self.entry_ms.get_or_insert(now);

        if now.wrapping_sub(entry) >= REBOOT_GRACE_MS {
            // On hardware reboot() never returns; the guard only
            // matters for the recording test double.
            if !self.fired {
                self.fired = true;
                platform.reboot();
            }
            return;
        }

        clear_page_region(display, y_offset);
        display.draw_text(
            TEXT_MARGIN,
            TEXT_HEIGHT - TEXT_MARGIN + y_offset,
            "Rebooting...",
        );
        display.draw_text(
            TEXT_MARGIN,
            TEXT_HEIGHT * 2 - TEXT_MARGIN + y_offset,
            "Press CANCEL",
        );
    }
}

impl Default for RebootPage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::mock::MockDisplay;
    use crate::testing::MockPlatform;

    /// Draw once so the page stamps its entry time.
    fn entered_at(entry_ms: u64) -> (RebootPage, MockDisplay, MockPlatform) {
        let mut page = RebootPage::new();
        let mut display = MockDisplay::new();
        let mut platform = MockPlatform::at(entry_ms);
        page.draw(&mut display, &mut platform, 0);
        (page, display, platform)
    }

    #[test]
    fn cancel_works_inside_grace_window() {
        let (mut page, ..) = entered_at(1000);
        assert!(page.cancel(1000 + 1500));
    }

    #[test]
    fn cancel_is_ignored_after_grace_window() {
        let (mut page, ..) = entered_at(1000);
        assert!(!page.cancel(1000 + REBOOT_GRACE_MS));
        assert!(!page.cancel(1000 + REBOOT_GRACE_MS + 500));
    }

    #[test]
    fn cancel_before_first_frame_still_closes() {
        let mut page = RebootPage::new();
        assert!(page.cancel(123_456));
    }

    #[test]
    fn draw_counts_down_then_reboots_exactly_once() {
        let (mut page, mut display, mut platform) = entered_at(0);
        assert_eq!(platform.reboot_count(), 0);
        assert!(display.contains_text("Rebooting..."));
        assert!(display.contains_text("Press CANCEL"));

        platform.advance(REBOOT_GRACE_MS);
        display.take_ops();
        page.draw(&mut display, &mut platform, 0);
        assert_eq!(platform.reboot_count(), 1);
        // Nothing is rendered past the point of no return.
        assert!(display.ops().is_empty());

        // The recording double survives the call; a second frame must
        // not double-fire.
        page.draw(&mut display, &mut platform, 0);
        assert_eq!(platform.reboot_count(), 1);
    }
}
