//! Pages - full-screen views opened from menu items.
//!
//! A page owns its own input policy hooks and draws itself with a
//! vertical offset so the controller can slide it over the menu during
//! entry and exit. The input handler is shared: cancel has the highest
//! priority, then all pending rotation is drained, then confirm.
//! Returning `true` from the handler closes the page.

pub mod edit_float;
pub mod info;
pub mod reboot;

pub use edit_float::EditFloatPage;
pub use info::InfoPage;
pub use reboot::RebootPage;

use crate::config::{AppConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::display::MenuDisplay;
use crate::input::{Direction, InputSource};
use crate::platform::Platform;

/// A view opened from an `Action` menu item.
///
/// Explicit dispatch over a closed set of variants; the shared
/// `handle_input` policy lives here so concrete pages never touch the
/// input transport.
pub enum Page {
    Info(InfoPage),
    EditFloat(EditFloatPage),
    Reboot(RebootPage),
}

impl Page {
    /// Run one tick of input handling. Returns `true` when the page is
    /// finished and should be closed.
    pub fn handle_input<I: InputSource>(
        &mut self,
        input: &mut I,
        config: &mut AppConfig,
        now_ms: u64,
    ) -> bool {
        if input.cancel_fired() {
            return self.on_cancel(now_ms);
        }

        loop {
            match input.poll_direction() {
                Direction::CounterClockwise => self.on_scroll_up(),
                Direction::Clockwise => self.on_scroll_down(),
                Direction::NoRotation => break,
            }
        }

        if input.confirm_fired() {
            return self.on_confirm(config);
        }

        false
    }

    /// Draw the page shifted down by `y_offset` (negative while sliding
    /// in from above).
    pub fn draw<D: MenuDisplay, P: Platform>(
        &mut self,
        display: &mut D,
        platform: &mut P,
        y_offset: i32,
    ) {
        match self {
            Page::Info(p) => p.draw(display, y_offset),
            Page::EditFloat(p) => p.draw(display, y_offset),
            Page::Reboot(p) => p.draw(display, platform, y_offset),
        }
    }

    fn on_scroll_up(&mut self) {
        match self {
            Page::Info(p) => p.scroll_up(),
            Page::EditFloat(p) => p.scroll_up(),
            Page::Reboot(_) => {}
        }
    }

    fn on_scroll_down(&mut self) {
        match self {
            Page::Info(p) => p.scroll_down(),
            Page::EditFloat(p) => p.scroll_down(),
            Page::Reboot(_) => {}
        }
    }

    fn on_confirm(&mut self, config: &mut AppConfig) -> bool {
        match self {
            // Neither the text view nor the reboot screen consumes
            // confirm; the page stays open.
            Page::Info(_) | Page::Reboot(_) => false,
            Page::EditFloat(p) => p.confirm(config),
        }
    }

    fn on_cancel(&mut self, now_ms: u64) -> bool {
        match self {
            // Default cancel policy: close (discarding, for the editor).
            Page::Info(_) | Page::EditFloat(_) => true,
            Page::Reboot(p) => p.cancel(now_ms),
        }
    }
}

/// Blank out the page's screen area before drawing its content, so the
/// menu underneath does not show through during slide animations.
pub(crate) fn clear_page_region<D: MenuDisplay>(display: &mut D, y_offset: i32) {
    display.set_draw_color(false);
    display.draw_box(0, y_offset, SCREEN_WIDTH, SCREEN_HEIGHT);
    display.set_draw_color(true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GainField;
    use crate::input::Command;
    use crate::testing::ScriptedInput;

    #[test]
    fn cancel_takes_priority_over_scroll_and_confirm() {
        let mut input = ScriptedInput::new();
        input.press_cancel();
        input.turn(Direction::Clockwise, 2);

        let mut config = AppConfig::default();
        let mut page = Page::EditFloat(EditFloatPage::new(
            "Scroll Kp",
            GainField::ScrollKp,
            0.2,
            0.01,
            0.0,
            1.0,
        ));
        assert!(page.handle_input(&mut input, &mut config, 0));
        // The queued scroll events were never consumed.
        assert_eq!(input.poll_direction(), Direction::Clockwise);
    }

    #[test]
    fn all_pending_rotation_is_drained_in_one_tick() {
        let mut input = ScriptedInput::new();
        input.turn(Direction::Clockwise, 3);

        let mut config = AppConfig::default();
        let mut page = Page::EditFloat(EditFloatPage::new(
            "Scroll Kp",
            GainField::ScrollKp,
            0.2,
            0.01,
            0.0,
            1.0,
        ));
        assert!(!page.handle_input(&mut input, &mut config, 0));
        assert_eq!(input.poll_direction(), Direction::NoRotation);
    }

    #[test]
    fn confirm_on_info_page_keeps_it_open() {
        let mut input = ScriptedInput::new();
        input.press_confirm();

        let mut config = AppConfig::default();
        let scroll = config.scroll_pid;
        let mut page = Page::Info(InfoPage::new("hello\nworld", scroll));
        assert!(!page.handle_input(&mut input, &mut config, 0));
    }

    #[test]
    fn queued_commands_are_not_consumed_by_pages() {
        // Pages only see buttons and rotation; the serial path belongs
        // to the menu loop.
        let mut input = ScriptedInput::new();
        input.send_command(Command::Cancel);

        let mut config = AppConfig::default();
        let scroll = config.scroll_pid;
        let mut page = Page::Info(InfoPage::new("hello", scroll));
        assert!(!page.handle_input(&mut input, &mut config, 0));
        assert_eq!(input.poll_command(), Some(Command::Cancel));
    }
}
