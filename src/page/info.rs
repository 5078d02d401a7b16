//! Scrollable multi-line text page.

use libm::roundf;

use crate::config::{PidGains, SCREEN_HEIGHT, SCREEN_WIDTH, TEXT_HEIGHT, TEXT_MARGIN};
use crate::display::MenuDisplay;
use crate::motion::Follower;
use crate::page::clear_page_region;

/// Height of the scrollbar slider (px).
const SLIDER_HEIGHT: i32 = 5;

/// Lines that fit on screen at once.
const VISIBLE_LINES: i32 = SCREEN_HEIGHT / TEXT_HEIGHT;

/// Static text with smooth line-wise scrolling and a scrollbar.
///
/// Newlines in the content are the only line breaks; there is no
/// wrapping. Cancel closes the page, confirm is ignored.
pub struct InfoPage {
    content: &'static str,
    total_lines: i32,
    target_line: i32,
    scroll: Follower,
}

impl InfoPage {
    pub fn new(content: &'static str, scroll_gains: PidGains) -> Self {
        let total_lines = content.matches('\n').count() as i32 + 1;
        Self {
            content,
            total_lines,
            target_line: 0,
            scroll: Follower::new(0.0, scroll_gains),
        }
    }

    fn max_target(&self) -> i32 {
        (self.total_lines - VISIBLE_LINES).max(0)
    }

    /// CCW detent: move one line back toward the top.
    pub fn scroll_up(&mut self) {
        self.target_line = (self.target_line - 1).clamp(0, self.max_target());
    }

    /// CW detent: move one line further into the text.
    pub fn scroll_down(&mut self) {
        self.target_line = (self.target_line + 1).clamp(0, self.max_target());
    }

    pub fn draw<D: MenuDisplay>(&mut self, display: &mut D, y_offset: i32) {
        self.scroll.step((self.target_line * TEXT_HEIGHT) as f32);
        let scroll_px = roundf(self.scroll.current()) as i32;

        clear_page_region(display, y_offset);

        for (index, line) in self.content.split('\n').enumerate() {
            let line_y = index as i32 * TEXT_HEIGHT - scroll_px;
            // Cull lines entirely outside the pane.
            if line_y <= -TEXT_HEIGHT || line_y >= SCREEN_HEIGHT + TEXT_HEIGHT {
                continue;
            }
            display.draw_text(
                TEXT_MARGIN,
                line_y + TEXT_HEIGHT - TEXT_MARGIN + y_offset,
                line,
            );
        }

        if self.total_lines > VISIBLE_LINES {
            self.draw_scrollbar(display, y_offset, scroll_px);
        }
    }

    fn draw_scrollbar<D: MenuDisplay>(&self, display: &mut D, y_offset: i32, scroll_px: i32) {
        let track_x = SCREEN_WIDTH - 1;
        display.draw_vline(track_x, y_offset, SCREEN_HEIGHT);

        let max_scroll_px = self.max_target() * TEXT_HEIGHT;
        let ratio = if max_scroll_px > 0 {
            scroll_px as f32 / max_scroll_px as f32
        } else {
            0.0
        };
        let slider_y = roundf(ratio.clamp(0.0, 1.0) * (SCREEN_HEIGHT - SLIDER_HEIGHT) as f32) as i32;
        display.draw_box(track_x - 1, slider_y + y_offset, 2, SLIDER_HEIGHT);
    }

    #[cfg(test)]
    pub fn target_line(&self) -> i32 {
        self.target_line
    }

    #[cfg(test)]
    pub fn total_lines(&self) -> i32 {
        self.total_lines
    }
}
