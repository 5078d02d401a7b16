//! Horizontal progress bar.

use crate::display::MenuDisplay;

/// Framed bar filled proportionally to a value. Stateless: position and
/// size are fixed at construction, the value comes in per draw.
#[derive(Clone, Copy, Debug)]
pub struct ProgressBar {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl ProgressBar {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Draw at `percentage` (clamped to 0..=100), shifted by `y_offset`.
    pub fn draw<D: MenuDisplay>(&self, display: &mut D, percentage: f32, y_offset: i32) {
        let percentage = percentage.clamp(0.0, 100.0);
        let bar_width = (percentage / 100.0 * self.width as f32) as i32;

        display.draw_frame(self.x, self.y + y_offset, self.width, self.height);
        display.draw_box(self.x, self.y + y_offset, bar_width, self.height);
    }

    /// Map `value` within `min..=max` to a percentage and draw it.
    /// An empty range draws as 0%.
    pub fn draw_range<D: MenuDisplay>(
        &self,
        display: &mut D,
        value: f32,
        min: f32,
        max: f32,
        y_offset: i32,
    ) {
        let percentage = if max > min {
            (value.clamp(min, max) - min) / (max - min) * 100.0
        } else {
            0.0
        };
        self.draw(display, percentage, y_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::mock::{DrawOp, MockDisplay};

    #[test]
    fn full_and_empty_fills() {
        let bar = ProgressBar::new(0, 20, 100, 6);
        let mut display = MockDisplay::new();

        bar.draw(&mut display, 250.0, 0);
        assert!(display
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Box { w: 100, .. })));

        display.take_ops();
        bar.draw(&mut display, -10.0, 0);
        assert!(display
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Box { w: 0, .. })));
    }

    #[test]
    fn range_maps_to_percentage() {
        let bar = ProgressBar::new(0, 20, 100, 6);
        let mut display = MockDisplay::new();
        bar.draw_range(&mut display, 0.25, 0.0, 1.0, 0);
        assert!(display
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Box { w: 25, .. })));
    }

    #[test]
    fn empty_range_draws_zero_instead_of_dividing() {
        let bar = ProgressBar::new(0, 20, 100, 6);
        let mut display = MockDisplay::new();
        bar.draw_range(&mut display, 5.0, 3.0, 3.0, 0);
        assert!(display
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Box { w: 0, .. })));
    }

    #[test]
    fn y_offset_shifts_both_frame_and_fill() {
        let bar = ProgressBar::new(2, 20, 60, 6);
        let mut display = MockDisplay::new();
        bar.draw(&mut display, 50.0, -10);
        assert!(display
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Frame { y: 10, .. })));
        assert!(display
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::Box { y: 10, w: 30, .. })));
    }
}
