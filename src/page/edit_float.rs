//! Numeric parameter editor page.

use core::fmt::Write;

use heapless::String;

use crate::config::{
    AppConfig, GainField, SCREEN_WIDTH, TEXT_HEIGHT, TEXT_MARGIN,
};
use crate::display::MenuDisplay;
use crate::page::clear_page_region;
use crate::ui::progress::ProgressBar;

/// Edits one gain by whole steps of the encoder.
///
/// The edit happens on a working copy: confirm writes it back through
/// the owning config, cancel throws it away. When a real range is given
/// (`min != max`) the value is clamped and a progress bar tracks it.
pub struct EditFloatPage {
    title: &'static str,
    field: GainField,
    current_value: f32,
    step: f32,
    min: f32,
    max: f32,
    show_progress: bool,
    bar: ProgressBar,
}

impl EditFloatPage {
    pub fn new(
        title: &'static str,
        field: GainField,
        value: f32,
        step: f32,
        min: f32,
        max: f32,
    ) -> Self {
        Self {
            title,
            field,
            current_value: value,
            step,
            min,
            max,
            show_progress: min != max,
            bar: ProgressBar::new(
                TEXT_MARGIN,
                TEXT_HEIGHT * 2 + TEXT_MARGIN,
                SCREEN_WIDTH - 2 * TEXT_MARGIN,
                6,
            ),
        }
    }

    /// Convenience constructor for the config's gain pages: the working
    /// copy starts at the field's current value.
    pub fn for_gain(
        title: &'static str,
        field: GainField,
        config: &AppConfig,
        step: f32,
    ) -> Self {
        Self::new(title, field, field.get(config), step, 0.0, 1.0)
    }

    /// CCW detent: decrease by one step.
    pub fn scroll_up(&mut self) {
        self.current_value -= self.step;
        if self.show_progress {
            self.current_value = self.current_value.clamp(self.min, self.max);
        }
    }

    /// CW detent: increase by one step.
    pub fn scroll_down(&mut self) {
        self.current_value += self.step;
        if self.show_progress {
            self.current_value = self.current_value.clamp(self.min, self.max);
        }
    }

    /// Write the edited value back. Always closes the page.
    pub fn confirm(&mut self, config: &mut AppConfig) -> bool {
        self.field.set(config, self.current_value);
        true
    }

    pub fn draw<D: MenuDisplay>(&mut self, display: &mut D, y_offset: i32) {
        clear_page_region(display, y_offset);

        display.draw_text(TEXT_MARGIN, TEXT_HEIGHT - TEXT_MARGIN + y_offset, self.title);

        let mut line: String<24> = String::new();
        let _ = write!(line, "Value: {:.3}", self.current_value);
        display.draw_text(
            TEXT_MARGIN,
            TEXT_HEIGHT * 2 - TEXT_MARGIN + y_offset,
            line.as_str(),
        );

        if self.show_progress {
            self.bar
                .draw_range(display, self.current_value, self.min, self.max, y_offset);
        }
    }

    #[cfg(test)]
    pub fn current_value(&self) -> f32 {
        self.current_value
    }
}
