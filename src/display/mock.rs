//! No-hardware display double.
//!
//! Records every draw call so host tests can assert on the rendered
//! stream (what text was drawn where, with which color and clip). The
//! fixed-width font metric matches the real 6x12 panel font.

use heapless::{String, Vec};

use crate::config::TEXT_WIDTH;
use crate::display::MenuDisplay;

const MAX_OPS: usize = 1024;
const MAX_TEXT: usize = 48;

/// One recorded draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    ClearBuffer,
    SetDrawColor(bool),
    SetClipWindow { x0: i32, y0: i32, x1: i32, y1: i32 },
    SetMaxClipWindow,
    Text { x: i32, y: i32, text: String<MAX_TEXT> },
    Frame { x: i32, y: i32, w: i32, h: i32 },
    Box { x: i32, y: i32, w: i32, h: i32 },
    RBox { x: i32, y: i32, w: i32, h: i32, radius: i32 },
    VLine { x: i32, y: i32, h: i32 },
    Flush,
}

/// Recording implementation of [`MenuDisplay`] for host tests.
#[derive(Debug, Default)]
pub struct MockDisplay {
    ops: Vec<DrawOp, MAX_OPS>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything drawn so far, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Forget the recorded stream (keeps the display usable).
    pub fn take_ops(&mut self) -> Vec<DrawOp, MAX_OPS> {
        core::mem::take(&mut self.ops)
    }

    /// All text draws since the last `take_ops`, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, i32, i32)> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { x, y, text } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|(t, _, _)| t == needle)
    }

    fn push(&mut self, op: DrawOp) {
        // Old frames fall off the front once the buffer fills; tests
        // that care about long runs call take_ops between frames.
        if self.ops.is_full() {
            self.ops.remove(0);
        }
        let _ = self.ops.push(op);
    }
}

impl MenuDisplay for MockDisplay {
    fn clear_buffer(&mut self) {
        self.push(DrawOp::ClearBuffer);
    }

    fn set_draw_color(&mut self, on: bool) {
        self.push(DrawOp::SetDrawColor(on));
    }

    fn set_clip_window(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.push(DrawOp::SetClipWindow { x0, y0, x1, y1 });
    }

    fn set_max_clip_window(&mut self) {
        self.push(DrawOp::SetMaxClipWindow);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        let mut copy: String<MAX_TEXT> = String::new();
        let _ = copy.push_str(text);
        self.push(DrawOp::Text { x, y, text: copy });
    }

    fn draw_frame(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.push(DrawOp::Frame { x, y, w, h });
    }

    fn draw_box(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.push(DrawOp::Box { x, y, w, h });
    }

    fn draw_rbox(&mut self, x: i32, y: i32, w: i32, h: i32, radius: i32) {
        self.push(DrawOp::RBox { x, y, w, h, radius });
    }

    fn draw_vline(&mut self, x: i32, y: i32, h: i32) {
        self.push(DrawOp::VLine { x, y, h });
    }

    fn str_width(&self, text: &str) -> i32 {
        text.chars().count() as i32 * TEXT_WIDTH
    }

    fn flush(&mut self) {
        self.push(DrawOp::Flush);
    }
}
