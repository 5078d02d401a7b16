//! The menu/page state machine and frame composition.
//!
//! `UiController` owns the display, the input source, and the platform
//! clock, and runs the whole UI: the selection loop of the active menu,
//! animated menu-to-menu transitions, and the lifecycle of pages opened
//! from action items. All motion goes through [`Follower`]s; one frame
//! is one tick of every active follower followed by a full redraw.
//!
//! The selection highlight is a rounded box drawn over the row; the
//! row's text is then redrawn in the clear color inside a clip window
//! covering exactly the box, which inverts it without disturbing the
//! rest of the frame.

use heapless::Vec;
use libm::roundf;

use crate::config::{
    AppConfig, ANIMATION_DELAY_MS, INIT_CURSOR_X, INPUT_DELAY_MS, SCREEN_HEIGHT, SCREEN_WIDTH,
    TEXT_HEIGHT, TEXT_MARGIN,
};
use crate::display::MenuDisplay;
use crate::input::{Command, Direction, InputSource, LegacyScroll};
use crate::menu::{ItemKind, Menu, MenuId, MenuTree, OnClose};
use crate::motion::{Follower, Pid};
use crate::page::Page;
use crate::platform::Platform;

/// Maximum nesting depth of the menu stack.
pub const MAX_DEPTH: usize = 8;

/// Corner radius of the selection highlight.
const HIGHLIGHT_RADIUS: i32 = 2;

/// Integral clamp for the screen-wide slide follower. Slides cover two
/// orders of magnitude more distance than row hops, so the windup guard
/// is wider.
const SLIDE_INTEGRAL_LIMIT: f32 = 100.0;

/// How one tick of the active menu ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOutcome {
    /// The item at this index was activated.
    Selected(usize),
    /// The user backed out.
    Cancelled,
}

/// Which way a menu transition slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Into a submenu: the new menu slides in from the right.
    Forward,
    /// Back to the parent: the new menu slides in from the left.
    Backward,
}

/// The UI runtime. Owns the peripherals, borrows the menu tree and the
/// config for the duration of [`UiController::run`].
pub struct UiController<D, I, P> {
    display: D,
    input: I,
    platform: P,
    anim_pid: Pid,
    scroll_pid: Pid,
}

impl<D, I, P> UiController<D, I, P>
where
    D: MenuDisplay,
    I: InputSource,
    P: Platform,
{
    pub fn new(display: D, input: I, platform: P, config: &AppConfig) -> Self {
        Self {
            display,
            input,
            platform,
            anim_pid: Pid::new(config.anim_pid),
            scroll_pid: Pid::new(config.scroll_pid),
        }
    }

    /// Re-read both gain sets from the config and drop accumulated
    /// controller state, so the next animation runs on the new values.
    pub fn update_pid_gains(&mut self, config: &AppConfig) {
        self.anim_pid.set_gains(config.anim_pid);
        self.anim_pid.reset();
        self.scroll_pid.set_gains(config.scroll_pid);
        self.scroll_pid.reset();
    }

    /// Main UI loop. Never returns in normal operation: cancelling at
    /// the root menu is a no-op, so the stack stays non-empty.
    pub fn run(&mut self, tree: &mut MenuTree, root: MenuId, config: &mut AppConfig) {
        let mut stack: Vec<MenuId, MAX_DEPTH> = Vec::new();
        let _ = stack.push(root);

        while let Some(&current) = stack.last() {
            match self.show_menu(tree, current, config) {
                MenuOutcome::Selected(index) => {
                    let item = *tree.menu(current).item(index);
                    match item.kind {
                        ItemKind::Submenu(submenu) => {
                            tree.menu_mut(submenu).selected = 0;
                            self.animate_transition(
                                tree,
                                current,
                                Some(submenu),
                                Transition::Forward,
                                config,
                            );
                            // A full stack leaves us where we are.
                            let _ = stack.push(submenu);
                        }
                        ItemKind::Action { open, on_close } => {
                            if let Some(mut page) = open(config) {
                                self.handle_page(tree, current, &mut page, on_close, config);
                            }
                        }
                        ItemKind::Switch { toggle, .. } => {
                            toggle(config);
                        }
                    }
                }
                MenuOutcome::Cancelled => {
                    if stack.len() > 1 {
                        let parent = stack[stack.len() - 2];
                        self.animate_transition(
                            tree,
                            current,
                            Some(parent),
                            Transition::Backward,
                            config,
                        );
                        stack.pop();
                    }
                }
            }
        }
    }

    /// Run the active menu until an item is activated or the user backs
    /// out. One loop iteration is one frame tick.
    pub fn show_menu(
        &mut self,
        tree: &mut MenuTree,
        id: MenuId,
        config: &mut AppConfig,
    ) -> MenuOutcome {
        let scroll_gains = self.scroll_pid.gains();

        let (start_y, start_w) = {
            let menu = tree.menu(id);
            let y = (menu.selected as i32 * TEXT_HEIGHT) as f32;
            let w = if menu.is_empty() {
                0.0
            } else {
                self.display.str_width(menu.item(menu.selected).label) as f32
            };
            (y, w)
        };
        let mut y_follower = Follower::new(start_y, scroll_gains);
        let mut w_follower = Follower::new(start_w, scroll_gains);

        // Persistent vertical translation that keeps the highlighted
        // row on screen; it tracks monotonically across ticks.
        let mut scroll_screen = calculate_scroll_offset(tree.menu(id));
        let mut last_input_ms = self.platform.now_ms();

        loop {
            let now = self.platform.now_ms();

            if config.use_serial_control {
                match self.input.poll_command() {
                    Some(Command::Cancel) => return MenuOutcome::Cancelled,
                    Some(Command::Confirm) => {
                        return MenuOutcome::Selected(tree.menu(id).selected)
                    }
                    Some(Command::ScrollUp) => tree.menu_mut(id).select_prev(),
                    Some(Command::ScrollDown) => tree.menu_mut(id).select_next(),
                    None => {}
                }
            }

            if self.input.cancel_fired() {
                return MenuOutcome::Cancelled;
            }
            if self.input.confirm_fired() {
                return MenuOutcome::Selected(tree.menu(id).selected);
            }

            if now.wrapping_sub(last_input_ms) >= INPUT_DELAY_MS {
                last_input_ms = now;
                match self.input.legacy_scroll() {
                    Some(LegacyScroll::Up) => tree.menu_mut(id).select_prev(),
                    Some(LegacyScroll::Down) => tree.menu_mut(id).select_next(),
                    None => {}
                }
            }

            loop {
                match self.input.poll_direction() {
                    Direction::Clockwise => tree.menu_mut(id).select_next(),
                    Direction::CounterClockwise => tree.menu_mut(id).select_prev(),
                    Direction::NoRotation => break,
                }
            }

            let menu = tree.menu(id);
            let target_y = (menu.selected as i32 * TEXT_HEIGHT) as f32;
            let target_w = if menu.is_empty() {
                0.0
            } else {
                self.display.str_width(menu.item(menu.selected).label) as f32
            };
            y_follower.step(target_y);
            w_follower.step(target_w);

            let highlight_y = roundf(y_follower.current()) as i32 + scroll_screen;
            if highlight_y > SCREEN_HEIGHT - TEXT_HEIGHT {
                scroll_screen -= highlight_y - (SCREEN_HEIGHT - TEXT_HEIGHT);
            } else if highlight_y < 0 {
                scroll_screen -= highlight_y;
            }

            self.display.clear_buffer();
            self.display.set_draw_color(true);
            render_menu(
                &mut self.display,
                menu,
                config,
                0,
                scroll_screen,
                roundf(y_follower.current()) as i32 + scroll_screen,
                roundf(w_follower.current()) as i32,
            );
            self.display.flush();

            self.platform.delay_ms(ANIMATION_DELAY_MS);
        }
    }

    /// Slide between two menus. `Forward` brings `to` in from the
    /// right, `Backward` from the left; the shared highlight morphs
    /// between the two menus' selection metrics. `Forward` with no
    /// destination slides `from` out without a replacement.
    pub fn animate_transition(
        &mut self,
        tree: &MenuTree,
        from: MenuId,
        to: Option<MenuId>,
        direction: Transition,
        config: &AppConfig,
    ) {
        self.anim_pid.reset();
        let anim_gains = self.anim_pid.gains();
        let from_y_offset = calculate_scroll_offset(tree.menu(from));

        if direction == Transition::Forward && to.is_none() {
            // Root exit path: the active menu slides off to the left.
            let mut x = Follower::with_integral_limit(0.0, anim_gains, SLIDE_INTEGRAL_LIMIT);
            loop {
                if x.step(-SCREEN_WIDTH as f32) {
                    break;
                }
                self.display.clear_buffer();
                self.display.set_draw_color(true);
                self.draw_menu(tree, from, roundf(x.current()) as i32, from_y_offset, config);
                self.display.flush();
                self.platform.delay_ms(ANIMATION_DELAY_MS);
            }
            return;
        }

        let to_y_offset = to.map(|id| calculate_scroll_offset(tree.menu(id))).unwrap_or(0);

        let from_menu = tree.menu(from);
        let select_y_start = (from_menu.selected as i32 * TEXT_HEIGHT + from_y_offset) as f32;
        let select_w_start = if from_menu.is_empty() {
            0.0
        } else {
            self.display.str_width(from_menu.item(from_menu.selected).label) as f32
        };

        let (select_y_target, select_w_target) = match to {
            Some(id) => {
                let to_menu = tree.menu(id);
                let y = (to_menu.selected as i32 * TEXT_HEIGHT + to_y_offset) as f32;
                let w = if to_menu.is_empty() {
                    0.0
                } else {
                    self.display.str_width(to_menu.item(to_menu.selected).label) as f32
                };
                (y, w)
            }
            None => (select_y_start, SCREEN_WIDTH as f32),
        };

        let start_x = match direction {
            Transition::Forward => SCREEN_WIDTH as f32,
            Transition::Backward => -SCREEN_WIDTH as f32,
        };
        let mut x = Follower::with_integral_limit(start_x, anim_gains, SLIDE_INTEGRAL_LIMIT);
        let mut y = Follower::new(select_y_start, anim_gains);
        let mut w = Follower::new(select_w_start, anim_gains);

        loop {
            if x.step(0.0) {
                break;
            }
            y.step(select_y_target);
            w.step(select_w_target);

            let x_to = roundf(x.current()) as i32;
            let x_from = match direction {
                Transition::Forward => x_to - SCREEN_WIDTH,
                Transition::Backward => x_to + SCREEN_WIDTH,
            };

            self.display.clear_buffer();
            self.display.set_draw_color(true);

            let from_menu = tree.menu(from);
            draw_row_labels(
                &mut self.display,
                from_menu,
                config,
                x_from,
                from_y_offset,
                Some(from_menu.selected),
            );
            if let Some(id) = to {
                let to_menu = tree.menu(id);
                draw_row_labels(
                    &mut self.display,
                    to_menu,
                    config,
                    x_to,
                    to_y_offset,
                    Some(to_menu.selected),
                );
            }

            let box_y = roundf(y.current()) as i32;
            let box_w = roundf(w.current()) as i32 + 2 * TEXT_MARGIN;
            self.display
                .draw_rbox(INIT_CURSOR_X, box_y, box_w, TEXT_HEIGHT, HIGHLIGHT_RADIUS);

            self.display.set_draw_color(false);
            self.display.set_clip_window(
                INIT_CURSOR_X,
                box_y,
                INIT_CURSOR_X + box_w,
                box_y + TEXT_HEIGHT,
            );

            let baseline = box_y + TEXT_HEIGHT - TEXT_MARGIN;
            if !from_menu.is_empty() {
                self.display.draw_text(
                    x_from + INIT_CURSOR_X + TEXT_MARGIN,
                    baseline,
                    from_menu.item(from_menu.selected).label,
                );
            }
            if let Some(id) = to {
                let to_menu = tree.menu(id);
                if !to_menu.is_empty() {
                    self.display.draw_text(
                        x_to + INIT_CURSOR_X + TEXT_MARGIN,
                        baseline,
                        to_menu.item(to_menu.selected).label,
                    );
                }
            }

            self.display.set_max_clip_window();
            self.display.set_draw_color(true);
            self.display.flush();

            self.platform.delay_ms(ANIMATION_DELAY_MS);
        }
    }

    /// Full page lifecycle: slide in over the menu, interact, slide
    /// out. The close hook runs before the exit slide so a gain edit is
    /// already visible in it.
    pub fn handle_page(
        &mut self,
        tree: &MenuTree,
        under: MenuId,
        page: &mut Page,
        on_close: OnClose,
        config: &mut AppConfig,
    ) {
        let menu_y_offset = calculate_scroll_offset(tree.menu(under));

        self.anim_pid.reset();
        self.slide_page(tree, under, page, menu_y_offset, config, -SCREEN_HEIGHT as f32, 0.0);

        loop {
            let now = self.platform.now_ms();
            if page.handle_input(&mut self.input, config, now) {
                break;
            }

            self.display.clear_buffer();
            self.display.set_draw_color(true);
            page.draw(&mut self.display, &mut self.platform, 0);
            self.display.flush();
            self.platform.delay_ms(ANIMATION_DELAY_MS);
        }

        if on_close == OnClose::ReloadGains {
            self.update_pid_gains(config);
        }

        self.anim_pid.reset();
        self.slide_page(tree, under, page, menu_y_offset, config, 0.0, -SCREEN_HEIGHT as f32);
    }

    /// One page slide: redraw the static menu underneath, then the page
    /// at the follower's current offset, every frame until settled.
    fn slide_page(
        &mut self,
        tree: &MenuTree,
        under: MenuId,
        page: &mut Page,
        menu_y_offset: i32,
        config: &AppConfig,
        start_y: f32,
        target_y: f32,
    ) {
        let mut y = Follower::new(start_y, self.anim_pid.gains());
        loop {
            if y.step(target_y) {
                break;
            }
            self.display.clear_buffer();
            self.display.set_draw_color(true);
            self.draw_menu(tree, under, 0, menu_y_offset, config);
            page.draw(
                &mut self.display,
                &mut self.platform,
                roundf(y.current()) as i32,
            );
            self.display.flush();
            self.platform.delay_ms(ANIMATION_DELAY_MS);
        }
    }

    /// Static menu draw (no animation state): selection metrics come
    /// straight from the menu. Used as the underlay during page slides.
    pub fn draw_menu(
        &mut self,
        tree: &MenuTree,
        id: MenuId,
        x_offset: i32,
        y_offset: i32,
        config: &AppConfig,
    ) {
        let menu = tree.menu(id);
        if menu.is_empty() {
            return;
        }
        let highlight_y = menu.selected as i32 * TEXT_HEIGHT + y_offset;
        let highlight_w = self.display.str_width(menu.item(menu.selected).label);
        render_menu(
            &mut self.display,
            menu,
            config,
            x_offset,
            y_offset,
            highlight_y,
            highlight_w,
        );
    }

    /// Tear down and hand the peripherals back.
    pub fn release(self) -> (D, I, P) {
        (self.display, self.input, self.platform)
    }
}

/// Translation that keeps a menu's selected row inside the screen.
fn calculate_scroll_offset(menu: &Menu) -> i32 {
    let mut scroll_screen = 0;
    let highlight_y = menu.selected as i32 * TEXT_HEIGHT + scroll_screen;
    if highlight_y > SCREEN_HEIGHT - TEXT_HEIGHT {
        scroll_screen -= highlight_y - (SCREEN_HEIGHT - TEXT_HEIGHT);
    } else if highlight_y < 0 {
        scroll_screen -= highlight_y;
    }
    scroll_screen
}

/// Draw every row label (plus the `[ON]`/`[OFF]` tag of switches,
/// right-aligned) at its row position. `skip` leaves one row out, used
/// by transitions which draw the selected rows separately.
fn draw_row_labels<D: MenuDisplay>(
    display: &mut D,
    menu: &Menu,
    config: &AppConfig,
    x_offset: i32,
    y_offset: i32,
    skip: Option<usize>,
) {
    for (index, item) in menu.items().iter().enumerate() {
        if skip == Some(index) {
            continue;
        }
        let baseline = index as i32 * TEXT_HEIGHT + TEXT_HEIGHT - TEXT_MARGIN + y_offset;
        display.draw_text(x_offset + INIT_CURSOR_X + TEXT_MARGIN, baseline, item.label);

        if let ItemKind::Switch { state, .. } = item.kind {
            let tag = if state(config) { "[ON]" } else { "[OFF]" };
            let tag_x = x_offset + SCREEN_WIDTH - display.str_width(tag) - TEXT_MARGIN;
            display.draw_text(tag_x, baseline, tag);
        }
    }
}

/// One complete menu frame: all rows, the rounded highlight, and the
/// inverse redraw of the rows clipped to the highlight box.
fn render_menu<D: MenuDisplay>(
    display: &mut D,
    menu: &Menu,
    config: &AppConfig,
    x_offset: i32,
    y_offset: i32,
    highlight_y: i32,
    highlight_w: i32,
) {
    if menu.is_empty() {
        return;
    }

    draw_row_labels(display, menu, config, x_offset, y_offset, None);

    let box_w = highlight_w + 2 * TEXT_MARGIN;
    display.draw_rbox(
        x_offset + INIT_CURSOR_X,
        highlight_y,
        box_w,
        TEXT_HEIGHT,
        HIGHLIGHT_RADIUS,
    );

    display.set_draw_color(false);
    display.set_clip_window(
        x_offset + INIT_CURSOR_X,
        highlight_y,
        x_offset + INIT_CURSOR_X + box_w,
        highlight_y + TEXT_HEIGHT,
    );
    draw_row_labels(display, menu, config, x_offset, y_offset, None);
    display.set_max_clip_window();
    display.set_draw_color(true);
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
