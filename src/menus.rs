//! The application's menu tree.
//!
//! Layout mirrors the device's feature set: display and motion tuning
//! under Settings, maintenance actions under System. The six PID gain
//! editors all close through [`OnClose::ReloadGains`] so an edited
//! value is live in the very next animation.

use crate::config::{AppConfig, GainField};
use crate::error::Error;
use crate::menu::{MenuId, MenuItem, MenuTree, OnClose};
use crate::page::{EditFloatPage, InfoPage, Page, RebootPage};

const ABOUT_TEXT: &str = "knobmenu v1.0\nnRF52840 + SSD1306\nrotary encoder UI\ngithub.com/knobmenu";

fn open_about(config: &AppConfig) -> Option<Page> {
    Some(Page::Info(InfoPage::new(ABOUT_TEXT, config.scroll_pid)))
}

fn open_reboot(_config: &AppConfig) -> Option<Page> {
    Some(Page::Reboot(RebootPage::new()))
}

fn open_placeholder(_config: &AppConfig) -> Option<Page> {
    None
}

fn toggle_serial(config: &mut AppConfig) {
    config.use_serial_control = !config.use_serial_control;
}

fn serial_state(config: &AppConfig) -> bool {
    config.use_serial_control
}

macro_rules! gain_editor {
    ($fn_name:ident, $title:literal, $field:expr, $step:literal) => {
        fn $fn_name(config: &AppConfig) -> Option<Page> {
            Some(Page::EditFloat(EditFloatPage::for_gain(
                $title, $field, config, $step,
            )))
        }
    };
}

gain_editor!(open_scroll_kp, "Scroll Kp", GainField::ScrollKp, 0.01);
gain_editor!(open_scroll_ki, "Scroll Ki", GainField::ScrollKi, 0.01);
gain_editor!(open_scroll_kd, "Scroll Kd", GainField::ScrollKd, 0.01);
gain_editor!(open_anim_kp, "Anim Kp", GainField::AnimKp, 0.01);
gain_editor!(open_anim_ki, "Anim Ki", GainField::AnimKi, 0.001);
gain_editor!(open_anim_kd, "Anim Kd", GainField::AnimKd, 0.01);

/// Build and link every menu. Returns the root id.
pub fn build_menus(tree: &mut MenuTree) -> Result<MenuId, Error> {
    let main = tree.add_menu("Main Menu")?;
    let settings = tree.add_menu("Settings")?;
    let display = tree.add_menu("Display")?;
    let system = tree.add_menu("System")?;
    let pid = tree.add_menu("PID Settings")?;
    let scroll_pid = tree.add_menu("Scroll PID")?;
    let anim_pid = tree.add_menu("Animation PID")?;

    tree.add_item(main, MenuItem::submenu("Settings", settings))?;
    tree.add_item(main, MenuItem::action("About", open_about))?;
    tree.add_item(main, MenuItem::action("Item 3", open_placeholder))?;
    tree.add_item(main, MenuItem::action("Item 4", open_placeholder))?;

    tree.add_item(settings, MenuItem::submenu("Display", display))?;
    tree.add_item(settings, MenuItem::submenu("PID", pid))?;
    tree.add_item(settings, MenuItem::submenu("System", system))?;

    tree.add_item(display, MenuItem::action("Contrast", open_placeholder))?;
    tree.add_item(display, MenuItem::action("Timeout", open_placeholder))?;

    tree.add_item(pid, MenuItem::submenu("Scroll", scroll_pid))?;
    tree.add_item(pid, MenuItem::submenu("Animation", anim_pid))?;

    for (menu, items) in [
        (
            scroll_pid,
            [
                ("Kp", open_scroll_kp as fn(&AppConfig) -> Option<Page>),
                ("Ki", open_scroll_ki),
                ("Kd", open_scroll_kd),
            ],
        ),
        (
            anim_pid,
            [
                ("Kp", open_anim_kp as fn(&AppConfig) -> Option<Page>),
                ("Ki", open_anim_ki),
                ("Kd", open_anim_kd),
            ],
        ),
    ] {
        for (label, open) in items {
            tree.add_item(
                menu,
                MenuItem::action_with_close(label, open, OnClose::ReloadGains),
            )?;
        }
    }

    tree.add_item(system, MenuItem::action("Reboot", open_reboot))?;
    tree.add_item(
        system,
        MenuItem::switch("Serial Control", toggle_serial, serial_state),
    )?;
    tree.add_item(system, MenuItem::action("Reset", open_placeholder))?;

    Ok(main)
}
