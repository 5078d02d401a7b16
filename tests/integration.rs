//! End-to-end scenarios for the host-testable UI runtime.

use knobmenu::config::{AppConfig, GainField};
use knobmenu::input::encoder::QuadratureDecoder;
use knobmenu::input::Direction;
use knobmenu::display::mock::MockDisplay;
use knobmenu::menu::{ItemKind, MenuTree};
use knobmenu::menus::build_menus;
use knobmenu::page::{EditFloatPage, InfoPage, Page, RebootPage};
use knobmenu::testing::{MockPlatform, ScriptedInput};
use knobmenu::ui::{MenuOutcome, UiController};

#[test]
fn encoder_single_detent_clockwise() {
    // The four quadrature edges of one physical click.
    let mut decoder = QuadratureDecoder::new();
    for (a, b) in [(true, false), (true, true), (false, true), (false, false)] {
        decoder.on_edge(a, b);
    }
    assert_eq!(decoder.poll_direction(), Direction::Clockwise);
    assert_eq!(decoder.poll_direction(), Direction::NoRotation);
}

#[test]
fn encoder_reversal_discards_partial_turn() {
    let mut decoder = QuadratureDecoder::new();
    // Three pulses clockwise, then one back.
    for (a, b) in [(true, false), (true, true), (false, true)] {
        decoder.on_edge(a, b);
    }
    decoder.on_edge(true, true);
    // The truncated turn produces nothing.
    assert_eq!(decoder.poll_direction(), Direction::NoRotation);
}

#[test]
fn edit_float_page_saves_on_confirm_and_discards_on_cancel() {
    let mut config = AppConfig::default();
    GainField::ScrollKp.set(&mut config, 0.20);

    // Five steps down, then confirm.
    let mut page = Page::EditFloat(EditFloatPage::for_gain(
        "Scroll Kp",
        GainField::ScrollKp,
        &config,
        0.01,
    ));
    let mut input = ScriptedInput::new();
    input.turn(Direction::Clockwise, 5);
    assert!(!page.handle_input(&mut input, &mut config, 0));
    input.press_confirm();
    assert!(page.handle_input(&mut input, &mut config, 10));
    assert!((GainField::ScrollKp.get(&config) - 0.25).abs() < 1e-6);

    // The same walk, cancelled, changes nothing.
    GainField::ScrollKp.set(&mut config, 0.20);
    let mut page = Page::EditFloat(EditFloatPage::for_gain(
        "Scroll Kp",
        GainField::ScrollKp,
        &config,
        0.01,
    ));
    let mut input = ScriptedInput::new();
    input.turn(Direction::Clockwise, 5);
    input.press_cancel();
    assert!(page.handle_input(&mut input, &mut config, 0));
    assert!((GainField::ScrollKp.get(&config) - 0.20).abs() < 1e-6);
}

#[test]
fn info_page_clamps_and_hides_scrollbar_for_short_content() {
    // Two lines fill the 32 px screen exactly: no room to scroll.
    let config = AppConfig::default();
    let mut page = Page::Info(InfoPage::new("line one\nline two", config.scroll_pid));
    let mut input = ScriptedInput::new();
    input.turn(Direction::Clockwise, 3);

    let mut cfg = config;
    assert!(!page.handle_input(&mut input, &mut cfg, 0));

    let mut display = MockDisplay::new();
    let mut platform = MockPlatform::new();
    page.draw(&mut display, &mut platform, 0);

    assert!(display.contains_text("line one"));
    assert!(display.contains_text("line two"));
    // No track, no slider.
    assert!(!display
        .ops()
        .iter()
        .any(|op| matches!(op, knobmenu::display::mock::DrawOp::VLine { .. })));
}

#[test]
fn switch_toggle_updates_the_rendered_state() {
    let mut tree = MenuTree::new();
    let root = build_menus(&mut tree).unwrap();
    let mut config = AppConfig::default();

    // Navigate: the System menu holds the Serial Control switch.
    let settings = match tree.menu(root).item(0).kind {
        ItemKind::Submenu(id) => id,
        _ => panic!("Settings must be a submenu"),
    };
    let system = match tree.menu(settings).item(2).kind {
        ItemKind::Submenu(id) => id,
        _ => panic!("System must be a submenu"),
    };

    let switch_index = 1;
    let (toggle, state) = match tree.menu(system).item(switch_index).kind {
        ItemKind::Switch { toggle, state } => (toggle, state),
        _ => panic!("Serial Control must be a switch"),
    };
    assert!(state(&config));

    // Select the switch row and activate it through the menu loop.
    let mut input = ScriptedInput::new();
    input.turn(Direction::Clockwise, 1);
    input.press_confirm();
    let mut ui = UiController::new(MockDisplay::new(), input, MockPlatform::new(), &config);
    assert_eq!(
        ui.show_menu(&mut tree, system, &mut config),
        MenuOutcome::Selected(switch_index)
    );
    toggle(&mut config);
    assert!(!state(&config));

    // The next frame renders the new state.
    ui.draw_menu(&tree, system, 0, 0, &config);
    let (display, ..) = ui.release();
    assert!(display.texts().any(|(t, x, _)| t == "[OFF]" && x == 96));

    toggle(&mut config);
    let mut ui = UiController::new(MockDisplay::new(), ScriptedInput::new(), MockPlatform::new(), &config);
    ui.draw_menu(&tree, system, 0, 0, &config);
    let (display, ..) = ui.release();
    assert!(display.texts().any(|(t, x, _)| t == "[ON]" && x == 102));
}

#[test]
fn reboot_page_cancel_window_then_forced_restart() {
    let mut config = AppConfig::default();
    let mut display = MockDisplay::new();

    // Cancelled 1.5 s in: the page closes, nothing reboots.
    let mut platform = MockPlatform::at(10_000);
    let mut page = Page::Reboot(RebootPage::new());
    page.draw(&mut display, &mut platform, 0);
    let mut input = ScriptedInput::new();
    input.press_cancel();
    assert!(page.handle_input(&mut input, &mut config, 11_500));
    assert_eq!(platform.reboot_count(), 0);

    // Untouched for 3 s: the restart fires exactly once and cancel
    // goes dead.
    let mut platform = MockPlatform::at(10_000);
    let mut page = Page::Reboot(RebootPage::new());
    page.draw(&mut display, &mut platform, 0);
    platform.advance(3_000);
    page.draw(&mut display, &mut platform, 0);
    assert_eq!(platform.reboot_count(), 1);

    let mut input = ScriptedInput::new();
    input.press_cancel();
    assert!(!page.handle_input(&mut input, &mut config, 13_500));
}

#[test]
fn transitions_leave_menu_state_untouched() {
    let mut tree = MenuTree::new();
    let root = build_menus(&mut tree).unwrap();
    let config = AppConfig::default();

    let settings = match tree.menu(root).item(0).kind {
        ItemKind::Submenu(id) => id,
        _ => panic!("Settings must be a submenu"),
    };
    tree.menu_mut(settings).selected = 2;

    let mut ui = UiController::new(
        MockDisplay::new(),
        ScriptedInput::new(),
        MockPlatform::new(),
        &config,
    );
    ui.animate_transition(
        &tree,
        root,
        Some(settings),
        knobmenu::ui::Transition::Forward,
        &config,
    );
    ui.animate_transition(
        &tree,
        settings,
        Some(root),
        knobmenu::ui::Transition::Backward,
        &config,
    );
    assert_eq!(tree.menu(settings).selected, 2);
    assert_eq!(tree.menu(root).selected, 0);
}
