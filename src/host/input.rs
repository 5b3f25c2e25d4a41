//! keyboard & mouse → `StepInput`, one simulation step per frame
use bevy::input::ButtonInput;
use bevy::log::debug;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use tileworld::constants::{HOTBAR_SLOTS, MAX_STEP_DT};
use tileworld::{Hotbar, Simulation, StepInput};

use super::camera::View;

const HOTBAR_KEYS: [KeyCode; HOTBAR_SLOTS] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/* ===========================================================
   hotbar selection (1‑9)
   =========================================================== */
pub fn hotbar_input_system(keys: Res<ButtonInput<KeyCode>>, mut hotbar: ResMut<Hotbar>) {
    for (slot, key) in HOTBAR_KEYS.iter().enumerate() {
        if keys.just_pressed(*key) {
            hotbar.select(slot);
            debug!(slot, item = ?hotbar.selected(), "hotbar slot selected");
        }
    }
}

/* ===========================================================
   sample devices → StepInput
   =========================================================== */
fn sample_input(
    keys: &ButtonInput<KeyCode>,
    mouse: &ButtonInput<MouseButton>,
    window: &Window,
    view: &View,
) -> StepInput {
    let cursor = window.cursor_position();
    StepInput {
        left: keys.pressed(KeyCode::KeyA),
        right: keys.pressed(KeyCode::KeyD),
        jump: keys.pressed(KeyCode::Space),
        pointer: cursor.unwrap_or_default(),
        screen: Vec2::new(window.width(), window.height()),
        // pointer outside the window aims at nothing
        mine_held: cursor.is_some() && mouse.pressed(MouseButton::Left),
        place_held: cursor.is_some() && mouse.pressed(MouseButton::Right),
        view: view.0,
    }
}

pub fn step_simulation_system(
    time:       Res<Time>,
    keys:       Res<ButtonInput<KeyCode>>,
    mouse:      Res<ButtonInput<MouseButton>>,
    window_q:   Query<&Window, With<PrimaryWindow>>,
    view:       Res<View>,
    mut sim:    ResMut<Simulation>,
    mut hotbar: ResMut<Hotbar>,
) {
    let Ok(window) = window_q.get_single() else { return };
    let input = sample_input(&keys, &mouse, window, &view);
    let dt = time.delta_secs().min(MAX_STEP_DT);
    sim.step(dt, &input, &mut *hotbar);
}

/* ===========================================================
   F11 borderless‑fullscreen toggle
   =========================================================== */
pub fn toggle_fullscreen(
    keys: Res<ButtonInput<KeyCode>>,
    mut window_q: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !keys.just_pressed(KeyCode::F11) {
        return;
    }
    let Ok(mut window) = window_q.get_single_mut() else { return };
    window.mode = match window.mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Primary),
        _ => WindowMode::Windowed,
    };
}
