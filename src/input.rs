/*
 * Input Module
 *
 * Translates window input into game input. Released keys become
 * KeyReleased events on the session bus; the mouse pans and zooms the
 * camera unless it is over the egui panel.
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseButton, MouseScrollDelta, TouchPhase};

use crate::app::Model;
use crate::events::Key as GameKey;

// Map a window key to a game key
pub fn map_key(key: Key) -> GameKey {
    match key {
        Key::Left | Key::A => GameKey::Left,
        Key::Right | Key::D => GameKey::Right,
        Key::R => GameKey::Restart,
        Key::Escape => GameKey::Escape,
        _ => GameKey::Other,
    }
}

pub fn key_released(_app: &App, model: &mut Model, key: Key) {
    match map_key(key) {
        GameKey::Other => {}
        game_key => model.session.handle_key(game_key),
    }
}

pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    let new_pos = Vec2::new(pos.x, pos.y);

    if model.camera.is_dragging {
        model.camera.drag(new_pos);
    }

    model.mouse_position = new_pos;
}

pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left && !model.egui.ctx().is_pointer_over_area() {
        model.camera.start_drag(model.mouse_position);
    }
}

pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.camera.end_drag();
    }
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    let window_rect = app.window_rect();
    match delta {
        MouseScrollDelta::LineDelta(x, y) => {
            model.camera.zoom(vec2(x, y), model.mouse_position, window_rect);
        }
        MouseScrollDelta::PixelDelta(pos) => {
            model
                .camera
                .zoom(vec2(pos.x as f32, pos.y as f32) * 0.01, model.mouse_position, window_rect);
        }
    }
}

// Pass raw window events through to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
