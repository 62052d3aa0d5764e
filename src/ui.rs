/*
 * UI Module
 *
 * This module builds the egui control panel and the in-view overlay. The
 * panel shows the state of the current round, offers restart and quit
 * buttons and lets the player tune the config used by the next round.
 * Buttons never touch the session directly: they are reported back to the
 * app, which turns them into events.
 */

use nannou_egui::{egui, Egui};
use std::f32::consts::TAU;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::params::GameConfig;
use crate::session::{GameSession, SessionState};

// What the player clicked this frame
#[derive(Debug, Default, Clone, Copy)]
pub struct UiActions {
    pub restart: bool,
    pub quit: bool,
    pub apply_config: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    session: &GameSession,
    pending: &mut GameConfig,
    camera: &mut Camera,
    show_debug: &mut bool,
    debug_info: &DebugInfo,
) -> UiActions {
    let mut actions = UiActions::default();

    let ctx = egui.begin_frame();

    egui::Window::new("Hunger")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            let player = session.player();
            let state = match session.state() {
                SessionState::Playing => "Playing",
                SessionState::GameOver => "Game Over",
            };

            ui.label(format!("State: {}", state));
            ui.label(format!("Score: {}", session.score()));
            ui.label(format!("Speed: {:.2} cells/s", player.speed()));
            ui.label(format!("Length: {}/{}", player.trail().len(), player.trail().capacity()));
            ui.label(format!("Distance: {} cells", player.steps()));

            ui.horizontal(|ui| {
                if ui.button("Restart (R)").clicked() {
                    actions.restart = true;
                }
                if ui.button("Quit (Esc)").clicked() {
                    actions.quit = true;
                }
            });

            ui.collapsing("Next Round", |ui| {
                ui.add(egui::Slider::new(&mut pending.grid_width, GameConfig::get_grid_size_range()).text("Grid Width"));
                ui.add(egui::Slider::new(&mut pending.grid_height, GameConfig::get_grid_size_range()).text("Grid Height"));
                ui.add(egui::Slider::new(&mut pending.base_speed, GameConfig::get_speed_range()).text("Base Speed"));
                ui.add(egui::Slider::new(&mut pending.max_speed, GameConfig::get_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut pending.speed_gain, GameConfig::get_speed_gain_range()).text("Speed Gain"));
                ui.add(egui::Slider::new(&mut pending.trail_length, GameConfig::get_trail_length_range()).text("Trail Length"));
                ui.add(egui::Slider::new(&mut pending.consumable_count, GameConfig::get_consumable_count_range()).text("Consumables"));

                let changed = *pending != *session.config();
                if let Err(err) = pending.validate() {
                    ui.label(format!("{}", err));
                } else if ui.add_enabled(changed, egui::Button::new("Apply & Restart")).clicked() {
                    actions.apply_config = true;
                }
            });

            ui.collapsing("Camera", |ui| {
                ui.label("Zoom: mouse wheel, Pan: drag");
                ui.add(egui::Slider::new(&mut camera.yaw, 0.0..=TAU).text("Spin"));
                ui.add(egui::Slider::new(&mut camera.pitch, 0.0..=1.5).text("Tilt"));
                if ui.button("Reset Camera").clicked() {
                    camera.reset();
                }
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.checkbox(show_debug, "Show Debug Info");
        });

    actions
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    camera_zoom: f32,
) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * 6.0 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Steps/frame: {}", debug_info.steps_per_frame),
        format!("Occupied cells: {}", debug_info.occupied_cells),
        format!("Consumables: {}", debug_info.consumables),
        format!("Scene nodes: {}", debug_info.scene_nodes),
        format!("Zoom: {:.2}x", camera_zoom),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Text is centered on its position, so shift right by roughly half its width
        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
