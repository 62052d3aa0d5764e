/*
 * Application Module
 *
 * This module defines the nannou model for the game window. The model wraps a
 * GameSession together with the presentation state (camera, egui, debug info)
 * and forwards frame time to the session, which owns all game logic.
 */

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::events::GameEvent;
use crate::input::{key_released, mouse_moved, mouse_pressed, mouse_released, mouse_wheel, raw_window_event};
use crate::params::GameConfig;
use crate::renderer::view;
use crate::session::GameSession;
use crate::ui;

// Main model for the application
pub struct Model {
    pub session: GameSession,
    // Config edited in the UI, applied on the next explicit restart
    pub pending_config: GameConfig,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
    pub show_debug: bool,
}

// Config from the JSON file named by the first argument, or defaults
fn load_config() -> GameConfig {
    let Some(path) = std::env::args().nth(1) else {
        return GameConfig::default();
    };

    match GameConfig::load(&path) {
        Ok(config) => {
            tracing::info!(%path, "loaded config");
            config
        }
        Err(err) => {
            tracing::error!(%path, error = %err, "falling back to default config");
            GameConfig::default()
        }
    }
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // 80% of the primary monitor, or a fixed size when it cannot be queried
    let (window_width, window_height) = match app.primary_monitor() {
        Some(monitor) => {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        }
        None => (1280.0, 800.0),
    };

    let window_id = app
        .new_window()
        .title("Hunger")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .key_released(key_released)
        .mouse_moved(mouse_moved)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_wheel(mouse_wheel)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build the game window");

    let window = app.window(window_id).expect("game window closed during setup");
    let egui = Egui::from_window(&window);

    let config = load_config();
    // load_config only hands out validated configs, so only defaults could fail here
    let session = match GameSession::new(config.clone()) {
        Ok(session) => session,
        Err(err) => panic!("default config rejected: {}", err),
    };

    Model {
        session,
        pending_config: config,
        egui,
        debug_info: DebugInfo::default(),
        camera: Camera::new(),
        mouse_position: Vec2::ZERO,
        show_debug: false,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let actions = ui::update_ui(
        &mut model.egui,
        &model.session,
        &mut model.pending_config,
        &mut model.camera,
        &mut model.show_debug,
        &model.debug_info,
    );

    if actions.apply_config {
        if let Err(err) = model.session.reconfigure(model.pending_config.clone()) {
            tracing::warn!(error = %err, "config not applied");
        }
    }
    if actions.restart {
        model.session.broadcast(GameEvent::StartGame);
    }
    if actions.quit {
        model.session.broadcast(GameEvent::QuitGame);
    }

    model.session.update(update.since_last.as_secs_f32());

    let session = &model.session;
    model.debug_info.steps_per_frame = session.last_steps();
    model.debug_info.occupied_cells = session.grid().occupied_count();
    model.debug_info.scene_nodes = session.scene().len();
    model.debug_info.consumables = session.consumables().len();

    if session.quit_requested() {
        tracing::info!(score = session.score(), restarts = session.restarts(), "quitting");
        app.quit();
    }
}
