/*
 * Renderer Module
 *
 * Draws the bowl the grid is wrapped onto, the player's trail and the
 * consumables. Every scene node is projected through the camera and the
 * nodes are painted back to front so the far side of the bowl is covered by
 * the near side.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::camera::Camera;
use crate::grid::{Grid, GridPosition};
use crate::scene::NodeKind;
use crate::ui;

// Number of rows outlined on the bowl
const GUIDE_RINGS: i32 = 5;

fn draw_guide_rings(draw: &Draw, grid: &Grid, camera: &Camera, window_rect: Rect) {
    let last_row = grid.height() - 1;
    for ring in 0..GUIDE_RINGS {
        let y = last_row * ring / (GUIDE_RINGS - 1);
        // Close the loop by revisiting column 0
        let points = (0..=grid.width()).map(|x| {
            let world = grid.grid_to_world(GridPosition::new(x % grid.width(), y));
            camera.project(world, window_rect)
        });

        draw.polyline()
            .weight(1.0)
            .color(rgba(0.3, 0.3, 0.3, 1.0))
            .points(points);
    }
}

// Draw the game
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let session = &model.session;
    let camera = &model.camera;

    draw_guide_rings(&draw, session.grid(), camera, window_rect);

    let head = session.player().head();
    let mut visible: Vec<_> = session
        .scene()
        .iter()
        .filter_map(|(id, node)| {
            let translation = node.translation?;
            Some((id, node, camera.to_view(translation)))
        })
        .collect();
    visible.sort_by(|a, b| a.2.z.total_cmp(&b.2.z));

    for (id, node, view_pos) in visible {
        let screen = camera.world_to_screen(vec2(view_pos.x, view_pos.y), window_rect);
        let radius = (node.radius * camera.zoom).max(1.0);

        let color = match node.kind {
            NodeKind::TrailSegment if Some(id) == head => rgba(1.0, 0.85, 0.2, 1.0),
            NodeKind::TrailSegment => rgba(0.85, 0.85, 0.85, 1.0),
            NodeKind::Consumable => rgba(0.2, 0.8, 0.3, 1.0),
        };

        draw.ellipse().xy(screen).radius(radius).color(color);
    }

    let status = format!(
        "Score: {}   Speed: {:.1}",
        session.score(),
        session.player().speed()
    );
    draw.text(&status)
        .x_y(window_rect.left() + 120.0, window_rect.bottom() + 20.0)
        .color(WHITE)
        .font_size(16);

    if session.is_game_over() {
        draw.text("GAME OVER\npress R to restart")
            .xy(window_rect.xy())
            .color(rgba(1.0, 0.3, 0.3, 1.0))
            .font_size(32)
            .w(window_rect.w());
    }

    if model.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, camera.zoom);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::error!(error = ?err, "failed to draw frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::error!(error = ?err, "failed to draw ui");
    }
}
