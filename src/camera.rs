/*
 * Camera Module
 *
 * This module defines the Camera struct that turns world positions on the
 * bowl into screen positions. The bowl is spun by `yaw` around its vertical
 * axis, tilted towards the viewer by `pitch` and flattened orthographically.
 * Panning and zooming then work in the flattened plane.
 */

use nannou::prelude::*;

pub struct Camera {
    pub position: Vec2,
    pub zoom: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub is_dragging: bool,
    pub last_cursor_pos: Vec2,
}

impl Camera {
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            zoom: 5.0,
            yaw: 0.0,
            pitch: 0.9,
            min_zoom: 0.5,
            max_zoom: 20.0,
            is_dragging: false,
            last_cursor_pos: Vec2::ZERO,
        }
    }

    // Rotate a world point into view space. The returned z grows towards the viewer.
    pub fn to_view(&self, point: Vec3) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let x = point.x * cos_yaw - point.z * sin_yaw;
        let z = point.x * sin_yaw + point.z * cos_yaw;

        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let y = point.y * cos_pitch - z * sin_pitch;
        let depth = point.y * sin_pitch + z * cos_pitch;

        vec3(x, y, depth)
    }

    // Project a world point straight to screen space
    pub fn project(&self, point: Vec3, window_rect: Rect) -> Vec2 {
        let view = self.to_view(point);
        self.world_to_screen(vec2(view.x, view.y), window_rect)
    }

    // Convert a point from the flattened view plane to screen space
    pub fn world_to_screen(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        // Apply zoom and translation
        let zoomed = (point - self.position) * self.zoom;
        // Convert to screen coordinates
        zoomed + window_rect.xy()
    }

    // Convert a point from screen space back to the flattened view plane
    pub fn screen_to_world(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        let centered = point - window_rect.xy();
        centered / self.zoom + self.position
    }

    // Handle mouse wheel events for zooming
    pub fn zoom(&mut self, scroll_delta: Vec2, cursor_position: Vec2, window_rect: Rect) {
        let zoom_factor = 1.0 + scroll_delta.y * 0.1;

        // Keep the point under the cursor fixed while zooming
        let cursor_world_before = self.screen_to_world(cursor_position, window_rect);
        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);
        let cursor_world_after = self.screen_to_world(cursor_position, window_rect);

        self.position += cursor_world_before - cursor_world_after;
    }

    pub fn start_drag(&mut self, position: Vec2) {
        self.last_cursor_pos = position;
        self.is_dragging = true;
    }

    // Update camera position while dragging
    pub fn drag(&mut self, position: Vec2) {
        if self.is_dragging {
            let delta = position - self.last_cursor_pos;

            if delta.length_squared() > 0.0 {
                self.position -= delta / self.zoom;
                self.last_cursor_pos = position;
            }
        }
    }

    pub fn end_drag(&mut self) {
        self.is_dragging = false;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
