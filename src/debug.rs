/*
 * Debug Information Module
 *
 * Frame timing and board statistics shown in the debug overlay.
 */

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub steps_per_frame: usize,
    pub occupied_cells: usize,
    pub scene_nodes: usize,
    pub consumables: usize,
}
