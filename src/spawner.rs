/*
 * Spawner Module
 *
 * Keeps the board stocked with consumables. Every ConsumableDestroyed event
 * queues the creation of a replacement, which the session applies at the end
 * of the frame. Placement is best effort: a few random cells are tried and
 * cells under the player are skipped, but the last pick is kept even if it
 * is taken so spawning never stalls on a crowded board.
 */

use rand::Rng;

use crate::commands::{Command, CommandQueue};
use crate::consumable::{Consumable, ConsumableId, Consumables};
use crate::events::{EventKind, GameEvent, Messenger};
use crate::grid::{Grid, GridPosition};
use crate::params::GameConfig;
use crate::scene::{NodeKind, Scene};

#[derive(Debug, Clone)]
pub struct Spawner {
    min_size: u32,
    max_size: u32,
    attempts: u32,
    spawned: u64,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            min_size: config.consumable_min_size,
            max_size: config.consumable_max_size,
            attempts: config.spawn_attempts.max(1),
            spawned: 0,
        }
    }

    // Total consumables created over the session
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    // Choose a cell uniformly over the whole grid, retrying a bounded number of times on occupied cells
    pub fn pick_cell<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> GridPosition {
        let mut pos = GridPosition::default();
        for _ in 0..self.attempts {
            pos = GridPosition::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()));
            if grid.is_empty(pos) {
                break;
            }
        }
        pos
    }

    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        scene: &mut Scene,
        consumables: &mut Consumables,
        rng: &mut R,
    ) -> ConsumableId {
        let pos = self.pick_cell(grid, rng);
        let size = rng.gen_range(self.min_size..=self.max_size) as f32;

        let node = scene.create_node(NodeKind::Consumable, size);
        scene.set_translation(node, grid.grid_to_world(pos));

        self.spawned += 1;
        tracing::debug!(x = pos.x, y = pos.y, size, "spawned consumable");

        consumables.insert(Consumable::new(pos, size, node))
    }
}

impl Messenger for Spawner {
    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::ConsumableDestroyed]
    }

    fn handle(&mut self, event: &GameEvent, commands: &mut CommandQueue) {
        if let GameEvent::ConsumableDestroyed = event {
            commands.push(Command::SpawnConsumable);
        }
    }
}
