/*
 * Consumable Module
 *
 * Consumables are pickups resting on a grid cell. They do not mark the grid
 * as occupied. Once per frame each one checks whether the player's head
 * overlaps it; on contact it announces its own destruction and asks for its
 * removal at the next safe point.
 */

use slotmap::{new_key_type, SlotMap};

use crate::commands::{Command, CommandQueue};
use crate::events::{EventBus, GameEvent};
use crate::grid::GridPosition;
use crate::scene::{NodeId, Scene};

new_key_type! {
    pub struct ConsumableId;
}

pub type Consumables = SlotMap<ConsumableId, Consumable>;

#[derive(Debug, Clone)]
pub struct Consumable {
    pub position: GridPosition,
    pub size: f32,
    pub node: NodeId,
    consumed: bool,
}

impl Consumable {
    pub fn new(position: GridPosition, size: f32, node: NodeId) -> Self {
        Self {
            position,
            size,
            node,
            consumed: false,
        }
    }

    // Eaten this frame and waiting for removal
    pub fn is_consumed(&self) -> bool {
        self.consumed
    }

    // Test against the head node. Returns true if this consumable was just eaten.
    pub fn poll(
        &mut self,
        id: ConsumableId,
        head: Option<NodeId>,
        scene: &Scene,
        bus: &mut EventBus,
        commands: &mut CommandQueue,
    ) -> bool {
        if self.consumed {
            return false;
        }

        // Nothing to collide with before the player's first step
        let Some(head) = head else {
            return false;
        };

        if !scene.intersects(self.node, head) {
            return false;
        }

        self.consumed = true;
        bus.broadcast(GameEvent::ConsumableDestroyed);
        commands.push(Command::RemoveConsumable(id));
        true
    }
}
