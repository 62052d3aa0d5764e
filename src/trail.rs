/*
 * Trail Module
 *
 * The trail is the player's body: a fixed-capacity FIFO of the cells the head
 * has visited, each paired with a scene node placed on that cell. Slots that
 * have never been used carry no cell.
 *
 * Advancing recycles the oldest slot: its cell is released back to the grid,
 * then the slot is moved to the new head cell and pushed to the back. The
 * non-empty cells held here are therefore always exactly the cells the grid
 * reports as occupied by the player.
 */

use std::collections::VecDeque;

use crate::grid::{Grid, GridPosition};
use crate::scene::{NodeId, NodeKind, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TrailSlot {
    cell: Option<GridPosition>,
    node: NodeId,
}

#[derive(Debug)]
pub struct Trail {
    slots: VecDeque<TrailSlot>,
    head: Option<NodeId>,
}

impl Trail {
    // Allocate `capacity` hidden nodes, one per slot
    pub fn new(capacity: usize, segment_radius: f32, scene: &mut Scene) -> Self {
        assert!(capacity > 0, "trail capacity must be non-zero");

        let slots = (0..capacity)
            .map(|_| TrailSlot {
                cell: None,
                node: scene.create_node(NodeKind::TrailSegment, segment_radius),
            })
            .collect();

        Self { slots, head: None }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    // Number of slots that currently hold a cell
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    // Node of the most recently advanced slot
    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn head_cell(&self) -> Option<GridPosition> {
        self.slots.back().and_then(|slot| slot.cell)
    }

    // Cells held by the trail, oldest first
    pub fn cells(&self) -> impl Iterator<Item = GridPosition> + '_ {
        self.slots.iter().filter_map(|slot| slot.cell)
    }

    // Move the trail forward onto `new_pos`, which the caller has already claimed on the grid
    pub fn advance(&mut self, new_pos: GridPosition, grid: &mut Grid, scene: &mut Scene) -> NodeId {
        let mut slot = self
            .slots
            .pop_front()
            .expect("trail always holds `capacity` slots");

        // Release the tail cell unless this slot was never used
        if let Some(old) = slot.cell {
            grid.set_occupied(old, false);
        }

        slot.cell = Some(new_pos);
        scene.set_translation(slot.node, grid.grid_to_world(new_pos));

        self.head = Some(slot.node);
        self.slots.push_back(slot);

        slot.node
    }

    // Give every cell back to the grid and destroy the nodes
    pub fn release(self, grid: &mut Grid, scene: &mut Scene) {
        for slot in self.slots {
            if let Some(cell) = slot.cell {
                grid.set_occupied(cell, false);
            }
            scene.destroy_node(slot.node);
        }
    }
}
