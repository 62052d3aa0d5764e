/*
 * Scene Module
 *
 * This module keeps the lightweight visual nodes the game positions in world
 * space: trail segments, the head and consumables. Nodes live in a generational
 * arena so a handle to a destroyed node can never alias a newer one.
 *
 * The renderer only reads from here. Gameplay code creates, moves and destroys
 * nodes, but structural edits (create/destroy) are funnelled through the
 * command queue so they only happen between frames.
 */

use nannou::prelude::*;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    // Stable handle for a visual node
    pub struct NodeId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    TrailSegment,
    Consumable,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    // None until the node is first placed; hidden nodes are not drawn and never intersect
    pub translation: Option<Vec3>,
    // Radius of the bounding sphere around the translation
    pub radius: f32,
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // Create a hidden node
    pub fn create_node(&mut self, kind: NodeKind, radius: f32) -> NodeId {
        self.nodes.insert(Node {
            kind,
            translation: None,
            radius,
        })
    }

    // Remove a node. Returns false if the handle was already stale.
    pub fn destroy_node(&mut self, id: NodeId) -> bool {
        self.nodes.remove(id).is_some()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn set_translation(&mut self, id: NodeId, translation: Vec3) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.translation = Some(translation);
        }
    }

    pub fn translation(&self, id: NodeId) -> Option<Vec3> {
        self.nodes.get(id).and_then(|node| node.translation)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    // Bounding sphere test between two placed nodes.
    // Missing or hidden nodes never intersect anything.
    pub fn intersects(&self, a: NodeId, b: NodeId) -> bool {
        let (Some(na), Some(nb)) = (self.nodes.get(a), self.nodes.get(b)) else {
            return false;
        };
        let (Some(pa), Some(pb)) = (na.translation, nb.translation) else {
            return false;
        };

        let reach = na.radius + nb.radius;
        pa.distance_squared(pb) <= reach * reach
    }
}
