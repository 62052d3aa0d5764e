/*
 * Commands Module
 *
 * Structural changes to the scene (spawning or removing consumables,
 * rebuilding the whole session) are never applied while the frame is being
 * processed. They are queued here and drained by the session at a single
 * point at the end of every update.
 */

use std::collections::VecDeque;

use crate::consumable::ConsumableId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SpawnConsumable,
    RemoveConsumable(ConsumableId),
    Restart,
}

#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: VecDeque<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Command) {
        self.pending.push_back(command);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, command: &Command) -> bool {
        self.pending.contains(command)
    }

    // Take every queued command, leaving the queue empty.
    // Commands pushed while the returned batch is being applied wait for the next drain.
    pub fn take(&mut self) -> Vec<Command> {
        self.pending.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_drains_in_order() {
        let mut queue = CommandQueue::new();
        queue.push(Command::SpawnConsumable);
        queue.push(Command::Restart);

        assert!(queue.contains(&Command::Restart));
        assert_eq!(queue.take(), vec![Command::SpawnConsumable, Command::Restart]);
        assert!(queue.is_empty());
        assert!(queue.take().is_empty());
    }
}
