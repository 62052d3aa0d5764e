/*
 * Events Module
 *
 * Gameplay components talk to each other through typed messages instead of
 * reaching into one another. Anything can broadcast onto the bus; the session
 * dispatches queued events once or twice per frame to every messenger that
 * registered interest in that kind of event.
 */

use std::collections::VecDeque;

use crate::commands::CommandQueue;

// Keys the game reacts to, decoupled from the windowing library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Restart,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ConsumableDestroyed,
    GameOver,
    KeyReleased { key: Key },
    StartGame,
    QuitGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ConsumableDestroyed,
    GameOver,
    KeyReleased,
    StartGame,
    QuitGame,
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::ConsumableDestroyed => EventKind::ConsumableDestroyed,
            GameEvent::GameOver => EventKind::GameOver,
            GameEvent::KeyReleased { .. } => EventKind::KeyReleased,
            GameEvent::StartGame => EventKind::StartGame,
            GameEvent::QuitGame => EventKind::QuitGame,
        }
    }
}

// A component that consumes events.
//
// Handlers must not edit the scene structure directly; anything that creates
// or destroys nodes is pushed onto `commands` and applied between frames.
pub trait Messenger {
    // Event kinds this messenger wants to receive
    fn interests(&self) -> &'static [EventKind];

    fn handle(&mut self, event: &GameEvent, commands: &mut CommandQueue);

    fn is_interested(&self, kind: EventKind) -> bool {
        self.interests().contains(&kind)
    }
}

// FIFO of events waiting to be dispatched
#[derive(Debug, Default)]
pub struct EventBus {
    pending: VecDeque<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broadcast(&mut self, event: GameEvent) {
        tracing::trace!(?event, "broadcast");
        self.pending.push_back(event);
    }

    pub fn pop(&mut self) -> Option<GameEvent> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

// Deliver one event to every interested messenger
pub fn deliver(event: &GameEvent, messengers: &mut [&mut dyn Messenger], commands: &mut CommandQueue) {
    let kind = event.kind();
    for messenger in messengers.iter_mut() {
        if messenger.is_interested(kind) {
            messenger.handle(event, commands);
        }
    }
}
