/*
 * Session Module
 *
 * A GameSession owns everything one round of play needs: the grid, the scene
 * nodes, the player, the consumables and the event/command plumbing. Nothing
 * is global, so several sessions can live side by side (tests do exactly that).
 *
 * Each frame runs a fixed pipeline:
 * 1. Deliver events queued since the last frame (key presses)
 * 2. Advance the player
 * 3. Let every consumable test itself against the head
 * 4. Deliver the events produced by steps 2 and 3
 * 5. Apply queued structural commands, the only place nodes come and go
 */

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::commands::{Command, CommandQueue};
use crate::consumable::{Consumable, ConsumableId, Consumables};
use crate::error::ConfigError;
use crate::events::{deliver, EventBus, EventKind, GameEvent, Key, Messenger};
use crate::grid::{Grid, GridPosition};
use crate::params::GameConfig;
use crate::player::{Direction, Player};
use crate::scene::{NodeKind, Scene};
use crate::spawner::Spawner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    GameOver,
}

// Session-level reactions: game over, restart and quit requests
#[derive(Debug)]
struct SessionControl {
    state: SessionState,
    quit_requested: bool,
    eaten: u32,
}

impl SessionControl {
    fn new() -> Self {
        Self {
            state: SessionState::Playing,
            quit_requested: false,
            eaten: 0,
        }
    }
}

impl Messenger for SessionControl {
    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::ConsumableDestroyed,
            EventKind::GameOver,
            EventKind::KeyReleased,
            EventKind::StartGame,
            EventKind::QuitGame,
        ]
    }

    fn handle(&mut self, event: &GameEvent, commands: &mut CommandQueue) {
        match event {
            GameEvent::ConsumableDestroyed => self.eaten += 1,
            GameEvent::GameOver => {
                if self.state == SessionState::Playing {
                    tracing::info!(eaten = self.eaten, "game over");
                }
                self.state = SessionState::GameOver;
            }
            GameEvent::StartGame | GameEvent::KeyReleased { key: Key::Restart } => {
                if !commands.contains(&Command::Restart) {
                    commands.push(Command::Restart);
                }
            }
            GameEvent::QuitGame | GameEvent::KeyReleased { key: Key::Escape } => {
                self.quit_requested = true;
            }
            GameEvent::KeyReleased { .. } => {}
        }
    }
}

#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    rng: StdRng,
    grid: Grid,
    scene: Scene,
    player: Player,
    consumables: Consumables,
    spawner: Spawner,
    control: SessionControl,
    bus: EventBus,
    commands: CommandQueue,
    // Events dispatched during the last update, oldest first
    last_events: Vec<GameEvent>,
    last_steps: usize,
    restarts: u32,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut scene = Scene::new();
        let grid = Grid::with_vertical_compression(
            config.grid_width,
            config.grid_height,
            config.vertical_compression,
        );
        // Placeholder player, replaced by populate()
        let player = Player::new(grid.center(), Direction::Up, &config, &mut scene);

        let mut session = Self {
            spawner: Spawner::new(&config),
            config,
            rng,
            grid,
            scene,
            player,
            consumables: Consumables::with_key(),
            control: SessionControl::new(),
            bus: EventBus::new(),
            commands: CommandQueue::new(),
            last_events: Vec::new(),
            last_steps: 0,
            restarts: 0,
        };
        session.populate();

        Ok(session)
    }

    // Tear down and rebuild every piece of the round with the current config
    fn populate(&mut self) {
        self.scene.clear();
        self.grid.clear();
        self.consumables.clear();
        self.bus.clear();
        self.commands.clear();
        self.control = SessionControl::new();
        self.spawner = Spawner::new(&self.config);

        let direction = Direction::random(&mut self.rng);
        let start = self.grid.center();
        self.player = Player::new(start, direction, &self.config, &mut self.scene);

        for _ in 0..self.config.consumable_count {
            self.spawner
                .spawn(&self.grid, &mut self.scene, &mut self.consumables, &mut self.rng);
        }

        tracing::info!(
            width = self.grid.width(),
            height = self.grid.height(),
            x = start.x,
            y = start.y,
            ?direction,
            consumables = self.consumables.len(),
            "session started",
        );
    }

    // Restart with a new config. The old round is only replaced if the config is valid.
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if config.grid_width as i32 != self.grid.width()
            || config.grid_height as i32 != self.grid.height()
            || config.vertical_compression != self.grid.vertical_compression()
        {
            self.grid = Grid::with_vertical_compression(
                config.grid_width,
                config.grid_height,
                config.vertical_compression,
            );
        }
        if let Some(seed) = config.rng_seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.config = config;
        self.restart();
        Ok(())
    }

    // Immediate restart. Outside of update() this is a safe point.
    pub fn restart(&mut self) {
        self.restarts += 1;
        tracing::info!(restarts = self.restarts, score = self.control.eaten, "restarting");
        self.populate();
    }

    // Queue a released key for the next update
    pub fn handle_key(&mut self, key: Key) {
        self.bus.broadcast(GameEvent::KeyReleased { key });
    }

    // Queue an arbitrary event for the next update
    pub fn broadcast(&mut self, event: GameEvent) {
        self.bus.broadcast(event);
    }

    pub fn update(&mut self, dt: f32) {
        self.last_events.clear();
        self.last_steps = 0;

        self.dispatch_events();

        if self.control.state == SessionState::Playing {
            self.last_steps = self
                .player
                .update(dt, &mut self.grid, &mut self.scene, &mut self.bus);
        }

        let head = self.player.head();
        for (id, consumable) in self.consumables.iter_mut() {
            consumable.poll(id, head, &self.scene, &mut self.bus, &mut self.commands);
        }

        self.dispatch_events();
        self.apply_commands();
    }

    fn dispatch_events(&mut self) {
        while let Some(event) = self.bus.pop() {
            self.last_events.push(event);
            let mut messengers: [&mut dyn Messenger; 3] =
                [&mut self.control, &mut self.player, &mut self.spawner];
            deliver(&event, &mut messengers, &mut self.commands);
        }
    }

    // The single safe point for structural edits
    fn apply_commands(&mut self) {
        for command in self.commands.take() {
            tracing::debug!(?command, "applying command");
            match command {
                Command::SpawnConsumable => {
                    self.spawner
                        .spawn(&self.grid, &mut self.scene, &mut self.consumables, &mut self.rng);
                }
                Command::RemoveConsumable(id) => self.remove_consumable(id),
                Command::Restart => {
                    // Commands queued behind a restart belong to the old round
                    self.restart();
                    return;
                }
            }
        }
    }

    fn remove_consumable(&mut self, id: ConsumableId) {
        if let Some(consumable) = self.consumables.remove(id) {
            self.scene.destroy_node(consumable.node);
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn consumables(&self) -> &Consumables {
        &self.consumables
    }

    pub fn state(&self) -> SessionState {
        self.control.state
    }

    pub fn is_game_over(&self) -> bool {
        self.control.state == SessionState::GameOver
    }

    pub fn quit_requested(&self) -> bool {
        self.control.quit_requested
    }

    // Consumables eaten this round
    pub fn score(&self) -> u32 {
        self.control.eaten
    }

    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    pub fn last_events(&self) -> &[GameEvent] {
        &self.last_events
    }

    // Player steps taken during the last update
    pub fn last_steps(&self) -> usize {
        self.last_steps
    }

    // Scripted setups below bypass the command queue and must happen between updates.

    // Place the player on a specific cell facing a specific way, discarding its current body
    pub fn place_player(&mut self, position: GridPosition, direction: Direction) {
        let position = self.grid.wrap(position);
        let fresh = Player::new(position, direction, &self.config, &mut self.scene);
        let old = std::mem::replace(&mut self.player, fresh);
        old.despawn(&mut self.grid, &mut self.scene);
    }

    // Put an extra consumable on a specific cell
    pub fn place_consumable(&mut self, position: GridPosition, size: f32) -> ConsumableId {
        let position = self.grid.wrap(position);
        let node = self.scene.create_node(NodeKind::Consumable, size);
        self.scene
            .set_translation(node, self.grid.grid_to_world(position));
        self.consumables.insert(Consumable::new(position, size, node))
    }
}
