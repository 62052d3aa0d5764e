/*
 * Player Module
 *
 * This module defines the Player struct and its movement rules. The player
 * advances exactly one cell per tick in its current direction. Ticks are
 * decoupled from the frame rate with a fixed timestep accumulator whose
 * interval shrinks as the speed ramps up.
 *
 * A step fails when the wrapped target cell is already occupied. That is the
 * only way to lose: the player stops for good and GameOver is broadcast.
 */

use rand::Rng;

use crate::commands::CommandQueue;
use crate::events::{EventBus, EventKind, GameEvent, Key, Messenger};
use crate::grid::{Grid, GridPosition};
use crate::params::GameConfig;
use crate::scene::{NodeId, Scene};
use crate::trail::Trail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

// Relative turn requested by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    // Cell offset for one step. Rows grow downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    // Rotate by a quarter turn
    pub fn turned(self, turn: Turn) -> Direction {
        match (turn, self) {
            (Turn::Left, Direction::Up) => Direction::Left,
            (Turn::Left, Direction::Left) => Direction::Down,
            (Turn::Left, Direction::Down) => Direction::Right,
            (Turn::Left, Direction::Right) => Direction::Up,
            (Turn::Right, Direction::Up) => Direction::Right,
            (Turn::Right, Direction::Right) => Direction::Down,
            (Turn::Right, Direction::Down) => Direction::Left,
            (Turn::Right, Direction::Left) => Direction::Up,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionState {
    Running,
    Stopped,
}

#[derive(Debug)]
pub struct Player {
    direction: Direction,
    position: GridPosition,
    speed: f32,
    max_speed: f32,
    speed_gain: f32,
    max_frame_delta: f32,
    // Seconds accumulated towards the next tick
    accumulator: f32,
    state: MotionState,
    steps: u64,
    trail: Trail,
}

impl Player {
    pub fn new(
        position: GridPosition,
        direction: Direction,
        config: &GameConfig,
        scene: &mut Scene,
    ) -> Self {
        Self {
            direction,
            position,
            speed: config.base_speed,
            max_speed: config.max_speed,
            speed_gain: config.speed_gain,
            max_frame_delta: config.max_frame_delta,
            accumulator: 0.0,
            state: MotionState::Running,
            steps: 0,
            trail: Trail::new(config.trail_length, config.head_radius, scene),
        }
    }

    pub fn position(&self) -> GridPosition {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    // Current speed in cells per second
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == MotionState::Running
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    // Node of the head segment, once the player has moved at least once
    pub fn head(&self) -> Option<NodeId> {
        self.trail.head()
    }

    // Latch a turn. It takes effect on the next step.
    pub fn turn(&mut self, turn: Turn) {
        self.direction = self.direction.turned(turn);
        tracing::debug!(?turn, direction = ?self.direction, "turn");
    }

    // Advance one cell. Returns false on collision, after which the player is stopped.
    pub fn step(&mut self, grid: &mut Grid, scene: &mut Scene) -> bool {
        if self.state == MotionState::Stopped {
            return false;
        }

        let (dx, dy) = self.direction.delta();
        let candidate = self.position.offset(dx, dy);

        let Some(next) = grid.try_occupy(candidate) else {
            let blocked = grid.wrap(candidate);
            tracing::debug!(x = blocked.x, y = blocked.y, "collision, game over");
            self.state = MotionState::Stopped;
            return false;
        };

        self.position = next;
        self.trail.advance(next, grid, scene);
        self.steps += 1;
        tracing::trace!(x = next.x, y = next.y, "step");

        true
    }

    // Per-frame update: ramp the speed and run as many fixed ticks as the elapsed time allows.
    // Returns the number of successful steps taken this frame.
    pub fn update(&mut self, dt: f32, grid: &mut Grid, scene: &mut Scene, bus: &mut EventBus) -> usize {
        if self.state == MotionState::Stopped {
            return 0;
        }

        // Skip stalls (window drags, breakpoints) instead of teleporting
        if dt > self.max_frame_delta {
            return 0;
        }

        if self.speed < self.max_speed {
            self.speed = (self.speed + self.speed_gain * dt).min(self.max_speed);
        }

        let fixed_step = 1.0 / self.speed;
        let mut taken = 0;

        self.accumulator += dt;
        while self.accumulator >= fixed_step {
            if !self.step(grid, scene) {
                bus.broadcast(GameEvent::GameOver);
                return taken;
            }
            self.accumulator -= fixed_step;
            taken += 1;
        }

        taken
    }

    // Hand every cell and node back, used when the session is torn down
    pub fn despawn(self, grid: &mut Grid, scene: &mut Scene) {
        self.trail.release(grid, scene);
    }
}

impl Messenger for Player {
    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::KeyReleased]
    }

    fn handle(&mut self, event: &GameEvent, _commands: &mut CommandQueue) {
        if let GameEvent::KeyReleased { key } = event {
            match key {
                Key::Left => self.turn(Turn::Left),
                Key::Right => self.turn(Turn::Right),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::deliver;
    use std::collections::HashSet;

    fn config(trail_length: usize) -> GameConfig {
        GameConfig {
            grid_width: 10,
            grid_height: 10,
            trail_length,
            ..GameConfig::default()
        }
    }

    fn spawn(x: i32, y: i32, direction: Direction, trail_length: usize) -> (Player, Grid, Scene) {
        let mut scene = Scene::new();
        let player = Player::new(GridPosition::new(x, y), direction, &config(trail_length), &mut scene);
        (player, Grid::new(10, 10), scene)
    }

    #[test]
    fn turn_tables_are_inverse() {
        for direction in Direction::ALL {
            assert_eq!(direction.turned(Turn::Left).turned(Turn::Right), direction);
            assert_eq!(
                direction.turned(Turn::Left).turned(Turn::Left).turned(Turn::Left).turned(Turn::Left),
                direction
            );
        }
        assert_eq!(Direction::Up.turned(Turn::Left), Direction::Left);
        assert_eq!(Direction::Right.turned(Turn::Left), Direction::Up);
        assert_eq!(Direction::Up.turned(Turn::Right), Direction::Right);
        assert_eq!(Direction::Left.turned(Turn::Right), Direction::Up);
    }

    #[test]
    fn step_moves_and_claims_the_cell() {
        let (mut player, mut grid, mut scene) = spawn(5, 5, Direction::Right, 3);

        assert!(player.step(&mut grid, &mut scene));
        assert_eq!(player.position(), GridPosition::new(6, 5));
        assert!(!grid.is_empty(GridPosition::new(6, 5)));
        assert_eq!(player.trail().head_cell(), Some(GridPosition::new(6, 5)));
    }

    #[test]
    fn wraps_across_the_left_edge() {
        let (mut player, mut grid, mut scene) = spawn(0, 5, Direction::Left, 3);

        assert!(player.step(&mut grid, &mut scene));
        assert_eq!(player.position(), GridPosition::new(9, 5));
    }

    #[test]
    fn wraps_across_the_top_edge() {
        let (mut player, mut grid, mut scene) = spawn(2, 0, Direction::Up, 3);

        assert!(player.step(&mut grid, &mut scene));
        assert_eq!(player.position(), GridPosition::new(2, 9));
    }

    #[test]
    fn reversing_into_the_body_collides() {
        let (mut player, mut grid, mut scene) = spawn(5, 5, Direction::Right, 5);

        assert!(player.step(&mut grid, &mut scene));
        assert!(player.step(&mut grid, &mut scene));
        player.turn(Turn::Left);
        player.turn(Turn::Left);

        assert!(!player.step(&mut grid, &mut scene));
        assert_eq!(player.state(), MotionState::Stopped);
    }

    #[test]
    fn failure_is_terminal() {
        let (mut player, mut grid, mut scene) = spawn(5, 5, Direction::Right, 5);
        grid.set_occupied(GridPosition::new(6, 5), true);

        assert!(!player.step(&mut grid, &mut scene));

        // Even with the way clear the player stays put
        grid.set_occupied(GridPosition::new(6, 5), false);
        let before: Vec<_> = grid.occupied_cells().collect();
        assert!(!player.step(&mut grid, &mut scene));
        assert_eq!(player.position(), GridPosition::new(5, 5));
        assert_eq!(grid.occupied_cells().collect::<Vec<_>>(), before);
    }

    #[test]
    fn occupancy_matches_trail_while_looping() {
        let (mut player, mut grid, mut scene) = spawn(0, 0, Direction::Right, 7);

        // Run a square loop bigger than the trail so the tail keeps clearing the way
        for i in 0..200 {
            if i % 4 == 3 {
                player.turn(Turn::Right);
            }
            assert!(player.step(&mut grid, &mut scene), "step {i} collided");

            let held: HashSet<_> = player.trail().cells().collect();
            let occupied: HashSet<_> = grid.occupied_cells().collect();
            assert_eq!(held, occupied);
        }
    }

    #[test]
    fn update_runs_fixed_ticks() {
        let mut scene = Scene::new();
        let config = GameConfig {
            grid_width: 10,
            grid_height: 10,
            base_speed: 10.0,
            max_speed: 10.0,
            ..GameConfig::default()
        };
        let mut player = Player::new(GridPosition::new(0, 0), Direction::Right, &config, &mut scene);
        let mut grid = Grid::new(10, 10);
        let mut bus = EventBus::new();

        // 0.35 s at 10 cells/s is three ticks with time left over
        assert_eq!(player.update(0.35, &mut grid, &mut scene, &mut bus), 3);
        assert_eq!(player.position(), GridPosition::new(3, 0));

        // The remainder carries into the next frame
        assert_eq!(player.update(0.06, &mut grid, &mut scene, &mut bus), 1);
        assert!(bus.is_empty());
    }

    #[test]
    fn update_skips_stalled_frames() {
        let (mut player, mut grid, mut scene) = spawn(0, 0, Direction::Right, 3);
        let mut bus = EventBus::new();

        assert_eq!(player.update(2.0, &mut grid, &mut scene, &mut bus), 0);
        assert_eq!(player.position(), GridPosition::new(0, 0));
        assert_eq!(player.speed(), GameConfig::default().base_speed);
    }

    #[test]
    fn speed_ramps_to_the_cap() {
        let mut scene = Scene::new();
        let config = GameConfig {
            grid_width: 100,
            grid_height: 100,
            base_speed: 10.0,
            max_speed: 11.0,
            speed_gain: 2.0,
            trail_length: 3,
            ..GameConfig::default()
        };
        let mut player = Player::new(GridPosition::new(0, 0), Direction::Right, &config, &mut scene);
        let mut grid = Grid::new(100, 100);
        let mut bus = EventBus::new();

        player.update(0.25, &mut grid, &mut scene, &mut bus);
        assert!((player.speed() - 10.5).abs() < 1e-5);

        for _ in 0..10 {
            player.update(0.25, &mut grid, &mut scene, &mut bus);
        }
        assert_eq!(player.speed(), 11.0);
    }

    #[test]
    fn update_broadcasts_game_over_once() {
        let (mut player, mut grid, mut scene) = spawn(5, 5, Direction::Right, 3);
        let mut bus = EventBus::new();
        grid.set_occupied(GridPosition::new(6, 5), true);

        player.update(0.5, &mut grid, &mut scene, &mut bus);
        player.update(0.5, &mut grid, &mut scene, &mut bus);

        assert_eq!(bus.pop(), Some(GameEvent::GameOver));
        assert!(bus.pop().is_none());
        assert!(!player.is_running());
    }

    #[test]
    fn key_events_turn_the_player() {
        let (mut player, _grid, _scene) = spawn(5, 5, Direction::Up, 3);
        let mut commands = CommandQueue::new();

        deliver(&GameEvent::KeyReleased { key: Key::Left }, &mut [&mut player], &mut commands);
        assert_eq!(player.direction(), Direction::Left);

        deliver(&GameEvent::KeyReleased { key: Key::Right }, &mut [&mut player], &mut commands);
        deliver(&GameEvent::KeyReleased { key: Key::Right }, &mut [&mut player], &mut commands);
        assert_eq!(player.direction(), Direction::Right);

        deliver(&GameEvent::KeyReleased { key: Key::Other }, &mut [&mut player], &mut commands);
        assert_eq!(player.direction(), Direction::Right);
        assert!(commands.is_empty());
    }
}
