/*
 * Hunger - Module Definitions
 *
 * A snake-like game played on a toroidal grid that is wrapped onto a bowl.
 * The game logic (grid, trail, player, consumables and the event plumbing
 * between them) lives in GameSession and does not depend on a window; the
 * app, renderer, input and ui modules put it on screen with nannou.
 */

// Re-export key components for easier access
pub use app::Model;
pub use camera::Camera;
pub use commands::{Command, CommandQueue};
pub use consumable::{Consumable, ConsumableId};
pub use debug::DebugInfo;
pub use error::ConfigError;
pub use events::{EventBus, GameEvent, Key, Messenger};
pub use grid::{Grid, GridPosition};
pub use params::GameConfig;
pub use player::{Direction, MotionState, Player, Turn};
pub use scene::{NodeId, Scene};
pub use session::{GameSession, SessionState};
pub use spawner::Spawner;
pub use trail::Trail;

// Define modules
pub mod app;
pub mod camera;
pub mod commands;
pub mod consumable;
pub mod debug;
pub mod error;
pub mod events;
pub mod grid;
pub mod input;
pub mod params;
pub mod player;
pub mod renderer;
pub mod scene;
pub mod session;
pub mod spawner;
pub mod trail;
pub mod ui;
