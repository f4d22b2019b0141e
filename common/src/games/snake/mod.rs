mod bot_controller;
mod error;
mod grid;
mod observer;
mod settings;
mod simulation;
mod snake;
mod types;

pub use bot_controller::{BotController, BotType};
pub use error::SimulationError;
pub use grid::{Grid, PlacementArea, MAX_PLACEMENT_ATTEMPTS};
pub use observer::{SimulationEvent, SimulationObserver};
pub use settings::{SimulationSettings, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use simulation::{GridSimulation, TickOutcome};
pub use snake::INITIAL_SNAKE_LENGTH;
pub use types::{CellType, Direction, GameState, Outcome, Point, RotationSide};
