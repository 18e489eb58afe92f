//! Engine for a graph coloring puzzle: color every vertex of a random graph so that
//! no edge joins two equal colors, with a bonus for leaving palette colors unused.

pub mod command;
pub mod config;
pub mod frontend;
pub mod gameplay;
pub mod generator;
pub mod history;
pub mod model;
pub mod rules;
pub mod scoring;
pub mod solver;
pub mod view;

pub use config::{ConfigError, GameConfig};
pub use gameplay::{Fault, GameEngine, GameState, InvalidMove, LevelSummary, MoveOutcome};
pub use model::{Color, Coloring, ColoringAction, ControlAction, Edge, Graph, Palette, Point};
