//! The top level representation of the game. Here the factory floor is assembled from the
//! difficulty settings and the game loop advances the simulation.

pub mod config;
pub mod consts;
pub mod control;
pub mod difficulty;
pub mod env;
pub mod error;
pub mod layout;
pub mod msg;
pub mod session;
mod state;

pub use config::Timing;
pub use control::{Command, Controls, Intent};
pub use difficulty::{Difficulty, DifficultyValues};
pub use env::env;
pub use error::{ConfigError, DomainError};
pub use msg::Event;
pub use session::{RunState, Session, Summary};
pub use state::Game;
