//! Utilites contains useful functions that are unrelated to any of the main game modules.

pub mod random;
pub mod timer;

pub use timer::Timer;
