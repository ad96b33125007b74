use crate::entity::PlayerId;

use serde::{Deserialize, Serialize};

/// A move in the game world.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up(PlayerId),
    Down(PlayerId),
}

impl Command {
    pub const fn player(self) -> PlayerId {
        match self {
            Self::Up(p) | Self::Down(p) => p,
        }
    }

    pub const fn reversed(self) -> Self {
        match self {
            Self::Up(p) => Self::Down(p),
            Self::Down(p) => Self::Up(p),
        }
    }
}

/// What the player pressed, before controls are applied.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Intent(pub Command);

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default)]
pub struct Controls {
    pub is_reversed: bool,
}

impl Controls {
    pub const fn new(is_reversed: bool) -> Self {
        Self { is_reversed }
    }

    pub const fn resolve(&self, intent: Intent) -> Command {
        if self.is_reversed {
            intent.0.reversed()
        } else {
            intent.0
        }
    }
}
