use crate::entity::PlayerId;
use crate::game::DomainError;

use serde::{Deserialize, Serialize};

/// A stationary platform a player can stand on.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Floor {
    x: f32,
    y: f32,
}

impl Floor {
    /// # Errors
    ///
    /// `DomainError::InvalidGeometry` for negative coordinates.
    pub fn new(x: f32, y: f32) -> Result<Self, DomainError> {
        if x < 0.0 || y < 0.0 {
            return Err(DomainError::InvalidGeometry(
                "floor coordinates cannot be negative",
            ));
        }
        Ok(Self { x, y })
    }

    pub const fn x(&self) -> f32 {
        self.x
    }

    pub const fn y(&self) -> f32 {
        self.y
    }

    pub fn is_at(&self, x: f32, y: f32) -> bool {
        self.x == x && self.y == y
    }
}

/// Names a floor by its owner and its index in the owner's floor list.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FloorRef {
    pub player: PlayerId,
    pub floor: usize,
}

impl FloorRef {
    pub const fn new(player: PlayerId, floor: usize) -> Self {
        Self { player, floor }
    }
}
