//! Difficulty presets and the gameplay constants derived from them.

use crate::entity::Speed;
use crate::game::DomainError;
use crate::util::random::{GameRng, RngExtended};

use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

const BELTS: [usize; 4] = [5, 7, 9, 5];
const CONVEYOR_SPEED: [(f32, f32, f32); 3] = [(0.75, 1.0, 1.0), (0.75, 1.0, 1.5), (0.75, 1.5, 2.0)];
const INCREASE: [u32; 4] = [50, 30, 30, 20];
const ELIMINATES: [u32; 4] = [3, 5, 5, 0];
const WINDOW_HEIGHT: [u32; 4] = [325, 425, 525, 325];
const WINDOW_WIDTH: [u32; 4] = [500, 500, 500, 500];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(try_from = "u8")]
pub struct Difficulty(u8);

impl Difficulty {
    pub const EASY: Self = Self(0);
    pub const NORMAL: Self = Self(1);
    pub const HARD: Self = Self(2);
    /// Random belt speeds and reversed controls.
    pub const CRAZY: Self = Self(3);

    pub const fn level(self) -> u8 {
        self.0
    }

    /// Gameplay constants for this difficulty. Only the crazy level draws from `rng`.
    pub fn values(self, rng: &mut GameRng) -> DifficultyValues {
        let idx = usize::from(self.0);
        let conveyor_speed = match CONVEYOR_SPEED.get(idx) {
            Some(&(factory, even, odd)) => Speed { factory, even, odd },
            None => Speed {
                factory: 0.75,
                even: rng.uniform(1.0, 2.0),
                odd: rng.uniform(1.0, 2.0),
            },
        };

        DifficultyValues {
            belts: BELTS[idx],
            conveyor_speed,
            increase: INCREASE[idx],
            eliminates: ELIMINATES[idx],
            reversed_controls: self == Self::CRAZY,
            window_height: WINDOW_HEIGHT[idx],
            window_width: WINDOW_WIDTH[idx],
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::EASY
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if usize::from(value) < BELTS.len() {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidDifficulty(value))
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct DifficultyValues {
    /// number of belts between the factory belt and the truck
    pub belts: usize,
    pub conveyor_speed: Speed,
    /// points needed to raise the minimum number of packages in play
    pub increase: u32,
    /// deliveries traded for an extra life, 0 disables extra lives
    pub eliminates: u32,
    pub reversed_controls: bool,
    pub window_height: u32,
    pub window_width: u32,
}
