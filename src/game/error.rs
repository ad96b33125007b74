//! Errors raised when a rule of the game is violated or the configuration cannot be read.

use core::fmt;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

use crate::entity::PackageId;

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Negative coordinates or non-positive sizes.
    InvalidGeometry(&'static str),
    InvalidVelocity(f32),
    InvalidDifficulty(u8),
    /// The named player does not stand on any of its floors.
    PlayerOffFloor(String),
    InvalidPlayer(usize),
    InvalidFloorRef { player: usize, floor: usize },
    InvalidReceiver(usize),
    InvalidConveyor(usize),
    AtTop,
    AtBottom,
    InvalidPosition,
    AlreadyHolding,
    NotHolding,
    PackageNotOnConveyor(PackageId),
    NoNextStep(usize),
    TruckNotFull,
    InvalidTime(f64),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry(what) => write!(f, "invalid geometry: {}", what),
            Self::InvalidVelocity(v) => {
                write!(f, "velocity must be strictly greater than 0, got {}", v)
            }
            Self::InvalidDifficulty(d) => {
                write!(f, "the difficulty must be 0, 1, 2, or 3, got {}", d)
            }
            Self::PlayerOffFloor(name) => {
                write!(f, "player {} is not located on one of its floors", name)
            }
            Self::InvalidPlayer(idx) => write!(f, "no player with index {}", idx),
            Self::InvalidFloorRef { player, floor } => {
                write!(f, "player {} has no floor {}", player, floor)
            }
            Self::InvalidReceiver(idx) => write!(f, "no conveyor {} to receive packages", idx),
            Self::InvalidConveyor(idx) => write!(f, "no conveyor with index {}", idx),
            Self::AtTop => write!(f, "cannot raise the player because it is on the top"),
            Self::AtBottom => write!(f, "cannot lower the player because it is on the bottom"),
            Self::InvalidPosition => write!(f, "player has invalid position"),
            Self::AlreadyHolding => write!(f, "player already has a package"),
            Self::NotHolding => write!(f, "player does not have any package"),
            Self::PackageNotOnConveyor(id) => write!(f, "package {} is not on this conveyor", id),
            Self::NoNextStep(idx) => write!(f, "next step is not defined for conveyor {}", idx),
            Self::TruckNotFull => write!(f, "the truck is not full yet"),
            Self::InvalidTime(t) => write!(f, "time must be greater than or equal to 0, got {}", t),
        }
    }
}

impl Error for DomainError {}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    /// A timing value that has to be strictly positive.
    Invalid(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read config file: {}", e),
            Self::Parse(e) => write!(f, "cannot parse config file: {}", e),
            Self::Invalid(field) => write!(f, "{} must be strictly greater than 0", field),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
