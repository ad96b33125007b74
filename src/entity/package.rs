use crate::entity::{Element, Motion};

use core::fmt;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageId(pub u32);

impl Display for PackageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Life-cycle of a package.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum PackageState {
    OnConveyor,
    Picked,
    Falling,
    OnTruck,
}

/// How far along the belt chain a package has travelled. Front ends pick the sprite from it.
#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stage(u8);

impl Stage {
    pub const FINAL: Self = Self(5);

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn is_final(self) -> bool {
        self.0 >= Self::FINAL.0
    }

    pub const fn next(self) -> Option<Self> {
        if self.is_final() {
            None
        } else {
            Some(Self(self.0 + 1))
        }
    }
}

/// The edge of the belt a package dropped from.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum FallSide {
    Left,
    Right,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Package {
    pub id: PackageId,
    pub element: Element,
    pub state: PackageState,
    pub stage: Stage,
    pub fell_from: Option<FallSide>,
}

impl Package {
    pub const fn new(id: PackageId, length: f32, height: f32) -> Self {
        Self {
            id,
            element: Element::new(0.0, 0.0, length, height),
            state: PackageState::OnConveyor,
            stage: Stage(0),
            fell_from: None,
        }
    }
}

impl Motion for Package {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

impl Display for Package {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "package {} at ({}, {}) {:?} stage {}",
            self.id,
            self.element.x,
            self.element.y,
            self.state,
            self.stage.value()
        )
    }
}
