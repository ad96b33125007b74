use crate::entity::{Element, Floor, Motion, Package, PackageState};
use crate::game::DomainError;

use core::fmt;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Index of a player in the game's player list.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlayerId(pub usize);

/// A worker climbing between fixed floors, carrying at most one package at a time.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Player {
    pub name: String,
    pub element: Element,
    /// Ordered from the bottom floor to the top floor.
    floors: Vec<Floor>,
    package: Option<Package>,
    /// Index of the conveyor the held package was taken from.
    carrying_from: Option<usize>,
    pub picked_up_at: f64,
    pub is_resting: bool,
}

impl Player {
    pub fn new(name: &str, element: Element, floors: Vec<Floor>) -> Self {
        Self {
            name: name.into(),
            element,
            floors,
            package: None,
            carrying_from: None,
            picked_up_at: 0.0,
            is_resting: false,
        }
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    /// Index of the floor the player stands on, if any.
    pub fn current_floor(&self) -> Option<usize> {
        self.floors
            .iter()
            .position(|f| f.is_at(self.element.x, self.element.y))
    }

    pub fn is_on_floor(&self, floor: usize) -> bool {
        self.current_floor() == Some(floor)
    }

    pub const fn package(&self) -> Option<&Package> {
        self.package.as_ref()
    }

    pub const fn carrying_from(&self) -> Option<usize> {
        self.carrying_from
    }

    pub const fn is_moving_package(&self) -> bool {
        self.package.is_some()
    }

    /// Take a package that came off conveyor `from`.
    ///
    /// # Errors
    ///
    /// `DomainError::AlreadyHolding` if the player carries a package already. The offered package
    /// is dropped in that case, so callers check `is_moving_package` first.
    pub fn pick_package(
        &mut self,
        mut package: Package,
        from: usize,
        now: f64,
    ) -> Result<(), DomainError> {
        if self.package.is_some() {
            return Err(DomainError::AlreadyHolding);
        }
        package.state = PackageState::Picked;
        package.move_to(self.element.x, self.element.y);
        self.package = Some(package);
        self.carrying_from = Some(from);
        self.picked_up_at = now;
        Ok(())
    }

    /// Let go of the held package. It is falling until its receiver takes it.
    ///
    /// # Errors
    ///
    /// `DomainError::NotHolding` if there is nothing to put down.
    pub fn put_package(&mut self) -> Result<(Package, usize), DomainError> {
        let mut package = self.package.take().ok_or(DomainError::NotHolding)?;
        let from = self.carrying_from.take().ok_or(DomainError::NotHolding)?;
        package.state = PackageState::Falling;
        Ok((package, from))
    }
}

impl Motion for Player {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }

    fn move_to(&mut self, x: f32, y: f32) {
        if let Some(package) = self.package.as_mut() {
            package.move_to(x, y);
        }
        self.element.x = x;
        self.element.y = y;
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({}, {})",
            self.name, self.element.x, self.element.y
        )
    }
}
