use crate::entity::{Element, Motion, Package, PackageState};
use crate::game::consts;
use crate::game::DomainError;

use serde::{Deserialize, Serialize};

/// Where the truck is on its delivery round.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Trip {
    Parked,
    Leaving,
    Returning,
}

/// Terminal receiver of the belt chain. Once full it drives off, delivers and comes back empty.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Truck {
    pub element: Element,
    packages: Vec<Package>,
    capacity: usize,
    home_x: f32,
    trip: Trip,
}

impl Truck {
    pub fn new(element: Element, capacity: usize) -> Self {
        Self {
            element,
            packages: Vec::with_capacity(capacity),
            capacity,
            home_x: element.x,
            trip: Trip::Parked,
        }
    }

    pub fn put_package(&mut self, mut package: Package) {
        package.state = PackageState::OnTruck;
        self.packages.push(package);
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.packages.len() >= self.capacity
    }

    pub const fn trip(&self) -> Trip {
        self.trip
    }

    /// The truck has turned around and is on its way back.
    pub fn has_turned(&self) -> bool {
        self.trip == Trip::Returning
    }

    pub fn has_returned(&self) -> bool {
        self.trip == Trip::Parked
    }

    /// Unload a full truck and send it on its way.
    ///
    /// # Errors
    ///
    /// `DomainError::TruckNotFull` if there is still room for packages.
    pub fn deliver(&mut self) -> Result<Vec<Package>, DomainError> {
        if !self.is_full() {
            return Err(DomainError::TruckNotFull);
        }
        self.trip = Trip::Leaving;
        Ok(self.packages.drain(..).collect())
    }

    /// Drive one step of the delivery round: off the left edge of the screen and back home.
    pub fn truck_in_movement(&mut self) {
        match self.trip {
            Trip::Parked => {}
            Trip::Leaving => {
                let x = self.element.x - consts::TRUCK_STEP;
                self.move_x(x);
                if self.element.right() <= 0.0 {
                    self.trip = Trip::Returning;
                }
            }
            Trip::Returning => {
                let x = (self.element.x + consts::TRUCK_STEP).min(self.home_x);
                self.move_x(x);
                if x >= self.home_x {
                    self.trip = Trip::Parked;
                }
            }
        }
    }
}

impl Motion for Truck {
    fn element(&self) -> &Element {
        &self.element
    }

    fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}
