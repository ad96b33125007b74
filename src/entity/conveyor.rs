use crate::entity::{Element, FallSide, FloorRef, Motion, Package, PackageId, PackageState, Stage};
use crate::game::consts;
use crate::game::DomainError;

use serde::{Deserialize, Serialize};

/// Horizontal travel direction of a belt.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// The factory belt (id 0) and every odd belt move left, the others move right.
    pub const fn from_conveyor_id(id: u32) -> Self {
        if id != 0 && id % 2 == 0 {
            Self::Right
        } else {
            Self::Left
        }
    }

    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

/// Belt velocity presets: one for the factory belt, one for even and one for odd belts.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Speed {
    pub factory: f32,
    pub even: f32,
    pub odd: f32,
}

impl Speed {
    pub const fn for_conveyor_id(&self, id: u32) -> f32 {
        if id == 0 {
            self.factory
        } else if id % 2 == 0 {
            self.even
        } else {
            self.odd
        }
    }
}

/// Where a belt sends the packages its worker puts down.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Conveyor(usize),
    Truck,
}

/// What happened to a package during a belt tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConveyorEvent {
    StageChanged { package: PackageId, stage: Stage },
    StartedFalling { package: PackageId, side: Option<FallSide> },
    Landed { package: PackageId },
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Conveyor {
    id: u32,
    pub element: Element,
    direction: Direction,
    velocity: f32,
    finish_floor: FloorRef,
    floor_y: f32,
    next_step: Option<Receiver>,
    start_position: (f32, f32),
    packages: Vec<Package>,
    falling_packages: Vec<Package>,
}

impl Conveyor {
    /// Create a new belt. Direction and velocity are derived from the id.
    ///
    /// # Errors
    ///
    /// Fails on invalid geometry, a non-positive velocity or a negative `floor_y`.
    pub fn new(
        id: u32,
        element: Element,
        speed: &Speed,
        finish_floor: FloorRef,
        floor_y: f32,
    ) -> Result<Self, DomainError> {
        let element = Element::validated(element.x, element.y, element.length, element.height)?;
        let velocity = speed.for_conveyor_id(id);
        if velocity <= 0.0 || !velocity.is_finite() {
            return Err(DomainError::InvalidVelocity(velocity));
        }
        if floor_y < 0.0 {
            return Err(DomainError::InvalidGeometry("floor_y cannot be negative"));
        }

        let direction = Direction::from_conveyor_id(id);
        let start_position = match direction {
            Direction::Left => (element.right() - consts::PACKAGE_LENGTH, element.y),
            Direction::Right => (element.x, element.y),
        };

        Ok(Self {
            id,
            element,
            direction,
            velocity,
            finish_floor,
            floor_y,
            next_step: None,
            start_position,
            packages: Vec::new(),
            falling_packages: Vec::new(),
        })
    }

    /// Set the receiver of this belt. Part of the builder pattern.
    pub fn feeding(mut self, next_step: Receiver) -> Self {
        self.next_step = Some(next_step);
        self
    }

    pub const fn id(&self) -> u32 {
        self.id
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    pub const fn velocity(&self) -> f32 {
        self.velocity
    }

    pub const fn finish_floor(&self) -> FloorRef {
        self.finish_floor
    }

    pub const fn floor_y(&self) -> f32 {
        self.floor_y
    }

    pub const fn next_step(&self) -> Option<Receiver> {
        self.next_step
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn falling_packages(&self) -> &[Package] {
        &self.falling_packages
    }

    /// Horizontal distance a package covers per tick.
    pub fn step(&self) -> f32 {
        self.velocity * consts::BELT_STEP_FACTOR * self.direction.sign()
    }

    /// Place a package on the start of the belt, resting on top of it.
    pub fn put_package(&mut self, mut package: Package) {
        let (x, y) = self.start_position;
        package.move_to(x, y - package.element.height);
        package.state = PackageState::OnConveyor;
        trace!("conveyor {} received {}", self.id, package);
        self.packages.push(package);
    }

    /// Advance every package by one tick.
    pub fn move_packages(&mut self) -> Vec<ConveyorEvent> {
        let mut events = Vec::new();
        let step = self.step();

        let mut idx = 0;
        while idx < self.packages.len() {
            if !self.packages[idx].stage.is_final()
                && self.package_changes_stage(&self.packages[idx])
            {
                let package = &mut self.packages[idx];
                if let Some(stage) = package.stage.next() {
                    package.stage = stage;
                    events.push(ConveyorEvent::StageChanged {
                        package: package.id,
                        stage,
                    });
                }
            }

            let package = &mut self.packages[idx];
            let x = package.element.x + step;
            package.move_x(x);

            if self.is_package_on_conveyor(&self.packages[idx]) {
                idx += 1;
                continue;
            }

            let mut package = self.packages.remove(idx);
            package.state = PackageState::Falling;
            package.fell_from = if package.element.x < self.element.x {
                Some(FallSide::Left)
            } else if package.element.right() > self.element.right() {
                Some(FallSide::Right)
            } else {
                None
            };
            events.push(ConveyorEvent::StartedFalling {
                package: package.id,
                side: package.fell_from,
            });
            self.falling_packages.push(package);
        }

        let floor_y = self.floor_y;
        self.falling_packages.retain_mut(|package| {
            if package.element.y >= floor_y {
                events.push(ConveyorEvent::Landed {
                    package: package.id,
                });
                false
            } else {
                let y = package.element.y + consts::FALL_STEP;
                package.move_y(y);
                true
            }
        });

        events
    }

    /// Take a package off the belt, e.g. when a player picks it up.
    ///
    /// # Errors
    ///
    /// `DomainError::PackageNotOnConveyor` if the belt does not carry it.
    pub fn lift_package(&mut self, id: PackageId) -> Result<Package, DomainError> {
        let idx = self
            .packages
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::PackageNotOnConveyor(id))?;
        Ok(self.packages.remove(idx))
    }

    /// The package's centre lies over the belt.
    pub fn is_package_on_conveyor(&self, package: &Package) -> bool {
        let centre = package.element.x + half(package.element.length) + 1.0;
        self.element.x <= centre && centre <= self.element.right()
    }

    /// Stages change when a package crosses the middle of the belt whose id matches its stage.
    pub fn package_changes_stage(&self, package: &Package) -> bool {
        if i64::from(self.id) - 1 != i64::from(package.stage.value()) {
            return false;
        }
        let middle = self.element.x + half(self.element.length);
        if self.id % 2 == 0 {
            package.element.right() >= middle
        } else {
            package.element.x <= middle
        }
    }

    /// The package overhangs an edge already or will leave the belt with its next move.
    pub fn package_about_to_fall(&self, package: &Package) -> bool {
        if package.element.x <= self.element.x - 1.0
            || self.element.right() + 1.0 <= package.element.right()
        {
            return true;
        }
        let next_centre = package.element.x + self.step() + half(package.element.length) + 1.0;
        match self.direction {
            Direction::Left => next_centre < self.element.x,
            Direction::Right => next_centre > self.element.right(),
        }
    }

    /// Packages that the finishing worker has to catch before the next tick.
    pub fn packages_about_to_fall(&self) -> Vec<PackageId> {
        self.packages
            .iter()
            .filter(|p| self.package_about_to_fall(p))
            .map(|p| p.id)
            .collect()
    }
}

fn half(length: f32) -> f32 {
    (length / 2.0).floor()
}
