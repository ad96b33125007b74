use crate::game::DomainError;

use serde::{Deserialize, Serialize};

/// Axis-aligned box in screen pixels, origin at the top-left corner, `y` growing downwards.
#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq)]
pub struct Element {
    pub x: f32,
    pub y: f32,
    pub length: f32,
    pub height: f32,
}

impl Element {
    pub const fn new(x: f32, y: f32, length: f32, height: f32) -> Self {
        Self {
            x,
            y,
            length,
            height,
        }
    }

    /// Create a new element, rejecting negative coordinates and empty sizes.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidGeometry` if any of the values is out of range.
    pub fn validated(x: f32, y: f32, length: f32, height: f32) -> Result<Self, DomainError> {
        if x < 0.0 || y < 0.0 {
            return Err(DomainError::InvalidGeometry("coordinates cannot be negative"));
        }
        if length <= 0.0 || height <= 0.0 {
            return Err(DomainError::InvalidGeometry("sizes must be positive"));
        }
        Ok(Self::new(x, y, length, height))
    }

    pub fn right(&self) -> f32 {
        self.x + self.length
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Edges that only touch do not count as overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Anything that can be moved across the screen.
pub trait Motion {
    fn element(&self) -> &Element;

    fn element_mut(&mut self) -> &mut Element;

    fn move_to(&mut self, x: f32, y: f32) {
        let element = self.element_mut();
        element.x = x;
        element.y = y;
    }

    fn move_x(&mut self, x: f32) {
        let y = self.element().y;
        self.move_to(x, y);
    }

    fn move_y(&mut self, y: f32) {
        let x = self.element().x;
        self.move_to(x, y);
    }
}
