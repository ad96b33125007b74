//! The boss shows up through the door for a moment whenever a worker makes a mistake.

use crate::entity::Element;
use crate::game::DomainError;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Boss {
    pub element: Element,
    comes_in_time: Option<f64>,
    pub has_to_leave: bool,
}

impl Boss {
    pub const fn new(element: Element) -> Self {
        Self {
            element,
            comes_in_time: None,
            has_to_leave: false,
        }
    }

    pub const fn comes_in_time(&self) -> Option<f64> {
        self.comes_in_time
    }

    /// # Errors
    ///
    /// `DomainError::InvalidTime` for negative or non-finite times.
    pub fn set_comes_in_time(&mut self, time: f64) -> Result<(), DomainError> {
        if time < 0.0 || !time.is_finite() {
            return Err(DomainError::InvalidTime(time));
        }
        self.comes_in_time = Some(time);
        Ok(())
    }

    pub const fn is_present(&self) -> bool {
        self.comes_in_time.is_some()
    }
}

/// The doorway the boss enters through. An open door means the boss is on screen.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Door {
    pub element: Element,
    pub boss: Boss,
    is_open: bool,
}

impl Door {
    pub const fn new(element: Element, boss: Boss) -> Self {
        Self {
            element,
            boss,
            is_open: false,
        }
    }

    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Let the boss in. Returns `true` if the boss was not on screen yet; summoning a present boss
    /// only restarts its stay.
    ///
    /// # Errors
    ///
    /// `DomainError::InvalidTime` for negative times.
    pub fn summon(&mut self, now: f64) -> Result<bool, DomainError> {
        self.boss.set_comes_in_time(now)?;
        self.boss.has_to_leave = false;
        let entered = !self.is_open;
        self.is_open = true;
        Ok(entered)
    }

    /// Send the boss away once it has stayed for `stay` seconds. Returns `true` when it left.
    pub fn update(&mut self, now: f64, stay: f64) -> bool {
        match self.boss.comes_in_time {
            Some(time) if self.is_open && time + stay < now => {
                self.boss.has_to_leave = true;
                self.boss.comes_in_time = None;
                self.is_open = false;
                true
            }
            _ => false,
        }
    }
}
