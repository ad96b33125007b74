use crate::game::ConfigError;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Pace of the game. All ticks are multiples of `tick_second`, durations are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    pub tick_second: f64,
    /// interval between two belt movements
    pub move_package_tick: f64,
    /// interval between two truck movements during a break
    pub move_truck_tick: f64,
    /// interval between two new packages until the first package was handed off
    pub create_package_tick: f64,
    /// length of the break after a delivery
    pub break_seconds: f64,
    /// how long the boss stays after entering
    pub boss_seconds: f64,
    /// package ticks a worker needs to put a caught package down
    pub carry_ticks: f64,
    /// frames per second of the fixed-step loop
    pub fps: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tick_second: 1.0,
            move_package_tick: 0.09,
            move_truck_tick: 0.07,
            create_package_tick: 5.0,
            break_seconds: 8.0,
            boss_seconds: 1.5,
            carry_ticks: 3.0,
            fps: 60,
        }
    }
}

impl Timing {
    /// Read the timing from a json file. Missing fields keep their default values.
    ///
    /// # Errors
    ///
    /// If the file cannot be read, does not contain valid json or holds non-positive values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut json = String::new();
        file.read_to_string(&mut json)?;
        let timing = serde_json::from_str::<Self>(&json)?;
        timing.validate()?;
        info!("loaded timing from {}", path.display());
        Ok(timing)
    }

    /// # Errors
    ///
    /// `ConfigError::Invalid` naming the first tick, duration or frame rate that is not strictly
    /// positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("tick_second", self.tick_second),
            ("move_package_tick", self.move_package_tick),
            ("move_truck_tick", self.move_truck_tick),
            ("create_package_tick", self.create_package_tick),
            ("break_seconds", self.break_seconds),
            ("boss_seconds", self.boss_seconds),
            ("carry_ticks", self.carry_ticks),
        ];
        if let Some((name, _)) = durations
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            return Err(ConfigError::Invalid(*name));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps"));
        }
        Ok(())
    }

    /// Length of a single frame in seconds.
    pub fn frame(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }

    /// Seconds a worker carries a package before putting it down.
    pub fn carry_seconds(&self) -> f64 {
        self.move_package_tick * self.carry_ticks
    }
}
