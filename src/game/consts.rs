use crate::entity::PlayerId;

// players, index of the player vector
pub const MARIO: PlayerId = PlayerId(0);
pub const LUIGI: PlayerId = PlayerId(1);
pub const PLAYER_SIZE: f32 = 16.0;
pub const START_FLOOR: usize = 1;

// packages
pub const PACKAGE_LENGTH: f32 = 12.0;
pub const PACKAGE_HEIGHT: f32 = 8.0;
/// pixels per tick and unit of belt velocity
pub const BELT_STEP_FACTOR: f32 = 4.0;
pub const FALL_STEP: f32 = 4.0;

// truck
pub const TRUCK_CAPACITY: usize = 8;
pub const TRUCK_STEP: f32 = 4.0;

// scoring
pub const MAX_LIVES: u8 = 3;
pub const MAX_STORED_DELIVERIES: u32 = 9;
pub const HANDOFF_POINTS: u32 = 1;
pub const DELIVERY_POINTS: u32 = 10;
