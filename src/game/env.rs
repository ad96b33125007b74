use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

lazy_static! {
    static ref GAME_ENV: Mutex<GameEnv> = Mutex::new(GameEnv::new());
}

pub fn env<'a>() -> MutexGuard<'a, GameEnv> {
    GAME_ENV.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Serialize, Deserialize, Default, Debug)]
pub struct GameEnv {
    /// if true: log every game event
    pub is_debug_mode: bool,
    /// optional fixed rng seed
    pub seed: Option<u64>,
    /// optional limit of simulated frames
    pub tick_limit: Option<u64>,
    pub difficulty: u8,
    /// optional json file overriding the default timing
    pub config_path: Option<PathBuf>,
    /// print the final summary as json
    pub is_json_output: bool,
    /// print the final game state as json
    pub is_dumping_state: bool,
}

impl GameEnv {
    pub const fn new() -> Self {
        Self {
            is_debug_mode: false,
            seed: None,
            tick_limit: None,
            difficulty: 0,
            config_path: None,
            is_json_output: false,
            is_dumping_state: false,
        }
    }

    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.is_debug_mode = debug_mode;
    }

    pub fn set_seed(&mut self, seed_param: u64) {
        self.seed = Some(seed_param);
    }

    pub fn set_tick_limit(&mut self, limit: u64) {
        self.tick_limit = Some(limit);
    }

    pub fn set_difficulty(&mut self, difficulty: u8) {
        self.difficulty = difficulty;
    }

    pub fn set_config_path(&mut self, path: PathBuf) {
        self.config_path = Some(path);
    }

    pub fn set_json_output(&mut self, json: bool) {
        self.is_json_output = json;
    }

    pub fn set_dumping_state(&mut self, dump: bool) {
        self.is_dumping_state = dump;
    }
}
