use crate::entity::PlayerId;
use crate::game::consts;
use crate::game::control::{Command, Controls, Intent};
use crate::game::msg::{Event, MessageLog};
use crate::game::{layout, Difficulty, DifficultyValues, DomainError, Game, Timing};
use crate::util::random::GameRng;
use crate::util::Timer;

use core::fmt;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Final result of a game, shown on the game over screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub points: u32,
    pub seconds_alive: u64,
    pub deliveries: u32,
    pub difficulty: u8,
    pub seed: u64,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SCORE {:04} after {}s, {} deliveries (difficulty {}, seed {})",
            self.points, self.seconds_alive, self.deliveries, self.difficulty, self.seed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Playing,
    /// The truck is out delivering, belts and workers stand still.
    TakingBreak,
    GameOver(Summary),
}

impl Display for RunState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Playing => write!(f, "Playing"),
            Self::TakingBreak => write!(f, "TakingBreak"),
            Self::GameOver(_) => write!(f, "GameOver"),
        }
    }
}

/// A running game: the domain state plus the clocks that decide when packages move, when new ones
/// appear and when the workers may rest. Time only advances through `update`.
pub struct Session {
    game: Game,
    difficulty: Difficulty,
    values: DifficultyValues,
    timing: Timing,
    controls: Controls,
    rng: GameRng,
    seed: u64,
    clock: f64,
    started_at: f64,
    break_until: f64,
    last_create_package: f64,
    last_move_package: f64,
    last_move_truck: f64,
    create_package_tick: f64,
    deliveries: u32,
    run_state: RunState,
    slowest_update: u128,
}

impl Session {
    /// Start a new game. Without a seed a random one is drawn.
    ///
    /// # Errors
    ///
    /// If the factory floor cannot be laid out for the difficulty.
    pub fn new(
        difficulty: Difficulty,
        timing: Timing,
        seed: Option<u64>,
    ) -> Result<Self, DomainError> {
        let (mut rng, seed) = GameRng::seeded_or_random(seed);
        let values = difficulty.values(&mut rng);
        let game = layout::build(&values)?;
        info!(
            "new game on difficulty {} with {} belts",
            difficulty.level(),
            values.belts
        );

        Ok(Self {
            game,
            difficulty,
            values,
            timing,
            controls: Controls::new(values.reversed_controls),
            rng,
            seed,
            clock: 0.0,
            started_at: 0.0,
            break_until: 0.0,
            last_create_package: 0.0,
            last_move_package: 0.0,
            last_move_truck: 0.0,
            create_package_tick: timing.create_package_tick,
            deliveries: 0,
            run_state: RunState::Playing,
            slowest_update: 0,
        })
    }

    /// Play again on the same difficulty. The clock keeps running.
    ///
    /// # Errors
    ///
    /// If the factory floor cannot be laid out for the difficulty.
    pub fn restart(&mut self) -> Result<(), DomainError> {
        self.values = self.difficulty.values(&mut self.rng);
        self.game = layout::build(&self.values)?;
        self.controls = Controls::new(self.values.reversed_controls);
        self.started_at = self.clock;
        self.break_until = self.clock;
        self.last_create_package = self.clock;
        self.last_move_package = self.clock;
        self.last_move_truck = self.clock;
        self.create_package_tick = self.timing.create_package_tick;
        self.deliveries = 0;
        self.run_state = RunState::Playing;
        info!("restarted game on difficulty {}", self.difficulty.level());
        Ok(())
    }

    pub const fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub const fn run_state(&self) -> &RunState {
        &self.run_state
    }

    pub const fn clock(&self) -> f64 {
        self.clock
    }

    pub const fn timing(&self) -> &Timing {
        &self.timing
    }

    pub const fn values(&self) -> &DifficultyValues {
        &self.values
    }

    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub const fn create_package_tick(&self) -> f64 {
        self.create_package_tick
    }

    /// Slowest call to `update` so far, in nanoseconds.
    pub const fn slowest_update(&self) -> u128 {
        self.slowest_update
    }

    pub fn is_on_break(&self) -> bool {
        self.clock < self.break_until
    }

    pub fn is_over(&self) -> bool {
        matches!(self.run_state, RunState::GameOver(_))
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.game.log.drain()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            points: self.game.points,
            seconds_alive: (self.clock - self.started_at).max(0.0) as u64,
            deliveries: self.deliveries,
            difficulty: self.difficulty.level(),
            seed: self.seed,
        }
    }

    /// React to a key press, applying the (possibly reversed) controls.
    pub fn press(&mut self, intent: Intent) -> bool {
        let command = self.controls.resolve(intent);
        self.apply(command)
    }

    /// Move a worker. Ignored during a break, after the game is over and while the worker carries
    /// a package. Returns whether the worker moved.
    pub fn apply(&mut self, command: Command) -> bool {
        if self.is_over() || self.is_on_break() {
            return false;
        }
        match self.game.player(command.player()) {
            Ok(player) if !player.is_moving_package() => {}
            _ => return false,
        }
        let result = match command {
            Command::Up(player) => self.game.move_player_up(player),
            Command::Down(player) => self.game.move_player_down(player),
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                debug!("ignored {:?}: {}", command, e);
                false
            }
        }
    }

    /// Advance the game by `dt` seconds.
    ///
    /// # Errors
    ///
    /// Only if the game state has become inconsistent, which the layout rules out.
    pub fn update(&mut self, dt: f64) -> Result<&RunState, DomainError> {
        if self.is_over() {
            return Ok(&self.run_state);
        }
        let mut timer = Timer::new("session update");
        self.clock += dt;
        let now = self.clock;

        self.update_progression();
        self.update_extra_life();
        self.update_rest();
        self.game.update_boss(now, self.timing.boss_seconds)?;

        if self.game.truck.is_full() && self.game.truck.has_returned() {
            self.start_delivery(now)?;
        }

        if !self.game.is_over() {
            // the truck finishes its round even when the break is over
            self.move_truck(now);
            if !self.is_on_break() {
                self.put_down_packages(now)?;
                self.move_packages(now)?;
                self.create_packages(now)?;
            }
        }

        self.run_state = if self.game.is_over() {
            self.game.log.add(Event::GameOver);
            let summary = self.summary();
            info!("game over: {}", summary);
            RunState::GameOver(summary)
        } else if self.is_on_break() {
            RunState::TakingBreak
        } else {
            RunState::Playing
        };

        let elapsed = timer.stop_silent();
        if elapsed > self.slowest_update {
            self.slowest_update = elapsed;
            if elapsed as f64 > self.timing.frame() * 1e9 {
                warn!("slow update at {:.2}s took {}ns", now, elapsed);
            }
        }
        Ok(&self.run_state)
    }

    /// The more points, the more packages have to be kept in play at once.
    fn update_progression(&mut self) {
        let increase = self.values.increase.max(1);
        if self.game.points % increase == 0 {
            self.game.minimum_number_packages = 1 + self.game.points / increase;
        }
    }

    /// Trade stored deliveries for a lost life.
    fn update_extra_life(&mut self) {
        let eliminates = self.values.eliminates;
        let game = &mut self.game;
        if eliminates != 0
            && game.stored_deliveries >= eliminates
            && game.stored_deliveries % eliminates == 0
            && game.lives < consts::MAX_LIVES
        {
            game.lives += 1;
            game.stored_deliveries -= eliminates;
            info!("extra life, {} lives", game.lives);
            game.log.add(Event::ExtraLife);
        }
    }

    /// Workers rest during a break. Once it is over the boss checks on them.
    fn update_rest(&mut self) {
        let on_break = self.is_on_break();
        let mut break_ended = false;
        for player in self.game.players_mut() {
            if on_break && !player.is_resting {
                player.is_resting = true;
            } else if !on_break && player.is_resting {
                player.is_resting = false;
                break_ended = true;
            }
        }
        if break_ended {
            self.game.boss_comes_in = true;
            self.game.log.add(Event::BreakEnded);
        }
    }

    fn start_delivery(&mut self, now: f64) -> Result<(), DomainError> {
        self.game.deliver_truck()?;
        self.deliveries += 1;
        self.break_until = now + self.timing.break_seconds;
        self.last_create_package += self.timing.break_seconds;
        if self.values.eliminates != 0
            && self.game.stored_deliveries < consts::MAX_STORED_DELIVERIES
        {
            self.game.stored_deliveries += 1;
        }
        self.game.log.add(Event::BreakStarted);
        Ok(())
    }

    fn move_truck(&mut self, now: f64) {
        let interval = self.timing.tick_second * self.timing.move_truck_tick;
        if now - self.last_move_truck >= interval && !self.game.truck.has_returned() {
            self.last_move_truck = now;
            self.game.truck.truck_in_movement();
            if self.game.truck.has_returned() {
                self.game.log.add(Event::TruckReturned);
            }
        }
    }

    fn put_down_packages(&mut self, now: f64) -> Result<(), DomainError> {
        let carry = self.timing.carry_seconds();
        let ready: Vec<PlayerId> = self
            .game
            .players()
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_moving_package() && p.picked_up_at + carry <= now)
            .map(|(idx, _)| PlayerId(idx))
            .collect();
        for player in ready {
            self.game.player_put_down_package(player)?;
        }
        Ok(())
    }

    fn move_packages(&mut self, now: f64) -> Result<(), DomainError> {
        let interval = self.timing.tick_second * self.timing.move_package_tick;
        if now - self.last_move_package >= interval {
            self.last_move_package = now;
            self.game.move_packages(now)?;
        }
        Ok(())
    }

    fn create_packages(&mut self, now: f64) -> Result<(), DomainError> {
        let minimum = self.game.minimum_number_packages;
        if self.game.first_package_moved {
            self.create_package_tick = self.timing.move_package_tick * 100.0
                * self.values.belts as f64
                / f64::from(minimum + 1);
        }
        let in_play = self.game.packages_at_play;
        let interval_elapsed = now - self.last_create_package
            >= self.timing.tick_second * self.create_package_tick;
        if (in_play < minimum + 1 && interval_elapsed)
            || (in_play < minimum && self.game.first_package_moved)
        {
            self.last_create_package = now;
            self.game.create_package()?;
        }
        Ok(())
    }
}
