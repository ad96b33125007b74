//! A simple autopilot that lets the headless game play itself.

use crate::entity::{Direction, PlayerId};
use crate::game::{Command, Game};
use crate::util::random::{GameRng, RngExtended};

/// Sends each idle worker towards the floor where the next package is about to arrive.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// minimum seconds between two steps of the same worker
    reaction: f64,
    /// chance to hesitate instead of stepping
    clumsiness: f64,
    last_step: Vec<f64>,
    rng: GameRng,
}

impl Autopilot {
    pub fn new(reaction: f64, rng: GameRng) -> Self {
        Self {
            reaction,
            clumsiness: 0.0,
            last_step: Vec::new(),
            rng,
        }
    }

    /// Part of the builder pattern.
    pub fn clumsy(mut self, clumsiness: f64) -> Self {
        self.clumsiness = clumsiness;
        self
    }

    /// Decide the moves for this frame.
    pub fn act(&mut self, game: &Game, now: f64) -> Vec<Command> {
        let players = game.players();
        if self.last_step.len() < players.len() {
            self.last_step.resize(players.len(), f64::NEG_INFINITY);
        }

        let mut commands = Vec::new();
        for (idx, player) in players.iter().enumerate() {
            if player.is_moving_package() || player.is_resting {
                continue;
            }
            if self.last_step[idx] + self.reaction > now {
                continue;
            }
            let (Some(current), Some(target)) =
                (player.current_floor(), self.target_floor(game, PlayerId(idx)))
            else {
                continue;
            };
            if current == target || self.rng.flip_with_prob(self.clumsiness) {
                continue;
            }
            self.last_step[idx] = now;
            let command = if target > current {
                Command::Up(PlayerId(idx))
            } else {
                Command::Down(PlayerId(idx))
            };
            trace!("autopilot: {:?} towards floor {}", command, target);
            commands.push(command);
        }
        commands
    }

    /// The finishing floor of the package that reaches the end of its belt first, among the belts
    /// this player serves.
    fn target_floor(&mut self, game: &Game, player: PlayerId) -> Option<usize> {
        let mut best: Option<(f32, usize)> = None;
        for conveyor in game.conveyors() {
            let finish = conveyor.finish_floor();
            if finish.player != player {
                continue;
            }
            let speed = conveyor.step().abs();
            for package in conveyor.packages() {
                let distance = match conveyor.direction() {
                    Direction::Left => package.element.x - conveyor.element.x,
                    Direction::Right => conveyor.element.right() - package.element.right(),
                };
                let ticks_left = distance.max(0.0) / speed;
                best = match best {
                    Some((ticks, _)) if ticks < ticks_left => best,
                    Some((ticks, _)) if ticks == ticks_left && self.rng.coinflip() => best,
                    _ => Some((ticks_left, finish.floor)),
                };
            }
        }
        best.map(|(_, floor)| floor)
    }
}
