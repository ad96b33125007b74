//! # Factory Bros - a Game & Watch style package sorting game
//!
//! Headless runner: the autopilot plays a game at a fixed frame rate until game over or until the
//! tick limit is reached, then the score is printed.
//!

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cast_precision_loss)]

#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use color_eyre::eyre::{Result, WrapErr};
use factory_bros::entity::Autopilot;
use factory_bros::game::{self, Difficulty, Event, RunState, Session, Timing};
use factory_bros::util::random::GameRng;
use factory_bros::util::Timer;
use std::convert::TryFrom;

// For game testing run with `RUST_LOG=factory_bros=trace RUST_BACKTRACE=1 cargo run -- --debug`.

/// seconds a simulated worker waits between two steps
const AUTOPILOT_REACTION: f64 = 0.15;
/// keeps the autopilot rng apart from the game rng when both use the same seed
const AUTOPILOT_SEED_MASK: u64 = 0x5eed_f00d;

/// # Errors
/// Errors are repackaged with `color_eyre`
pub fn main() -> Result<()> {
    color_eyre::install()?;

    println!(
        r#"
       ___         _                  ___
      | __|_ _ __ | |_ ___ _ _ _  _  | _ )_ _ ___ ___
      | _/ _` / _||  _/ _ \ '_| || | | _ \ '_/ _ (_-<
      |_|\__,_\__| \__\___/_|  \_, | |___/_| \___/__/
                               |__/          v{}
    "#,
        factory_bros::VERSION
    );

    // init logger
    pretty_env_logger::init();

    // parse program arguments
    factory_bros::parse_cmdline_flags();
    let env = game::env().clone();

    let timing = match &env.config_path {
        Some(path) => Timing::load(path)
            .wrap_err_with(|| format!("cannot load timing from {}", path.display()))?,
        None => Timing::default(),
    };
    let difficulty = Difficulty::try_from(env.difficulty)?;

    let mut session = Session::new(difficulty, timing, env.seed)?;
    let mut autopilot = Autopilot::new(
        AUTOPILOT_REACTION,
        GameRng::new_from_u64_seed(session.seed() ^ AUTOPILOT_SEED_MASK),
    );

    let mut timer = Timer::new("game run");
    let dt = timing.frame();
    let mut frames: u64 = 0;
    loop {
        if env.tick_limit.map_or(false, |limit| frames >= limit) {
            info!("tick limit of {} frames reached", frames);
            break;
        }
        for command in autopilot.act(session.game(), session.clock()) {
            session.apply(command);
        }
        let is_over = matches!(session.update(dt)?, RunState::GameOver(_));
        frames += 1;

        for event in session.drain_events() {
            report(&event, env.is_debug_mode);
        }
        if is_over {
            break;
        }
    }
    timer.stop();
    debug!(
        "{} frames, slowest update {}",
        frames,
        factory_bros::util::timer::time_from(session.slowest_update())
    );

    let summary = session.summary();
    if env.is_json_output {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        println!("{}", summary);
    }
    if env.is_dumping_state {
        println!("{}", serde_json::to_string_pretty(session.game())?);
    }
    Ok(())
}

fn report(event: &Event, is_debug_mode: bool) {
    match event {
        Event::PackageMissed { .. }
        | Event::TruckDelivered { .. }
        | Event::ExtraLife
        | Event::GameOver => info!("{:?}", event),
        _ if is_debug_mode => info!("{:?}", event),
        _ => trace!("{:?}", event),
    }
}
