//! # Factory Bros - a Game & Watch style package sorting game
//!
//! Two workers keep packages moving up a stack of conveyor belts until a truck is full.
//! This crate holds the simulation: the factory floor, the package transport and the game loop.
//! Front ends drive a [`game::Session`] with commands and read its state and events.
//!

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::multiple_crate_versions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::float_cmp,
    clippy::module_name_repetitions,
    clippy::use_self
)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
extern crate rand;
extern crate rand_core;
extern crate rand_isaac;
extern crate serde;
extern crate serde_json;

pub mod entity;
pub mod game;
pub mod util;

use std::env;
use std::path::PathBuf;

pub const VERSION: &str = "0.1.0";

pub fn parse_cmdline_flags() {
    let args: Vec<String> = env::args().collect();
    parse_flags(&args);
}

/// Apply command line flags to the global game environment.
pub fn parse_flags(args: &[String]) {
    debug!("args: {:?}", args);
    for idx in 0..args.len() {
        if let Some(arg) = args.get(idx) {
            match arg.as_str() {
                "-d" | "--debug" => game::env().set_debug_mode(true),
                "-s" | "--seed" => parse_seed(args, idx),
                "-t" | "--ticks" => parse_ticks(args, idx),
                "--difficulty" => parse_difficulty(args, idx),
                "--config" => parse_config(args, idx),
                "--json" => game::env().set_json_output(true),
                "--dump-state" => game::env().set_dumping_state(true),
                _ => {}
            }
        }
    }
}

fn parse_seed(args: &[String], idx: usize) {
    // try get next argument to retrieve the seed number
    if idx + 1 == args.len() {
        info!("no seed parameter provided, fall back to a random seed instead");
    }
    if let Some(next_arg) = args.get(idx + 1) {
        match next_arg.parse() {
            Ok(seed) => game::env().set_seed(seed),
            Err(_) => info!("no numerical seed parameter provided, fall back to a random seed"),
        }
    }
}

fn parse_ticks(args: &[String], idx: usize) {
    if idx + 1 == args.len() {
        info!("Option '-t | --ticks' requires an integer parameter!");
    }
    if let Some(next_arg) = args.get(idx + 1) {
        match next_arg.parse::<u64>() {
            Ok(limit) => game::env().set_tick_limit(limit),
            Err(_) => info!("no numerical tick limit provided, playing until game over"),
        }
    }
}

fn parse_difficulty(args: &[String], idx: usize) {
    if idx + 1 == args.len() {
        info!("no difficulty parameter provided, fall back to use '0' instead");
    }
    if let Some(next_arg) = args.get(idx + 1) {
        let difficulty = next_arg.parse::<u8>().map_or_else(
            |_| {
                info!("no numerical difficulty parameter provided, fall back to use '0' instead");
                0
            },
            |v| v,
        );
        game::env().set_difficulty(difficulty);
    }
}

fn parse_config(args: &[String], idx: usize) {
    match args.get(idx + 1) {
        Some(path) => game::env().set_config_path(PathBuf::from(path)),
        None => info!("Option '--config' requires a file path, using default timing"),
    }
}
