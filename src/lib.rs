// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![allow(unknown_lints)] // necessary because rustc doesn't know about clippy
#![warn(clippy::all)]

#[macro_use]
extern crate log;

pub mod config;
pub mod console;
pub mod data;
pub mod grid;
pub mod grid_formatter;
pub mod level;
pub mod moves;
pub mod parser;
pub mod replay_formatter;

mod fs;

use std::error::Error;

use crate::level::LevelState;

/// Loads level number `number` (starting at 1) from a levels file.
pub trait LoadLevel {
    fn load_level(&self, number: usize) -> Result<LevelState, Box<dyn Error>>;
}
