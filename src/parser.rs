use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::Cell;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserErr {
    // row, column, offending character
    Pos(usize, usize, char),
    InvalidLevelNumber(usize),
    LevelNotFound(usize),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Pos(r, c, ch) => {
                write!(f, "Invalid cell {:?} at pos: [{}, {}]", ch, r, c)
            }
            ParserErr::InvalidLevelNumber(n) => write!(f, "Level {} is out of range", n),
            ParserErr::LevelNotFound(n) => write!(f, "Level {} not found", n),
        }
    }
}

impl Error for ParserErr {}

impl FromStr for Grid {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_grid(s)
    }
}

pub fn parse_grid(text: &str) -> Result<Grid, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let text = text.trim_matches('\n');
    if text.is_empty() {
        return Ok(Grid::default());
    }

    let mut rows = Vec::new();
    for (r, line) in text.lines().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (c, ch) in line.trim_end_matches('\r').chars().enumerate() {
            let cell = Cell::from_char(ch).ok_or(ParserErr::Pos(r, c, ch))?;
            row.push(cell);
        }
        rows.push(row);
    }
    Ok(Grid::new(rows))
}

/// Finds the block under the `Level {number}` header in a levels file.
///
/// The block ends at the first blank line. Characters which aren't cells are dropped.
pub fn extract_level(source: &str, number: usize) -> Result<Grid, ParserErr> {
    if number < 1 {
        return Err(ParserErr::InvalidLevelNumber(number));
    }

    let header = format!("Level {}", number);
    let mut lines = source.lines().skip_while(|line| line.trim() != header);
    if lines.next().is_none() {
        return Err(ParserErr::LevelNotFound(number));
    }

    let mut rows = Vec::new();
    let mut dropped = 0;
    for line in lines.take_while(|line| !line.trim().is_empty()) {
        let mut row = Vec::with_capacity(line.len());
        for ch in line.chars() {
            match Cell::from_char(ch) {
                Some(cell) => row.push(cell),
                None => dropped += 1,
            }
        }
        rows.push(row);
    }
    if dropped > 0 {
        debug!("Dropped {} invalid characters from level {}", dropped, number);
    }

    Ok(Grid::new(rows))
}
