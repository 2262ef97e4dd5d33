use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use crate::level::LevelState;
use crate::parser;
use crate::LoadLevel;

pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Result<String, Box<dyn Error>> {
    let mut file = File::open(path)?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

impl LoadLevel for str {
    fn load_level(&self, number: usize) -> Result<LevelState, Box<dyn Error>> {
        let source = read_file(self)?;
        let grid = parser::extract_level(&source, number)?;
        let level = LevelState::load(grid)?;
        info!("Loaded level {} from {}", number, self);
        Ok(level)
    }
}
