use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Custom,
    Xsb,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Format::Custom => write!(f, "custom"),
            Format::Xsb => write!(f, "xsb"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub levels_path: String,
    pub level: usize,
    pub format: Format,
    pub moves: Option<String>,
    pub replay: bool,
    pub include_steps: bool,
}

impl Config {
    pub fn new(levels_path: String, level: usize) -> Self {
        Config {
            levels_path,
            level,
            format: Format::Xsb,
            moves: None,
            replay: false,
            include_steps: false,
        }
    }
}
