use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::level::{LevelState, UndoOutcome};

pub struct ReplayFormatter<'a> {
    level: &'a LevelState,
    format: Format,
    include_steps: bool,
}

impl<'a> ReplayFormatter<'a> {
    pub(crate) fn new(level: &'a LevelState, format: Format, include_steps: bool) -> Self {
        Self {
            level,
            format,
            include_steps,
        }
    }
}

impl Display for ReplayFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut replay = self.level.clone();
        while let UndoOutcome::Undone(_) = replay.undo() {}

        writeln!(f, "{}", replay.format(self.format))?;
        for &mov in self.level.history() {
            let outcome = replay.apply_move(mov.dir, true);
            debug_assert!(outcome.is_success());
            if mov.is_push || self.include_steps {
                writeln!(f, "{}", replay.format(self.format))?;
            }
        }
        Ok(())
    }
}

impl Debug for ReplayFormatter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
