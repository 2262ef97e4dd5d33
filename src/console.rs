use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::io::{self, BufRead, Write};

use crate::config::Format;
use crate::data::Dir;
use crate::level::{LevelState, MoveOutcome, UndoOutcome};
use crate::moves::{Move, Moves};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Dir),
    Undo,
    Quit,
}

impl Command {
    pub fn from_char(c: char) -> Option<Command> {
        match c.to_ascii_lowercase() {
            'w' | 'k' => Some(Command::Move(Dir::Up)),
            's' | 'j' => Some(Command::Move(Dir::Down)),
            'a' | 'h' => Some(Command::Move(Dir::Left)),
            'd' | 'l' => Some(Command::Move(Dir::Right)),
            'z' | 'u' => Some(Command::Undo),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub commands: usize,
    pub blocked: usize,
    pub undos: usize,
    pub quit: bool,
}

pub fn play<R: BufRead, W: Write>(
    level: &mut LevelState,
    input: R,
    out: &mut W,
    format: Format,
) -> io::Result<Session> {
    let mut session = Session::default();
    write!(out, "{}", level.format(format))?;

    for line in input.lines() {
        let line = line?;
        for c in line.chars() {
            let command = match Command::from_char(c) {
                Some(command) => command,
                None => {
                    if !c.is_whitespace() {
                        debug!("Ignoring unknown command {:?}", c);
                    }
                    continue;
                }
            };
            session.commands += 1;
            match command {
                Command::Move(dir) => {
                    if level.apply_move(dir, true) == MoveOutcome::Blocked {
                        session.blocked += 1;
                    }
                }
                Command::Undo => {
                    if let UndoOutcome::Undone(_) = level.undo() {
                        session.undos += 1;
                    } else {
                        debug!("Nothing to undo");
                    }
                }
                Command::Quit => {
                    session.quit = true;
                    return Ok(session);
                }
            }
        }

        writeln!(out)?;
        write!(out, "{}", level.format(format))?;
        if level.is_completed() {
            writeln!(out, "Level completed")?;
        }
    }

    Ok(session)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptErr {
    Blocked { index: usize, mov: Move },
    PushMismatch { index: usize, mov: Move },
}

impl Display for ScriptErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ScriptErr::Blocked { index, mov } => {
                write!(f, "Move {} ({}) is blocked", index + 1, mov)
            }
            ScriptErr::PushMismatch { index, mov } => {
                let expected = if mov.is_push { "push" } else { "step" };
                write!(f, "Move {} ({}) should be a {}", index + 1, mov, expected)
            }
        }
    }
}

impl Error for ScriptErr {}

pub fn run_moves(level: &mut LevelState, moves: &Moves) -> Result<(), ScriptErr> {
    for (index, &mov) in moves.iter().enumerate() {
        match level.apply_move(mov.dir, true) {
            MoveOutcome::Blocked => return Err(ScriptErr::Blocked { index, mov }),
            MoveOutcome::Pushed if !mov.is_push => {
                level.undo();
                return Err(ScriptErr::PushMismatch { index, mov });
            }
            MoveOutcome::Stepped if mov.is_push => {
                level.undo();
                return Err(ScriptErr::PushMismatch { index, mov });
            }
            _ => {}
        }
    }
    Ok(())
}
