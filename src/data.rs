use std::fmt::{self, Display, Formatter};
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Floor,
    Dock,
    Worker,
    WorkerOnDock,
    Box,
    BoxOnDock,
}

impl Cell {
    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '#' => Some(Cell::Wall),
            ' ' => Some(Cell::Floor),
            '.' => Some(Cell::Dock),
            '@' => Some(Cell::Worker),
            '+' => Some(Cell::WorkerOnDock),
            '$' => Some(Cell::Box),
            '*' => Some(Cell::BoxOnDock),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Floor => ' ',
            Cell::Dock => '.',
            Cell::Worker => '@',
            Cell::WorkerOnDock => '+',
            Cell::Box => '$',
            Cell::BoxOnDock => '*',
        }
    }

    pub fn is_dock(self) -> bool {
        match self {
            Cell::Dock | Cell::WorkerOnDock | Cell::BoxOnDock => true,
            _ => false,
        }
    }

    pub fn is_worker(self) -> bool {
        self == Cell::Worker || self == Cell::WorkerOnDock
    }

    pub fn is_box(self) -> bool {
        self == Cell::Box || self == Cell::BoxOnDock
    }

    pub fn is_free(self) -> bool {
        self == Cell::Floor || self == Cell::Dock
    }

    pub(crate) fn vacated(self) -> Cell {
        if self.is_dock() {
            Cell::Dock
        } else {
            Cell::Floor
        }
    }

    pub(crate) fn with_worker(self) -> Cell {
        if self.is_dock() {
            Cell::WorkerOnDock
        } else {
            Cell::Worker
        }
    }

    pub(crate) fn with_box(self) -> Cell {
        if self.is_dock() {
            Cell::BoxOnDock
        } else {
            Cell::Box
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

// `x` is the column, `y` the row (0 is the top).
// Signed so look-ahead past the top or left edge is still a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Pos {
        Pos { x, y }
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Right,
    Down,
    Left,
}

pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Right, Dir::Down, Dir::Left];

impl Dir {
    pub fn dx(self) -> i32 {
        match self {
            Dir::Left => -1,
            Dir::Right => 1,
            Dir::Up | Dir::Down => 0,
        }
    }

    pub fn dy(self) -> i32 {
        match self {
            Dir::Up => -1,
            Dir::Down => 1,
            Dir::Left | Dir::Right => 0,
        }
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Dir> {
        match (dx, dy) {
            (0, -1) => Some(Dir::Up),
            (1, 0) => Some(Dir::Right),
            (0, 1) => Some(Dir::Down),
            (-1, 0) => Some(Dir::Left),
            _ => None,
        }
    }

    pub fn inverse(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Right => write!(f, "r"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        Pos::new(self.x + dir.dx(), self.y + dir.dy())
    }
}
