use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::{Cell, Dir, Pos};
use crate::grid::Grid;
use crate::grid_formatter::GridFormatter;
use crate::moves::{Move, Moves};
use crate::replay_formatter::ReplayFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    NoWorker,
    MultipleWorkers,
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            LoadError::NoWorker => write!(f, "No worker"),
            LoadError::MultipleWorkers => write!(f, "More than one worker"),
        }
    }
}

impl Error for LoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Stepped,
    Pushed,
    Blocked,
}

impl MoveOutcome {
    pub fn is_success(self) -> bool {
        self != MoveOutcome::Blocked
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    Undone(Move),
    NothingToUndo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Worker {
    pub pos: Pos,
    pub on_dock: bool,
}

#[derive(Clone)]
pub struct LevelState {
    grid: Grid,
    history: Moves,
}

impl LevelState {
    pub fn load(grid: Grid) -> Result<Self, LoadError> {
        match grid.positions().filter(|&(_, c)| c.is_worker()).count() {
            0 => return Err(LoadError::NoWorker),
            1 => {}
            _ => return Err(LoadError::MultipleWorkers),
        }

        debug!(
            "Loaded {}x{} level: {} boxes, {} docks",
            grid.cols(),
            grid.rows(),
            grid.positions().filter(|&(_, c)| c.is_box()).count(),
            grid.positions().filter(|&(_, c)| c.is_dock()).count(),
        );

        Ok(LevelState {
            grid,
            history: Moves::default(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn history(&self) -> &Moves {
        &self.history
    }

    /// Anything outside the grid reads as a wall.
    pub fn cell_at(&self, pos: Pos) -> Cell {
        self.grid.get(pos).unwrap_or(Cell::Wall)
    }

    pub fn find_worker(&self) -> Worker {
        let (pos, cell) = self
            .grid
            .positions()
            .find(|&(_, c)| c.is_worker())
            .expect("level without a worker");
        Worker {
            pos,
            on_dock: cell == Cell::WorkerOnDock,
        }
    }

    pub fn can_step(&self, dir: Dir) -> bool {
        let worker = self.find_worker().pos;
        self.cell_at(worker + dir).is_free()
    }

    pub fn can_push(&self, dir: Dir) -> bool {
        let worker = self.find_worker().pos;
        self.cell_at(worker + dir).is_box() && self.cell_at(worker + dir + dir).is_free()
    }

    pub fn apply_move(&mut self, dir: Dir, record: bool) -> MoveOutcome {
        let worker = self.find_worker().pos;

        let outcome = if self.can_step(dir) {
            self.relocate_worker(worker, dir);
            MoveOutcome::Stepped
        } else if self.can_push(dir) {
            self.relocate_box(worker + dir, dir);
            self.relocate_worker(worker, dir);
            MoveOutcome::Pushed
        } else {
            trace!("Blocked: {} from {}", dir, worker);
            return MoveOutcome::Blocked;
        };

        let mov = Move::new(dir, outcome == MoveOutcome::Pushed);
        trace!("Applied {} from {}", mov, worker);
        if record {
            self.history.add(mov);
        }
        outcome
    }

    pub fn undo(&mut self) -> UndoOutcome {
        let mov = match self.history.pop() {
            Some(mov) => mov,
            None => return UndoOutcome::NothingToUndo,
        };
        let back = mov.dir.inverse();

        // the cell the worker came from is always free so this can't be blocked or turn into a push
        let outcome = self.apply_move(back, false);
        debug_assert_eq!(outcome, MoveOutcome::Stepped);

        if mov.is_push {
            let worker = self.find_worker().pos;
            self.relocate_box(worker + mov.dir + mov.dir, back);
        }
        trace!("Undid {}", mov);
        UndoOutcome::Undone(mov)
    }

    pub fn is_completed(&self) -> bool {
        self.grid.count(Cell::Box) == 0
    }

    pub fn box_count(&self) -> usize {
        self.grid.count(Cell::Box) + self.grid.count(Cell::BoxOnDock)
    }

    pub fn boxes_on_docks(&self) -> usize {
        self.grid.count(Cell::BoxOnDock)
    }

    pub fn xsb(&self) -> GridFormatter<'_> {
        GridFormatter::new(&self.grid, Format::Xsb)
    }

    pub fn custom(&self) -> GridFormatter<'_> {
        GridFormatter::new(&self.grid, Format::Custom)
    }

    pub fn format(&self, format: Format) -> GridFormatter<'_> {
        GridFormatter::new(&self.grid, format)
    }

    pub fn replay(&self, format: Format, include_steps: bool) -> ReplayFormatter<'_> {
        ReplayFormatter::new(self, format, include_steps)
    }

    fn relocate_worker(&mut self, from: Pos, dir: Dir) {
        let to = from + dir;
        self.grid[to] = self.grid[to].with_worker();
        self.grid[from] = self.grid[from].vacated();
    }

    fn relocate_box(&mut self, from: Pos, dir: Dir) {
        let to = from + dir;
        self.grid[to] = self.grid[to].with_box();
        self.grid[from] = self.grid[from].vacated();
    }
}

impl Display for LevelState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for LevelState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}

#[cfg(test)]
mod tests {
    use difference::Changeset;

    use crate::data::DIRECTIONS;

    use super::*;

    fn load(text: &str) -> LevelState {
        LevelState::load(text.parse().unwrap()).unwrap()
    }

    fn assert_grid(level: &LevelState, expected: &str) {
        let expected = format!("{}\n", expected.trim_matches('\n'));
        let actual = level.to_string();
        if actual != expected {
            panic!("grid mismatch:\n{}", Changeset::new(&expected, &actual, "\n"));
        }
    }

    #[test]
    fn load_requires_single_worker() {
        assert_eq!(
            LevelState::load("#####\n# $.#\n#####".parse().unwrap()).unwrap_err(),
            LoadError::NoWorker
        );
        assert_eq!(
            LevelState::load(Grid::default()).unwrap_err(),
            LoadError::NoWorker
        );
        assert_eq!(
            LevelState::load("#@+#".parse().unwrap()).unwrap_err(),
            LoadError::MultipleWorkers
        );

        let level = load("#+$ #");
        assert!(level.history().is_empty());
        assert_eq!(
            level.find_worker(),
            Worker {
                pos: Pos::new(1, 0),
                on_dock: true
            }
        );
    }

    #[test]
    fn out_of_range_reads_as_wall() {
        let level = load(
            r"
 @
#",
        );
        assert_eq!(level.cell_at(Pos::new(1, 0)), Cell::Worker);
        assert_eq!(level.cell_at(Pos::new(2, 0)), Cell::Wall);
        assert_eq!(level.cell_at(Pos::new(1, 1)), Cell::Wall);
        assert_eq!(level.cell_at(Pos::new(-1, 0)), Cell::Wall);
        assert_eq!(level.cell_at(Pos::new(0, -1)), Cell::Wall);
        assert_eq!(level.cell_at(Pos::new(0, 7)), Cell::Wall);
    }

    #[test]
    fn no_escape_through_missing_border() {
        let mut level = load("@$");
        for &dir in &DIRECTIONS {
            assert_eq!(level.apply_move(dir, true), MoveOutcome::Blocked);
        }
        assert_grid(&level, "@$\n");
        assert!(level.history().is_empty());
    }

    #[test]
    fn step_transitions() {
        let mut level = load("# @..  #");

        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Stepped);
        assert_grid(&level, "#  +.  #\n");
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Stepped);
        assert_grid(&level, "#  .+  #\n");
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Stepped);
        assert_grid(&level, "#  ..@ #\n");
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Stepped);
        assert_grid(&level, "#  .. @#\n");
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Blocked);
        assert_eq!(level.history().to_string(), "rrrr");
    }

    #[test]
    fn push_transitions() {
        // box -> dock, box on dock -> floor, worker picking up the dock it pushed off
        let mut level = load("#@$. #");
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Pushed);
        assert_grid(&level, "# @* #\n");
        assert!(level.is_completed());
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Pushed);
        assert_grid(&level, "#  +$#\n");
        assert!(!level.is_completed());
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Blocked);
        assert_eq!(level.history().to_string(), "RR");

        let mut level = load("#+*.#");
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Pushed);
        assert_grid(&level, "#.+*#\n");
    }

    #[test]
    fn can_step_and_push() {
        let level = load(
            r"
#####
#@$$#
# * #
#####",
        );
        assert!(!level.can_step(Dir::Right));
        assert!(!level.can_push(Dir::Right)); // two boxes in a row
        assert!(level.can_step(Dir::Down));
        assert!(!level.can_push(Dir::Down));
        assert!(!level.can_step(Dir::Up));
        assert!(!level.can_push(Dir::Up));
    }

    #[test]
    fn walls_and_double_boxes_block() {
        let mut level = load(
            r"
######
#@$$.#
#$   #
#    #
######",
        );
        let before = level.grid().clone();
        assert_eq!(level.apply_move(Dir::Up, true), MoveOutcome::Blocked);
        assert_eq!(level.apply_move(Dir::Left, true), MoveOutcome::Blocked);
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Blocked);
        assert_eq!(level.grid(), &before);
        assert!(level.history().is_empty());

        assert_eq!(level.apply_move(Dir::Down, true), MoveOutcome::Pushed);
        // box against the bottom wall
        assert_eq!(level.apply_move(Dir::Down, true), MoveOutcome::Blocked);
        assert_eq!(level.history().to_string(), "D");
    }

    #[test]
    fn unrecorded_moves() {
        let mut level = load("#@$ . #");
        assert_eq!(level.apply_move(Dir::Right, false), MoveOutcome::Pushed);
        assert!(level.history().is_empty());
        assert_eq!(level.undo(), UndoOutcome::NothingToUndo);
        assert_grid(&level, "# @$. #\n");
    }

    #[test]
    fn scenario_push_onto_dock_and_undo() {
        let mut level = load(
            r"
######
#@ $.#
######",
        );
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Stepped);
        assert_eq!(level.find_worker().pos, Pos::new(2, 1));
        assert!(!level.is_completed());

        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Pushed);
        assert_eq!(level.cell_at(Pos::new(4, 1)), Cell::BoxOnDock);
        assert_eq!(level.find_worker().pos, Pos::new(3, 1));
        assert!(level.is_completed());

        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Blocked);
        assert_grid(&level, "######\n#  @*#\n######\n");

        assert_eq!(level.undo(), UndoOutcome::Undone(Move::new(Dir::Right, true)));
        assert_eq!(level.find_worker().pos, Pos::new(2, 1));
        assert_eq!(level.cell_at(Pos::new(3, 1)), Cell::Box);
        assert_eq!(level.cell_at(Pos::new(4, 1)), Cell::Dock);
        assert!(!level.is_completed());

        assert_eq!(level.undo(), UndoOutcome::Undone(Move::new(Dir::Right, false)));
        assert_grid(&level, "######\n#@ $.#\n######\n");
        assert_eq!(level.undo(), UndoOutcome::NothingToUndo);
    }

    #[test]
    fn undo_restores_dock_flags() {
        // worker on dock pushing a box off a dock onto another dock
        let original = r"
#######
# +*. #
#######";
        let mut level = load(original);
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Pushed);
        assert_grid(&level, "#######\n# .+* #\n#######\n");
        assert_eq!(level.apply_move(Dir::Right, true), MoveOutcome::Pushed);
        assert_grid(&level, "#######\n# ..+$#\n#######\n");

        level.undo();
        assert_grid(&level, "#######\n# .+* #\n#######\n");
        level.undo();
        assert_grid(&level, original);
    }

    #[test]
    fn step_then_inverse_restores_grid() {
        let text = r"
#######
#. $  #
# .@  #
#   *.#
#######";
        for &dir in &DIRECTIONS {
            let mut level = load(text);
            let before = level.grid().clone();
            if level.apply_move(dir, false) == MoveOutcome::Stepped {
                assert_eq!(level.apply_move(dir.inverse(), false), MoveOutcome::Stepped);
                assert_eq!(level.grid(), &before, "direction {}", dir);
            }
        }
    }

    #[test]
    fn undo_all_restores_initial_grid() {
        let mut level = load(
            r"
########
#  .   #
# $$ . #
#@ $   #
#   .  #
########",
        );
        let initial = level.grid().clone();
        let boxes = level.box_count();

        let script = [
            Dir::Right, Dir::Right, Dir::Up, Dir::Up, Dir::Left, Dir::Down, Dir::Right,
            Dir::Right, Dir::Up, Dir::Right, Dir::Down, Dir::Down, Dir::Left, Dir::Left,
            Dir::Up, Dir::Up, Dir::Up, Dir::Right,
        ];
        let mut recorded = 0;
        for &dir in &script {
            if level.apply_move(dir, true).is_success() {
                recorded += 1;
            }
            assert_eq!(level.box_count(), boxes);
        }
        assert_eq!(level.history().move_cnt(), recorded);
        assert!(level.history().push_cnt() > 0);

        for _ in 0..recorded {
            assert!(matches!(level.undo(), UndoOutcome::Undone(_)));
            assert_eq!(level.box_count(), boxes);
        }
        assert_eq!(level.grid(), &initial);
        assert_eq!(level.undo(), UndoOutcome::NothingToUndo);
    }

    #[test]
    fn completion() {
        assert!(load("#@#").is_completed());
        assert!(load("#@*#").is_completed());
        assert!(!load("#@$.#").is_completed());

        let level = load("#@*$.#");
        assert_eq!(level.box_count(), 2);
        assert_eq!(level.boxes_on_docks(), 1);
    }

    #[test]
    fn formatting_level() {
        let level = load("#####\n#@$.#\n#####");
        assert_eq!(level.to_string(), "#####\n#@$.#\n#####\n");
        assert_eq!(format!("{:?}", level), level.to_string());
        assert_eq!(level.format(Format::Xsb).to_string(), level.xsb().to_string());
        assert_eq!(
            level.custom().to_string(),
            "<><><><><>\n<>P B  _<>\n<><><><><>\n"
        );
    }
}
