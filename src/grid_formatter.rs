use std::fmt::{self, Debug, Display, Formatter};

use crate::config::Format;
use crate::data::Cell;
use crate::grid::Grid;

pub struct GridFormatter<'a> {
    grid: &'a Grid,
    format: Format,
}

impl<'a> GridFormatter<'a> {
    pub fn new(grid: &'a Grid, format: Format) -> Self {
        Self { grid, format }
    }

    fn write_to_formatter(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // ragged rows are written as they are, no padding
        for row in self.grid.iter_rows() {
            for &cell in row {
                match self.format {
                    Format::Custom => Self::write_cell_custom(cell, f)?,
                    Format::Xsb => write!(f, "{}", cell.to_char())?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn write_cell_custom(cell: Cell, f: &mut Formatter<'_>) -> fmt::Result {
        if cell == Cell::Wall {
            return write!(f, "<>");
        }
        match cell {
            Cell::Box | Cell::BoxOnDock => write!(f, "B")?,
            Cell::Worker | Cell::WorkerOnDock => write!(f, "P")?,
            Cell::Floor | Cell::Dock => write!(f, " ")?,
            Cell::Wall => unreachable!("Wall again"),
        };
        if cell.is_dock() {
            write!(f, "_")
        } else {
            write!(f, " ")
        }
    }
}

impl<'a> Display for GridFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_to_formatter(f)
    }
}

impl<'a> Debug for GridFormatter<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
