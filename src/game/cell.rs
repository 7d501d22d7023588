use super::direction::Direction;
use rand::Rng;
use std::fmt;

/// A single character cell on the screen, addressed as `(row, col)` from the
/// top-left corner.  Coordinates are signed so that a cell one step past an
/// edge is still representable.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Cell {
    pub(crate) row: i32,
    pub(crate) col: i32,
}

impl Cell {
    pub(crate) fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// The adjacent cell one unit step away in `direction`
    pub(crate) fn step(self, direction: Direction) -> Cell {
        let Cell { mut row, mut col } = self;
        match direction {
            Direction::Up => row -= 1,
            Direction::Down => row += 1,
            Direction::Left => col -= 1,
            Direction::Right => col += 1,
        }
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The playable area.  The outermost ring of cells — row/col equal to zero or
/// to the extent — is the wall; everything strictly between is interior.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl Grid {
    pub(crate) fn new(width: u16, height: u16) -> Grid {
        Grid {
            width: i32::from(width),
            height: i32::from(height),
        }
    }

    /// Wall test for the cell the head is about to occupy.  Only exact
    /// equality with the extreme row/column counts as a hit; that is
    /// sufficient because the head only ever moves by unit steps, so it can
    /// never jump past the wall without landing on it first.
    pub(crate) fn is_boundary(self, cell: Cell) -> bool {
        cell.row == 0 || cell.row == self.height || cell.col == 0 || cell.col == self.width
    }

    /// A uniformly random interior cell
    pub(crate) fn random_interior<R: Rng>(self, rng: &mut R) -> Cell {
        Cell {
            row: rng.random_range(1..self.height),
            col: rng.random_range(1..self.width),
        }
    }

    /// Where the snake's head starts out
    pub(crate) fn start_cell(self) -> Cell {
        Cell {
            row: self.height / 4,
            col: self.width / 4,
        }
    }
}
