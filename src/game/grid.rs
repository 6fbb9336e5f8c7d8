use ratatui::layout::{Position, Size};

/// A location on the board.  Coordinates are signed so that a step off the
/// edge can be represented before it is wrapped back onto the board.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell `(dx, dy)` away from this one, without wrapping
    pub(crate) fn offset(self, (dx, dy): (i32, i32)) -> Cell {
        Cell {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// The dimensions of the toroidal board.  Moving off any edge re-enters from
/// the opposite edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    pub(crate) cols: u16,
    pub(crate) rows: u16,
}

impl Grid {
    pub(crate) const fn new(cols: u16, rows: u16) -> Grid {
        Grid { cols, rows }
    }

    /// Reduce each axis of `cell` modulo the grid's size, so that negative
    /// coordinates land on the far edge.
    ///
    /// Both dimensions must be nonzero.
    pub(crate) fn wrap(self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.rem_euclid(i32::from(self.cols)),
            y: cell.y.rem_euclid(i32::from(self.rows)),
        }
    }

    pub(crate) fn contains(self, cell: Cell) -> bool {
        (0..i32::from(self.cols)).contains(&cell.x) && (0..i32::from(self.rows)).contains(&cell.y)
    }

    /// The cell in which a new snake starts
    pub(crate) fn center(self) -> Cell {
        Cell::new(i32::from(self.cols / 2), i32::from(self.rows / 2))
    }

    /// Total number of cells on the board
    pub(crate) fn area(self) -> usize {
        usize::from(self.cols) * usize::from(self.rows)
    }

    /// Iterate over every cell of the board in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        (0..i32::from(self.rows))
            .flat_map(move |y| (0..i32::from(self.cols)).map(move |x| Cell::new(x, y)))
    }

    /// Convert an on-board cell to a terminal position relative to the
    /// board's top-left corner.  Returns `None` for off-board cells.
    pub(crate) fn position(self, cell: Cell) -> Option<Position> {
        if !self.contains(cell) {
            return None;
        }
        let x = u16::try_from(cell.x).ok()?;
        let y = u16::try_from(cell.y).ok()?;
        Some(Position::new(x, y))
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.cols,
            height: self.rows,
        }
    }
}
