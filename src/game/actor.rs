use super::direction::Direction;
use super::grid::{Cell, Grid};
use std::collections::VecDeque;

/// One cell of the snake's body, optionally carrying the letter that was
/// eaten there
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Segment {
    pub(crate) cell: Cell,
    pub(crate) symbol: Option<char>,
}

impl Segment {
    pub(crate) fn plain(cell: Cell) -> Segment {
        Segment { cell, symbol: None }
    }
}

/// Snake state.
///
/// The segments are stored tail first, so the head is always the last
/// element.  The snake never checks its own consistency: whoever moves it is
/// expected to ask [`Actor::collides()`] before calling [`Actor::grow_head()`]
/// or [`Actor::advance_head()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Actor {
    segments: VecDeque<Segment>,
}

impl Actor {
    /// Create a one-segment snake at `cell`
    pub(crate) fn new(cell: Cell) -> Actor {
        Actor {
            segments: VecDeque::from([Segment::plain(cell)]),
        }
    }

    /// Return the segment at the front of the snake
    pub(crate) fn head(&self) -> Segment {
        *self
            .segments
            .back()
            .expect("snake should always have at least one segment")
    }

    /// Compute where the head would go after one step in `direction`, without
    /// moving
    pub(crate) fn propose_head(&self, direction: Direction, grid: Grid) -> Cell {
        grid.wrap(self.head().cell.offset(direction.offset()))
    }

    /// Is any segment of the snake on `cell`?
    pub(crate) fn collides(&self, cell: Cell) -> bool {
        self.cells().any(|c| c == cell)
    }

    /// Add a new head without dropping the tail
    pub(crate) fn grow_head(&mut self, cell: Cell, symbol: Option<char>) {
        self.segments.push_back(Segment { cell, symbol });
    }

    /// Move forwards: add a plain head and drop the tail
    pub(crate) fn advance_head(&mut self, cell: Cell) {
        self.segments.push_back(Segment::plain(cell));
        let _ = self.segments.pop_front();
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterate over the segments from tail to head
    pub(crate) fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter()
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().map(|s| s.cell)
    }
}

#[cfg(test)]
impl Actor {
    /// Create a snake from explicit segments, tail first.  Returns `None` if
    /// `segments` is empty.
    pub(crate) fn from_segments<I: IntoIterator<Item = Segment>>(segments: I) -> Option<Actor> {
        let segments = segments.into_iter().collect::<VecDeque<_>>();
        (!segments.is_empty()).then_some(Actor { segments })
    }

    /// The letters carried by the body, from the tail end forwards
    pub(crate) fn collected_symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.segments.iter().filter_map(|s| s.symbol)
    }
}
