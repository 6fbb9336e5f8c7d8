use super::actor::Actor;
use super::grid::{Cell, Grid};
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use thiserror::Error;

/// Choose a random cell of `grid` that `actor` does not occupy.
///
/// Cells are sampled uniformly, retrying on occupied ones.  After
/// [`MAX_PLACEMENT_ATTEMPTS`][consts::MAX_PLACEMENT_ATTEMPTS] misses, a
/// uniform choice is made among the free cells instead, so the result has
/// the same distribution either way.  Fails only if the snake fills the whole
/// board.
pub(crate) fn place_target<R: Rng>(
    rng: &mut R,
    grid: Grid,
    actor: &Actor,
) -> Result<Cell, PlacementError> {
    for _ in 0..consts::MAX_PLACEMENT_ATTEMPTS {
        let cell = Cell::new(
            rng.random_range(0..i32::from(grid.cols)),
            rng.random_range(0..i32::from(grid.rows)),
        );
        if !actor.collides(cell) {
            return Ok(cell);
        }
    }
    log::warn!(
        "No free cell found after {} random picks; scanning the board",
        consts::MAX_PLACEMENT_ATTEMPTS
    );
    grid.cells()
        .filter(|&c| !actor.collides(c))
        .choose(rng)
        .ok_or(PlacementError::GridFull {
            cols: grid.cols,
            rows: grid.rows,
        })
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum PlacementError {
    #[error("no free cell left on the {cols}×{rows} board to place a target in")]
    GridFull { cols: u16, rows: u16 },
}
