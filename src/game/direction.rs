use crate::consts;
use serde::Deserialize;
use thiserror::Error;

/// One of the four unit steps the snake can take.  `Up` decreases `y`, as on
/// screen.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub(crate) fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Interpret a step vector as a direction.  Only the four unit vectors are
    /// accepted.
    pub(crate) fn from_vector(dx: i32, dy: i32) -> Result<Direction, InvalidDirection> {
        match (dx, dy) {
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            _ => Err(InvalidDirection { dx, dy }),
        }
    }

    /// Return the glyph to use for drawing a snake head facing this way
    pub(crate) fn head_symbol(self) -> char {
        match self {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("({dx}, {dy}) is not one of the four unit directions")]
pub(crate) struct InvalidDirection {
    dx: i32,
    dy: i32,
}
