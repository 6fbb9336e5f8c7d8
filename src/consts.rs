//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::num::NonZeroU32;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// The largest board that fits in [`DISPLAY_SIZE`] along with its border,
/// the status bar, and the message line
pub(crate) const MAX_GRID_SIZE: Size = Size {
    width: DISPLAY_SIZE.width - 2,
    height: DISPLAY_SIZE.height - 4,
};

/// Default board width in cells
pub(crate) const DEFAULT_COLS: u16 = 20;

/// Default board height in cells
pub(crate) const DEFAULT_ROWS: u16 = 20;

/// The letters to collect, in order, when the configuration doesn't say
pub(crate) const DEFAULT_SEQUENCE: &str = "AYOUB-DERRECHE";

/// Ticks per second at the start of a game
pub(crate) const BASE_SPEED: NonZeroU32 = match NonZeroU32::new(8) {
    Some(n) => n,
    None => panic!("BASE_SPEED should be nonzero"),
};

/// The speed increases by one tick per second for every this many segments
pub(crate) const LENGTH_DIVISOR: NonZeroU32 = match NonZeroU32::new(3) {
    Some(n) => n,
    None => panic!("LENGTH_DIVISOR should be nonzero"),
};

/// How many random cells to try when placing a target before falling back
/// to scanning the board for free cells
pub(crate) const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '>';

/// Glyph for body segments that don't carry a letter
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the bonus target, and for the bonus stage in the status bar
pub(crate) const BONUS_SYMBOL: char = '★';

/// Glyph for the snake's head when it's collided with itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for the letter target
pub(crate) const TARGET_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for the bonus target
pub(crate) const BONUS_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the status bar at the top of the game screen
pub(crate) const STATUS_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
