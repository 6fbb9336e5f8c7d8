mod actor;
mod clock;
mod direction;
mod grid;
mod paused;
mod placement;
mod sequence;
mod session;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::Grid;
pub(crate) use self::session::Rules;
use self::clock::TickClock;
use self::grid::Cell;
use self::paused::{PauseOpt, Paused};
use self::placement::PlacementError;
use self::sequence::Requirement;
use self::session::{Outcome, Session, TargetKind};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::util::{center_rect, get_display_area};
use anyhow::Context;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use std::time::Instant;

/// The game screen: a [`Session`] plus the clock that drives it, the pause
/// menu, and the terminal front end
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::StdRng> {
    session: Session<R>,
    clock: TickClock,
    paused: Option<Paused>,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(grid: Grid, rules: Rules, rng: R) -> Result<Game<R>, PlacementError> {
        Ok(Game {
            session: Session::new(grid, rules, rng)?,
            clock: TickClock::new(Instant::now()),
            paused: None,
        })
    }

    /// Wait for either the next tick or the next input event, whichever comes
    /// first, and handle it
    pub(crate) fn process_input(&mut self) -> anyhow::Result<Option<Screen>> {
        if self.ticking() {
            let speed = self.session.speed();
            let wait = self.clock.until_due(Instant::now(), speed);
            if wait.is_zero() || !poll(wait)? {
                if self.clock.poll(Instant::now(), speed) {
                    self.tick()?;
                }
                Ok(None)
            } else {
                self.handle_event(read()?)
            }
        } else {
            self.handle_event(read()?)
        }
    }

    fn tick(&mut self) -> anyhow::Result<()> {
        self.session
            .tick()
            .inspect_err(|e| log::error!("Game cannot continue: {e}"))
            .context("failed to place the next target")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> anyhow::Result<Option<Screen>> {
        if let Some(ref mut paused) = self.paused {
            match paused.handle_event(event) {
                Some(PauseOpt::Resume) => self.resume(),
                Some(PauseOpt::Restart) => self.restart()?,
                Some(PauseOpt::Quit) => return Ok(Some(Screen::Quit)),
                None => (),
            }
            return Ok(None);
        }
        if self.session.running() && event == Event::FocusLost {
            self.pause();
            return Ok(None);
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return Ok(None);
        };
        if self.session.running() {
            match cmd {
                Command::Quit => return Ok(Some(Screen::Quit)),
                Command::Up => self.session.request_direction(Direction::Up),
                Command::Down => self.session.request_direction(Direction::Down),
                Command::Left => self.session.request_direction(Direction::Left),
                Command::Right => self.session.request_direction(Direction::Right),
                Command::Esc => self.pause(),
                _ => (),
            }
        } else {
            match cmd {
                Command::R => self.restart()?,
                Command::Quit | Command::Q => return Ok(Some(Screen::Quit)),
                _ => (),
            }
        }
        Ok(None)
    }

    fn restart(&mut self) -> anyhow::Result<()> {
        self.session
            .reset()
            .inspect_err(|e| log::error!("Game cannot restart: {e}"))
            .context("failed to place the first target")?;
        self.resume();
        Ok(())
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn ticking(&self) -> bool {
        self.session.running() && self.paused.is_none()
    }

    fn pause(&mut self) {
        self.paused = Some(Paused::new());
    }

    fn resume(&mut self) {
        self.paused = None;
        self.clock.restart(Instant::now());
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [status_area, board_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);

        let next = match self.session.requirement() {
            Requirement::Symbol(c) => c,
            Requirement::Bonus => consts::BONUS_SYMBOL,
        };
        Line::styled(
            format!(
                " Next: {next}   Length: {}   Collected: {}",
                self.session.actor().len(),
                self.session.tracker().collected().iter().collect::<String>()
            ),
            consts::STATUS_BAR_STYLE,
        )
        .render(status_area, buf);

        let grid = self.session.grid();
        let mut block_size = grid.size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(board_area, block_size);
        DottedBorder.render(block_area, buf);

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            grid,
            buf,
        };
        let target = self.session.target();
        match target.kind {
            TargetKind::Symbol(c) => board.draw_cell(target.cell, c, consts::TARGET_STYLE),
            TargetKind::Bonus => {
                board.draw_cell(target.cell, consts::BONUS_SYMBOL, consts::BONUS_STYLE);
            }
        }
        let actor = self.session.actor();
        for seg in actor.segments().take(actor.len().saturating_sub(1)) {
            board.draw_cell(
                seg.cell,
                seg.symbol.unwrap_or(consts::SNAKE_BODY_SYMBOL),
                consts::SNAKE_STYLE,
            );
        }
        let head = actor.head();
        if self.session.outcome() == Some(Outcome::Lost) {
            board.draw_cell(head.cell, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        } else {
            board.draw_cell(
                head.cell,
                head.symbol
                    .unwrap_or_else(|| self.session.direction().head_symbol()),
                consts::SNAKE_HEAD_STYLE,
            );
        }

        if let Some(paused) = self.paused {
            let pause_area = center_rect(
                display,
                Size {
                    width: Paused::WIDTH,
                    height: Paused::HEIGHT,
                },
            );
            paused.render(pause_area, buf);
        }

        let message = match self.session.outcome() {
            None => return,
            Some(Outcome::Won) => " You win! ★ All letters collected.",
            Some(Outcome::Lost) => " Game over! You collided with yourself.",
        };
        Line::from_iter([
            Span::raw(message),
            Span::raw("  Restart ("),
            Span::styled("r", consts::KEY_STYLE),
            Span::raw(") — Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(msg_area, buf);
    }
}

/// Draws board cells into the part of a buffer inside the board's border
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    grid: Grid,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let Some(pos) = self.grid.position(cell) else {
            return;
        };
        if let Some(c) = cell_at(self.area, pos, self.buf) {
            c.set_char(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }
}

/// Return the buffer cell at `pos` relative to the top-left of `area`
fn cell_at(area: Rect, pos: Position, buf: &mut Buffer) -> Option<&mut ratatui::buffer::Cell> {
    let x = area.x.checked_add(pos.x)?;
    let y = area.y.checked_add(pos.y)?;
    buf.cell_mut((x, y))
}

/// A border made of dots, to show that the board wraps around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut draw_char = |pos: Position, symbol: char| {
            if let Some(c) = cell_at(area, pos, buf) {
                c.set_char(symbol);
            }
        };
        draw_char(Position::ORIGIN, '·');
        draw_char(Position::new(max_x, 0), '·');
        draw_char(Position::new(max_x, max_y), '·');
        draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            draw_char(Position::new(x, 0), '⋯');
            draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            draw_char(Position::new(0, y), '⋮');
            draw_char(Position::new(max_x, y), '⋮');
        }
    }
}
