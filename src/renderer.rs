use std::io::{self, Stdout};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::{Frame, Terminal};
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::{GameStatus, Outcome};
use crate::grid::{Cell, Grid, Position};
use crate::input::Direction;
use crate::snake::SnakeModel;
use crate::ui::hud::render_hud;
use crate::ui::menu::{render_game_over_menu, render_pause_menu, render_start_menu};

/// Terminal columns used per grid cell.
pub const CELL_COLUMNS: usize = 2;

pub const GLYPH_WALL: &str = "██";
pub const GLYPH_FOOD: &str = "★";
pub const GLYPH_SNAKE_BODY: &str = "■";
pub const GLYPH_SNAKE_TAIL: &str = "□";
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";

/// Read-only snapshot of everything a renderer may show for one tick.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub grid: &'a Grid,
    pub snake: &'a SnakeModel,
    pub food: Option<Position>,
    pub score: u32,
    pub speed_ms: u64,
    pub status: GameStatus,
    pub outcome: Option<Outcome>,
}

/// Display collaborator called once per tick after the simulation step.
pub trait Renderer {
    fn render(&mut self, view: &GameView<'_>) -> io::Result<()>;
}

/// ratatui front end drawing into the alternate screen.
///
/// Owns raw mode and the alternate screen while alive. Dropping it puts the
/// shell back, so the final board summary prints on the normal screen.
pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    theme: &'static Theme,
}

impl TerminalRenderer {
    /// Switches the terminal into game mode and returns a renderer for it.
    pub fn enter(theme: &'static Theme) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal, theme }),
            Err(error) => {
                leave_game_screen();
                Err(error)
            }
        }
    }

    /// Draws the board with the start popup on top.
    pub fn render_start_screen(&mut self, view: &GameView<'_>) -> io::Result<()> {
        let theme = self.theme;
        self.terminal.draw(|frame| {
            let board = render_board_frame(frame, view, theme);
            render_start_menu(frame, board, theme);
        })?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        leave_game_screen();
    }
}

/// Leaves the game screen before the default panic report is printed.
pub fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        leave_game_screen();
        default_hook(panic_info);
    }));
}

fn leave_game_screen() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, Show, LeaveAlternateScreen);
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, view: &GameView<'_>) -> io::Result<()> {
        let theme = self.theme;
        self.terminal.draw(|frame| {
            let board = render_board_frame(frame, view, theme);

            match view.status {
                GameStatus::Paused => render_pause_menu(frame, board, theme),
                GameStatus::Over => {
                    render_game_over_menu(frame, board, view.score, view.outcome, theme);
                }
                GameStatus::Playing => {}
            }
        })?;
        Ok(())
    }
}

/// Draws HUD and board, returning the rectangle the board occupies.
fn render_board_frame(frame: &mut Frame<'_>, view: &GameView<'_>, theme: &Theme) -> Rect {
    let area = frame.area();
    let play_area = render_hud(frame, area, view, theme);
    let board = centered_board(play_area, view.grid);

    let buffer = frame.buffer_mut();
    for (row, cells) in view.grid.rows().enumerate() {
        let Ok(row) = u16::try_from(row) else {
            break;
        };
        let y = board.y.saturating_add(row);
        if y >= board.bottom() {
            break;
        }

        for (column, cell) in cells.iter().enumerate() {
            let Some(x) = u16::try_from(column * CELL_COLUMNS)
                .ok()
                .map(|offset| board.x.saturating_add(offset))
            else {
                break;
            };
            if x.saturating_add(1) >= board.right() {
                break;
            }

            let glyph = padded_glyph(*cell, view.snake.direction());
            buffer.set_string(x, y, glyph, cell_style(*cell, theme));
        }
    }

    board
}

fn centered_board(area: Rect, grid: &Grid) -> Rect {
    let wanted_width = u16::try_from(grid.width())
        .unwrap_or(u16::MAX)
        .saturating_mul(2);
    let wanted_height = u16::try_from(grid.height()).unwrap_or(u16::MAX);

    let width = wanted_width.min(area.width);
    let height = wanted_height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn cell_style(cell: Cell, theme: &Theme) -> Style {
    match cell {
        Cell::Empty => Style::new().bg(theme.play_bg),
        Cell::Food => Style::new().fg(theme.food).bg(theme.play_bg),
        Cell::Wall => Style::new().fg(theme.wall_fg).bg(theme.wall_bg),
        Cell::SnakeHead => Style::new()
            .fg(theme.snake_head)
            .bg(theme.play_bg)
            .add_modifier(Modifier::BOLD),
        Cell::SnakeBody(_) => Style::new().fg(theme.snake_body).bg(theme.play_bg),
        Cell::SnakeTail => Style::new().fg(theme.snake_tail).bg(theme.play_bg),
    }
}

/// Returns the glyph for one cell before padding.
#[must_use]
pub fn cell_glyph(cell: Cell, heading: Direction) -> &'static str {
    match cell {
        Cell::Empty => " ",
        Cell::Food => GLYPH_FOOD,
        Cell::Wall => GLYPH_WALL,
        Cell::SnakeHead => head_glyph(heading),
        Cell::SnakeBody(_) => GLYPH_SNAKE_BODY,
        Cell::SnakeTail => GLYPH_SNAKE_TAIL,
    }
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Pads a cell glyph with trailing spaces to exactly `CELL_COLUMNS` columns.
#[must_use]
pub fn padded_glyph(cell: Cell, heading: Direction) -> String {
    let glyph = cell_glyph(cell, heading);
    let pad = CELL_COLUMNS.saturating_sub(glyph.width());
    format!("{glyph}{}", " ".repeat(pad))
}

/// Renders the board as plain text, one string per grid row.
#[must_use]
pub fn render_text(view: &GameView<'_>) -> Vec<String> {
    let heading = view.snake.direction();
    view.grid
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| padded_glyph(*cell, heading))
                .collect::<String>()
        })
        .collect()
}
