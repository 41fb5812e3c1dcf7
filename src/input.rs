use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` offset of one step, with y growing downwards.
    #[must_use]
    pub fn unit_vector(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
    Confirm,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Non-blocking source of player input.
pub trait InputSource {
    /// Returns the next pending input, or `None` when nothing is waiting.
    fn poll(&mut self) -> io::Result<Option<GameInput>>;
}

/// Keyboard input read from the crossterm event queue.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Blocks until a key maps to `Confirm` or `Quit` and returns it.
    pub fn wait_for_start(&mut self) -> io::Result<GameInput> {
        loop {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    Some(input @ (GameInput::Confirm | GameInput::Quit)) => return Ok(input),
                    _ => continue,
                }
            }
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> io::Result<Option<GameInput>> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    return Ok(Some(input));
                }
            }
        }

        Ok(None)
    }
}

/// Maps a terminal key press to a game input.
///
/// Arrows and WASD steer, P pauses, R restarts, Enter/Space confirm, and
/// Q, Esc or Ctrl+C quit. Key releases and repeats are ignored.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char('p' | 'P') => Some(GameInput::Pause),
        KeyCode::Char('r' | 'R') => Some(GameInput::Restart),
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameInput::Confirm),
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(GameInput::Quit),
        _ => None,
    }
}
