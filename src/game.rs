use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, trace};

use crate::config::{
    GameConfig, GridSize, MIN_SPEED_MS, POINTS_PER_FOOD, POINTS_PER_SPEED_UP, SPEED_STEP_MS,
};
use crate::food::{self, Spawn};
use crate::grid::{Cell, Grid, Position};
use crate::input::GameInput;
use crate::renderer::GameView;
use crate::snake::SnakeModel;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    Paused,
    Over,
}

/// What happened during one simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepResult {
    Continue,
    Ate,
    Collided,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    /// The head tried to enter `at`, which held `cell`.
    Collided { at: Position, cell: Cell },
    /// No empty cell was left for food.
    BoardFull,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pub snake: SnakeModel,
    pub food: Option<Position>,
    pub score: u32,
    pub speed_ms: u64,
    pub tick_count: u64,
    pub status: GameStatus,
    outcome: Option<Outcome>,
    initial_speed_ms: u64,
    rng: StdRng,
}

impl GameState {
    /// Starts a session from resolved configuration.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config.play_area, config.speed_ms, rng)
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(play_area: GridSize, seed: u64) -> Self {
        Self::with_rng(
            play_area,
            crate::config::DEFAULT_SPEED_MS,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Builds the walled grid, seeds the snake at the centre and places food.
    ///
    /// A play area too narrow for the seeded snake is widened to
    /// `MIN_PLAY_SIDE` so the border ring stays all `Wall`.
    #[must_use]
    pub fn with_rng(play_area: GridSize, speed_ms: u64, rng: StdRng) -> Self {
        let play_area = play_area.fit_for_seed();
        let mut grid = Grid::new(play_area);
        let start = start_position(&grid);
        let snake = SnakeModel::seed(&mut grid, start);

        let mut state = Self {
            grid,
            snake,
            food: None,
            score: 0,
            speed_ms,
            tick_count: 0,
            status: GameStatus::Playing,
            outcome: None,
            initial_speed_ms: speed_ms,
            rng,
        };
        state.place_food();

        info!(
            width = play_area.width,
            height = play_area.height,
            speed_ms,
            "session started"
        );
        state
    }

    /// Throws the finished session away and starts over on the same board size.
    pub fn restart(&mut self) {
        self.grid.init();
        let start = start_position(&self.grid);
        self.snake = SnakeModel::seed(&mut self.grid, start);
        self.food = None;
        self.score = 0;
        self.speed_ms = self.initial_speed_ms;
        self.tick_count = 0;
        self.status = GameStatus::Playing;
        self.outcome = None;
        self.place_food();

        info!("session restarted");
    }

    /// Advances the simulation by one tick.
    ///
    /// Returns `None` without touching state while paused or over.
    #[instrument(level = "trace", skip_all, fields(tick = self.tick_count))]
    pub fn step(&mut self) -> Option<StepResult> {
        if self.status != GameStatus::Playing {
            return None;
        }

        self.tick_count += 1;
        let direction = self.snake.commit_direction();
        let new_head = self.snake.next_head_position();
        let target = self.grid.get(new_head);
        trace!(?direction, x = new_head.x, y = new_head.y, ?target);

        if target.is_blocking() {
            self.finish(Outcome::Collided {
                at: new_head,
                cell: target,
            });
            return Some(StepResult::Collided);
        }

        let ate = target == Cell::Food;
        if ate {
            self.snake.grow();
            self.award_food();
        } else {
            self.snake.advance_tail(&mut self.grid);
        }
        self.snake.advance_head(&mut self.grid, new_head);

        debug_assert!(self.path_is_intact(), "snake path corrupted");

        if ate {
            self.food = None;
            self.place_food();
            return Some(StepResult::Ate);
        }

        Some(StepResult::Continue)
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Playing {
                    self.snake.buffer_direction(direction);
                }
            }
            GameInput::Pause => {
                self.status = match self.status {
                    GameStatus::Playing => GameStatus::Paused,
                    GameStatus::Paused => GameStatus::Playing,
                    other => other,
                };
            }
            GameInput::Restart => {
                if self.status == GameStatus::Over {
                    self.restart();
                }
            }
            GameInput::Quit | GameInput::Confirm => {}
        }
    }

    /// Returns why the session ended, or `None` while it is still running.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// Borrows a read-only snapshot for renderers.
    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        GameView {
            grid: &self.grid,
            snake: &self.snake,
            food: self.food,
            score: self.score,
            speed_ms: self.speed_ms,
            status: self.status,
            outcome: self.outcome,
        }
    }

    /// Checks that head, body and tail cells form one simple path of
    /// exactly `snake.len()` cells from tail to head.
    #[must_use]
    pub fn path_is_intact(&self) -> bool {
        let path = self.snake.segments(&self.grid);

        let endpoints_ok = path.first() == Some(&self.snake.tail())
            && path.last() == Some(&self.snake.head())
            && self.grid.get(self.snake.tail()) == Cell::SnakeTail
            && self.grid.get(self.snake.head()) == Cell::SnakeHead;
        let adjacent = path
            .windows(2)
            .all(|pair| (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs() == 1);
        let distinct = path.iter().collect::<HashSet<_>>().len() == path.len();

        endpoints_ok
            && adjacent
            && distinct
            && path.len() == self.snake.len()
            && self.grid.count(Cell::is_snake) == self.snake.len()
    }

    fn award_food(&mut self) {
        self.score += POINTS_PER_FOOD;

        if self.score % POINTS_PER_SPEED_UP == 0 && self.speed_ms > MIN_SPEED_MS {
            self.speed_ms = self.speed_ms.saturating_sub(SPEED_STEP_MS).max(MIN_SPEED_MS);
            debug!(score = self.score, speed_ms = self.speed_ms, "speed increased");
        }
    }

    fn place_food(&mut self) {
        match food::spawn(&mut self.rng, &mut self.grid) {
            Spawn::Placed(position) => self.food = Some(position),
            Spawn::Exhausted => self.finish(Outcome::BoardFull),
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.status = GameStatus::Over;
        self.outcome = Some(outcome);

        match outcome {
            Outcome::Collided { at, cell } => {
                info!(x = at.x, y = at.y, ?cell, score = self.score, "snake collided");
            }
            Outcome::BoardFull => {
                info!(score = self.score, length = self.snake.len(), "board filled");
            }
        }
    }
}

fn start_position(grid: &Grid) -> Position {
    Position::new(grid.width() / 2, grid.height() / 2)
}
