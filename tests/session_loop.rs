use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use console_snake::config::GridSize;
use console_snake::game::{GameState, GameStatus};
use console_snake::grid::Cell;
use console_snake::input::{Direction, GameInput, InputSource};
use console_snake::renderer::{render_text, GameView, Renderer};
use console_snake::runtime::{run_session, Clock, SessionEnd};

/// Hands out one batch of inputs per tick.
struct TickScript {
    ticks: VecDeque<Vec<GameInput>>,
    current: VecDeque<GameInput>,
}

impl TickScript {
    fn new(ticks: Vec<Vec<GameInput>>) -> Self {
        Self {
            ticks: ticks.into(),
            current: VecDeque::new(),
        }
    }
}

impl InputSource for TickScript {
    fn poll(&mut self) -> io::Result<Option<GameInput>> {
        if let Some(input) = self.current.pop_front() {
            return Ok(Some(input));
        }

        // An empty poll ends the tick; load the next batch for the following one.
        if let Some(next) = self.ticks.pop_front() {
            self.current = next.into();
        }
        Ok(None)
    }
}

#[derive(Default)]
struct TextFrames(Vec<Vec<String>>);

impl Renderer for TextFrames {
    fn render(&mut self, view: &GameView<'_>) -> io::Result<()> {
        self.0.push(render_text(view));
        Ok(())
    }
}

#[derive(Default)]
struct TotalSleep(Duration);

impl Clock for TotalSleep {
    fn sleep(&mut self, duration: Duration) {
        self.0 += duration;
    }
}

fn empty_board(width: u16, height: u16, seed: u64) -> GameState {
    let mut state = GameState::new_with_seed(GridSize { width, height }, seed);
    if let Some(food) = state.food.take() {
        state.grid.set(food, Cell::Empty);
    }
    state
}

#[test]
fn steering_into_the_top_wall_ends_the_session() {
    let mut state = empty_board(10, 10, 21);
    // Head starts at (6, 6). The first tick has no input yet, so the snake
    // moves right once, then climbs from row 6 into the wall at row 0.
    let mut input = TickScript::new(vec![vec![GameInput::Direction(Direction::Up)]]);
    let mut frames = TextFrames::default();
    let mut clock = TotalSleep::default();

    let end = run_session(&mut state, &mut input, &mut frames, &mut clock)
        .expect("scripted session should not fail");

    assert_eq!(end, SessionEnd::Over);
    assert_eq!(state.status, GameStatus::Over);
    assert_eq!(state.tick_count, 7);
    assert_eq!(frames.0.len(), 7);
    assert_eq!(clock.0, Duration::from_millis(120 * 6));
    assert!(frames.0[5][1].contains('▲'));
}

#[test]
fn pausing_keeps_rendering_without_moving() {
    let mut state = empty_board(10, 10, 22);
    let mut input = TickScript::new(vec![
        vec![GameInput::Pause],
        vec![],
        vec![],
        vec![GameInput::Quit],
    ]);
    let mut frames = TextFrames::default();

    let end = run_session(&mut state, &mut input, &mut frames, &mut TotalSleep::default())
        .expect("scripted session should not fail");

    assert_eq!(end, SessionEnd::Quit);
    assert_eq!(state.status, GameStatus::Paused);
    assert_eq!(state.tick_count, 1);
    assert!(frames.0.windows(2).skip(1).all(|pair| pair[0] == pair[1]));
}
