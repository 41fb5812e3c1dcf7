use std::io;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use crate::game::{GameState, StepResult};
use crate::input::{GameInput, InputSource};
use crate::renderer::Renderer;

/// Poll interval while waiting on the game-over screen.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Scheduling delay between ticks.
pub trait Clock {
    fn sleep(&mut self, duration: Duration);
}

/// Clock backed by `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadClock;

impl Clock for ThreadClock {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// How a call to `run_session` returned.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionEnd {
    /// The player asked to quit.
    Quit,
    /// The session reached its terminal state.
    Over,
}

/// Drives ticks until the game ends or the player quits.
///
/// Each tick drains pending input, steps the simulation, renders, then sleeps
/// for the current `speed_ms`. The final state is rendered before returning.
pub fn run_session<I, R, C>(
    state: &mut GameState,
    input: &mut I,
    renderer: &mut R,
    clock: &mut C,
) -> io::Result<SessionEnd>
where
    I: InputSource + ?Sized,
    R: Renderer + ?Sized,
    C: Clock + ?Sized,
{
    loop {
        while let Some(event) = input.poll()? {
            if event == GameInput::Quit {
                info!(score = state.score, ticks = state.tick_count, "player quit");
                return Ok(SessionEnd::Quit);
            }
            state.apply_input(event);
        }

        if let Some(StepResult::Ate) = state.step() {
            debug!(score = state.score, length = state.snake.len(), "food eaten");
        }

        renderer.render(&state.view())?;

        if state.is_over() {
            info!(
                score = state.score,
                length = state.snake.len(),
                outcome = ?state.outcome(),
                "session over"
            );
            return Ok(SessionEnd::Over);
        }

        clock.sleep(Duration::from_millis(state.speed_ms));
    }
}

/// Waits on the game-over screen for restart or quit.
///
/// Returns `true` once the state has been restarted, `false` on quit.
pub fn wait_for_restart<I, C>(state: &mut GameState, input: &mut I, clock: &mut C) -> io::Result<bool>
where
    I: InputSource + ?Sized,
    C: Clock + ?Sized,
{
    loop {
        match input.poll()? {
            Some(GameInput::Quit) => return Ok(false),
            Some(GameInput::Restart | GameInput::Confirm) => {
                state.restart();
                return Ok(true);
            }
            Some(_) => {}
            None => clock.sleep(IDLE_POLL_INTERVAL),
        }
    }
}
