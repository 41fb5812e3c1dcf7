use rand::Rng;
use tracing::{debug, warn};

use crate::grid::{Cell, Grid, Position};

/// Result of trying to place food on the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Spawn {
    /// Food was written at this position.
    Placed(Position),
    /// No empty cell was found within the attempt budget; the board is full.
    Exhausted,
}

/// Number of random samples tried before giving up on `grid`.
#[must_use]
pub fn attempt_budget(grid: &Grid) -> usize {
    2 * grid.size().total_cells()
}

/// Places food on a uniformly random empty cell.
///
/// Samples cover the whole grid, border included; walls and snake cells are
/// simply rejected. After `attempt_budget` misses the remaining empty cells
/// are collected and one is picked directly, so `Exhausted` means the board
/// really is full.
pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: &mut Grid) -> Spawn {
    let width = grid.width();
    let height = grid.height();
    if width <= 0 || height <= 0 {
        return Spawn::Exhausted;
    }

    let budget = attempt_budget(grid);
    for _ in 0..budget {
        let position = Position::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if grid.get(position) == Cell::Empty {
            grid.set(position, Cell::Food);
            debug!(x = position.x, y = position.y, "food spawned");
            return Spawn::Placed(position);
        }
    }

    let empty: Vec<Position> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Position::new(x, y)))
        .filter(|position| grid.get(*position) == Cell::Empty)
        .collect();
    if empty.is_empty() {
        warn!(attempts = budget, "no empty cell left for food");
        return Spawn::Exhausted;
    }

    let position = empty[rng.gen_range(0..empty.len())];
    grid.set(position, Cell::Food);
    debug!(
        x = position.x,
        y = position.y,
        remaining = empty.len(),
        "food spawned after sampling budget ran out"
    );
    Spawn::Placed(position)
}
