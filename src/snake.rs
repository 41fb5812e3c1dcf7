use crate::grid::{Cell, Grid, Position};
use crate::input::{direction_change_is_valid, Direction};

/// Length every new snake starts with.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Columns between the seeded head and tail.
const SEED_TAIL_OFFSET: i32 = INITIAL_SNAKE_LENGTH as i32 - 1;

/// Head/tail-only snake state.
///
/// The body is never stored here. It is recovered from the grid by following
/// the `Cell::SnakeBody` direction tags from the tail towards the head.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SnakeModel {
    head: Position,
    tail: Position,
    length: usize,
    direction: Direction,
    pending_direction: Direction,
}

impl SnakeModel {
    /// Seeds a horizontal snake of `INITIAL_SNAKE_LENGTH` cells with its head
    /// at `head`, extending leftwards, and writes it into `grid`.
    ///
    /// The whole snake must fit inside the border ring.
    pub fn seed(grid: &mut Grid, head: Position) -> Self {
        let tail = Position::new(head.x - SEED_TAIL_OFFSET, head.y);
        debug_assert!(
            tail.x >= 1 && head.x < grid.width() - 1 && head.y >= 1 && head.y < grid.height() - 1,
            "seeded snake overlaps the border"
        );

        grid.set(head, Cell::SnakeHead);
        for x in (tail.x + 1)..head.x {
            grid.set(Position::new(x, head.y), Cell::SnakeBody(Direction::Right));
        }
        grid.set(tail, Cell::SnakeTail);

        Self {
            head,
            tail,
            length: INITIAL_SNAKE_LENGTH,
            direction: Direction::Right,
            pending_direction: Direction::Right,
        }
    }

    /// Builds a snake from an already tagged grid path.
    ///
    /// The caller is responsible for the grid holding a valid path between
    /// `head` and `tail` of exactly `length` cells.
    #[must_use]
    pub fn from_parts(head: Position, tail: Position, length: usize, direction: Direction) -> Self {
        Self {
            head,
            tail,
            length,
            direction,
            pending_direction: direction,
        }
    }

    /// Buffers `direction` for the next tick, rejecting reversals of the
    /// current direction. Later valid calls overwrite earlier ones.
    ///
    /// Returns whether the direction was accepted.
    pub fn buffer_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.pending_direction = direction;
        true
    }

    /// Makes the buffered direction live. Called once at the start of a tick.
    pub fn commit_direction(&mut self) -> Direction {
        self.direction = self.pending_direction;
        self.direction
    }

    /// Returns the head position for the next movement with the current direction.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head.step(self.direction)
    }

    /// Moves the head marker to `new_head`, leaving a body tag behind.
    pub fn advance_head(&mut self, grid: &mut Grid, new_head: Position) {
        grid.set(self.head, Cell::SnakeBody(self.direction));
        grid.set(new_head, Cell::SnakeHead);
        self.head = new_head;
    }

    /// Moves the tail marker one cell towards the head and empties the old tail cell.
    pub fn advance_tail(&mut self, grid: &mut Grid) {
        let next = tail_successor(grid, self.tail)
            .expect("snake path invariant broken: tail has no successor segment");

        grid.set(self.tail, Cell::Empty);
        grid.set(next, Cell::SnakeTail);
        self.tail = next;
    }

    /// Records one cell of growth. The tail stays put on this tick.
    pub fn grow(&mut self) {
        self.length += 1;
    }

    #[must_use]
    pub fn head(&self) -> Position {
        self.head
    }

    #[must_use]
    pub fn tail(&self) -> Position {
        self.tail
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the current movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the direction that becomes live on the next tick.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Walks the body from tail to head through the grid tags.
    ///
    /// Stops early if the path is broken, so a corrupted grid yields fewer
    /// than `len()` positions rather than looping.
    #[must_use]
    pub fn segments(&self, grid: &Grid) -> Vec<Position> {
        let mut path = Vec::with_capacity(self.length);
        let mut current = self.tail;
        path.push(current);

        while current != self.head && path.len() <= self.length {
            let Some(next) = successor(grid, current) else {
                break;
            };
            path.push(next);
            current = next;
        }

        path
    }
}

/// Finds the segment following the tail on the way to the head.
///
/// The tail carries no direction, so the successor is the adjacent head or
/// body cell that no other body cell points into. A neighbour that another
/// segment already feeds is a later part of a coiled body, not the successor.
#[must_use]
pub fn tail_successor(grid: &Grid, tail: Position) -> Option<Position> {
    let mut candidates = tail
        .neighbours()
        .into_iter()
        .filter(|neighbour| {
            matches!(grid.get(*neighbour), Cell::SnakeBody(_) | Cell::SnakeHead)
        });

    let first = candidates.next()?;
    let Some(second) = candidates.next() else {
        return Some(first);
    };

    std::iter::once(first)
        .chain(std::iter::once(second))
        .chain(candidates)
        .find(|candidate| !has_body_predecessor(grid, *candidate, tail))
}

fn has_body_predecessor(grid: &Grid, position: Position, tail: Position) -> bool {
    position.neighbours().into_iter().any(|neighbour| {
        if neighbour == tail {
            return false;
        }

        match grid.get(neighbour) {
            Cell::SnakeBody(direction) => neighbour.step(direction) == position,
            _ => false,
        }
    })
}

fn successor(grid: &Grid, position: Position) -> Option<Position> {
    match grid.get(position) {
        Cell::SnakeTail => tail_successor(grid, position),
        Cell::SnakeBody(direction) => Some(position.step(direction)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::grid::{Cell, Grid, Position};
    use crate::input::Direction;

    use super::{tail_successor, SnakeModel, INITIAL_SNAKE_LENGTH};

    fn grid(width: u16, height: u16) -> Grid {
        Grid::new(GridSize { width, height })
    }

    #[test]
    fn seed_writes_head_body_and_tail_leftwards() {
        let mut grid = grid(10, 10);
        let snake = SnakeModel::seed(&mut grid, Position::new(5, 5));

        assert_eq!(snake.len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(snake.tail(), Position::new(3, 5));
        assert_eq!(grid.get(Position::new(5, 5)), Cell::SnakeHead);
        assert_eq!(
            grid.get(Position::new(4, 5)),
            Cell::SnakeBody(Direction::Right)
        );
        assert_eq!(grid.get(Position::new(3, 5)), Cell::SnakeTail);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_direction(), Direction::Right);
    }

    #[test]
    fn direction_buffer_rejects_reverse() {
        let mut grid = grid(10, 10);
        let mut snake = SnakeModel::seed(&mut grid, Position::new(5, 5));

        assert!(!snake.buffer_direction(Direction::Left));
        assert_eq!(snake.pending_direction(), Direction::Right);
    }

    #[test]
    fn direction_buffer_keeps_last_valid_input() {
        let mut grid = grid(10, 10);
        let mut snake = SnakeModel::seed(&mut grid, Position::new(5, 5));

        assert!(snake.buffer_direction(Direction::Up));
        assert!(snake.buffer_direction(Direction::Down));
        assert!(!snake.buffer_direction(Direction::Left));

        assert_eq!(snake.commit_direction(), Direction::Down);
    }

    #[test]
    fn reversal_is_judged_against_live_direction_not_buffered_one() {
        let mut grid = grid(10, 10);
        let mut snake = SnakeModel::seed(&mut grid, Position::new(5, 5));

        // Up is buffered but not live, so Down is still a legal follow-up.
        snake.buffer_direction(Direction::Up);
        assert!(snake.buffer_direction(Direction::Down));

        snake.commit_direction();
        assert!(!snake.buffer_direction(Direction::Up));
    }

    #[test]
    fn segments_walk_tail_to_head() {
        let mut grid = grid(10, 10);
        let snake = SnakeModel::seed(&mut grid, Position::new(5, 5));

        assert_eq!(
            snake.segments(&grid),
            vec![
                Position::new(3, 5),
                Position::new(4, 5),
                Position::new(5, 5)
            ]
        );
    }

    #[test]
    fn tail_successor_skips_coiled_neighbour() {
        // Tail at (2,2); real path runs down then right then up then left:
        //   (2,2)T -> (2,3) -> (3,3) -> (3,2) -> (3,1)H
        // (3,2) neighbours the tail but is fed by (3,3), so it is not next.
        let mut grid = grid(6, 6);
        grid.set(Position::new(2, 2), Cell::SnakeTail);
        grid.set(Position::new(2, 3), Cell::SnakeBody(Direction::Right));
        grid.set(Position::new(3, 3), Cell::SnakeBody(Direction::Up));
        grid.set(Position::new(3, 2), Cell::SnakeBody(Direction::Up));
        grid.set(Position::new(3, 1), Cell::SnakeHead);

        assert_eq!(
            tail_successor(&grid, Position::new(2, 2)),
            Some(Position::new(2, 3))
        );
    }

    #[test]
    fn advance_tail_empties_old_tail() {
        let mut grid = grid(10, 10);
        let mut snake = SnakeModel::seed(&mut grid, Position::new(5, 5));

        snake.advance_tail(&mut grid);

        assert_eq!(grid.get(Position::new(3, 5)), Cell::Empty);
        assert_eq!(grid.get(Position::new(4, 5)), Cell::SnakeTail);
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn tail_successor_is_none_without_body() {
        let mut grid = grid(4, 4);
        grid.set(Position::new(2, 2), Cell::SnakeTail);

        assert_eq!(tail_successor(&grid, Position::new(2, 2)), None);
    }
}
