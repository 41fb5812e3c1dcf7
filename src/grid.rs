use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in cell coordinates, `(0, 0)` is the top-left wall corner.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one cell towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.unit_vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the four orthogonal neighbours in left, right, up, down order.
    #[must_use]
    pub fn neighbours(self) -> [Self; 4] {
        [
            self.step(Direction::Left),
            self.step(Direction::Right),
            self.step(Direction::Up),
            self.step(Direction::Down),
        ]
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }
}

/// Semantic state of one grid cell.
///
/// `SnakeBody` carries the direction the segment moves towards, which always
/// points at the next segment closer to the head.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cell {
    Empty,
    Food,
    Wall,
    SnakeHead,
    SnakeTail,
    SnakeBody(Direction),
}

impl Cell {
    /// Returns true for head, body and tail cells.
    #[must_use]
    pub fn is_snake(self) -> bool {
        matches!(self, Self::SnakeHead | Self::SnakeTail | Self::SnakeBody(_))
    }

    /// Returns true for cells the head may not move onto.
    ///
    /// The tail blocks as well, even though it would be vacated this tick.
    #[must_use]
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Wall | Self::SnakeTail | Self::SnakeBody(_))
    }
}

/// Bordered play field. The outermost ring is always `Cell::Wall`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a walled grid around a `play_area` of empty cells.
    #[must_use]
    pub fn new(play_area: GridSize) -> Self {
        let size = GridSize {
            width: play_area.width.saturating_add(2),
            height: play_area.height.saturating_add(2),
        };
        let mut grid = Self {
            size,
            cells: vec![Cell::Empty; size.total_cells()],
        };
        grid.init();
        grid
    }

    /// Clears the interior and rewrites the four border lines as walls.
    pub fn init(&mut self) {
        let width = i32::from(self.size.width);
        let height = i32::from(self.size.height);

        for y in 0..height {
            for x in 0..width {
                let border = x == 0 || y == 0 || x == width - 1 || y == height - 1;
                let cell = if border { Cell::Wall } else { Cell::Empty };
                self.set(Position { x, y }, cell);
            }
        }
    }

    /// Full grid dimensions, border included.
    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        i32::from(self.size.width)
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        i32::from(self.size.height)
    }

    /// Returns the cell at `position`, or `Cell::Wall` outside the grid.
    #[must_use]
    pub fn get(&self, position: Position) -> Cell {
        self.index(position)
            .map_or(Cell::Wall, |index| self.cells[index])
    }

    /// Overwrites the cell at `position`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, position: Position, cell: Cell) {
        if let Some(index) = self.index(position) {
            self.cells[index] = cell;
        }
    }

    /// Counts cells matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(Cell) -> bool) -> usize {
        self.cells.iter().filter(|cell| predicate(**cell)).count()
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(usize::from(self.size.width.max(1)))
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !position.is_within_bounds(self.size) {
            return None;
        }

        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some(y * usize::from(self.size.width) + x)
    }
}
