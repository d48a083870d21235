use super::action::Direction;

/// A cell on the grid, addressed by the pixel coordinates of its top-left
/// corner. Both coordinates are multiples of the cell size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell at column `col`, row `row` of a grid with the given cell size
    pub fn at(col: i32, row: i32, cell_size: i32) -> Self {
        Self::new(col * cell_size, row * cell_size)
    }

    /// Move by a pixel delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }
}

/// The snake, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Build a snake from its cells, head first. Returns `None` when empty.
    pub fn from_cells(body: Vec<Cell>) -> Option<Self> {
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Vertical snake in `column`, head on the bottom row, body stacked
    /// upwards.
    pub fn vertical(column: i32, bottom_row: i32, length: usize, cell_size: i32) -> Self {
        let length = length.max(1);
        let body = (0..length as i32)
            .map(|i| Cell::at(column, bottom_row - i, cell_size))
            .collect();
        Self { body }
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.body
    }

    /// Check if any cell of the snake, head and tail included, is at `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Add a new head
    pub fn push_head(&mut self, head: Cell) {
        self.body.insert(0, head);
    }

    /// Drop the tail, never shrinking below one cell
    pub fn pop_tail(&mut self) -> Option<Cell> {
        if self.body.len() > 1 {
            self.body.pop()
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least a head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Ended,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::at(5, 5, 10);
        assert_eq!(cell, Cell::new(50, 50));
        assert_eq!(cell.moved_in_direction(Direction::Right, 10), Cell::new(60, 50));
        assert_eq!(cell.moved_in_direction(Direction::Left, 10), Cell::new(40, 50));
        assert_eq!(cell.moved_in_direction(Direction::Down, 10), Cell::new(50, 60));
        assert_eq!(cell.moved_in_direction(Direction::Up, 10), Cell::new(50, 40));
    }

    #[test]
    fn test_vertical_snake() {
        let snake = Snake::vertical(0, 9, 5, 10);
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.head(), Cell::new(0, 90));
        assert_eq!(snake.tail(), Cell::new(0, 50));
    }

    #[test]
    fn test_grow_and_shrink() {
        let mut snake = Snake::vertical(0, 2, 2, 10);
        snake.push_head(Cell::new(0, 30));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(0, 30));

        assert_eq!(snake.pop_tail(), Some(Cell::new(0, 10)));
        assert_eq!(snake.pop_tail(), Some(Cell::new(0, 20)));
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_occupies_includes_head_and_tail() {
        let snake = Snake::vertical(1, 4, 3, 10);
        assert!(snake.occupies(Cell::new(10, 40)));
        assert!(snake.occupies(Cell::new(10, 20)));
        assert!(!snake.occupies(Cell::new(10, 10)));
    }

    #[test]
    fn test_from_cells_rejects_empty() {
        assert!(Snake::from_cells(Vec::new()).is_none());
        assert!(Snake::from_cells(vec![Cell::new(0, 0)]).is_some());
    }
}
