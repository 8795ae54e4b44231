use serde::{Deserialize, Serialize};

use crate::PlacementError;

use super::{material::Material, shape::ShapeKind};

/// A single cell of the game grid: empty, or filled with a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Cell {
    /// No material baked in.
    #[default]
    Empty,
    /// Occupied by a placed piece of the given material.
    Filled(Material),
}

impl Cell {
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Returns the material occupying this cell, if any.
    #[must_use]
    pub const fn material(self) -> Option<Material> {
        match self {
            Cell::Empty => None,
            Cell::Filled(material) => Some(material),
        }
    }
}

/// Absolute grid coordinate.
///
/// `(0, 0)` is the top-left corner; rows grow downward, columns rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Row and column indices that are fully occupied in a grid snapshot.
///
/// Both axes are evaluated independently against the same snapshot: a cell
/// that completes its row and its column at once contributes to both lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedLines {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

impl CompletedLines {
    /// Total number of completed lines, rows and columns combined.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }
}

/// Square grid of [`Cell`] values.
///
/// The side length is fixed at construction; only cell contents change
/// afterwards. Placement validation never mutates; writes happen through
/// [`Grid::fill`] and the line-clear operations.
///
/// # Example
///
/// ```
/// use metalblast_engine::{Grid, ShapeKind};
///
/// let grid = Grid::new(9);
/// assert!(grid.is_valid_placement(ShapeKind::Square, 0, 0));
/// assert!(!grid.is_valid_placement(ShapeKind::Square, 8, 8));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-empty grid with the given side length.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be positive");
        Self {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Side length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    const fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Returns the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.size && col < self.size, "cell out of bounds");
        self.cells[self.index(row, col)]
    }

    /// Returns an iterator over the grid's rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Writes `material` into the cell at `position`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of bounds.
    pub fn fill(&mut self, position: Position, material: Material) {
        assert!(
            position.row < self.size && position.col < self.size,
            "fill out of bounds",
        );
        let index = self.index(position.row, position.col);
        self.cells[index] = Cell::Filled(material);
    }

    /// Checks whether `shape` fits with its origin at `(row, col)`.
    ///
    /// Every occupied shape cell must land in-bounds on an empty grid cell.
    /// The first violation is returned; a single bad cell invalidates the
    /// whole placement.
    pub fn validate_placement(
        &self,
        shape: ShapeKind,
        row: usize,
        col: usize,
    ) -> Result<(), PlacementError> {
        for (dr, dc) in shape.occupied_offsets() {
            let (r, c) = (row + dr, col + dc);
            if r >= self.size || c >= self.size {
                return Err(PlacementError::OutOfBounds { row: r, col: c });
            }
            if !self.cell(r, c).is_empty() {
                return Err(PlacementError::Occupied { row: r, col: c });
            }
        }
        Ok(())
    }

    /// Boolean form of [`Grid::validate_placement`].
    #[must_use]
    pub fn is_valid_placement(&self, shape: ShapeKind, row: usize, col: usize) -> bool {
        self.validate_placement(shape, row, col).is_ok()
    }

    /// Returns true if `shape` fits somewhere on the grid.
    #[must_use]
    pub fn fits_anywhere(&self, shape: ShapeKind) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_valid_placement(shape, row, col) {
                    return true;
                }
            }
        }
        false
    }

    /// Scans the current snapshot for fully occupied rows and columns.
    ///
    /// Read-only; the caller decides what to clear.
    #[must_use]
    pub fn completed_lines(&self) -> CompletedLines {
        let mut lines = CompletedLines::default();
        for row in 0..self.size {
            if (0..self.size).all(|col| !self.cell(row, col).is_empty()) {
                lines.rows.push(row);
            }
        }
        for col in 0..self.size {
            if (0..self.size).all(|row| !self.cell(row, col).is_empty()) {
                lines.cols.push(col);
            }
        }
        lines
    }

    /// Resets every cell in `row` to empty. Idempotent per cell.
    pub fn clear_row(&mut self, row: usize) {
        for col in 0..self.size {
            let index = self.index(row, col);
            self.cells[index] = Cell::Empty;
        }
    }

    /// Resets every cell in `col` to empty. Idempotent per cell.
    pub fn clear_col(&mut self, col: usize) {
        for row in 0..self.size {
            let index = self.index(row, col);
            self.cells[index] = Cell::Empty;
        }
    }
}
