use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::grid::Position;

/// Closed catalog of polyomino shapes.
///
/// Each variant maps to a statically defined boolean matrix where `true`
/// marks an occupied cell relative to the shape's top-left origin. Keeping
/// the catalog as an enum (rather than a keyed lookup) means a missing-shape
/// fault cannot exist: every variant has a matrix by construction.
///
/// # Example
///
/// ```
/// use metalblast_engine::ShapeKind;
///
/// assert_eq!(ShapeKind::Tee.width(), 3);
/// assert_eq!(ShapeKind::Tee.height(), 2);
/// assert_eq!(ShapeKind::Tee.cell_count(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// 1×1 block.
    Single = 0,
    /// 1×2 horizontal bar.
    Bar2H = 1,
    /// 2×1 vertical bar.
    Bar2V = 2,
    /// 2×2 square.
    Square = 3,
    /// 2×2 elbow, occupied left column.
    CornerL = 4,
    /// 2×2 elbow, occupied right column.
    CornerR = 5,
    /// 2×3 tee.
    Tee = 6,
    /// 1×3 horizontal bar.
    Bar3H = 7,
    /// 3×1 vertical bar.
    Bar3V = 8,
}

/// Boolean occupancy matrices, indexed by `ShapeKind` discriminant.
///
/// Rows are top-to-bottom, cells left-to-right. Matrices are rectangular:
/// every row of a shape has the same width.
const SHAPES: [&[&[bool]]; ShapeKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    [
        // Single
        &[&[C]],
        // Bar2H
        &[&[C, C]],
        // Bar2V
        &[&[C], &[C]],
        // Square
        &[&[C, C], &[C, C]],
        // CornerL
        &[&[C, E], &[C, C]],
        // CornerR
        &[&[E, C], &[C, C]],
        // Tee
        &[&[C, C, C], &[E, C, E]],
        // Bar3H
        &[&[C, C, C]],
        // Bar3V
        &[&[C], &[C], &[C]],
    ]
};

impl ShapeKind {
    /// Number of shapes in the catalog (9).
    pub const LEN: usize = 9;

    /// Largest number of occupied cells any catalog shape has.
    pub const MAX_CELLS: usize = 4;

    /// Every shape in the catalog, in discriminant order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::Single,
        ShapeKind::Bar2H,
        ShapeKind::Bar2V,
        ShapeKind::Square,
        ShapeKind::CornerL,
        ShapeKind::CornerR,
        ShapeKind::Tee,
        ShapeKind::Bar3H,
        ShapeKind::Bar3V,
    ];

    /// Returns the shapes eligible for generation at the given level.
    ///
    /// The set is monotonically non-decreasing in level: the simple pieces at
    /// level 1, the square at level 2, the elbows at level 3, and the full
    /// catalog from level 4 on. It saturates rather than cycling.
    #[must_use]
    pub const fn available_at(level: usize) -> &'static [ShapeKind] {
        match level {
            0 | 1 => &[ShapeKind::Single, ShapeKind::Bar2H, ShapeKind::Bar2V],
            2 => &[
                ShapeKind::Single,
                ShapeKind::Bar2H,
                ShapeKind::Bar2V,
                ShapeKind::Square,
            ],
            3 => &[
                ShapeKind::Single,
                ShapeKind::Bar2H,
                ShapeKind::Bar2V,
                ShapeKind::Square,
                ShapeKind::CornerL,
                ShapeKind::CornerR,
            ],
            _ => &Self::ALL,
        }
    }

    /// Returns this shape's occupancy matrix.
    #[must_use]
    pub const fn matrix(self) -> &'static [&'static [bool]] {
        SHAPES[self as usize]
    }

    /// Height of the shape's bounding box (number of matrix rows).
    #[must_use]
    pub const fn height(self) -> usize {
        self.matrix().len()
    }

    /// Width of the shape's bounding box (number of matrix columns).
    #[must_use]
    pub const fn width(self) -> usize {
        self.matrix()[0].len()
    }

    /// Returns an iterator of `(row, col)` offsets of the occupied cells,
    /// in row-major order.
    pub fn occupied_offsets(self) -> impl Iterator<Item = (usize, usize)> {
        self.matrix().iter().enumerate().flat_map(|(dr, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dc, &occupied)| occupied.then_some((dr, dc)))
        })
    }

    /// Number of occupied cells in the shape.
    #[must_use]
    pub fn cell_count(self) -> usize {
        self.occupied_offsets().count()
    }

    /// Projects the shape's occupied cells onto absolute grid coordinates
    /// with the origin at `(row, col)`, in row-major order.
    ///
    /// This is the projection used both to materialize a placement and to
    /// compute hover highlighting; it performs no bounds checking — that is
    /// the validator's job.
    #[must_use]
    pub fn project(self, row: usize, col: usize) -> ArrayVec<Position, { ShapeKind::MAX_CELLS }> {
        self.occupied_offsets()
            .map(|(dr, dc)| Position::new(row + dr, col + dc))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrices_are_rectangular_and_nonempty() {
        for shape in ShapeKind::ALL {
            let matrix = shape.matrix();
            assert!(!matrix.is_empty(), "{shape:?} has no rows");
            let width = matrix[0].len();
            assert!(width > 0, "{shape:?} has zero width");
            for row in matrix {
                assert_eq!(row.len(), width, "{shape:?} has ragged rows");
            }
            assert!(shape.cell_count() >= 1, "{shape:?} has no occupied cells");
        }
    }

    #[test]
    fn test_dimensions_match_matrices() {
        assert_eq!(ShapeKind::Single.width(), 1);
        assert_eq!(ShapeKind::Single.height(), 1);
        assert_eq!(ShapeKind::Bar2H.width(), 2);
        assert_eq!(ShapeKind::Bar2H.height(), 1);
        assert_eq!(ShapeKind::Bar3V.width(), 1);
        assert_eq!(ShapeKind::Bar3V.height(), 3);
        assert_eq!(ShapeKind::Tee.width(), 3);
        assert_eq!(ShapeKind::Tee.height(), 2);
    }

    #[test]
    fn test_max_cells_bound_holds() {
        for shape in ShapeKind::ALL {
            assert!(
                shape.cell_count() <= ShapeKind::MAX_CELLS,
                "{shape:?} exceeds MAX_CELLS",
            );
        }
        // The bound is tight: square and tee both hit it.
        assert_eq!(ShapeKind::Square.cell_count(), ShapeKind::MAX_CELLS);
        assert_eq!(ShapeKind::Tee.cell_count(), ShapeKind::MAX_CELLS);
    }

    #[test]
    fn test_availability_is_monotone_and_saturates() {
        for level in 1..20 {
            let current = ShapeKind::available_at(level);
            let next = ShapeKind::available_at(level + 1);
            for shape in current {
                assert!(
                    next.contains(shape),
                    "{shape:?} available at level {level} but not at {}",
                    level + 1,
                );
            }
        }
        assert_eq!(ShapeKind::available_at(4).len(), ShapeKind::LEN);
        assert_eq!(ShapeKind::available_at(100).len(), ShapeKind::LEN);
    }

    #[test]
    fn test_project_is_row_major() {
        let positions = ShapeKind::Tee.project(2, 3);
        let expected = [
            Position::new(2, 3),
            Position::new(2, 4),
            Position::new(2, 5),
            Position::new(3, 4),
        ];
        assert_eq!(positions.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_project_offsets_origin() {
        let positions = ShapeKind::CornerR.project(5, 7);
        let expected = [
            Position::new(5, 8),
            Position::new(6, 7),
            Position::new(6, 8),
        ];
        assert_eq!(positions.as_slice(), expected.as_slice());
    }
}
