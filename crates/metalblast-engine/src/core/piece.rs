use serde::{Deserialize, Serialize};

use super::{material::Material, shape::ShapeKind};

/// Opaque unique identifier of a tray piece.
///
/// Ids are handed out by the generator and never reused within a session;
/// the reducer matches placement actions against the tray by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct PieceId(u64);

impl PieceId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A piece offered in the player's tray.
///
/// A piece lives in the tray until placed; on placement its cells are baked
/// into the grid and only its [`PlacementRecord`](crate::PlacementRecord)
/// survives. Width and height derive directly from the shape matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Piece {
    id: PieceId,
    material: Material,
    shape: ShapeKind,
}

impl Piece {
    #[must_use]
    pub const fn new(id: PieceId, material: Material, shape: ShapeKind) -> Self {
        Self {
            id,
            material,
            shape,
        }
    }

    #[must_use]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub const fn material(&self) -> Material {
        self.material
    }

    #[must_use]
    pub const fn shape(&self) -> ShapeKind {
        self.shape
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.shape.width()
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.shape.height()
    }

    /// Number of occupied cells; also the placement score of the piece.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.shape.cell_count()
    }
}
