pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reason a placement request was refused by the validator.
///
/// The reducer itself never surfaces this type: invalid actions leave the
/// state unchanged. Hosts call [`Grid::validate_placement`](crate::Grid::validate_placement)
/// before committing a placement, and can use the variant to drive
/// highlighting feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("cell ({row}, {col}) falls outside the grid")]
    OutOfBounds { row: usize, col: usize },
    #[display("cell ({row}, {col}) is already occupied")]
    Occupied { row: usize, col: usize },
}
