pub use self::{grid::*, material::*, piece::*, shape::*};

pub(crate) mod grid;
pub(crate) mod material;
pub(crate) mod piece;
pub(crate) mod shape;
