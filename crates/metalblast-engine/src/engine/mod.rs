//! Game logic and state management.
//!
//! This module provides the logic that orchestrates the core data structures
//! into a playable block-blast session:
//!
//! - [`GameState`] - The authoritative session state and its reducer
//! - [`Action`] - The closed vocabulary of state transitions
//! - [`PieceGenerator`] - Seeded batch generation of tray pieces
//! - [`TraySeed`] - Seed for deterministic piece generation
//! - [`GameSettings`] - Grid size, level quota, and level cap
//!
//! # Game Flow
//!
//! A typical session progresses as follows:
//!
//! 1. Initialize [`GameState`] with settings (and optionally a seed)
//! 2. The host projects a tray piece onto a grid offset and pre-validates it
//!    with [`Grid::validate_placement`](crate::Grid::validate_placement)
//! 3. The host applies [`Action::PlacePiece`]; completed rows and columns
//!    clear and score, the level quota advances, and the tray refills once
//!    empty
//! 4. Repeat until no tray piece fits anywhere; the session turns terminal
//!    and only [`Action::Reset`] starts a new game
//!
//! The reducer is a pure function over the state value: every transition
//! returns a new [`GameState`] and leaves the input untouched. Invalid or
//! no-op actions return the state unchanged rather than signaling an error.
//!
//! # Example
//!
//! ```
//! use metalblast_engine::{Action, GameSettings, GameState};
//!
//! let state = GameState::new(GameSettings::default());
//! let piece = state.tray()[0];
//!
//! assert!(state.grid().is_valid_placement(piece.shape(), 0, 0));
//! let next = state.apply(&Action::PlacePiece {
//!     id: piece.id(),
//!     positions: piece.shape().project(0, 0).to_vec(),
//! });
//!
//! assert_eq!(next.score(), state.score() + piece.cell_count());
//! assert!(next.phase().is_active());
//! ```

pub use self::{game_state::*, piece_generator::*, settings::*};

mod game_state;
mod piece_generator;
mod settings;
