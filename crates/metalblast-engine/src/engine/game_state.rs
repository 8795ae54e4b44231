use serde::{Deserialize, Serialize};

use crate::core::{
    grid::{Grid, Position},
    material::Material,
    piece::{Piece, PieceId},
};

use super::{
    piece_generator::{PieceGenerator, TraySeed},
    settings::GameSettings,
};

/// The closed vocabulary of state transitions.
///
/// Actions are discrete values constructed by the host; the engine never
/// fabricates them. Invalid or no-op actions (unknown piece id, gameplay
/// while terminal) leave the state unchanged — there is no error channel, so
/// hosts pre-validate placements with
/// [`Grid::validate_placement`](crate::Grid::validate_placement).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum Action {
    /// Commit a pre-validated placement of the tray piece `id` at the given
    /// absolute positions (produced by
    /// [`ShapeKind::project`](crate::ShapeKind::project)).
    PlacePiece { id: PieceId, positions: Vec<Position> },
    /// Regenerate the tray, optionally forcing one material for the batch.
    ///
    /// Regeneration is unconditional; callers wanting "refill only when
    /// empty" must gate on [`GameState::tray`] themselves. Placement already
    /// refills an emptied tray on its own.
    RequestTray { forced: Option<Material> },
    /// Start a fresh session, preserving best score and sound preference.
    Reset,
    TogglePause,
    ToggleSound,
    /// Hydrate the best score from host storage.
    SetBestScore(usize),
    /// Re-display a reward marker.
    ShowReward(Material),
    /// Dismiss the pending reward marker (typically on a host timer).
    HideReward,
}

/// Lifecycle phase of a session.
///
/// `Paused` is deliberately not a phase: pausing is an orthogonal flag the
/// engine records but never gates on — input gating while paused is the
/// host's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionPhase {
    /// Accepting placements.
    Active,
    /// No tray piece fits anywhere; only reset restarts play.
    Terminal,
}

/// Immutable audit entry for a committed placement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlacementRecord {
    pub id: PieceId,
    pub material: Material,
    pub positions: Vec<Position>,
}

/// The authoritative session state and its reducer.
///
/// All transitions run through [`GameState::apply`], a pure function from
/// `(state, action)` to a new state. The host owns exactly one live value and
/// threads it explicitly; there is no ambient global. The piece generator
/// (random source + id counter) travels inside the state, so a transition's
/// randomness advances with the value it returns and seeded sessions replay
/// identically.
#[derive(Debug, Clone)]
pub struct GameState {
    settings: GameSettings,
    grid: Grid,
    tray: Vec<Piece>,
    history: Vec<PlacementRecord>,
    score: usize,
    best_score: usize,
    level: usize,
    completed_lines: usize,
    lines_to_next_level: isize,
    phase: SessionPhase,
    paused: bool,
    sound_enabled: bool,
    pending_reward: Option<Material>,
    generator: PieceGenerator,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameSettings::default())
    }
}

impl GameState {
    /// Creates a fresh session: empty grid, tray seeded for level 1.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_generator(settings, PieceGenerator::new())
    }

    /// Like [`Self::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(settings: GameSettings, seed: TraySeed) -> Self {
        Self::with_generator(settings, PieceGenerator::with_seed(seed))
    }

    /// Like [`Self::new`], but with a caller-supplied generator.
    #[must_use]
    pub fn with_generator(settings: GameSettings, mut generator: PieceGenerator) -> Self {
        let tray = generator.generate(1, None);
        Self {
            grid: Grid::new(settings.grid_size),
            tray,
            history: Vec::new(),
            score: 0,
            best_score: 0,
            level: 1,
            completed_lines: 0,
            lines_to_next_level: level_quota(settings),
            phase: SessionPhase::Active,
            paused: false,
            sound_enabled: true,
            pending_reward: None,
            settings,
            generator,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> GameSettings {
        self.settings
    }

    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Pieces currently offered to the player.
    #[must_use]
    pub fn tray(&self) -> &[Piece] {
        &self.tray
    }

    /// Audit log of committed placements, oldest first.
    #[must_use]
    pub fn history(&self) -> &[PlacementRecord] {
        &self.history
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn best_score(&self) -> usize {
        self.best_score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Total lines completed over the session, rows and columns combined.
    #[must_use]
    pub const fn completed_lines(&self) -> usize {
        self.completed_lines
    }

    /// Lines remaining until the next level-up.
    ///
    /// Can be carried below zero once the level cap is reached.
    #[must_use]
    pub const fn lines_to_next_level(&self) -> isize {
        self.lines_to_next_level
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub const fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    /// Reward marker awaiting display, if a milestone level was just reached.
    #[must_use]
    pub const fn pending_reward(&self) -> Option<Material> {
        self.pending_reward
    }

    /// Applies a transition and returns the next state.
    ///
    /// The input state is never modified; rejected transitions return an
    /// unchanged clone.
    #[must_use]
    pub fn apply(&self, action: &Action) -> Self {
        match action {
            Action::PlacePiece { id, positions } => self.place_piece(*id, positions),
            Action::RequestTray { forced } => self.request_tray(*forced),
            Action::Reset => self.reset(),
            Action::TogglePause => {
                let mut next = self.clone();
                next.paused = !next.paused;
                next
            }
            Action::ToggleSound => {
                let mut next = self.clone();
                next.sound_enabled = !next.sound_enabled;
                next
            }
            Action::SetBestScore(score) => {
                let mut next = self.clone();
                next.best_score = *score;
                next
            }
            Action::ShowReward(material) => {
                let mut next = self.clone();
                next.pending_reward = Some(*material);
                next
            }
            Action::HideReward => {
                let mut next = self.clone();
                next.pending_reward = None;
                next
            }
        }
    }

    /// The placement transition.
    ///
    /// Positions are trusted to come from a pre-validated projection; the
    /// write is still bounds-checked defensively, and the piece id must be
    /// in the tray.
    fn place_piece(&self, id: PieceId, positions: &[Position]) -> Self {
        if self.phase.is_terminal() {
            return self.clone();
        }
        let Some(piece) = self.tray.iter().copied().find(|p| p.id() == id) else {
            return self.clone();
        };

        let mut next = self.clone();

        // Bake the piece's material into the grid.
        for &position in positions {
            if position.row < next.settings.grid_size && position.col < next.settings.grid_size {
                next.grid.fill(position, piece.material());
            }
        }

        // Detect against the post-write snapshot; both axes see the same
        // grid, so an intersection cell counts toward its row and its column.
        let completed = next.grid.completed_lines();
        for &row in &completed.rows {
            next.grid.clear_row(row);
            next.score += 10 * self.level;
        }
        for &col in &completed.cols {
            next.grid.clear_col(col);
            next.score += 10 * self.level;
        }
        let cleared = completed.total();
        next.completed_lines += cleared;

        // Placement-size score, independent of clears.
        next.score += piece.cell_count();

        next.lines_to_next_level -=
            isize::try_from(cleared).expect("cleared line count fits in isize");
        next.pending_reward = None;
        if next.lines_to_next_level <= 0 && next.level < next.settings.max_level {
            next.level += 1;
            next.lines_to_next_level = level_quota(next.settings);
            next.pending_reward = Material::milestone_reward(next.level);
        }

        next.best_score = next.best_score.max(next.score);

        // A level-up takes effect for the very next tray.
        next.tray.retain(|p| p.id() != id);
        if next.tray.is_empty() {
            next.tray = next.generator.generate(next.level, None);
        }

        next.phase = if is_terminal(&next.grid, &next.tray) {
            SessionPhase::Terminal
        } else {
            SessionPhase::Active
        };

        next.history.push(PlacementRecord {
            id,
            material: piece.material(),
            positions: positions.to_vec(),
        });
        next
    }

    fn request_tray(&self, forced: Option<Material>) -> Self {
        if self.phase.is_terminal() {
            return self.clone();
        }
        let mut next = self.clone();
        next.tray = next.generator.generate(next.level, forced);
        next
    }

    fn reset(&self) -> Self {
        let mut generator = self.generator.clone();
        let tray = generator.generate(1, None);
        Self {
            grid: Grid::new(self.settings.grid_size),
            tray,
            history: Vec::new(),
            score: 0,
            best_score: self.best_score,
            level: 1,
            completed_lines: 0,
            lines_to_next_level: level_quota(self.settings),
            phase: SessionPhase::Active,
            paused: false,
            sound_enabled: self.sound_enabled,
            pending_reward: None,
            settings: self.settings,
            generator,
        }
    }
}

/// Returns true when no tray piece can be legally placed anywhere.
///
/// Returns false immediately for an empty tray — no terminal judgment is
/// possible with nothing to place, so callers refill first. Exhaustive
/// `pieces × offsets` scan; cheap at the intended grid and tray sizes.
#[must_use]
pub fn is_terminal(grid: &Grid, tray: &[Piece]) -> bool {
    if tray.is_empty() {
        return false;
    }
    !tray.iter().any(|piece| grid.fits_anywhere(piece.shape()))
}

fn level_quota(settings: GameSettings) -> isize {
    isize::try_from(settings.rows_per_level).expect("rows_per_level fits in isize")
}
