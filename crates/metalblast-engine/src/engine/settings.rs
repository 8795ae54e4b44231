use serde::{Deserialize, Serialize};

/// Session configuration, fixed at construction.
///
/// Passed explicitly into [`GameState::new`](crate::GameState::new) — there is
/// no ambient global configuration inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameSettings {
    /// Side length of the square grid.
    pub grid_size: usize,
    /// Lines to complete before each level-up.
    pub rows_per_level: usize,
    /// Level cap; the quota keeps counting but the level never exceeds this.
    pub max_level: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_size: 9,
            rows_per_level: 5,
            max_level: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = GameSettings::default();
        assert_eq!(settings.grid_size, 9);
        assert_eq!(settings.rows_per_level, 5);
        assert_eq!(settings.max_level, 10);
    }

    #[test]
    fn test_settings_serde_round_trip() {
        let settings = GameSettings {
            grid_size: 12,
            rows_per_level: 3,
            max_level: 7,
        };
        let serialized = serde_json::to_string(&settings).unwrap();
        let deserialized: GameSettings = serde_json::from_str(&serialized).unwrap();
        assert_eq!(settings, deserialized);
    }
}
