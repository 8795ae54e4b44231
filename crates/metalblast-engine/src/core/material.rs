use serde::{Deserialize, Serialize};

/// Metal tag carried by every piece and baked into grid cells on placement.
///
/// Materials are purely cosmetic for grid mechanics (any non-empty cell counts
/// toward a line), but they drive two level-dependent tables:
///
/// - [`Material::available_at`] — which materials the generator may draw at a
///   given level
/// - [`Material::milestone_reward`] — which material is awarded as a reward
///   tier when a milestone level is reached
///
/// Copper is special: it is never drawn by the generator and only appears as
/// the first reward tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Material {
    Silver = 0,
    Gold = 1,
    Platinum = 2,
    Copper = 3,
}

impl Material {
    /// Number of material tags (4).
    pub const LEN: usize = 4;

    /// Returns the materials the generator may draw at the given level.
    ///
    /// The set is monotonically non-decreasing in level: silver only at level
    /// 1, gold joins at level 2, platinum at level 3. It saturates there —
    /// copper never enters the draw pool.
    #[must_use]
    pub const fn available_at(level: usize) -> &'static [Material] {
        match level {
            0 | 1 => &[Material::Silver],
            2 => &[Material::Silver, Material::Gold],
            _ => &[Material::Silver, Material::Gold, Material::Platinum],
        }
    }

    /// Returns the reward tier unlocked when `level` is first reached.
    ///
    /// Milestone levels are 2, 3, 5, and 7, awarding copper, silver, gold,
    /// and platinum respectively.
    #[must_use]
    pub const fn milestone_reward(level: usize) -> Option<Material> {
        match level {
            2 => Some(Material::Copper),
            3 => Some(Material::Silver),
            5 => Some(Material::Gold),
            7 => Some(Material::Platinum),
            _ => None,
        }
    }

    /// Returns the lowercase name of this material.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Material::Silver => "silver",
            Material::Gold => "gold",
            Material::Platinum => "platinum",
            Material::Copper => "copper",
        }
    }
}
