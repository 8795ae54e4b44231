use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::{
    material::Material,
    piece::{Piece, PieceId},
    shape::ShapeKind,
};

/// Upper bound on tray size; the batch grows by one per level up to this cap.
pub const MAX_TRAY_PIECES: usize = 3;

/// Produces batches of tray pieces for a given level.
///
/// Each piece independently draws a uniformly random shape from the level's
/// eligible shape set and a uniformly random material from the level's
/// eligible material set (see [`ShapeKind::available_at`] and
/// [`Material::available_at`]). Duplicates within a batch are permitted.
///
/// The generator owns the two injectable capabilities the engine needs:
/// a seeded random source and a monotone id counter. Generation has no other
/// side effects — it never touches the grid.
///
/// # Example
///
/// ```
/// use metalblast_engine::PieceGenerator;
///
/// let mut generator = PieceGenerator::new();
///
/// // Level 1 offers a single piece; level 3 and above offer three.
/// assert_eq!(generator.generate(1, None).len(), 1);
/// assert_eq!(generator.generate(5, None).len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
    next_id: u64,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit (16-byte) seed that initializes the generator's random number
/// generator. The same seed produces the same sequence of trays, enabling:
///
/// - Reproducible sessions for debugging
/// - Deterministic testing
///
/// # Example
///
/// ```
/// use metalblast_engine::{GameSettings, GameState, TraySeed};
/// use rand::Rng as _;
///
/// let seed: TraySeed = rand::rng().random();
///
/// let a = GameState::with_seed(GameSettings::default(), seed);
/// let b = GameState::with_seed(GameSettings::default(), seed);
///
/// // Both sessions start with the same tray.
/// assert_eq!(a.tray(), b.tray());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TraySeed([u8; 16]);

impl TraySeed {
    /// Wraps raw seed bytes, e.g. when hydrating from host storage.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl Serialize for TraySeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{num:032x}").unwrap();
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for TraySeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(&hex_str, 16)
            .map_err(|e| serde::de::Error::custom(format!("invalid hex: {hex_str} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

/// Allows generating random `TraySeed` values with `rng.random()`.
impl Distribution<TraySeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TraySeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        TraySeed(seed)
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic output.
    #[must_use]
    pub fn with_seed(seed: TraySeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            next_id: 0,
        }
    }

    /// Generates a batch of pieces for the player's tray.
    ///
    /// Batch size is `min(3, level)`. When `forced_material` is supplied it
    /// is used for every piece in the batch; otherwise each piece draws its
    /// material independently from the level's eligible set.
    pub fn generate(&mut self, level: usize, forced_material: Option<Material>) -> Vec<Piece> {
        let shapes = ShapeKind::available_at(level);
        let materials = Material::available_at(level);
        let count = level.min(MAX_TRAY_PIECES);

        let mut pieces = Vec::with_capacity(count);
        for _ in 0..count {
            let shape = *shapes
                .choose(&mut self.rng)
                .expect("eligible shape set is never empty");
            let material = match forced_material {
                Some(material) => material,
                None => *materials
                    .choose(&mut self.rng)
                    .expect("eligible material set is never empty"),
            };
            pieces.push(Piece::new(self.fresh_id(), material, shape));
        }
        pieces
    }

    fn fresh_id(&mut self) -> PieceId {
        let id = PieceId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_from_bytes(bytes: [u8; 16]) -> TraySeed {
        TraySeed::from_bytes(bytes)
    }

    const SEED: [u8; 16] = [
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ];

    #[test]
    fn test_batch_size_scales_with_level_up_to_cap() {
        let mut generator = PieceGenerator::with_seed(seed_from_bytes(SEED));
        assert_eq!(generator.generate(1, None).len(), 1);
        assert_eq!(generator.generate(2, None).len(), 2);
        assert_eq!(generator.generate(3, None).len(), 3);
        assert_eq!(generator.generate(10, None).len(), 3);
    }

    #[test]
    fn test_draws_respect_level_eligibility() {
        let mut generator = PieceGenerator::with_seed(seed_from_bytes(SEED));
        for level in 1..=10 {
            let shapes = ShapeKind::available_at(level);
            let materials = Material::available_at(level);
            for _ in 0..50 {
                for piece in generator.generate(level, None) {
                    assert!(shapes.contains(&piece.shape()));
                    assert!(materials.contains(&piece.material()));
                }
            }
        }
    }

    #[test]
    fn test_forced_material_applies_to_whole_batch() {
        let mut generator = PieceGenerator::with_seed(seed_from_bytes(SEED));
        for _ in 0..20 {
            let batch = generator.generate(3, Some(Material::Copper));
            assert!(batch.iter().all(|p| p.material() == Material::Copper));
        }
    }

    #[test]
    fn test_ids_are_unique_across_batches() {
        let mut generator = PieceGenerator::with_seed(seed_from_bytes(SEED));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            for piece in generator.generate(3, None) {
                assert!(seen.insert(piece.id()), "duplicate id {:?}", piece.id());
            }
        }
    }

    #[test]
    fn test_deterministic_generation_from_seed() {
        let mut a = PieceGenerator::with_seed(seed_from_bytes(SEED));
        let mut b = PieceGenerator::with_seed(seed_from_bytes(SEED));

        for level in [1, 2, 3, 5, 8] {
            assert_eq!(a.generate(level, None), b.generate(level, None));
        }
    }

    mod tray_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: TraySeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: TraySeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed.0, deserialized.0);
        }

        #[test]
        fn test_format_is_32_char_hex_string() {
            let seed: TraySeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();

            let hex_str = serialized.trim_matches('"');
            assert_eq!(hex_str.len(), 32);
            assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_known_value_round_trips_big_endian() {
            let seed = seed_from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76,
                0x54, 0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

            let deserialized: TraySeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized.0, seed.0);
        }

        #[test]
        fn test_deserialize_rejects_bad_input() {
            // Wrong length.
            assert!(serde_json::from_str::<TraySeed>("\"0123\"").is_err());
            assert!(serde_json::from_str::<TraySeed>("\"\"").is_err());
            // Right length, not hex.
            assert!(
                serde_json::from_str::<TraySeed>("\"ghijklmnopqrstuvwxyzghijklmnopqr\"").is_err()
            );
        }

        #[test]
        fn test_serialized_seed_preserves_generation() {
            let original: TraySeed = rand::rng().random();
            let serialized = serde_json::to_string(&original).unwrap();
            let restored: TraySeed = serde_json::from_str(&serialized).unwrap();

            let mut a = PieceGenerator::with_seed(original);
            let mut b = PieceGenerator::with_seed(restored);
            for _ in 0..20 {
                assert_eq!(a.generate(3, None), b.generate(3, None));
            }
        }
    }
}
