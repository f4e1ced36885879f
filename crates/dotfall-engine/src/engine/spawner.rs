use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceColor;

/// Seed for deterministic board generation.
///
/// A 128-bit (16-byte) seed that initializes the random number generator
/// behind all piece spawning. The same seed produces the same initial board
/// and the same refill sequence, enabling reproducible sessions and
/// deterministic tests. Serializes as a 32-character hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardSeed([u8; 16]);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid board seed {seed:?}: expected 32 hex characters")]
pub struct SeedParseError {
    seed: String,
}

impl fmt::Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for BoardSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(SeedParseError {
                seed: s.to_owned(),
            });
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| SeedParseError {
            seed: s.to_owned(),
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for BoardSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BoardSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random [`BoardSeed`] values with `rng.random()`.
impl Distribution<BoardSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BoardSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        BoardSeed(seed)
    }
}

/// Uniform piece color source for initial fill and refills.
///
/// Unlike a bag system, match-3 refills are independent uniform draws from
/// the configured palette; there is no fairness constraint.
#[derive(Debug, Clone)]
pub struct PieceSpawner {
    rng: Pcg32,
    palette: usize,
}

impl PieceSpawner {
    /// Creates a spawner with a random seed.
    ///
    /// For deterministic spawning, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new(palette: usize) -> Self {
        Self::with_seed(palette, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed.
    #[must_use]
    pub fn with_seed(palette: usize, seed: BoardSeed) -> Self {
        assert!(
            (1..=PieceColor::LEN).contains(&palette),
            "palette size {palette} outside 1..={}",
            PieceColor::LEN,
        );
        Self {
            rng: Pcg32::from_seed(seed.0),
            palette,
        }
    }

    /// Draws a uniformly random color from the palette.
    pub fn spawn_color(&mut self) -> PieceColor {
        let idx = self.rng.random_range(0..self.palette);
        PieceColor::ALL[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_hex_roundtrip() {
        let seed: BoardSeed = rand::rng().random();
        let serialized = serde_json::to_string(&seed).unwrap();
        let deserialized: BoardSeed = serde_json::from_str(&serialized).unwrap();
        assert_eq!(seed, deserialized);
    }

    #[test]
    fn test_seed_known_value() {
        let seed = BoardSeed([0; 16]);
        assert_eq!(seed.to_string(), "00000000000000000000000000000000");
        assert_eq!(
            "00000000000000000000000000000000"
                .parse::<BoardSeed>()
                .unwrap(),
            seed
        );
    }

    #[test]
    fn test_seed_parse_rejects_bad_input() {
        assert!("".parse::<BoardSeed>().is_err());
        assert!("zz".parse::<BoardSeed>().is_err());
        // 32 chars but not hex
        assert!(
            "ghijklmnopqrstuvwxyzghijklmnopqr"
                .parse::<BoardSeed>()
                .is_err()
        );
    }

    #[test]
    fn test_deterministic_spawning() {
        let seed = BoardSeed([7; 16]);
        let mut a = PieceSpawner::with_seed(6, seed);
        let mut b = PieceSpawner::with_seed(6, seed);
        for _ in 0..50 {
            assert_eq!(a.spawn_color(), b.spawn_color());
        }
    }

    #[test]
    fn test_spawner_respects_palette() {
        let mut spawner = PieceSpawner::with_seed(3, BoardSeed([1; 16]));
        for _ in 0..100 {
            let color = spawner.spawn_color();
            assert!(PieceColor::ALL[..3].contains(&color));
        }
    }
}
