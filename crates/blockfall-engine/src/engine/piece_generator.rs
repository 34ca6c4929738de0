use std::fmt::Write as _;

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::PieceKind;

/// Strategy used to draw piece kinds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Randomizer {
    /// Every draw is an independent uniform choice among the 7 kinds.
    #[default]
    Uniform,
    /// 7-bag: each run of 7 draws is a shuffled permutation of all kinds.
    Bag,
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed for the generator's PCG random number
/// generator. The same seed and randomizer always produce the same sequence of
/// pieces, which makes games reproducible in tests and in the headless simulator.
///
/// Serialized as a 32-character hexadecimal string.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, PieceSeed, Randomizer};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let mut a = PieceGenerator::with_seed(Randomizer::Uniform, seed);
/// let mut b = PieceGenerator::with_seed(Randomizer::Uniform, seed);
/// assert_eq!(a.next_kind(), b.next_kind());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Expands a small integer into a seed, for tests and command-line use.
    #[must_use]
    pub const fn from_u128(num: u128) -> Self {
        Self(num.to_be_bytes())
    }

    /// Parses a 32-character hexadecimal seed.
    pub fn from_hex(hex_str: &str) -> Result<Self, ParseSeedError> {
        if hex_str.len() != 32 {
            return Err(ParseSeedError(format!(
                "expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        let num = u128::from_str_radix(hex_str, 16)
            .map_err(|e| ParseSeedError(format!("{hex_str} ({e})")))?;
        Ok(Self::from_u128(num))
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        let num = u128::from_be_bytes(self.0);
        let mut hex_str = String::with_capacity(2 * self.0.len());
        let _ = write!(&mut hex_str, "{num:032x}");
        hex_str
    }
}

/// Error returned when a seed string is not 32 hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: {_0}")]
pub struct ParseSeedError(#[error(not(source))] String);

impl std::str::FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

/// Source of piece kinds for a game.
///
/// The generator keeps its random state across game resets, so a reset game draws
/// fresh pieces instead of replaying the previous sequence.
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rng: Pcg32,
    randomizer: Randomizer,
    bag: Vec<PieceKind>,
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    #[must_use]
    pub fn new(randomizer: Randomizer) -> Self {
        Self::with_seed(randomizer, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(randomizer: Randomizer, seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            randomizer,
            bag: Vec::with_capacity(PieceKind::LEN),
        }
    }

    /// Draws the next piece kind.
    pub fn next_kind(&mut self) -> PieceKind {
        match self.randomizer {
            Randomizer::Uniform => self.rng.random(),
            Randomizer::Bag => {
                if self.bag.is_empty() {
                    self.bag.extend(PieceKind::ALL);
                    self.bag.shuffle(&mut self.rng);
                }
                self.bag.pop().unwrap_or(PieceKind::I)
            }
        }
    }
}
