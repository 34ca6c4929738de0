use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::piece_generator::{PieceSeed, Randomizer};

/// Error returned by [`EngineConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid width must be in 4..=64, got {_0}")]
    Width(#[error(not(source))] usize),
    #[display("grid height must be in 4..=64, got {_0}")]
    Height(#[error(not(source))] usize),
}

/// Settings fixed for the lifetime of a [`Game`](crate::Game).
///
/// All fields are optional when deserializing; missing fields take the default
/// values (10×20 grid, uniform randomizer, random seed).
///
/// # Example
///
/// ```
/// use blockfall_engine::{EngineConfig, Randomizer};
///
/// let config: EngineConfig =
///     serde_json::from_str(r#"{ "width": 12, "randomizer": "bag" }"#).unwrap();
/// assert_eq!(config.width, 12);
/// assert_eq!(config.height, 20);
/// assert_eq!(config.randomizer, Randomizer::Bag);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub randomizer: Randomizer,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<PieceSeed>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            randomizer: Randomizer::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub const DEFAULT_WIDTH: usize = 10;
    pub const DEFAULT_HEIGHT: usize = 20;

    /// Allowed grid width and height. The lower bound fits the 4-wide I-piece.
    pub const DIMENSION_RANGE: RangeInclusive<usize> = 4..=64;

    /// Checks the grid dimensions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !Self::DIMENSION_RANGE.contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !Self::DIMENSION_RANGE.contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        Ok(())
    }
}
