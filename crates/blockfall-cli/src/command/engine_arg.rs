use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use blockfall_engine::{EngineConfig, PieceSeed, Randomizer};

/// Engine settings shared by every mode.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct EngineArg {
    /// Grid width in cells (4 to 64)
    #[clap(long)]
    width: Option<usize>,
    /// Grid height in cells (4 to 64)
    #[clap(long)]
    height: Option<usize>,
    /// Seed for the piece generator, as 32 hexadecimal digits
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Draw pieces from a shuffled 7-bag instead of uniformly
    #[clap(long)]
    bag: bool,
    /// Engine configuration file (JSON); command line flags override its values
    #[clap(long)]
    config: Option<PathBuf>,
}

impl EngineArg {
    pub(crate) fn to_config(&self) -> anyhow::Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => read_config_file(path)?,
            None => EngineConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.bag {
            config.randomizer = Randomizer::Bag;
        }
        config.validate().context("Invalid engine configuration")?;
        Ok(config)
    }
}

fn read_config_file(path: &Path) -> anyhow::Result<EngineConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config file: {}", path.display()))?;
    serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[clap(flatten)]
        engine: EngineArg,
    }

    fn parse(args: &[&str]) -> EngineArg {
        TestCli::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
            .unwrap()
            .engine
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).to_config().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_flags() {
        let config = parse(&[
            "--width",
            "12",
            "--height",
            "24",
            "--bag",
            "--seed",
            "0000000000000000000000000000002a",
        ])
        .to_config()
        .unwrap();
        assert_eq!((config.width, config.height), (12, 24));
        assert_eq!(config.randomizer, Randomizer::Bag);
        assert_eq!(config.seed, Some(PieceSeed::from_u128(42)));
    }

    #[test]
    fn test_invalid_seed_is_rejected_by_parser() {
        let result = TestCli::try_parse_from(["test", "--seed", "xyz"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_dimensions() {
        let err = parse(&["--width", "2"]).to_config().unwrap_err();
        assert_eq!(err.to_string(), "Invalid engine configuration");
        assert_eq!(
            err.root_cause().to_string(),
            "grid width must be in 4..=64, got 2"
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!(
            "blockfall-engine-arg-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{ "width": 8, "height": 16, "randomizer": "bag" }"#).unwrap();

        let path_str = path.to_str().unwrap();
        let config = parse(&["--config", path_str, "--height", "30"])
            .to_config()
            .unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!((config.width, config.height), (8, 30));
        assert_eq!(config.randomizer, Randomizer::Bag);
    }

    #[test]
    fn test_missing_config_file() {
        let err = parse(&["--config", "/nonexistent/blockfall.json"])
            .to_config()
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to open config file"));
    }
}
