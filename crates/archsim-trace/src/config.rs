//! Simulator configuration: the canonical defaults, overridable by an
//! optional TOML file.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use archsim_memory::{Cache, ConfigError, MemoryLevel, Ram};
use archsim_predictor::Predictor;

use crate::error::ConfigLoadError;

const CANONICAL_L1: LevelConfig = LevelConfig { size: 64 * 1024, ways: 2, line_len: 16, overhead: Some(1) };
const CANONICAL_L2: LevelConfig = LevelConfig { size: 1_000 * 1024, ways: 2, line_len: 16, overhead: Some(2) };
const CANONICAL_RAM_OVERHEAD: u64 = 8;

fn canonical_predictor_names() -> Vec<String> {
    [
        "always-jump",
        "never-jump",
        "jump-if-target-lower",
        "one-bit-history",
        "two-bit-saturation",
        "two-bit-hysteresis",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LevelConfig {
    size: u64,
    ways: u64,
    line_len: u64,
    #[serde(default)]
    overhead: Option<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize, Default)]
struct RamConfig {
    overhead: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CacheSection {
    l1: Option<LevelConfig>,
    l2: Option<LevelConfig>,
}

/// The deserialized shape of a configuration file. Every field is
/// optional; an absent field falls back to the canonical value.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    cache: CacheSection,
    #[serde(default)]
    ram: RamConfig,
    predictors: Option<Vec<String>>,
}

/// A fully resolved configuration, ready to build the runtime hierarchy
/// and predictor list from.
#[derive(Debug, Clone)]
pub struct Config {
    l1: LevelConfig,
    l2: LevelConfig,
    ram_overhead: u64,
    predictor_names: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            l1: CANONICAL_L1,
            l2: CANONICAL_L2,
            ram_overhead: CANONICAL_RAM_OVERHEAD,
            predictor_names: canonical_predictor_names(),
        }
    }
}

impl Config {
    /// Loads and validates a configuration from a TOML file. Any field
    /// (or the whole file) can be omitted; omissions fall back to the
    /// canonical defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        debug!("reading configuration file {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn from_toml_str(text: &str) -> Result<Self, ConfigLoadError> {
        let raw: RawConfig = toml::from_str(text)?;
        let canonical = Self::default();

        let config = Self {
            l1: raw.cache.l1.unwrap_or(canonical.l1),
            l2: raw.cache.l2.unwrap_or(canonical.l2),
            ram_overhead: raw.ram.overhead.unwrap_or(canonical.ram_overhead),
            predictor_names: raw.predictors.unwrap_or(canonical.predictor_names),
        };
        debug!(
            "resolved configuration: l1={:?} l2={:?} ram_overhead={} predictors={:?}",
            config.l1, config.l2, config.ram_overhead, config.predictor_names
        );

        for name in &config.predictor_names {
            predictor_from_name(name)?;
        }
        config.build_memory()?;

        Ok(config)
    }

    /// Builds the two-level cache hierarchy over a terminal RAM, in the
    /// shape this configuration describes.
    pub fn build_memory(&self) -> Result<MemoryLevel, ConfigError> {
        let ram = MemoryLevel::Ram(Ram::new(self.ram_overhead));
        let l2 = Cache::new("L2", ram, self.l2.size, self.l2.ways, self.l2.line_len, self.l2.overhead)?;
        let l1 = Cache::new(
            "L1",
            MemoryLevel::Cache(l2),
            self.l1.size,
            self.l1.ways,
            self.l1.line_len,
            self.l1.overhead,
        )?;
        Ok(MemoryLevel::Cache(l1))
    }

    /// Builds the predictor list, in the configured registration order.
    pub fn build_predictors(&self) -> Result<Vec<Predictor>, ConfigLoadError> {
        self.predictor_names.iter().map(|name| predictor_from_name(name)).collect()
    }
}

fn predictor_from_name(name: &str) -> Result<Predictor, ConfigLoadError> {
    match name {
        "never-jump" => Ok(Predictor::never_jump()),
        "always-jump" => Ok(Predictor::always_jump()),
        "jump-if-target-lower" => Ok(Predictor::jump_if_target_is_lower()),
        "one-bit-history" => Ok(Predictor::one_bit_history()),
        "two-bit-saturation" => Ok(Predictor::two_bit_saturation()),
        "two-bit-hysteresis" => Ok(Predictor::two_bit_hysteresis()),
        other => Err(ConfigLoadError::UnknownPredictor(other.to_string())),
    }
}
