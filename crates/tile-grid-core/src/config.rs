use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Pixel rounding applied to the initial tile estimate.
/// Key notes:
///   - `Truncate` floors the per-tile area and the first width estimate toward zero,
///     which keeps results identical to existing browser hosts
///   - `Exact` keeps full precision; the search can then start from a slightly
///     different column count
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    #[default]
    Truncate,
    Exact,
}

impl FromStr for Rounding {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "truncate" | "trunc" => Ok(Self::Truncate),
            "exact" | "none" => Ok(Self::Exact),
            _ => Err(()),
        }
    }
}

/// How the reference aspect ratio is chosen among tile samples.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Sample with the largest `width * height`; ties keep the first seen.
    #[default]
    LargestArea,
    /// A sample replaces the reference only if it is strictly wider and strictly taller.
    Dominant,
}

impl FromStr for ReferencePolicy {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "largest_area" | "area" => Ok(Self::LargestArea),
            "dominant" => Ok(Self::Dominant),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PackerConfig {
    #[serde(default)]
    pub rounding: Rounding,
    #[serde(default)]
    pub reference: ReferencePolicy,
}

/// Builder for `PackerConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackerConfigBuilder {
    cfg: PackerConfig,
}

impl PackerConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackerConfig::default(),
        }
    }
    pub fn rounding(mut self, v: Rounding) -> Self {
        self.cfg.rounding = v;
        self
    }
    pub fn reference(mut self, v: ReferencePolicy) -> Self {
        self.cfg.reference = v;
        self
    }
    pub fn build(self) -> PackerConfig {
        self.cfg
    }
}

impl PackerConfig {
    /// Create a fluent builder for `PackerConfig`.
    pub fn builder() -> PackerConfigBuilder {
        PackerConfigBuilder::new()
    }
}
