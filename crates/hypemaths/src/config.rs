use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Relative and absolute tolerance used when two floats are compared for closeness.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Tolerance {
    pub fn new(relative: f64, absolute: f64) -> Self {
        Self { relative, absolute }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: 1e-9,
            absolute: 1e-12,
        }
    }
}

/// How ties are broken when a value is rounded to a number of decimals.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 2.5 -> 3, -2.5 -> -3
    #[default]
    HalfAwayFromZero,
    /// 2.5 -> 2, 3.5 -> 4
    HalfEven,
}

impl FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "half_away_from_zero" | "half_up" => Ok(RoundingMode::HalfAwayFromZero),
            "half_even" | "bankers" => Ok(RoundingMode::HalfEven),
            _ => Err(format!(
                "Unknown rounding mode: {}. Expected `half_away_from_zero` or `half_even`",
                s
            )),
        }
    }
}

/// Central configuration for the tolerance- and rounding-sensitive operations.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MathConfig {
    pub tolerance: Tolerance,
    pub mean_decimals: i32,
    pub rounding: RoundingMode,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::default(),
            mean_decimals: 2,
            rounding: RoundingMode::default(),
        }
    }
}

impl MathConfig {
    pub fn new(tolerance: Tolerance, mean_decimals: i32, rounding: RoundingMode) -> Self {
        Self {
            tolerance,
            mean_decimals,
            rounding,
        }
    }

    /// Parse a config from JSON; missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: MathConfig =
            serde_json::from_str(json).context("Failed to parse math config JSON")?;
        log::debug!("Loaded math config: {:?}", config);
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read math config from {}", path.display()))?;
        Self::from_json_str(&contents)
            .with_context(|| format!("Invalid math config in {}", path.display()))
    }
}
