//! Run configuration loaded from JSON.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::convolution::Boundary;
use crate::error::AutomatonError;
use crate::grid::Grid;
use crate::kernel::{Kernel, Neighborhood};
use crate::patterns::Pattern;
use crate::rule::{RuleLimits, RuleSpec, presets};
use crate::simulation::Simulation;

/// Errors raised while loading or applying a [`SimulationConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),

    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

/// Everything needed to set up one run. Missing fields take the defaults
/// below: a 200×200 torus, Life on a 3×3 Moore kernel, 15% random fill.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub rule: String,
    pub neighborhood: Neighborhood,
    pub kernel_size: usize,
    pub boundary: Boundary,
    pub generations: usize,
    /// Probability that a cell starts alive in a random fill.
    pub density: f64,
    /// Seed for the random fill; a fresh one is drawn when absent.
    pub seed: Option<u64>,
    /// Named pattern centered on an empty grid instead of a random fill.
    pub pattern: Option<String>,
    /// Accept `B/S`, the rule under which nothing ever lives.
    pub allow_empty_rule: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            rule: presets::LIFE.to_string(),
            neighborhood: Neighborhood::Moore,
            kernel_size: Kernel::DEFAULT_SIZE,
            boundary: Boundary::Toroidal,
            generations: 1000,
            density: 0.15,
            seed: None,
            pattern: None,
            allow_empty_rule: true,
        }
    }
}

impl SimulationConfig {
    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn kernel(&self) -> Result<Kernel, ConfigError> {
        Ok(Kernel::new(self.neighborhood, self.kernel_size)?)
    }

    /// Parses the rule against the configured kernel.
    pub fn rule_spec(&self, kernel: &Kernel) -> Result<RuleSpec, ConfigError> {
        let limits = RuleLimits {
            max_neighbor_count: kernel.max_neighbor_count(),
            allow_empty: self.allow_empty_rule,
        };
        Ok(RuleSpec::parse(&self.rule, &limits)?)
    }

    /// The generation-0 grid: the named pattern if one is set, otherwise a
    /// random fill.
    pub fn initial_grid(&self) -> Result<Grid, ConfigError> {
        if self.width.checked_mul(self.height).is_none() {
            return Err(AutomatonError::dimensions(
                "a cell count that fits in memory",
                self.width,
                self.height,
            )
            .into());
        }
        match &self.pattern {
            Some(name) => {
                let pattern =
                    Pattern::find(name).ok_or_else(|| ConfigError::UnknownPattern(name.clone()))?;
                Ok(pattern.centered(self.width, self.height))
            }
            None => {
                let seed = self.seed.unwrap_or_else(rand::random);
                log::info!("random fill: density {}, seed {seed}", self.density);
                Ok(Grid::random(self.width, self.height, self.density, seed)?)
            }
        }
    }

    /// Validates everything and returns a simulation ready to run.
    pub fn build(&self) -> Result<Simulation, ConfigError> {
        let kernel = self.kernel()?;
        let rule = self.rule_spec(&kernel)?;
        let grid = self.initial_grid()?;
        Ok(Simulation::new(grid, rule, kernel, self.boundary)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config = SimulationConfig::from_json("{}").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.rule, "B3/S23");
        assert_eq!((config.width, config.height), (200, 200));
    }

    #[test]
    fn test_partial_json() {
        let config = SimulationConfig::from_json(
            r#"{ "width": 40, "height": 30, "rule": "B36/S23",
                 "neighborhood": "von_neumann", "kernel_size": 5,
                 "boundary": "zero_padded", "seed": 9 }"#,
        )
        .unwrap();
        assert_eq!(config.width, 40);
        assert_eq!(config.neighborhood, Neighborhood::VonNeumann);
        assert_eq!(config.boundary, Boundary::ZeroPadded);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.density, 0.15);
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            SimulationConfig::from_json("{ \"width\": -1 }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = SimulationConfig {
            pattern: Some("Glider".into()),
            ..SimulationConfig::default()
        };
        let text = config.to_json().unwrap();
        assert_eq!(SimulationConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn test_build_seeded() {
        let config = SimulationConfig {
            width: 30,
            height: 20,
            seed: Some(5),
            ..SimulationConfig::default()
        };
        let a = config.build().unwrap();
        let b = config.build().unwrap();
        assert_eq!(a.initial(), b.initial());
        assert_eq!(a.initial().width(), 30);
    }

    #[test]
    fn test_build_with_pattern() {
        let config = SimulationConfig {
            width: 10,
            height: 10,
            pattern: Some("blinker".into()),
            ..SimulationConfig::default()
        };
        let sim = config.build().unwrap();
        assert_eq!(sim.initial().live_count(), 3);
    }

    #[test]
    fn test_build_rejects_bad_setup() {
        let unknown = SimulationConfig {
            pattern: Some("nope".into()),
            ..SimulationConfig::default()
        };
        assert!(matches!(unknown.build(), Err(ConfigError::UnknownPattern(_))));

        let even_kernel = SimulationConfig {
            kernel_size: 4,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            even_kernel.build(),
            Err(ConfigError::Automaton(AutomatonError::InvalidKernelSize { size: 4 }))
        ));

        let strict_empty = SimulationConfig {
            rule: "B/S".into(),
            allow_empty_rule: false,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            strict_empty.build(),
            Err(ConfigError::Automaton(AutomatonError::EmptyRule { .. }))
        ));

        let dense = SimulationConfig {
            density: 2.0,
            seed: Some(1),
            ..SimulationConfig::default()
        };
        assert!(matches!(
            dense.build(),
            Err(ConfigError::Automaton(AutomatonError::InvalidDensity(_)))
        ));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let config = SimulationConfig::from_json(
            r#"{ "width": 18446744073709551615, "height": 2, "seed": 1 }"#,
        )
        .unwrap();
        assert!(matches!(
            config.initial_grid(),
            Err(ConfigError::Automaton(AutomatonError::DimensionMismatch { height: 2, .. }))
        ));

        let with_pattern = SimulationConfig {
            pattern: Some("Glider".into()),
            ..config
        };
        assert!(matches!(
            with_pattern.build(),
            Err(ConfigError::Automaton(AutomatonError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
