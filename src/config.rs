//! Tolerances and solver options
//!
//! The defaults suit pixel-space stages up to a few tens of thousands of
//! pixels. Projects can override them from a JSON file.

use crate::error::ConfigError;
use crate::warp::project::W_EPSILON;
use crate::warp::validate::DEFAULT_EPSILON;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

fn default_w_epsilon() -> f64 {
    W_EPSILON
}

fn default_verify_solution() -> bool {
    cfg!(debug_assertions)
}

fn default_consistency_tolerance() -> f64 {
    1e-6
}

/// Options shared by the validator, solver and projector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Validator tolerance for collinearity, area and edge crossings
    #[serde(rename = "epsilon", default = "default_epsilon")]
    pub epsilon: f64,

    /// Smallest |w| the projector divides by
    #[serde(rename = "wEpsilon", default = "default_w_epsilon")]
    pub w_epsilon: f64,

    /// Re-project the canonical corners after every solve
    #[serde(rename = "verifySolution", default = "default_verify_solution")]
    pub verify_solution: bool,

    /// Allowed corner miss for the re-projection check, relative to the
    /// corner's magnitude once that exceeds 1
    #[serde(rename = "consistencyTolerance", default = "default_consistency_tolerance")]
    pub consistency_tolerance: f64,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            w_epsilon: default_w_epsilon(),
            verify_solution: default_verify_solution(),
            consistency_tolerance: default_consistency_tolerance(),
        }
    }
}

impl MappingConfig {
    /// Reject tolerances that would disable or invert the checks
    pub fn sanitize(&self) -> Result<(), ConfigError> {
        let fields = [
            ("epsilon", self.epsilon),
            ("wEpsilon", self.w_epsilon),
            ("consistencyTolerance", self.consistency_tolerance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.sanitize()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded mapping config from {:?}", path);
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved mapping config to {:?}", path);
        Ok(())
    }
}
