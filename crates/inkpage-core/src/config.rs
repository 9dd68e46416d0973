//! Engine configuration.

use crate::history::MAX_UNDO_HISTORY;
use crate::lasso::LASSO_PICK_RADIUS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default ink colors for the `1`–`3` slots.
pub const DEFAULT_COLOR_SLOTS: [&str; 3] = ["#1e1e1e", "#e03131", "#1971c2"];

/// Default widths cycled with `[` and `]`.
pub const DEFAULT_WIDTH_SLOTS: [f64; 3] = [2.0, 4.0, 8.0];

/// Contact size above which a touch is treated as a palm.
pub const DEFAULT_PALM_RADIUS: f64 = 30.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for input handling, tools and history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Multiplier applied to reported pen pressure.
    pub pressure_sensitivity: f64,
    pub palm_rejection: bool,
    pub palm_radius_threshold: f64,
    /// Moving-average smoothing of stroke positions before outlining.
    pub smoothing: bool,
    pub color_slots: Vec<String>,
    pub width_slots: Vec<f64>,
    /// Distance from a selected stroke's points that starts a drag.
    pub lasso_pick_radius: f64,
    /// Maximum number of undo snapshots.
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pressure_sensitivity: 1.0,
            palm_rejection: true,
            palm_radius_threshold: DEFAULT_PALM_RADIUS,
            smoothing: true,
            color_slots: DEFAULT_COLOR_SLOTS.iter().map(|c| c.to_string()).collect(),
            width_slots: DEFAULT_WIDTH_SLOTS.to_vec(),
            lasso_pick_radius: LASSO_PICK_RADIUS,
            history_limit: MAX_UNDO_HISTORY,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.pressure_sensitivity > 0.0 && self.pressure_sensitivity.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "pressureSensitivity must be positive, got {}",
                self.pressure_sensitivity
            )));
        }
        if !(self.palm_radius_threshold > 0.0) {
            return Err(ConfigError::Invalid(
                "palmRadiusThreshold must be positive".to_string(),
            ));
        }
        if self.color_slots.is_empty() {
            return Err(ConfigError::Invalid("colorSlots is empty".to_string()));
        }
        if self.width_slots.is_empty() {
            return Err(ConfigError::Invalid("widthSlots is empty".to_string()));
        }
        if let Some(width) = self.width_slots.iter().find(|w| !(**w > 0.0)) {
            return Err(ConfigError::Invalid(format!(
                "widthSlots must be positive, got {}",
                width
            )));
        }
        if self.lasso_pick_radius < 0.0 {
            return Err(ConfigError::Invalid(
                "lassoPickRadius must not be negative".to_string(),
            ));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("historyLimit must be at least 1".to_string()));
        }
        Ok(())
    }
}
