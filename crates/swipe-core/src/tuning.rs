#![forbid(unsafe_code)]

//! Swipe thresholds as data.
//!
//! [`SwipeTuning`] groups every tunable parameter of the swipe resolver so a
//! host can load it from TOML or JSON at startup instead of recompiling.
//!
//! ```toml
//! touch_slop = 8.0
//! completion_ratio = 0.5
//! fling_velocity = 1000.0
//! release_threshold = 16.0
//! rubber_band_factor = 0.25
//! max_velocity_samples = 4
//! ```
//!
//! Missing keys take their default. Loaders validate after parsing, so a
//! successfully loaded tuning is always usable.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Upper bound on [`SwipeTuning::max_velocity_samples`].
pub const MAX_VELOCITY_SAMPLES: usize = 64;

/// Thresholds for swipe tracking and resolution.
///
/// Distances share the unit of [`ItemExtent`](crate::geometry::ItemExtent);
/// velocities are in that unit per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeTuning {
    /// Displacement the pointer must travel before the gesture locks onto an
    /// axis and slide reports begin.
    pub touch_slop: f32,
    /// Fraction of the item extent a release must strictly exceed to
    /// complete a swipe by distance.
    pub completion_ratio: f32,
    /// Release velocity along the locked axis that completes a swipe when
    /// strictly exceeded.
    pub fling_velocity: f32,
    /// Magnitude at or below which a release always cancels, fling or not.
    pub release_threshold: f32,
    /// Attenuation applied to drags into rubber-band directions.
    pub rubber_band_factor: f32,
    /// Number of recent pointer samples used for the velocity estimate.
    pub max_velocity_samples: usize,
}

impl Default for SwipeTuning {
    fn default() -> Self {
        Self {
            touch_slop: 8.0,
            completion_ratio: 0.5,
            fling_velocity: 1000.0,
            release_threshold: 16.0,
            rubber_band_factor: 0.25,
            max_velocity_samples: 4,
        }
    }
}

impl SwipeTuning {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SwipeTuningError> {
        let tuning: Self = toml::from_str(s)?;
        tuning.validated()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SwipeTuningError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, SwipeTuningError> {
        let tuning: Self = serde_json::from_str(s)?;
        tuning.validated()
    }

    /// Serialize to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, SwipeTuningError> {
        Ok(toml::to_string(self)?)
    }

    /// Distance a release must strictly exceed on an item of length `extent`.
    #[must_use]
    pub fn completion_distance(&self, extent: f32) -> f32 {
        extent * self.completion_ratio
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the tuning
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let non_negative = [
            ("touch_slop", self.touch_slop),
            ("fling_velocity", self.fling_velocity),
            ("release_threshold", self.release_threshold),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{field} must be finite and >= 0, got {value}"));
            }
        }

        if !(self.completion_ratio > 0.0 && self.completion_ratio <= 1.0) {
            errors.push(format!(
                "completion_ratio must be in (0, 1], got {}",
                self.completion_ratio
            ));
        }

        if !(0.0..=1.0).contains(&self.rubber_band_factor) {
            errors.push(format!(
                "rubber_band_factor must be in [0, 1], got {}",
                self.rubber_band_factor
            ));
        }

        if !(2..=MAX_VELOCITY_SAMPLES).contains(&self.max_velocity_samples) {
            errors.push(format!(
                "max_velocity_samples must be in [2, {MAX_VELOCITY_SAMPLES}], got {}",
                self.max_velocity_samples
            ));
        }

        errors
    }

    /// `self` if valid, otherwise the collected validation errors.
    pub fn validated(self) -> Result<Self, SwipeTuningError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SwipeTuningError::Validation(errors))
        }
    }
}

/// Errors from loading or validating a [`SwipeTuning`].
#[derive(Debug, thiserror::Error)]
pub enum SwipeTuningError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
