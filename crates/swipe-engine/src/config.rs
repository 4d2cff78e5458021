use crate::error::{SwipeError, SwipeResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for normalization, scoring and pruning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Number of points in every normalized and ideal path.
    pub sample_points: usize,
    /// Moving-average window over raw samples; 0 or 1 disables smoothing.
    pub smoothing_window: usize,
    pub shape_weight: f64,
    pub location_weight: f64,
    /// Keys whose centre lies within `nearest + start_tolerance` of the
    /// start point are admitted as first letters.
    pub start_tolerance: f64,
    pub default_pop_weight: f64,
    pub prune: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            sample_points: 64,
            smoothing_window: 3,
            shape_weight: 1.0,
            location_weight: 1.0,
            start_tolerance: 0.5,
            default_pop_weight: 0.25,
            prune: true,
        }
    }
}

impl ScoringConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SwipeResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SwipeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ScoringConfig = serde_json::from_str(&content)?;
        Ok(config.sanitized())
    }

    /// Clamp fields into the ranges the scorer relies on.
    pub fn sanitized(mut self) -> Self {
        self.sample_points = self.sample_points.max(2);
        self.shape_weight = non_negative(self.shape_weight, 1.0);
        self.location_weight = non_negative(self.location_weight, 1.0);
        self.start_tolerance = non_negative(self.start_tolerance, 0.5);
        self.default_pop_weight = clamp_pop_weight(self.default_pop_weight);
        self
    }
}

fn non_negative(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        fallback
    }
}

/// Blend factor clamp: out-of-range values saturate, NaN maps to 0.
pub fn clamp_pop_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}
