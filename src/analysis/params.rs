use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

pub const DEFAULT_THRESHOLD: f64 = 300.0;
pub const DEFAULT_WINDOW_LEN: usize = 200;
pub const DEFAULT_MIN_GAP: usize = 75;
pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 5.0;
pub const DEFAULT_SIGN_CHANGE_RADIUS: usize = 3;

/// Per-call analysis parameters. Passed by value into every run; there is no
/// shared analyzer state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Gyro sample-to-sample jump that marks a candidate, in gyro units.
    pub threshold: f64,
    /// Samples per extracted window; expected to be even.
    pub window_len: usize,
    /// Minimum index distance between two kept events.
    pub min_gap: usize,
    /// Used only to convert sample counts into seconds.
    pub sampling_rate_hz: f64,
    /// Neighbourhood searched for sign reversals around a candidate.
    pub sign_change_radius: usize,
    pub include_windows: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window_len: DEFAULT_WINDOW_LEN,
            min_gap: DEFAULT_MIN_GAP,
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
            sign_change_radius: DEFAULT_SIGN_CHANGE_RADIUS,
            include_windows: false,
        }
    }
}

impl From<&AnalysisConfig> for AnalysisParams {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            threshold: config.threshold,
            window_len: config.window_len,
            min_gap: config.min_gap,
            sampling_rate_hz: config.sampling_rate_hz,
            sign_change_radius: config.sign_change_radius,
            include_windows: config.include_windows,
        }
    }
}

impl AnalysisParams {
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_window_len(mut self, window_len: usize) -> Self {
        self.window_len = window_len;
        self
    }

    pub fn with_min_gap(mut self, min_gap: usize) -> Self {
        self.min_gap = min_gap;
        self
    }

    pub fn with_sampling_rate(mut self, sampling_rate_hz: f64) -> Self {
        self.sampling_rate_hz = sampling_rate_hz;
        self
    }

    pub fn with_windows(mut self, include_windows: bool) -> Self {
        self.include_windows = include_windows;
        self
    }

    /// Checks done at the caller boundary (config load, request decoding).
    /// The pipeline itself runs with whatever it is given.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "threshold must be a positive number, got {}",
                self.threshold
            )));
        }
        if self.window_len == 0 || self.window_len % 2 != 0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "window length must be a positive even number, got {}",
                self.window_len
            )));
        }
        if self.min_gap == 0 {
            return Err(AnalysisError::InvalidParameter(
                "minimum gap must be positive".to_string(),
            ));
        }
        if !self.sampling_rate_hz.is_finite() || self.sampling_rate_hz <= 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "sampling rate must be a positive number, got {}",
                self.sampling_rate_hz
            )));
        }
        if self.sign_change_radius == 0 {
            return Err(AnalysisError::InvalidParameter(
                "sign change radius must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = AnalysisParams::default();
        assert_eq!(params.threshold, 300.0);
        assert_eq!(params.window_len, 200);
        assert_eq!(params.min_gap, 75);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_odd_window_rejected() {
        let params = AnalysisParams::default().with_window_len(201);
        assert!(matches!(
            params.validate(),
            Err(AnalysisError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_zero_sign_change_radius_rejected() {
        let params = AnalysisParams {
            sign_change_radius: 0,
            ..AnalysisParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_non_finite_threshold_rejected() {
        assert!(AnalysisParams::default().with_threshold(f64::NAN).validate().is_err());
        assert!(AnalysisParams::default().with_threshold(-1.0).validate().is_err());
        assert!(AnalysisParams::default().with_sampling_rate(0.0).validate().is_err());
    }
}
