use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::stroke::{StrokeFeatures, StrokeWindow};

/// Tagged outcome of one analysis call. Failures are data, never panics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<StrokeData>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub analysis_info: Option<AnalysisInfo>,
    pub timestamp: String,
}

impl AnalysisResult {
    pub fn success(data: StrokeData, analysis_info: AnalysisInfo) -> Self {
        Self {
            success: true,
            message: Some("Tennis stroke analysis completed".to_string()),
            error: None,
            data: Some(data),
            analysis_info: Some(analysis_info),
            timestamp: now_iso(),
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error),
            data: None,
            analysis_info: None,
            timestamp: now_iso(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn strokes_detected(&self) -> usize {
        self.data.as_ref().map(|d| d.strokes_detected).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeData {
    pub strokes_detected: usize,
    /// Deduplicated event indices.
    pub timestamps: Vec<usize>,
    pub stroke_analysis: Vec<StrokeFeatures>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub windows: Option<Vec<StrokeWindow>>,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_data_points: usize,
    pub parsed_rows: usize,
    pub skipped_rows: usize,
    pub data_duration_seconds: f64,
    /// `None` when fewer than two events survive.
    pub average_interval_seconds: Option<f64>,
}

/// Echo of the parameters used plus run metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisInfo {
    pub method: String,
    pub threshold_used: f64,
    pub window_size: usize,
    pub min_gap: usize,
    pub sampling_rate_hz: f64,
    pub processing_time_ms: f64,
    pub version: String,
}

/// Outcome for one file of a batch run
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub strokes_detected: usize,
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a batch run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub success_count: usize,
    pub error_count: usize,
    pub message: String,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    pub fn from_outcomes(mut outcomes: Vec<FileOutcome>) -> Self {
        outcomes.sort_by(|a, b| a.input.cmp(&b.input));
        let success_count = outcomes.iter().filter(|o| o.is_success()).count();
        let error_count = outcomes.len() - success_count;
        Self {
            success_count,
            error_count,
            message: format!(
                "Batch analysis completed: {} succeeded, {} failed",
                success_count, error_count
            ),
            outcomes,
        }
    }

    pub fn no_data() -> Self {
        Self {
            success_count: 0,
            error_count: 0,
            message: "No CSV recordings to analyze".to_string(),
            outcomes: Vec::new(),
        }
    }
}

fn now_iso() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
