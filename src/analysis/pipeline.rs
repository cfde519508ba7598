use log::{error, info};
use std::time::Instant;

use super::dedup::dedup_events;
use super::detector::detect_candidates;
use super::features::{analyze_windows, extract_windows};
use super::parser::{parse_csv, ParseStats};
use super::params::AnalysisParams;
use crate::error::AnalysisError;
use crate::types::{
    AnalysisInfo, AnalysisResult, ImuSeries, Statistics, StrokeData, StrokeFeatures, StrokeWindow,
};

pub const METHOD: &str = "tennis_stroke_detection";

/// Everything one run produces, before it is shaped into a result.
#[derive(Debug, Clone)]
pub struct StrokeAnalysis {
    pub total_samples: usize,
    pub parse_stats: ParseStats,
    /// Detector output before deduplication.
    pub candidates: Vec<usize>,
    pub events: Vec<usize>,
    pub windows: Vec<StrokeWindow>,
    pub features: Vec<StrokeFeatures>,
}

/// Runs detection, deduplication and feature extraction on an already
/// parsed series.
pub fn analyze_series(series: &ImuSeries, params: &AnalysisParams) -> Result<StrokeAnalysis, AnalysisError> {
    if series.is_empty() || series.acc.len() != series.gyro.len() {
        return Err(AnalysisError::NoData);
    }

    let candidates = detect_candidates(
        &series.acc,
        &series.gyro,
        params.threshold,
        params.sign_change_radius,
    );
    info!("Detected {} raw stroke candidates", candidates.len());

    let events = dedup_events(&candidates, params.min_gap);
    info!("{} stroke events remain after deduplication", events.len());

    let windows = extract_windows(series, &events, params.window_len);
    let features = analyze_windows(&windows);
    info!("{} stroke windows fit inside the series", windows.len());

    Ok(StrokeAnalysis {
        total_samples: series.len(),
        parse_stats: ParseStats {
            data_lines: series.len(),
            parsed_rows: series.len(),
            skipped_rows: 0,
        },
        candidates,
        events,
        windows,
        features,
    })
}

/// Parses CSV text and runs the full pipeline.
pub fn run_pipeline(csv_content: &str, params: &AnalysisParams) -> Result<StrokeAnalysis, AnalysisError> {
    let parsed = parse_csv(csv_content)?;
    if parsed.series.is_empty() {
        return Err(AnalysisError::NoData);
    }
    info!("Loaded {} samples", parsed.series.len());

    let mut analysis = analyze_series(&parsed.series, params)?;
    analysis.parse_stats = parsed.stats;
    Ok(analysis)
}

/// Mean distance between consecutive events, in seconds.
pub fn average_interval_seconds(events: &[usize], sampling_rate_hz: f64) -> Option<f64> {
    if events.len() < 2 {
        return None;
    }
    let total: usize = events.windows(2).map(|w| w[1] - w[0]).sum();
    let mean = total as f64 / (events.len() - 1) as f64;
    Some(mean / sampling_rate_hz)
}

impl StrokeAnalysis {
    pub fn statistics(&self, params: &AnalysisParams) -> Statistics {
        Statistics {
            total_data_points: self.total_samples,
            parsed_rows: self.parse_stats.parsed_rows,
            skipped_rows: self.parse_stats.skipped_rows,
            data_duration_seconds: self.total_samples as f64 / params.sampling_rate_hz,
            average_interval_seconds: average_interval_seconds(&self.events, params.sampling_rate_hz),
        }
    }

    pub fn into_data(self, params: &AnalysisParams) -> StrokeData {
        let statistics = self.statistics(params);
        StrokeData {
            strokes_detected: self.events.len(),
            timestamps: self.events,
            stroke_analysis: self.features,
            windows: if params.include_windows {
                Some(self.windows)
            } else {
                None
            },
            statistics,
        }
    }
}

fn analysis_info(params: &AnalysisParams, started: Instant) -> AnalysisInfo {
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    AnalysisInfo {
        method: METHOD.to_string(),
        threshold_used: params.threshold,
        window_size: params.window_len,
        min_gap: params.min_gap,
        sampling_rate_hz: params.sampling_rate_hz,
        processing_time_ms: (elapsed_ms * 100.0).round() / 100.0,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Shapes a finished run into a success result; `started` is when the run began.
pub fn build_result(analysis: StrokeAnalysis, params: &AnalysisParams, started: Instant) -> AnalysisResult {
    let data = analysis.into_data(params);
    AnalysisResult::success(data, analysis_info(params, started))
}

/// Failed result for a pipeline error.
pub fn failure_result(e: &AnalysisError) -> AnalysisResult {
    error!("Stroke analysis failed: {}", e);
    AnalysisResult::error(format!("Stroke analysis failed: {}", e))
}

/// Pipeline boundary: every failure comes back as a failed result.
pub fn analyze_csv_content(csv_content: &str, params: &AnalysisParams) -> AnalysisResult {
    let started = Instant::now();

    match run_pipeline(csv_content, params) {
        Ok(analysis) => build_result(analysis, params, started),
        Err(e) => failure_result(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_interval() {
        assert_eq!(average_interval_seconds(&[], 5.0), None);
        assert_eq!(average_interval_seconds(&[10], 5.0), None);
        assert_eq!(average_interval_seconds(&[10, 110, 160], 5.0), Some(15.0));
        assert_eq!(average_interval_seconds(&[0, 100], 100.0), Some(1.0));
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let err = analyze_series(&ImuSeries::default(), &AnalysisParams::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoData));
    }

    #[test]
    fn test_mismatched_series_is_no_data() {
        let series = ImuSeries::new(vec![[0.0; 3]; 3], vec![[0.0; 3]; 2]);
        assert!(analyze_series(&series, &AnalysisParams::default()).is_err());
    }

    #[test]
    fn test_header_only_fails() {
        let result = analyze_csv_content("AX,AY,AZ,GX,GY,GZ\n", &AnalysisParams::default());
        assert!(!result.success);
        assert!(result.error.unwrap().contains("no valid data"));
        assert!(result.data.is_none());
    }

    #[test]
    fn test_failure_result_matches_boundary() {
        let csv = "AX,AY,AZ,GX,GZ\n1,2,3,4,5\n";
        let err = run_pipeline(csv, &AnalysisParams::default()).unwrap_err();
        let direct = failure_result(&err);
        let boundary = analyze_csv_content(csv, &AnalysisParams::default());

        assert!(!direct.success);
        assert_eq!(direct.error, boundary.error);
        assert_eq!(direct.error.as_deref(), Some("Stroke analysis failed: missing required columns: GY"));
    }

    #[test]
    fn test_statistics_use_sampling_rate() {
        let series = ImuSeries::new(vec![[1.0; 3]; 50], vec![[1.0; 3]; 50]);
        let params = AnalysisParams::default().with_sampling_rate(10.0);
        let analysis = analyze_series(&series, &params).unwrap();
        let stats = analysis.statistics(&params);
        assert_eq!(stats.total_data_points, 50);
        assert!((stats.data_duration_seconds - 5.0).abs() < 1e-12);
        assert_eq!(stats.average_interval_seconds, None);
    }
}
