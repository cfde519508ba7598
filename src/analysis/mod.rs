//! Stroke detection pipeline: parse -> detect -> dedup -> windows/features.
//! Every stage is a plain function over in-memory data.

pub mod parser;
pub mod detector;
pub mod dedup;
pub mod features;
pub mod params;
pub mod pipeline;

pub use parser::{map_columns, parse_csv, ParseStats, ParsedCsv};
pub use detector::detect_candidates;
pub use dedup::dedup_events;
pub use features::{analyze_windows, classify_stroke, extract_windows, window_features};
pub use params::AnalysisParams;
pub use pipeline::{analyze_csv_content, analyze_series, build_result, failure_result, run_pipeline, StrokeAnalysis};
