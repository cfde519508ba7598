//! Tennis stroke detection for tri-axial IMU recordings.
//!
//! CSV text goes in, a tagged [`AnalysisResult`] comes out:
//!
//! ```no_run
//! use stroke_hub::{analyze_csv_content, AnalysisParams};
//!
//! let csv = std::fs::read_to_string("session.csv").unwrap();
//! let result = analyze_csv_content(&csv, &AnalysisParams::default());
//! println!("{} strokes", result.strokes_detected());
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod jobs;
pub mod logger;
pub mod types;
pub mod utils;

pub use analysis::{analyze_csv_content, AnalysisParams};
pub use config::{AppConfig, ConfigError};
pub use error::{AnalysisError, RequestError};
pub use types::{AnalysisResult, ImuSeries, StrokeFeatures, StrokeType, StrokeWindow};
