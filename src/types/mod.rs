pub mod sample;
pub mod stroke;
pub mod results;
pub mod tasks;

pub use sample::{magnitude, Channel, ColumnMapping, ImuSeries, Vec3};
pub use stroke::{StrokeFeatures, StrokeType, StrokeWindow};
pub use results::{AnalysisInfo, AnalysisResult, BatchSummary, FileOutcome, Statistics, StrokeData};
pub use tasks::{AnalysisRequest, AnalysisTask};
