use serde::Deserialize;
use std::path::PathBuf;

use super::AnalysisResult;

/// Work item consumed by the analysis worker pool
#[derive(Clone, Debug)]
pub enum AnalysisTask {
    /// Analyze a CSV file on disk and write the JSON result to `output`.
    AnalyzeFile { input: PathBuf, output: PathBuf },
    /// Analyze CSV text already in memory (e.g. a request body) and hand the
    /// result back to the submitter.
    AnalyzeText {
        name: String,
        csv_content: String,
        response_sender: crossbeam_channel::Sender<AnalysisResult>,
    },
}

impl AnalysisTask {
    pub fn name(&self) -> String {
        match self {
            AnalysisTask::AnalyzeFile { input, .. } => input.display().to_string(),
            AnalysisTask::AnalyzeText { name, .. } => name.clone(),
        }
    }
}

/// JSON request body accepted by the text adapter.
/// 字段名与上传接口保持一致
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub csv_content: Option<String>,
    pub threshold: Option<f64>,
    pub slice_len: Option<usize>,
    pub min_gap: Option<usize>,
    #[serde(default)]
    pub device_name: Option<String>,
}
