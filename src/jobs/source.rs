use log::{error, info, warn};
use std::path::Path;

use crate::analysis::{analyze_csv_content, AnalysisParams};
use crate::error::{AnalysisError, RequestError};
use crate::types::{AnalysisRequest, AnalysisResult};

pub fn read_csv_file(path: &Path) -> Result<String, AnalysisError> {
    let content = std::fs::read_to_string(path)?;
    info!("Read {} ({} bytes)", path.display(), content.len());
    Ok(content)
}

/// Failed result for a file that could not be read.
pub fn read_failure(path: &Path, e: &AnalysisError) -> AnalysisResult {
    error!("Failed to read {}: {}", path.display(), e);
    AnalysisResult::error(format!("Failed to read {}: {}", path.display(), e))
}

/// File adapter: an unreadable file is reported as a failed result.
pub fn analyze_csv_file(path: &Path, params: &AnalysisParams) -> AnalysisResult {
    match read_csv_file(path) {
        Ok(content) => analyze_csv_content(&content, params),
        Err(e) => read_failure(path, &e),
    }
}

impl AnalysisRequest {
    pub fn from_json(payload: &[u8]) -> Result<Self, RequestError> {
        let payload_str = std::str::from_utf8(payload)?;
        let request: AnalysisRequest = serde_json::from_str(payload_str)?;
        if request.csv_content.is_none() {
            return Err(RequestError::MissingCsvContent);
        }
        Ok(request)
    }

    pub fn csv_content(&self) -> Result<&str, RequestError> {
        self.csv_content.as_deref().ok_or(RequestError::MissingCsvContent)
    }

    /// Request overrides layered on top of `base`.
    pub fn params(&self, base: &AnalysisParams) -> AnalysisParams {
        let mut params = base.clone();
        if let Some(threshold) = self.threshold {
            params.threshold = threshold;
        }
        if let Some(slice_len) = self.slice_len {
            params.window_len = slice_len;
        }
        if let Some(min_gap) = self.min_gap {
            params.min_gap = min_gap;
        }
        params
    }
}

/// Request-body adapter. Malformed bodies and rejected parameters come back
/// as failed results.
pub fn handle_request_body(payload: &[u8], base: &AnalysisParams) -> AnalysisResult {
    let request = match AnalysisRequest::from_json(payload) {
        Ok(request) => request,
        Err(e) => {
            warn!("Invalid analysis request: {}", e);
            return AnalysisResult::error(format!("Invalid request: {}", e));
        }
    };

    let params = request.params(base);
    if let Err(e) = params.validate() {
        warn!("Rejected request parameters: {}", e);
        return AnalysisResult::error(e.to_string());
    }

    match request.csv_content() {
        Ok(csv_content) => {
            info!(
                "Analyzing request from {} ({} chars, threshold={}, slice_len={})",
                request.device_name.as_deref().unwrap_or("unknown"),
                csv_content.len(),
                params.threshold,
                params.window_len
            );
            analyze_csv_content(csv_content, &params)
        }
        Err(e) => AnalysisResult::error(format!("Invalid request: {}", e)),
    }
}
