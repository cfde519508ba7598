use crate::types::Channel;

/// Errors raised inside the analysis pipeline. They are turned into a failed
/// `AnalysisResult` at the pipeline boundary.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("no valid data in CSV")]
    NoData,
    #[error("missing required columns: {}", join_channels(.0))]
    MissingColumns(Vec<Channel>),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors decoding a JSON request body.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no CSV content provided")]
    MissingCsvContent,
}

fn join_channels(channels: &[Channel]) -> String {
    channels
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_message_names_channels() {
        let err = AnalysisError::MissingColumns(vec![Channel::GX, Channel::GZ]);
        assert_eq!(err.to_string(), "missing required columns: GX, GZ");
    }
}
