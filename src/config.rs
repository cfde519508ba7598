use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::analysis::params::{
    AnalysisParams, DEFAULT_MIN_GAP, DEFAULT_SAMPLING_RATE_HZ, DEFAULT_SIGN_CHANGE_RADIUS,
    DEFAULT_THRESHOLD, DEFAULT_WINDOW_LEN,
};

/// 应用配置管理模块
/// 集中管理所有配置项，提供默认值和配置验证

/// 主配置结构
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub batch: BatchConfig,
    pub logging: LoggingConfig,
}

/// 击球检测参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub threshold: f64,
    pub window_len: usize,
    pub min_gap: usize,
    pub sampling_rate_hz: f64,
    pub sign_change_radius: usize,
    pub include_windows: bool,
}

/// 批量分析配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub workers: usize,
    pub queue_capacity: usize,
    pub output_suffix: String,
    pub poll_interval_ms: u64,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub color: bool,
}

impl Default for AnalysisConfig {
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

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            queue_capacity: 64,
            output_suffix: "_analysis.json".to_string(),
            poll_interval_ms: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            color: true,
        }
    }
}

impl AppConfig {
    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;

        let config: AppConfig = toml::from_str(&content).map_err(ConfigError::ParseError)?;

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// Applies `STROKE_*` variables from the process environment (and `.env`).
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        dotenv::dotenv().ok(); // 加载 .env 文件

        if let Some(v) = env_value::<f64>("STROKE_THRESHOLD")? {
            self.analysis.threshold = v;
        }
        if let Some(v) = env_value::<usize>("STROKE_WINDOW_LEN")? {
            self.analysis.window_len = v;
        }
        if let Some(v) = env_value::<usize>("STROKE_MIN_GAP")? {
            self.analysis.min_gap = v;
        }
        if let Some(v) = env_value::<f64>("STROKE_SAMPLING_RATE")? {
            self.analysis.sampling_rate_hz = v;
        }

        self.validate()
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analysis_params()
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.batch.workers == 0 {
            return Err(ConfigError::ValidationError("Batch workers must be at least 1".to_string()));
        }

        if self.batch.queue_capacity == 0 {
            return Err(ConfigError::ValidationError("Batch queue capacity must be positive".to_string()));
        }

        if self.batch.output_suffix.is_empty() {
            return Err(ConfigError::ValidationError("Output suffix must not be empty".to_string()));
        }

        Ok(())
    }

    pub fn analysis_params(&self) -> AnalysisParams {
        AnalysisParams::from(&self.analysis)
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::ValidationError(format!("{} has an invalid value: {}", key, raw))),
        Err(_) => Ok(None),
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
