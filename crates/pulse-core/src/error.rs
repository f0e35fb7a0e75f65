use chrono::{DateTime, Utc};
use thiserror::Error;

/// PULSE 统一错误类型
///
/// 空结果专属于「查询成功但区间内无数据」；
/// 后端故障永远不会被伪装成空序列返回。
#[derive(Error, Debug)]
pub enum PulseError {
    #[error("Unknown series: {0}")]
    UnknownSeries(String),

    #[error("Invalid range: from {from} is after to {to}")]
    InvalidRange {
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    },

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Query cancelled: {0}")]
    Cancelled(String),

    #[error("Not implemented: {0}")]
    NotImplemented(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PulseError {
    /// 是否为可有界重试的瞬时错误
    pub fn is_retryable(&self) -> bool {
        matches!(self, PulseError::BackendUnavailable(_))
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, PulseError>;
