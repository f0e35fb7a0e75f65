use pulse_config::QueryGlobalConfig;
use std::time::Duration;

/// 查询执行选项
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// 单次后端调用超时
    pub timeout: Duration,

    /// 瞬时错误的最大尝试次数
    pub retry_attempts: u32,

    /// 重试间隔
    pub retry_backoff: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retry_attempts: 3,
            retry_backoff: Duration::from_millis(200),
        }
    }
}

impl QueryOptions {
    pub fn from_config(config: &QueryGlobalConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.timeout_secs),
            retry_attempts: config.retry_attempts,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }
}
