use crate::backend::SeriesBackend;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::{PulseError, Result};
use pulse_types::{SeriesKey, TimeSeriesFilter, TimeSeriesPoint};
use tracing::warn;

/// InfluxDB 后端占位实现
///
/// 早期版本的 Influx 写入路径是一个静默丢数据的空实现；
/// 这里收紧为每次调用都显式返回 NotImplemented，绝不默默接受写入。
pub struct InfluxBackend;

impl InfluxBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InfluxBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SeriesBackend for InfluxBackend {
    async fn write_point(&self, key: &SeriesKey, _point: &TimeSeriesPoint) -> Result<()> {
        warn!(series = %key, "InfluxDB backend is not implemented, rejecting write");
        Err(PulseError::NotImplemented(
            "InfluxDB backend: write_point".to_string(),
        ))
    }

    async fn scan_range(
        &self,
        key: &SeriesKey,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
        _projection: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        warn!(series = %key, "InfluxDB backend is not implemented, rejecting scan");
        Err(PulseError::NotImplemented(
            "InfluxDB backend: scan_range".to_string(),
        ))
    }

    fn backend_type(&self) -> &str {
        "influxdb"
    }
}
