use async_trait::async_trait;
use pulse_core::{PulseError, Result, SeriesRegistry};
use pulse_storage::SeriesBackend;
use pulse_types::{Granularity, SeriesKey, TimeSeriesPoint};
use std::sync::Arc;
use tracing::debug;

/// 写入服务 trait
///
/// 每次调用写入一个分钟分辨率的数据点；
/// 更粗粒度的值由查询侧按序列模式聚合得出。
#[async_trait]
pub trait IngestService: Send + Sync {
    /// 写入单个数据点
    async fn ingest(&self, key: &SeriesKey, point: TimeSeriesPoint) -> Result<()>;

    /// 批量写入（默认逐个写入）
    async fn ingest_batch(&self, key: &SeriesKey, points: Vec<TimeSeriesPoint>) -> Result<()> {
        for point in points {
            self.ingest(key, point).await?;
        }
        Ok(())
    }
}

/// 标准写入实现
///
/// 序列必须先注册；时间戳落盘前向下取整到分钟。
/// 不带缓存层，写入可见性与后端一致。
pub struct SeriesIngestor {
    registry: Arc<SeriesRegistry>,
    backend: Arc<dyn SeriesBackend>,
}

impl SeriesIngestor {
    pub fn new(registry: Arc<SeriesRegistry>, backend: Arc<dyn SeriesBackend>) -> Self {
        Self { registry, backend }
    }
}

#[async_trait]
impl IngestService for SeriesIngestor {
    async fn ingest(&self, key: &SeriesKey, point: TimeSeriesPoint) -> Result<()> {
        if !self.registry.contains(key).await {
            return Err(PulseError::UnknownSeries(key.to_string()));
        }

        if point.is_empty() {
            return Err(PulseError::InvalidInput(format!(
                "point for {} has no fields",
                key
            )));
        }

        let point = TimeSeriesPoint {
            timestamp: Granularity::Minute.bucket_start(point.timestamp),
            fields: point.fields,
        };

        self.backend.write_point(key, &point).await?;

        debug!(
            series = %key,
            timestamp = %point.timestamp,
            fields = point.fields.len(),
            "Point ingested"
        );

        Ok(())
    }

    /// 批量写入走后端的批量接口，校验与取整逻辑同单点写入
    async fn ingest_batch(&self, key: &SeriesKey, points: Vec<TimeSeriesPoint>) -> Result<()> {
        if !self.registry.contains(key).await {
            return Err(PulseError::UnknownSeries(key.to_string()));
        }

        let mut floored = Vec::with_capacity(points.len());
        for point in points {
            if point.is_empty() {
                return Err(PulseError::InvalidInput(format!(
                    "point for {} has no fields",
                    key
                )));
            }
            floored.push(TimeSeriesPoint {
                timestamp: Granularity::Minute.bucket_start(point.timestamp),
                fields: point.fields,
            });
        }

        self.backend.write_points(key, &floored).await?;

        debug!(series = %key, count = floored.len(), "Batch ingested");
        Ok(())
    }
}
