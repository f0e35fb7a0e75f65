use crate::backend::SeriesBackend;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::Result;
use pulse_types::{SeriesKey, TimeSeriesFilter, TimeSeriesPoint};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;

/// 内存后端
///
/// 每个序列一棵按时间排序的 BTreeMap，同一分钟重复写入取最后一次。
/// 用于测试与嵌入式场景。
pub struct MemoryBackend {
    series: RwLock<HashMap<SeriesKey, BTreeMap<DateTime<Utc>, HashMap<String, f64>>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self {
            series: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SeriesBackend for MemoryBackend {
    async fn write_point(&self, key: &SeriesKey, point: &TimeSeriesPoint) -> Result<()> {
        let mut series = self.series.write().await;
        series
            .entry(key.clone())
            .or_default()
            .insert(point.timestamp, point.fields.clone());

        debug!(series = %key, timestamp = %point.timestamp, "Point written to memory backend");
        Ok(())
    }

    async fn scan_range(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        projection: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let series = self.series.read().await;

        let points = match series.get(key) {
            Some(tree) => tree
                .range(from..to)
                .map(|(timestamp, fields)| {
                    let mut fields = fields.clone();
                    if let Some(projection) = projection {
                        fields.retain(|name, _| projection.contains(name));
                    }
                    TimeSeriesPoint {
                        timestamp: *timestamp,
                        fields,
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        debug!(series = %key, count = points.len(), "Scanned range from memory backend");
        Ok(points)
    }

    fn backend_type(&self) -> &str {
        "memory"
    }
}
