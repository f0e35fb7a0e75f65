use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::Result;
use pulse_types::{SeriesKey, TimeSeriesFilter, TimeSeriesPoint};

pub mod influx;
pub mod memory;
pub mod timescale;

pub use influx::InfluxBackend;
pub use memory::MemoryBackend;
pub use timescale::TimescaleBackend;

/// 时序存储后端抽象 trait
///
/// 查询解析器只依赖三种后端能力：按时间范围扫描、字段投影、
/// 分钟级数据点写入；桶聚合在解析器内完成，不假设后端支持。
#[async_trait]
pub trait SeriesBackend: Send + Sync {
    /// 写入单个数据点（分钟分辨率）
    async fn write_point(&self, key: &SeriesKey, point: &TimeSeriesPoint) -> Result<()>;

    /// 批量写入
    ///
    /// 默认实现为逐个写入，具体后端可以优化为真正的批量操作
    async fn write_points(&self, key: &SeriesKey, points: &[TimeSeriesPoint]) -> Result<()> {
        for point in points {
            self.write_point(key, point).await?;
        }
        Ok(())
    }

    /// 按 [from, to) 半开区间扫描原始数据点，按时间升序返回
    ///
    /// projection 存在时只返回其中列出的字段。
    /// 序列无数据属于正常的空结果，不是错误。
    async fn scan_range(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        projection: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>>;

    /// 后端类型标识
    fn backend_type(&self) -> &str;
}
