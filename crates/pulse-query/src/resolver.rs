use crate::bucket;
use crate::filter;
use crate::options::QueryOptions;
use chrono::{DateTime, Utc};
use pulse_core::{PulseError, Result, SeriesRegistry};
use pulse_storage::SeriesBackend;
use pulse_types::{Granularity, SeriesKey, SeriesSchema, TimeSeriesFilter, TimeSeriesPoint};
use std::sync::Arc;
use tracing::{debug, warn};

/// 多粒度时序查询解析器
///
/// 无状态、只读，各查询相互独立可并发执行。
/// 解析器不带缓存层，读到的数据新鲜度与底层后端一致，
/// 不在后端之上额外承诺写后读。
pub struct QueryResolver {
    registry: Arc<SeriesRegistry>,
    backend: Arc<dyn SeriesBackend>,
    options: QueryOptions,
}

impl QueryResolver {
    pub fn new(registry: Arc<SeriesRegistry>, backend: Arc<dyn SeriesBackend>) -> Self {
        Self::with_options(registry, backend, QueryOptions::default())
    }

    pub fn with_options(
        registry: Arc<SeriesRegistry>,
        backend: Arc<dyn SeriesBackend>,
        options: QueryOptions,
    ) -> Self {
        Self {
            registry,
            backend,
            options,
        }
    }

    /// 分钟粒度查询
    pub async fn minutes(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.query(key, Granularity::Minute, from, to, filter).await
    }

    /// 小时粒度查询
    pub async fn hours(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.query(key, Granularity::Hour, from, to, filter).await
    }

    /// 天粒度查询
    pub async fn days(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.query(key, Granularity::Day, from, to, filter).await
    }

    /// 月粒度查询（增量语义：每个点是该月内活动的累计量）
    pub async fn months(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.query(key, Granularity::Month, from, to, filter).await
    }

    /// 月快照查询（快照语义：每个点是该月末的状态）
    pub async fn months_snapshot(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.query(key, Granularity::MonthSnapshot, from, to, filter)
            .await
    }

    /// 年粒度查询
    pub async fn years(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        self.query(key, Granularity::Year, from, to, filter).await
    }

    /// 通用查询入口
    ///
    /// 结果按时间升序、无重复时间戳，所有点落在 [from, to) 内。
    pub async fn query(
        &self,
        key: &SeriesKey,
        granularity: Granularity,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let schema = self.validate(key, from, to).await?;
        if from == to {
            return Ok(Vec::new());
        }

        let raw = self.scan_with_retry(key, from, to, filter).await?;
        let mut points = bucket::aggregate(raw, granularity, &schema);

        // 区间未按桶对齐时，首个桶的起始时间可能早于 from；
        // 夹紧到区间左端，保证所有点落在 [from, to) 内。
        // 后续桶的起始时间都晚于 from，升序与唯一性不受影响。
        if let Some(first) = points.first_mut() {
            if first.timestamp < from {
                first.timestamp = from;
            }
        }

        if let Some(filter) = filter {
            points = filter::apply(points, filter);
        }

        debug!(
            series = %key,
            granularity = ?granularity,
            count = points.len(),
            "Query resolved"
        );

        Ok(points)
    }

    /// 仅按名称查询（旧 name-only 接口的视图）
    pub async fn query_by_name(
        &self,
        name: &str,
        granularity: Granularity,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        filter: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let (key, _) = self
            .registry
            .resolve_name(name)
            .await
            .ok_or_else(|| PulseError::UnknownSeries(name.to_string()))?;
        self.query(&key, granularity, from, to, filter).await
    }

    /// 单点查询
    ///
    /// 固定策略：返回 [from, to) 内时间戳最大的原始点（不过滤、不聚合）。
    /// 区间内无数据返回 Ok(None)，不是错误。
    pub async fn point(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Option<TimeSeriesPoint>> {
        self.validate(key, from, to).await?;
        if from == to {
            return Ok(None);
        }

        let raw = self.scan_with_retry(key, from, to, None).await?;
        Ok(raw.into_iter().max_by_key(|p| p.timestamp))
    }

    async fn validate(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<SeriesSchema> {
        if from > to {
            return Err(PulseError::InvalidRange { from, to });
        }

        self.registry
            .schema(key)
            .await
            .ok_or_else(|| PulseError::UnknownSeries(key.to_string()))
    }

    /// 带超时与有界重试的后端扫描
    ///
    /// 每次尝试受 options.timeout 约束，超时以 Cancelled 上抛且不重试；
    /// 瞬时后端错误最多尝试 retry_attempts 次，之后原样上抛。
    /// 结果要么完整要么失败，不返回截断的序列。
    async fn scan_with_retry(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        projection: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let mut attempt = 1;
        loop {
            let scan = self.backend.scan_range(key, from, to, projection);
            let result = match tokio::time::timeout(self.options.timeout, scan).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(PulseError::Cancelled(format!(
                        "query on {} timed out after {:?}",
                        key, self.options.timeout
                    )))
                }
            };

            match result {
                Ok(points) => return Ok(points),
                Err(err) if err.is_retryable() && attempt < self.options.retry_attempts => {
                    warn!(
                        series = %key,
                        attempt,
                        error = %err,
                        "Backend scan failed, retrying"
                    );
                    tokio::time::sleep(self.options.retry_backoff).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
