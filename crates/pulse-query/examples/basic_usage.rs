use chrono::{Duration, Utc};
use pulse_core::SeriesRegistry;
use pulse_ingest::{IngestService, SeriesIngestor};
use pulse_query::QueryResolver;
use pulse_storage::MemoryBackend;
use pulse_types::{FieldReduction, SeriesKey, SeriesSchema, TimeSeriesFilter, TimeSeriesPoint};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::fmt::init();

    println!("🚀 PULSE Query Example\n");

    // 注册序列：count 按 Sum 聚合，active_users 按 Last 聚合
    let registry = Arc::new(SeriesRegistry::new());
    let key = SeriesKey::new("page_views");
    registry
        .register(
            key.clone(),
            SeriesSchema::new(FieldReduction::Last).with_field("count", FieldReduction::Sum),
        )
        .await;
    println!("✅ Series registered\n");

    let backend = Arc::new(MemoryBackend::new());
    let ingestor = SeriesIngestor::new(registry.clone(), backend.clone());
    let resolver = QueryResolver::new(registry, backend);

    // 1. 写入一小时的分钟级数据
    println!("📊 Ingesting minute data...");
    let start = Utc::now() - Duration::hours(1);
    for i in 0..60 {
        let point = TimeSeriesPoint::new(start + Duration::minutes(i))
            .with_field("count", 2.0)
            .with_field("active_users", 100.0 + i as f64);
        ingestor.ingest(&key, point).await?;
    }
    println!("  ✓ 60 points ingested\n");

    // 2. 分钟粒度查询
    println!("🔍 Querying minutes...");
    let minutes = resolver
        .minutes(&key, start, start + Duration::hours(1), None)
        .await?;
    println!("  ✓ {} minute points\n", minutes.len());

    // 3. 小时粒度查询：count 求和，active_users 取最后值
    println!("🔍 Querying hours...");
    let hours = resolver
        .hours(&key, start, start + Duration::hours(1), None)
        .await?;
    for point in &hours {
        println!(
            "  ✓ {} count={:?} active_users={:?}",
            point.timestamp,
            point.field("count"),
            point.field("active_users")
        );
    }
    println!();

    // 4. 带字段过滤的查询
    println!("🔍 Querying with filter...");
    let filter = TimeSeriesFilter::new().with_field("count");
    let filtered = resolver
        .hours(&key, start, start + Duration::hours(1), Some(&filter))
        .await?;
    println!("  ✓ {} filtered points\n", filtered.len());

    // 5. 单点查询：区间内最新的原始点
    println!("🔍 Querying latest point...");
    match resolver
        .point(&key, start, start + Duration::hours(1))
        .await?
    {
        Some(point) => println!("  ✓ latest point at {}\n", point.timestamp),
        None => println!("  ✗ no data in range\n"),
    }

    println!("✨ Done");
    Ok(())
}
