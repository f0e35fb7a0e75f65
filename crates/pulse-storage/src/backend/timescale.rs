use crate::backend::SeriesBackend;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pulse_core::{PulseError, Result};
use pulse_types::{SeriesKey, TimeSeriesFilter, TimeSeriesPoint};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// TimescaleDB 后端
///
/// 数据点落在 series_points 超表：时间戳 + 序列键 + JSONB 字段映射。
/// 所有数据库错误以 BackendUnavailable 上抛，调用方可有界重试。
pub struct TimescaleBackend {
    db: Arc<DatabaseConnection>,
}

impl TimescaleBackend {
    /// 连接 TimescaleDB
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = Database::connect(database_url)
            .await
            .map_err(Self::unavailable)?;

        info!(
            database_url = %database_url,
            "Connected to TimescaleDB"
        );

        Ok(Self { db: Arc::new(db) })
    }

    /// 初始化表结构（超表 + 序列键索引）
    pub async fn init_schema(&self) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS series_points (
                time TIMESTAMPTZ NOT NULL,
                series_name TEXT NOT NULL,
                series_kind TEXT,
                fields JSONB NOT NULL
            )
            "#
            .to_string(),
            "SELECT create_hypertable('series_points', 'time', if_not_exists => TRUE)"
                .to_string(),
            r#"
            CREATE INDEX IF NOT EXISTS idx_series_points_key
            ON series_points (series_name, series_kind, time DESC)
            "#
            .to_string(),
        ];

        for sql in statements {
            let stmt = Statement::from_string(sea_orm::DatabaseBackend::Postgres, sql);
            self.db.execute(stmt).await.map_err(Self::unavailable)?;
        }

        info!("TimescaleDB schema initialized");
        Ok(())
    }

    /// 获取数据库连接
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn unavailable(err: DbErr) -> PulseError {
        PulseError::BackendUnavailable(err.to_string())
    }
}

#[async_trait]
impl SeriesBackend for TimescaleBackend {
    async fn write_point(&self, key: &SeriesKey, point: &TimeSeriesPoint) -> Result<()> {
        let sql = r#"
            INSERT INTO series_points (time, series_name, series_kind, fields)
            VALUES ($1, $2, $3, $4)
            "#;

        let fields = serde_json::to_value(&point.fields)?;

        let stmt = Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            sql,
            vec![
                point.timestamp.into(),
                key.name.clone().into(),
                key.kind.clone().into(),
                fields.into(),
            ],
        );

        self.db.execute(stmt).await.map_err(Self::unavailable)?;

        debug!(
            series = %key,
            timestamp = %point.timestamp,
            "Point written to TimescaleDB"
        );

        Ok(())
    }

    async fn scan_range(
        &self,
        key: &SeriesKey,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        projection: Option<&TimeSeriesFilter>,
    ) -> Result<Vec<TimeSeriesPoint>> {
        let mut sql = String::from(
            "SELECT time, fields FROM series_points WHERE series_name = $1 AND time >= $2 AND time < $3",
        );

        let mut params: Vec<sea_orm::Value> =
            vec![key.name.clone().into(), from.into(), to.into()];

        match &key.kind {
            Some(kind) => {
                sql.push_str(" AND series_kind = $4");
                params.push(kind.clone().into());
            }
            None => sql.push_str(" AND series_kind IS NULL"),
        }

        sql.push_str(" ORDER BY time ASC");

        let stmt =
            Statement::from_sql_and_values(sea_orm::DatabaseBackend::Postgres, sql, params);

        let rows = self.db.query_all(stmt).await.map_err(Self::unavailable)?;

        let mut points = Vec::with_capacity(rows.len());
        for row in rows {
            let timestamp: DateTime<Utc> = row.try_get("", "time").map_err(Self::unavailable)?;
            let value: serde_json::Value =
                row.try_get("", "fields").map_err(Self::unavailable)?;
            let mut fields: HashMap<String, f64> = serde_json::from_value(value)?;

            if let Some(projection) = projection {
                fields.retain(|name, _| projection.contains(name));
            }

            points.push(TimeSeriesPoint { timestamp, fields });
        }

        debug!(
            series = %key,
            count = points.len(),
            "Scanned range from TimescaleDB"
        );

        Ok(points)
    }

    fn backend_type(&self) -> &str {
        "timescaledb"
    }
}
