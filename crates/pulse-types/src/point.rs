use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 时序数据点
///
/// 一个带时间戳的测量值集合，字段名映射到数值。
/// 查询返回的点是不可变的快照。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub fields: HashMap<String, f64>,
}

impl TimeSeriesPoint {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: f64) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// 读取单个字段值
    pub fn field(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    /// 字段集是否为空
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
