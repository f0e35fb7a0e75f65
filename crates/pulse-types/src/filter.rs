use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// 字段过滤器
///
/// 列出查询结果中需要保留的字段名；不传过滤器表示返回完整数据点。
/// 空过滤器不保留任何字段，等价于过滤掉所有点。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesFilter {
    pub fields: HashSet<String>,
}

impl TimeSeriesFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.fields.insert(name.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
