use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 字段聚合方式
///
/// 计数类字段声明 Sum，状态类字段声明 Last。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldReduction {
    Sum,
    Last,
    Avg,
    Min,
    Max,
}

/// 序列模式
///
/// 注册序列时声明每个字段在桶聚合中使用的聚合方式；
/// 未声明的字段使用 default_reduction。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesSchema {
    pub reductions: HashMap<String, FieldReduction>,
    pub default_reduction: FieldReduction,
}

impl Default for SeriesSchema {
    fn default() -> Self {
        Self {
            reductions: HashMap::new(),
            default_reduction: FieldReduction::Last,
        }
    }
}

impl SeriesSchema {
    pub fn new(default_reduction: FieldReduction) -> Self {
        Self {
            reductions: HashMap::new(),
            default_reduction,
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, reduction: FieldReduction) -> Self {
        self.reductions.insert(name.into(), reduction);
        self
    }

    /// 字段的生效聚合方式
    pub fn reduction(&self, field: &str) -> FieldReduction {
        self.reductions
            .get(field)
            .copied()
            .unwrap_or(self.default_reduction)
    }
}
