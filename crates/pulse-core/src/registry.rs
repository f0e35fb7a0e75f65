use pulse_types::{SeriesKey, SeriesSchema};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::info;

/// 序列注册表
///
/// 查询与写入之前必须注册序列及其聚合模式；
/// 未注册的序列一律以 UnknownSeries 拒绝。
pub struct SeriesRegistry {
    series: RwLock<HashMap<SeriesKey, SeriesSchema>>,
}

impl SeriesRegistry {
    pub fn new() -> Self {
        Self {
            series: RwLock::new(HashMap::new()),
        }
    }

    /// 注册序列（重复注册覆盖旧模式）
    pub async fn register(&self, key: SeriesKey, schema: SeriesSchema) {
        let mut series = self.series.write().await;
        series.insert(key.clone(), schema);
        info!(series = %key, "Series registered");
    }

    /// 按完整键查找模式
    pub async fn schema(&self, key: &SeriesKey) -> Option<SeriesSchema> {
        let series = self.series.read().await;
        series.get(key).cloned()
    }

    /// 仅按名称解析序列（兼容旧的 name-only 接口）
    ///
    /// 优先匹配无 kind 的键；否则要求该名称下只注册了一个 kind，
    /// 名称歧义时返回 None，由调用方按未知序列处理。
    pub async fn resolve_name(&self, name: &str) -> Option<(SeriesKey, SeriesSchema)> {
        let series = self.series.read().await;

        let bare = SeriesKey::new(name);
        if let Some(schema) = series.get(&bare) {
            return Some((bare, schema.clone()));
        }

        let mut matches = series.iter().filter(|(key, _)| key.name == name);
        match (matches.next(), matches.next()) {
            (Some((key, schema)), None) => Some((key.clone(), schema.clone())),
            _ => None,
        }
    }

    pub async fn contains(&self, key: &SeriesKey) -> bool {
        let series = self.series.read().await;
        series.contains_key(key)
    }

    /// 列出所有已注册的序列键
    pub async fn list(&self) -> Vec<SeriesKey> {
        let series = self.series.read().await;
        series.keys().cloned().collect()
    }
}

impl Default for SeriesRegistry {
    fn default() -> Self {
        Self::new()
    }
}
