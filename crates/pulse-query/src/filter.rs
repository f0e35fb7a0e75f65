use pulse_types::{TimeSeriesFilter, TimeSeriesPoint};

/// 对查询结果应用字段过滤
///
/// 只保留过滤器中列出的字段；过滤后字段为空的点整体丢弃，
/// 不会以空对象的形式出现在结果里。该操作是幂等的。
pub fn apply(points: Vec<TimeSeriesPoint>, filter: &TimeSeriesFilter) -> Vec<TimeSeriesPoint> {
    points
        .into_iter()
        .filter_map(|mut point| {
            point.fields.retain(|name, _| filter.contains(name));
            if point.fields.is_empty() {
                None
            } else {
                Some(point)
            }
        })
        .collect()
}
