use chrono::{DateTime, Utc};
use pulse_types::{FieldReduction, Granularity, SeriesSchema, TimeSeriesPoint};
use std::collections::{BTreeMap, HashMap};

/// 单字段聚合累加器
#[derive(Debug, Clone)]
struct FieldAccumulator {
    sum: f64,
    count: u64,
    min: f64,
    max: f64,
    last: f64,
}

impl FieldAccumulator {
    fn new(value: f64) -> Self {
        Self {
            sum: value,
            count: 1,
            min: value,
            max: value,
            last: value,
        }
    }

    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
        self.last = value;
    }

    fn reduce(&self, reduction: FieldReduction) -> f64 {
        match reduction {
            FieldReduction::Sum => self.sum,
            FieldReduction::Last => self.last,
            FieldReduction::Avg => self.sum / self.count as f64,
            FieldReduction::Min => self.min,
            FieldReduction::Max => self.max,
        }
    }
}

/// 将分钟级原始点聚合到目标粒度
///
/// 结果按桶起始时间升序，桶内同名字段合并，因此无重复时间戳。
/// 增量路径（含 Month）按序列模式中声明的每字段聚合方式折叠；
/// 快照路径（MonthSnapshot）对所有字段取桶内最后值，
/// 两条路径永远不共用聚合函数。
pub fn aggregate(
    mut points: Vec<TimeSeriesPoint>,
    granularity: Granularity,
    schema: &SeriesSchema,
) -> Vec<TimeSeriesPoint> {
    points.sort_by_key(|p| p.timestamp);

    let mut buckets: BTreeMap<DateTime<Utc>, HashMap<String, FieldAccumulator>> = BTreeMap::new();
    for point in points {
        let bucket = buckets
            .entry(granularity.bucket_start(point.timestamp))
            .or_default();
        for (name, value) in point.fields {
            match bucket.get_mut(&name) {
                Some(acc) => acc.push(value),
                None => {
                    bucket.insert(name, FieldAccumulator::new(value));
                }
            }
        }
    }

    buckets
        .into_iter()
        .map(|(timestamp, accumulators)| {
            let fields = accumulators
                .into_iter()
                .map(|(name, acc)| {
                    let reduction = if granularity.is_snapshot() {
                        FieldReduction::Last
                    } else {
                        schema.reduction(&name)
                    };
                    let value = acc.reduce(reduction);
                    (name, value)
                })
                .collect();
            TimeSeriesPoint { timestamp, fields }
        })
        .collect()
}
