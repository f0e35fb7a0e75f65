use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// 查询粒度
///
/// 决定时间桶的宽度；Month 与 MonthSnapshot 共享桶宽，
/// 但分别走增量聚合与月末快照两条查询路径。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Minute,
    Hour,
    Day,
    Month,
    MonthSnapshot,
    Year,
}

impl Granularity {
    /// 时间戳所属桶的起始时间（UTC，向下取整）
    pub fn bucket_start(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let naive = ts.naive_utc();
        let floored = match self {
            Granularity::Minute => naive.date().and_hms_opt(naive.hour(), naive.minute(), 0),
            Granularity::Hour => naive.date().and_hms_opt(naive.hour(), 0, 0),
            Granularity::Day => naive.date().and_hms_opt(0, 0, 0),
            Granularity::Month | Granularity::MonthSnapshot => naive
                .date()
                .with_day(1)
                .and_then(|d| d.and_hms_opt(0, 0, 0)),
            Granularity::Year => {
                NaiveDate::from_ymd_opt(naive.year(), 1, 1).and_then(|d| d.and_hms_opt(0, 0, 0))
            }
        };

        match floored {
            Some(start) => DateTime::from_naive_utc_and_offset(start, Utc),
            // 组件均来自合法时间戳，这里实际不可达
            None => ts,
        }
    }

    /// 是否为快照粒度（取区间末状态而非区间内增量）
    pub fn is_snapshot(&self) -> bool {
        matches!(self, Granularity::MonthSnapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_minute_floor() {
        assert_eq!(
            Granularity::Minute.bucket_start(ts(2024, 3, 15, 10, 42, 37)),
            ts(2024, 3, 15, 10, 42, 0)
        );
    }

    #[test]
    fn test_hour_and_day_floor() {
        let t = ts(2024, 3, 15, 10, 42, 37);
        assert_eq!(Granularity::Hour.bucket_start(t), ts(2024, 3, 15, 10, 0, 0));
        assert_eq!(Granularity::Day.bucket_start(t), ts(2024, 3, 15, 0, 0, 0));
    }

    #[test]
    fn test_month_and_year_floor() {
        let t = ts(2024, 3, 15, 10, 42, 37);
        assert_eq!(Granularity::Month.bucket_start(t), ts(2024, 3, 1, 0, 0, 0));
        assert_eq!(
            Granularity::MonthSnapshot.bucket_start(t),
            ts(2024, 3, 1, 0, 0, 0)
        );
        assert_eq!(Granularity::Year.bucket_start(t), ts(2024, 1, 1, 0, 0, 0));
    }

    #[test]
    fn test_snapshot_flag() {
        assert!(Granularity::MonthSnapshot.is_snapshot());
        assert!(!Granularity::Month.is_snapshot());
        assert!(!Granularity::Minute.is_snapshot());
    }
}
