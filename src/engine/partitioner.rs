// ==========================================
// 餐饮备餐聚合引擎 - 营业日 / 服务时段划分
// ==========================================
// 职责:
//   day_key_of  → 营业日 YYYY-MM-DD（本地日历日）
//   sort_time_of → 排序时间戳（毫秒，缺失为 0 排最前）
//   bucket_of   → 服务时段（按本地小时）
// 红线: 无状态、无 I/O、不抛错; 时区通过泛型注入
// ==========================================

use crate::domain::order::Order;
use crate::domain::types::ServiceBucket;
use crate::engine::clock::Clock;
use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc,
};
use std::collections::HashMap;
use tracing::debug;

/// 营业日键（YYYY-MM-DD）
pub type DayKey = String;

/// 无时区时间串的可接受格式
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ==========================================
// DayPartitioner
// ==========================================
#[derive(Debug, Clone)]
pub struct DayPartitioner<Tz: TimeZone> {
    tz: Tz,
}

impl DayPartitioner<Local> {
    /// 使用系统本地时区
    pub fn local() -> Self {
        Self::new(Local)
    }
}

impl<Tz: TimeZone> DayPartitioner<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    // ==========================================
    // 时间解析
    // ==========================================

    /// 解析时间串为本地时间
    ///
    /// 支持:
    /// - 纯数字: 毫秒时间戳
    /// - RFC 3339（带 Z 或偏移）: 换算到本地时区
    /// - 无偏移日期时间: 视为本地时间
    /// - 纯日期 YYYY-MM-DD: 本地中午 12:00（规避夏令时切换）
    pub fn parse_timestamp(&self, raw: &str) -> Option<DateTime<Tz>> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if is_epoch_millis(s) {
            let ms = s.parse::<i64>().ok()?;
            return Utc
                .timestamp_millis_opt(ms)
                .single()
                .map(|dt| dt.with_timezone(&self.tz));
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&self.tz));
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                return self.resolve_local(&naive);
            }
        }

        if is_date_only(s) {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
            let noon = date.and_hms_opt(12, 0, 0)?;
            return self.resolve_local(&noon);
        }

        None
    }

    /// 本地时间 → 带时区时间
    ///
    /// 重复时刻取较早者; 夏令时跳过的时刻顺延一小时
    fn resolve_local(&self, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
        self.tz.from_local_datetime(naive).earliest().or_else(|| {
            let shifted = *naive + Duration::hours(1);
            self.tz.from_local_datetime(&shifted).earliest()
        })
    }

    // ==========================================
    // 单订单判定
    // ==========================================

    /// 营业日键
    ///
    /// 取值顺序: eventDate → pickupTime → pickupAt → scheduledFor → readyAt → createdAt
    /// 以 YYYY-MM-DD 开头的值直接截取前缀，避免时区换算导致跨日
    pub fn day_key_of(&self, order: &Order) -> Option<DayKey> {
        let raw = order.schedule.business_day_raw()?;
        if let Some(prefix) = date_prefix(raw) {
            return Some(prefix.to_string());
        }
        self.parse_timestamp(raw).map(|dt| format_day_key(dt.date_naive()))
    }

    /// 计划时间（pickupTime → pickupAt → scheduledFor → readyAt → createdAt → eventDate）
    pub fn scheduled_time(&self, order: &Order) -> Option<DateTime<Tz>> {
        let raw = order.schedule.sort_time_raw()?;
        self.parse_timestamp(raw)
    }

    /// 排序时间（毫秒）；缺失或无法解析返回 0
    pub fn sort_time_of(&self, order: &Order) -> i64 {
        self.scheduled_time(order)
            .map(|dt| dt.timestamp_millis())
            .unwrap_or(0)
    }

    /// 服务时段
    pub fn bucket_of(&self, order: &Order) -> ServiceBucket {
        match self.scheduled_time(order) {
            Some(dt) => ServiceBucket::from_hour(dt.hour()),
            None => ServiceBucket::Unscheduled,
        }
    }

    // ==========================================
    // 集合操作
    // ==========================================

    /// 今日营业日键
    pub fn today_key(&self, clock: &dyn Clock) -> DayKey {
        format_day_key(self.today(clock))
    }

    pub fn today(&self, clock: &dyn Clock) -> NaiveDate {
        clock.now().with_timezone(&self.tz).date_naive()
    }

    /// 指定营业日的订单，按排序时间升序（稳定）
    pub fn orders_for_day<'a>(&self, orders: &'a [Order], day_key: &str) -> Vec<&'a Order> {
        let mut selected: Vec<&Order> = orders
            .iter()
            .filter(|o| self.day_key_of(o).as_deref() == Some(day_key))
            .collect();
        selected.sort_by_key(|o| self.sort_time_of(o));
        debug!(day_key, total = orders.len(), selected = selected.len(), "营业日筛选完成");
        selected
    }

    /// 按服务时段分组
    ///
    /// 五个时段按固定顺序全部返回; 组内按计划时间升序，无时间的排最后
    pub fn group_by_bucket<'a>(&self, orders: &[&'a Order]) -> Vec<(ServiceBucket, Vec<&'a Order>)> {
        let mut groups: HashMap<ServiceBucket, Vec<(Option<i64>, &'a Order)>> = HashMap::new();
        for &order in orders {
            let scheduled = self.scheduled_time(order);
            let bucket = scheduled
                .as_ref()
                .map(|dt| ServiceBucket::from_hour(dt.hour()))
                .unwrap_or(ServiceBucket::Unscheduled);
            let time = scheduled.map(|dt| dt.timestamp_millis());
            groups.entry(bucket).or_default().push((time, order));
        }

        ServiceBucket::ALL
            .iter()
            .map(|bucket| {
                let mut entries = groups.remove(bucket).unwrap_or_default();
                entries.sort_by_key(|(time, _)| time.unwrap_or(i64::MAX));
                (*bucket, entries.into_iter().map(|(_, o)| o).collect())
            })
            .collect()
    }

    /// 周一至周日七天（包含 today）
    pub fn week_days(&self, today: NaiveDate) -> Vec<NaiveDate> {
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        (0..7).map(|i| monday + Duration::days(i)).collect()
    }

    /// 按营业日分组（仅限给定日期）；组内按排序时间升序
    pub fn group_by_day<'a>(
        &self,
        orders: &'a [Order],
        days: &[NaiveDate],
    ) -> Vec<(NaiveDate, Vec<&'a Order>)> {
        let mut groups: HashMap<DayKey, Vec<&'a Order>> = HashMap::new();
        for order in orders {
            if let Some(key) = self.day_key_of(order) {
                groups.entry(key).or_default().push(order);
            }
        }

        days.iter()
            .map(|day| {
                let mut entries = groups.remove(&format_day_key(*day)).unwrap_or_default();
                entries.sort_by_key(|o| self.sort_time_of(o));
                (*day, entries)
            })
            .collect()
    }
}

pub fn format_day_key(date: NaiveDate) -> DayKey {
    date.format("%Y-%m-%d").to_string()
}

/// 值以 YYYY-MM-DD 开头时返回该前缀
fn date_prefix(raw: &str) -> Option<&str> {
    let prefix = raw.get(..10)?;
    let bytes = prefix.as_bytes();
    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    shape_ok.then_some(prefix)
}

fn is_date_only(s: &str) -> bool {
    s.len() == 10 && date_prefix(s).is_some()
}

fn is_epoch_millis(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderSchedule;
    use crate::engine::clock::FixedClock;
    use chrono::{FixedOffset, LocalResult};

    // UTC-5（美东标准时间）
    fn partitioner() -> DayPartitioner<FixedOffset> {
        DayPartitioner::new(FixedOffset::west_opt(5 * 3600).unwrap())
    }

    fn order_with(schedule: OrderSchedule) -> Order {
        Order {
            id: "o".to_string(),
            schedule,
            ..Default::default()
        }
    }

    fn pickup(raw: &str) -> Order {
        order_with(OrderSchedule {
            pickup_time: Some(raw.to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_day_key_prefix_extraction() {
        let p = partitioner();
        assert_eq!(p.day_key_of(&pickup("2026-01-13")), Some("2026-01-13".to_string()));
        assert_eq!(
            p.day_key_of(&pickup("2026-01-13T16:30:00.000Z")),
            Some("2026-01-13".to_string())
        );
        // 前缀规则优先于时区换算（UTC 凌晨仍记为当天）
        assert_eq!(
            p.day_key_of(&pickup("2026-01-14T02:00:00Z")),
            Some("2026-01-14".to_string())
        );
    }

    #[test]
    fn test_day_key_epoch_millis_uses_local_date() {
        // 2026-01-14T02:00:00Z = 2026-01-13 21:00 UTC-5
        let ms = Utc.with_ymd_and_hms(2026, 1, 14, 2, 0, 0).unwrap().timestamp_millis();
        let p = partitioner();
        assert_eq!(p.day_key_of(&pickup(&ms.to_string())), Some("2026-01-13".to_string()));
    }

    #[test]
    fn test_day_key_prefers_event_date() {
        let order = order_with(OrderSchedule {
            event_date: Some("2026-01-20".to_string()),
            pickup_time: Some("2026-01-21T10:00:00".to_string()),
            created_at: Some("2026-01-02T10:00:00Z".to_string()),
            ..Default::default()
        });
        assert_eq!(partitioner().day_key_of(&order), Some("2026-01-20".to_string()));
    }

    #[test]
    fn test_missing_dates() {
        let p = partitioner();
        let order = Order::default();
        assert_eq!(p.day_key_of(&order), None);
        assert_eq!(p.sort_time_of(&order), 0);
        assert_eq!(p.bucket_of(&order), ServiceBucket::Unscheduled);
    }

    #[test]
    fn test_unparseable_dates() {
        let p = partitioner();
        let order = pickup("next tuesday");
        assert_eq!(p.day_key_of(&order), None);
        assert_eq!(p.sort_time_of(&order), 0);
        assert_eq!(p.bucket_of(&order), ServiceBucket::Unscheduled);
    }

    #[test]
    fn test_date_only_sorts_at_local_noon() {
        let p = partitioner();
        let expected = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 1, 13, 12, 0, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(p.sort_time_of(&pickup("2026-01-13")), expected);
        assert_eq!(p.bucket_of(&pickup("2026-01-13")), ServiceBucket::Lunch);
    }

    #[test]
    fn test_bucket_boundaries_local_hour() {
        let p = partitioner();
        assert_eq!(p.bucket_of(&pickup("2026-01-13T16:59:00")), ServiceBucket::Afternoon);
        assert_eq!(p.bucket_of(&pickup("2026-01-13T17:00:00")), ServiceBucket::Dinner);
        assert_eq!(p.bucket_of(&pickup("2026-01-13T04:59:00")), ServiceBucket::Dinner);
        assert_eq!(p.bucket_of(&pickup("2026-01-13T05:00:00")), ServiceBucket::Morning);
        assert_eq!(p.bucket_of(&pickup("2026-01-13 11:00")), ServiceBucket::Lunch);
    }

    #[test]
    fn test_bucket_converts_utc_to_local() {
        // 16:30Z = 11:30 本地
        let p = partitioner();
        assert_eq!(p.bucket_of(&pickup("2026-01-13T16:30:00.000Z")), ServiceBucket::Lunch);
    }

    #[test]
    fn test_orders_for_day_sorted() {
        let p = partitioner();
        let orders = vec![
            Order { id: "late".into(), ..pickup("2026-01-13T18:00:00") },
            Order { id: "other-day".into(), ..pickup("2026-01-14T09:00:00") },
            Order { id: "early".into(), ..pickup("2026-01-13T08:00:00") },
        ];
        let ids: Vec<&str> = p
            .orders_for_day(&orders, "2026-01-13")
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_group_by_bucket_fixed_order() {
        let p = partitioner();
        let orders = vec![
            Order { id: "d2".into(), ..pickup("2026-01-13T19:00:00") },
            Order { id: "none".into(), ..Default::default() },
            Order { id: "d1".into(), ..pickup("2026-01-13T17:30:00") },
            Order { id: "m".into(), ..pickup("2026-01-13T07:00:00") },
        ];
        let refs: Vec<&Order> = orders.iter().collect();
        let groups = p.group_by_bucket(&refs);

        let buckets: Vec<ServiceBucket> = groups.iter().map(|(b, _)| *b).collect();
        assert_eq!(buckets, ServiceBucket::ALL.to_vec());

        let ids = |b: usize| -> Vec<&str> { groups[b].1.iter().map(|o| o.id.as_str()).collect() };
        assert_eq!(ids(0), vec!["m"]);
        assert!(ids(1).is_empty());
        assert_eq!(ids(3), vec!["d1", "d2"]);
        assert_eq!(ids(4), vec!["none"]);
    }

    #[test]
    fn test_week_days_start_monday() {
        let p = partitioner();
        // 2026-01-15 为周四
        let days = p.week_days(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        assert_eq!(days[6], NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());

        // 周日属于本周
        let days = p.week_days(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
    }

    #[test]
    fn test_group_by_day_drops_outside_week() {
        let p = partitioner();
        let orders = vec![
            Order { id: "b".into(), ..pickup("2026-01-12T15:00:00") },
            Order { id: "a".into(), ..pickup("2026-01-12T09:00:00") },
            Order { id: "far".into(), ..pickup("2026-02-01T09:00:00") },
            Order { id: "none".into(), ..Default::default() },
        ];
        let days = p.week_days(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        let groups = p.group_by_day(&orders, &days);

        assert_eq!(groups.len(), 7);
        let monday: Vec<&str> = groups[0].1.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(monday, vec!["a", "b"]);
        assert_eq!(groups.iter().map(|(_, o)| o.len()).sum::<usize>(), 2);
    }

    // 2026-03-08 02:00 本地由 UTC-5 跳到 UTC-4
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn standard() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn daylight() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }

        fn switch_local() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2026, 3, 8).unwrap().and_hms_opt(2, 0, 0).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let switch = Self::switch_local();
            if *local < switch {
                LocalResult::Single(Self::standard())
            } else if *local < switch + Duration::hours(1) {
                LocalResult::None
            } else {
                LocalResult::Single(Self::daylight())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch_local() + Duration::hours(5) {
                Self::standard()
            } else {
                Self::daylight()
            }
        }
    }

    #[test]
    fn test_spring_forward_gap_shifts_forward() {
        let p = DayPartitioner::new(SpringForward);
        let order = pickup("2026-03-08T02:30:00");

        let dt = p.parse_timestamp("2026-03-08T02:30:00").unwrap();
        assert_eq!((dt.hour(), dt.minute()), (3, 30));
        assert_eq!(
            dt.timestamp_millis(),
            Utc.with_ymd_and_hms(2026, 3, 8, 7, 30, 0).unwrap().timestamp_millis()
        );
        assert_eq!(p.day_key_of(&order), Some("2026-03-08".to_string()));
        assert_ne!(p.sort_time_of(&order), 0);
        assert_eq!(p.bucket_of(&order), ServiceBucket::Dinner);

        // 跳变前后的正常时刻不受影响
        let before = p.parse_timestamp("2026-03-08T01:30:00").unwrap();
        assert_eq!(before.hour(), 1);
    }

    #[test]
    fn test_today_key_uses_local_zone() {
        // 2026-01-14T03:00Z = 2026-01-13 22:00 本地
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 14, 3, 0, 0).unwrap());
        assert_eq!(partitioner().today_key(&clock), "2026-01-13");
    }
}
